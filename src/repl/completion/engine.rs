//! Completion engine - orchestrates the completion flow
//!
//! This module provides the main completion engine that ties together all the
//! completion components: lexing, FSM, context determination, and candidate fetching.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::context::CompletionContext;
use super::fsm::CompletionState;
use super::list_filter::filter_chosen;
use super::provider::CandidateProvider;
use super::word_stream::WordStream;
use crate::parser::{LineLexer, dequote};

/// What the host should do when it has no candidates of its own to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// Complete file names
    Files,
    /// Complete command names
    Commands,
}

/// Presentation hints for the host's completion machinery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisplayHints {
    /// Do not append a space after accepting a candidate
    pub no_space: bool,
    /// Keep candidates in the given order
    pub no_sort: bool,
    /// Host-side completion to run instead of (or in addition to) ours
    pub fallback: Option<Fallback>,
}

/// Result of one completion request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionResult {
    /// Byte offset where the candidates replace the input
    pub start: usize,
    /// Candidate replacements, in presentation order
    pub candidates: Vec<String>,
    /// Presentation hints
    pub hints: DisplayHints,
}

impl CompletionResult {
    fn new(start: usize, candidates: Vec<String>) -> Self {
        Self {
            start,
            candidates,
            hints: DisplayHints::default(),
        }
    }

    fn fallback(start: usize, fallback: Fallback) -> Self {
        let mut result = Self::new(start, Vec::new());
        result.hints.fallback = Some(fallback);
        result
    }
}

/// Main completion engine
pub struct CompletionEngine {
    /// Lexer used to split the input line
    lexer: LineLexer,
    /// Candidate provider for fetching suggestions
    provider: Arc<dyn CandidateProvider>,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `lexer` - Lexer configured with the delimiter and separator sets
    /// * `provider` - Candidate provider for fetching suggestions
    pub fn new(lexer: LineLexer, provider: Arc<dyn CandidateProvider>) -> Self {
        Self { lexer, provider }
    }

    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `CompletionResult` - Replacement start, candidates and display hints
    pub fn complete(&self, line: &str, pos: usize) -> CompletionResult {
        // 1. Split the line up to the cursor
        let stream = WordStream::from_line(&self.lexer, line, pos);

        // 2. Run FSM on words before the cursor
        let state = CompletionState::run(stream.words_before_cursor());

        // 3. Convert state to completion context
        let context = state.to_context(&stream);
        debug!(
            "Completing {:?} in state {:?} as {:?}",
            stream.current_word(),
            state,
            context
        );

        // 4. Fetch candidates based on context
        self.fetch_candidates(&context, &stream)
    }

    /// Fetch candidates based on completion context
    fn fetch_candidates(&self, context: &CompletionContext, stream: &WordStream) -> CompletionResult {
        let start = stream.completion_start();

        match context {
            CompletionContext::Option { prefix } => {
                CompletionResult::new(start, self.provider.options(prefix))
            }
            CompletionContext::Value { kind, prefix } => {
                let mut result = CompletionResult::new(start, self.provider.values(*kind, prefix));
                result.hints.no_sort = true;
                result
            }
            CompletionContext::MapList { raw } => {
                let mut result = CompletionResult::new(start, self.complete_map_list(raw));
                result.hints.no_space = true;
                result.hints.no_sort = true;
                result
            }
            CompletionContext::Device { prefix } => {
                let devices = self.provider.devices(prefix);
                if devices.is_empty() {
                    CompletionResult::fallback(start, Fallback::Files)
                } else {
                    CompletionResult::new(start, devices)
                }
            }
            CompletionContext::File => CompletionResult::fallback(start, Fallback::Files),
            CompletionContext::Command => CompletionResult::fallback(start, Fallback::Commands),
            CompletionContext::None => CompletionResult::new(start, Vec::new()),
        }
    }

    /// Complete the last entry of a comma-separated mapping list
    ///
    /// The raw word is split at its last comma: names already listed before
    /// it are dropped, the rest are matched against the text after it, and
    /// each candidate repeats the raw head so it replaces the whole word.
    fn complete_map_list(&self, raw: &str) -> Vec<String> {
        let (head, fragment) = match raw.rfind(',') {
            Some(idx) => raw.split_at(idx + 1),
            None => ("", raw),
        };
        let fragment = dequote(fragment);

        filter_chosen(head, &self.provider.map_names())
            .into_iter()
            .filter(|name| name.starts_with(&fragment))
            .map(|name| format!("{head}{name}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionConfig;
    use crate::parser::CharClasses;
    use crate::repl::completion::provider::PicocomCandidateProvider;
    use std::path::PathBuf;

    fn create_test_engine() -> CompletionEngine {
        let config = CompletionConfig {
            device_dir: PathBuf::from("/nonexistent/picocomp/dev"),
            ..CompletionConfig::default()
        };
        let provider = Arc::new(PicocomCandidateProvider::new(&config));
        CompletionEngine::new(LineLexer::default(), provider)
    }

    fn complete(line: &str) -> CompletionResult {
        create_test_engine().complete(line, line.len())
    }

    #[test]
    fn test_complete_options() {
        let result = complete("picocom --ba");

        assert_eq!(result.start, 8);
        assert_eq!(result.candidates, vec!["--baud"]);
        assert_eq!(result.hints, DisplayHints::default());
    }

    #[test]
    fn test_complete_all_options_after_map_list() {
        let result = complete("picocom --imap crlf, -");

        assert_eq!(result.start, 21);
        assert!(result.candidates.contains(&"--baud".to_string()));
        assert!(result.candidates.contains(&"-b".to_string()));
    }

    #[test]
    fn test_complete_baud_rates() {
        let result = complete("picocom -b 11");

        assert_eq!(result.start, 11);
        assert_eq!(result.candidates, vec!["110", "115200", "1152000"]);
        assert!(result.hints.no_sort);
        assert!(!result.hints.no_space);
    }

    #[test]
    fn test_complete_value_after_equals() {
        let result = complete("picocom --parity=");

        assert_eq!(result.start, 17);
        assert_eq!(result.candidates, vec!["o", "e", "n"]);
    }

    #[test]
    fn test_complete_quoted_value() {
        let result = complete("picocom --flow \"h");

        assert_eq!(result.start, 15);
        assert_eq!(result.candidates, vec!["h"]);
    }

    #[test]
    fn test_complete_map_list_first_entry() {
        let result = complete("picocom --imap cr");

        assert_eq!(result.start, 15);
        assert_eq!(result.candidates, vec!["crlf", "crcrlf", "crhex"]);
        assert!(result.hints.no_space);
        assert!(result.hints.no_sort);
    }

    #[test]
    fn test_complete_map_list_skips_chosen() {
        let result = complete("picocom --imap crlf,ig");

        assert_eq!(result.candidates, vec!["crlf,igncr", "crlf,ignlf"]);
    }

    #[test]
    fn test_complete_map_list_after_comma() {
        let result = complete("picocom --emap crlf,crcrlf,igncr,");
        let expected: Vec<String> = crate::repl::completion::options::MAP_NAMES
            .iter()
            .filter(|name| !["crlf", "crcrlf", "igncr"].contains(name))
            .map(|name| format!("crlf,crcrlf,igncr,{name}"))
            .collect();

        assert_eq!(result.candidates, expected);
    }

    #[test]
    fn test_complete_map_list_keeps_quoting() {
        let result = complete("picocom --omap 'crlf,lf");

        assert_eq!(result.start, 15);
        assert_eq!(result.candidates, vec!["'crlf,lfcr", "'crlf,lfcrlf", "'crlf,lfhex"]);
    }

    #[test]
    fn test_complete_map_list_full_entry_completes_itself() {
        let result = complete("picocom --imap crlf,igncr");

        assert_eq!(result.candidates, vec!["crlf,igncr"]);
    }

    #[test]
    fn test_complete_device_falls_back_to_files() {
        let result = complete("picocom -b 9600 /dev/tty");

        assert_eq!(result.start, 16);
        assert!(result.candidates.is_empty());
        assert_eq!(result.hints.fallback, Some(Fallback::Files));
    }

    #[test]
    fn test_complete_logfile_and_commands() {
        assert_eq!(
            complete("picocom --logfile ").hints.fallback,
            Some(Fallback::Files)
        );
        assert_eq!(
            complete("picocom -s ").hints.fallback,
            Some(Fallback::Commands)
        );
    }

    #[test]
    fn test_complete_nothing_for_program_or_free_text() {
        assert_eq!(complete("pico"), CompletionResult::new(0, Vec::new()));
        assert!(complete("picocom -e ").candidates.is_empty());
    }

    #[test]
    fn test_complete_mid_line_cursor() {
        let engine = create_test_engine();
        let result = engine.complete("picocom -d  /dev/ttyS0", 11);

        assert_eq!(result.start, 11);
        assert_eq!(result.candidates, vec!["5", "6", "7", "8"]);
    }

    #[test]
    fn test_custom_separators() {
        let config = CompletionConfig {
            device_dir: PathBuf::from("/nonexistent/picocomp/dev"),
            ..CompletionConfig::default()
        };
        let provider = Arc::new(PicocomCandidateProvider::new(&config));
        let engine = CompletionEngine::new(LineLexer::new(CharClasses::new(" ", "")), provider);

        // Without `=` as a separator, `--baud=` is just an unknown option word
        let result = engine.complete("picocom --baud=", 15);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn test_result_serializes() {
        let result = complete("picocom --imap cr");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["start"], 15);
        assert_eq!(json["hints"]["no_space"], true);
        assert_eq!(json["hints"]["fallback"], serde_json::Value::Null);
    }
}
