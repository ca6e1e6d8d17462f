//! Completer for reedline - provides completion suggestions

use std::fs;
use std::path::Path;

use reedline::{Completer, Span, Suggestion};
use tracing::debug;

use super::completion::{CompletionEngine, CompletionResult, Fallback};

/// Picocom command line completer for reedline
pub struct PicocomCompleter {
    /// Completion engine for context-sensitive suggestions
    completion_engine: CompletionEngine,
}

impl PicocomCompleter {
    /// Create a new picocom completer
    ///
    /// # Arguments
    /// * `completion_engine` - Engine producing candidates and display hints
    pub fn new(completion_engine: CompletionEngine) -> Self {
        Self { completion_engine }
    }

    /// Replacement candidates for a result, running the fallback when needed
    fn candidates(result: &CompletionResult, line: &str, pos: usize) -> Vec<String> {
        match result.hints.fallback {
            Some(Fallback::Files) if result.candidates.is_empty() => {
                complete_path(line.get(result.start..pos).unwrap_or(""))
            }
            Some(Fallback::Commands) => {
                debug!("Command name completion is left to the shell");
                Vec::new()
            }
            _ => result.candidates.clone(),
        }
    }
}

impl Completer for PicocomCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let result = self.completion_engine.complete(line, pos);
        let end = pos.min(line.len()).max(result.start);

        Self::candidates(&result, line, end)
            .into_iter()
            .map(|value| Suggestion {
                append_whitespace: !result.hints.no_space && !value.ends_with('/'),
                value,
                span: Span::new(result.start, end),
                ..Default::default()
            })
            .collect()
    }
}

/// Complete a file path prefix against the file system
///
/// Directories get a trailing `/`. Hidden entries are listed only when the
/// prefix names them explicitly.
fn complete_path(prefix: &str) -> Vec<String> {
    let (dir, name) = match prefix.rfind('/') {
        Some(idx) => prefix.split_at(idx + 1),
        None => ("", prefix),
    };
    let search = if dir.is_empty() { Path::new(".") } else { Path::new(dir) };

    let entries = match fs::read_dir(search) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", search.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.starts_with(name) || (file_name.starts_with('.') && !name.starts_with('.')) {
                return None;
            }
            let suffix = if entry.path().is_dir() { "/" } else { "" };
            Some(format!("{dir}{file_name}{suffix}"))
        })
        .collect();

    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionConfig;
    use crate::parser::LineLexer;
    use crate::repl::completion::PicocomCandidateProvider;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn create_test_completer() -> PicocomCompleter {
        let config = CompletionConfig {
            device_dir: PathBuf::from("/nonexistent/picocomp/dev"),
            ..CompletionConfig::default()
        };
        let provider = Arc::new(PicocomCandidateProvider::new(&config));
        PicocomCompleter::new(CompletionEngine::new(LineLexer::default(), provider))
    }

    #[test]
    fn test_complete_options() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("picocom --pa", 12);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "--parity");
        assert!(suggestions[0].append_whitespace);
    }

    #[test]
    fn test_span_position() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("picocom --imap crlf,ig", 22);

        assert!(!suggestions.is_empty());
        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 15);
            assert_eq!(suggestion.span.end, 22);
            assert!(!suggestion.append_whitespace);
        }
    }

    #[test]
    fn test_file_fallback_lists_directory() {
        let dir = std::env::temp_dir().join(format!("picocomp-completer-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("logs")).unwrap();
        fs::File::create(dir.join("session.log")).unwrap();

        let prefix = format!("{}/", dir.display());
        let line = format!("picocom -g {prefix}");
        let mut completer = create_test_completer();
        let values: Vec<String> = completer
            .complete(&line, line.len())
            .into_iter()
            .map(|s| s.value)
            .collect();

        assert_eq!(values, vec![format!("{prefix}logs/"), format!("{prefix}session.log")]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_complete_path_missing_directory() {
        assert!(complete_path("/nonexistent/picocomp/x").is_empty());
    }
}
