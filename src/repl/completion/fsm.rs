//! Finite State Machine for completion context determination
//!
//! This module implements a simple FSM that walks through the words before the
//! cursor to determine what kind of completion should be provided. The FSM is:
//! - Error-tolerant (unknown options and stray words keep it in place)
//! - Fast (single pass through the words)
//! - Aware of `--opt value`, `--opt=value` and the `--` end-of-options marker

use super::context::CompletionContext;
use super::options::{ArgKind, END_OF_OPTIONS, find_option};
use super::word_stream::WordStream;

/// FSM states representing different positions in a picocom command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionState {
    /// Nothing seen yet; the next word is the program name
    Start,
    /// Options and the device may follow
    Arguments,
    /// After an option that takes an argument, e.g. `--baud`
    ExpectValue(ArgKind),
    /// After `--option=`
    AfterEquals(ArgKind),
    /// After `--`; only operands may follow
    Operands,
}

impl CompletionState {
    /// Perform state transition based on current state and word
    pub fn next(self, word: &str) -> Self {
        use CompletionState::*;

        match (self, word) {
            // The first word is the program itself
            (Start, _) => Arguments,

            (Operands, _) => Operands,

            // `--baud=9600` arrives as `--baud`, `=`, `9600`
            (ExpectValue(kind), "=") => AfterEquals(kind),
            (ExpectValue(_) | AfterEquals(_), _) => Arguments,

            (Arguments, END_OF_OPTIONS) => Operands,
            (Arguments, word) => match find_option(word) {
                Some(spec) if spec.arg.takes_value() => ExpectValue(spec.arg),
                _ => Arguments,
            },
        }
    }

    /// Run the FSM on a sequence of words
    pub fn run<S: AsRef<str>>(words: &[S]) -> Self {
        words
            .iter()
            .fold(CompletionState::Start, |state, word| state.next(word.as_ref()))
    }

    /// Convert state to completion context
    pub fn to_context(&self, stream: &WordStream) -> CompletionContext {
        use CompletionState::*;

        match self {
            // The host completes the program name
            Start => CompletionContext::None,

            // Right after a stray separator, e.g. a redirection
            Arguments if stream.separator_pending() => CompletionContext::None,

            Arguments if stream.current_prefix().starts_with('-') => {
                CompletionContext::option(stream.current_prefix())
            }

            Arguments | Operands => CompletionContext::device(stream.current_literal()),

            ExpectValue(kind) | AfterEquals(kind) => CompletionContext::for_argument(
                *kind,
                stream.current_prefix(),
                &stream.current_literal(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LineLexer;

    fn context_for(line: &str) -> CompletionContext {
        let stream = WordStream::from_line(&LineLexer::default(), line, line.len());
        CompletionState::run(stream.words_before_cursor()).to_context(&stream)
    }

    #[test]
    fn test_state_start() {
        assert_eq!(CompletionState::run::<&str>(&[]), CompletionState::Start);
        assert_eq!(
            CompletionState::run(&["picocom"]),
            CompletionState::Arguments
        );
    }

    #[test]
    fn test_state_value_option() {
        assert_eq!(
            CompletionState::run(&["picocom", "-b"]),
            CompletionState::ExpectValue(ArgKind::Baud)
        );
        assert_eq!(
            CompletionState::run(&["picocom", "--imap"]),
            CompletionState::ExpectValue(ArgKind::MapList)
        );
    }

    #[test]
    fn test_state_flag_option() {
        assert_eq!(
            CompletionState::run(&["picocom", "--echo"]),
            CompletionState::Arguments
        );
    }

    #[test]
    fn test_state_value_consumed() {
        assert_eq!(
            CompletionState::run(&["picocom", "-b", "9600"]),
            CompletionState::Arguments
        );
        assert_eq!(
            CompletionState::run(&["picocom", "--baud", "=", "9600"]),
            CompletionState::Arguments
        );
    }

    #[test]
    fn test_state_after_equals() {
        assert_eq!(
            CompletionState::run(&["picocom", "--parity", "="]),
            CompletionState::AfterEquals(ArgKind::Parity)
        );
    }

    #[test]
    fn test_state_end_of_options() {
        assert_eq!(
            CompletionState::run(&["picocom", "--", "-b"]),
            CompletionState::Operands
        );
    }

    #[test]
    fn test_value_looking_like_option_is_consumed() {
        assert_eq!(
            CompletionState::run(&["picocom", "-e", "-b"]),
            CompletionState::Arguments
        );
    }

    #[test]
    fn test_context_program_name() {
        assert_eq!(context_for("pico"), CompletionContext::None);
    }

    #[test]
    fn test_context_option() {
        assert_eq!(context_for("picocom --ba"), CompletionContext::option("--ba"));
        assert_eq!(
            context_for("picocom --imap crlf, -"),
            CompletionContext::option("-")
        );
    }

    #[test]
    fn test_context_value() {
        assert_eq!(
            context_for("picocom -b 11"),
            CompletionContext::value(ArgKind::Baud, "11")
        );
        assert_eq!(
            context_for("picocom --flow "),
            CompletionContext::value(ArgKind::Flow, "")
        );
    }

    #[test]
    fn test_context_value_after_equals() {
        assert_eq!(
            context_for("picocom --databits="),
            CompletionContext::value(ArgKind::DataBits, "")
        );
        assert_eq!(
            context_for("picocom --stopbits=1"),
            CompletionContext::value(ArgKind::StopBits, "1")
        );
    }

    #[test]
    fn test_context_quoted_value_is_dequoted() {
        assert_eq!(
            context_for("picocom -y 'e"),
            CompletionContext::value(ArgKind::Parity, "e")
        );
    }

    #[test]
    fn test_context_map_list() {
        assert_eq!(
            context_for("picocom --omap \"crlf,ig"),
            CompletionContext::map_list("\"crlf,ig")
        );
    }

    #[test]
    fn test_context_device() {
        assert_eq!(
            context_for("picocom -b 9600 /dev/tty"),
            CompletionContext::device("/dev/tty")
        );
        assert_eq!(
            context_for("picocom -- -weird"),
            CompletionContext::device("-weird")
        );
    }

    #[test]
    fn test_context_host_fallbacks() {
        assert_eq!(context_for("picocom -g "), CompletionContext::File);
        assert_eq!(context_for("picocom --send-cmd "), CompletionContext::Command);
        assert_eq!(context_for("picocom --escape "), CompletionContext::None);
    }

    #[test]
    fn test_context_stray_separator() {
        assert_eq!(
            context_for("picocom /dev/ttyS0 >"),
            CompletionContext::None
        );
    }
}
