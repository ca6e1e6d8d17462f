//! picocomp library
//!
//! Context-sensitive completion for picocom command lines. The core is a
//! shell-aware line lexer that splits a partially typed line up to the
//! cursor, a dequoter that recovers the literal value of a word, and a
//! filter for comma-separated value lists.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and shell integration
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `parser`: Line lexer and dequoter
//! - `repl`: Completion engine and interactive line editor
//!
//! # Example
//!
//! ```
//! use picocomp::parser::{dequote, split_line};
//!
//! let words = split_line("picocom --imap 'crlf,ig", 23);
//! assert_eq!(words, vec!["picocom", "--imap", "'crlf,ig"]);
//! assert_eq!(dequote(&words[2]), "crlf,ig");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use error::{PicocompError, Result};
pub use parser::{LineLexer, dequote, split_line};
pub use repl::ReplEngine;
pub use repl::completion::{CompletionEngine, CompletionResult, filter_chosen};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_imap_scenario() {
        let line = "picocom --imap crlf, -";
        let words = split_line(line, line.len());

        assert_eq!(words[words.len() - 2], "crlf,");
        assert_eq!(words[words.len() - 1], "-");
    }
}
