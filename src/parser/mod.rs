//! Command-line parsing for completion
//!
//! This module provides the text-level building blocks of the completion
//! system:
//! - `line_lexer`: splits a partially typed line into raw words up to the cursor
//! - `dequote`: recovers the literal value of a raw word

pub mod dequote;
pub mod line_lexer;

pub use dequote::dequote;
pub use line_lexer::{
    CharClasses, DEFAULT_DELIMITERS, DEFAULT_SEPARATORS, LexerState, LineLexer, clamp_cursor,
    split_line,
};
