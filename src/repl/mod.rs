//! Interactive layer and completion for picocom command lines
//!
//! This module provides:
//! - The completion engine that turns a line and cursor into candidates
//! - A reedline completer wrapping the engine
//! - A small line editor for trying completion interactively

mod completer;
pub mod completion;
mod engine;
mod prompt;

pub use completer::PicocomCompleter;
pub use engine::{ReplEngine, describe_words};
pub use prompt::PicocompPrompt;
