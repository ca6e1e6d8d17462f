//! Completion system for picocom command lines
//!
//! This module provides a context-sensitive completion system for picocom
//! invocations. The system is built on a finite state machine (FSM) approach
//! that is error-tolerant and works with incomplete input.
//!
//! # Architecture
//!
//! The completion system consists of several components:
//!
//! - **WordStream**: Wraps the lexer's words with cursor awareness
//! - **FSM**: Determines the completion context based on word sequence
//! - **Context**: Standardized representation of what to complete
//! - **Options**: Static picocom option and value tables
//! - **Provider**: Fetches completion candidates (options, values, devices)
//! - **List filter**: Drops values already present in a comma-separated list
//! - **Engine**: Orchestrates the entire completion flow
//!
//! # Examples
//!
//! ```no_run
//! use picocomp::config::CompletionConfig;
//! use picocomp::parser::LineLexer;
//! use picocomp::repl::completion::{CompletionEngine, PicocomCandidateProvider};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(PicocomCandidateProvider::new(&CompletionConfig::default()));
//! let engine = CompletionEngine::new(LineLexer::default(), provider);
//!
//! // Complete "picocom -b 11" with cursor at the end
//! let result = engine.complete("picocom -b 11", 13);
//! // Returns baud rates starting with "11"
//! ```

mod context;
mod engine;
mod fsm;
mod list_filter;
pub mod options;
mod provider;
mod word_stream;

pub use context::CompletionContext;
pub use engine::{CompletionEngine, CompletionResult, DisplayHints, Fallback};
pub use fsm::CompletionState;
pub use list_filter::filter_chosen;
pub use provider::{CandidateProvider, PicocomCandidateProvider};
pub use word_stream::WordStream;
