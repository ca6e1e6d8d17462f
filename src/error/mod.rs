//! Error handling module for picocomp.
//!
//! This module provides the crate-wide error type and the more specific
//! configuration error kinds it wraps.
//!
//! # Example
//!
//! ```rust,no_run
//! use picocomp::config::Config;
//! use picocomp::error::Result;
//!
//! fn load() -> Result<Config> {
//!     let config = Config::load_from_file(None)?;
//!     config.validate()?;
//!     Ok(config)
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, PicocompError, Result};
