//! Completion context definitions
//!
//! This module defines the completion context types that represent what kind of
//! completion should be provided based on the current input state.

use super::options::ArgKind;

/// Represents the type of completion needed based on the current context
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionContext {
    /// Complete option names
    Option {
        /// Prefix to filter options
        prefix: String,
    },

    /// Complete one value from a fixed set (baud rate, parity, ...)
    Value {
        /// Argument kind whose value set applies
        kind: ArgKind,
        /// Literal prefix to filter values
        prefix: String,
    },

    /// Complete the next entry of a comma-separated mapping list
    MapList {
        /// Raw (still quoted) list typed so far
        raw: String,
    },

    /// Complete serial device paths
    Device {
        /// Literal prefix to filter devices
        prefix: String,
    },

    /// Let the host complete file names
    File,

    /// Let the host complete command names
    Command,

    /// No completion available
    None,
}

impl CompletionContext {
    /// Create an option completion context
    pub fn option(prefix: impl Into<String>) -> Self {
        Self::Option {
            prefix: prefix.into(),
        }
    }

    /// Create a value completion context
    pub fn value(kind: ArgKind, prefix: impl Into<String>) -> Self {
        Self::Value {
            kind,
            prefix: prefix.into(),
        }
    }

    /// Create a map list completion context
    pub fn map_list(raw: impl Into<String>) -> Self {
        Self::MapList { raw: raw.into() }
    }

    /// Create a device completion context
    pub fn device(prefix: impl Into<String>) -> Self {
        Self::Device {
            prefix: prefix.into(),
        }
    }

    /// Build the context for the argument of an option
    ///
    /// # Arguments
    /// * `kind` - Argument kind of the option
    /// * `raw` - Raw text typed for the argument so far
    /// * `literal` - Dequoted form of `raw`
    pub fn for_argument(kind: ArgKind, raw: &str, literal: &str) -> Self {
        match kind {
            ArgKind::MapList => Self::map_list(raw),
            ArgKind::File => Self::File,
            ArgKind::Command => Self::Command,
            ArgKind::Flag | ArgKind::Free => Self::None,
            kind => Self::value(kind, literal),
        }
    }

    /// Check if this is a None context
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
