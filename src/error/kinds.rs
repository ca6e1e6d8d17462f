use std::{fmt, io};

/// Crate-wide `Result` type using [`PicocompError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PicocompError>;

/// Top-level error type for picocomp operations.
///
/// Splitting and completion never fail; errors come from the outer
/// surfaces (configuration, terminal, output encoding).
#[derive(Debug)]
pub enum PicocompError {
    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// TOML encoding or decoding errors.
    Toml(String),

    /// JSON encoding errors.
    Json(serde_json::Error),

    /// Interactive line editor errors.
    Repl(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Missing required field.
    MissingField(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Other configuration problem.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PicocompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicocompError::Config(e) => write!(f, "Configuration error: {e}"),
            PicocompError::Io(e) => write!(f, "I/O error: {e}"),
            PicocompError::Toml(msg) => write!(f, "TOML error: {msg}"),
            PicocompError::Json(e) => write!(f, "JSON error: {e}"),
            PicocompError::Repl(msg) => write!(f, "Line editor error: {msg}"),
            PicocompError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PicocompError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PicocompError::Config(e) => Some(e),
            PicocompError::Io(e) => Some(e),
            PicocompError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

/* ========================= Conversions to PicocompError ========================= */

impl From<io::Error> for PicocompError {
    fn from(err: io::Error) -> Self {
        PicocompError::Io(err)
    }
}

impl From<ConfigError> for PicocompError {
    fn from(err: ConfigError) -> Self {
        PicocompError::Config(err)
    }
}

impl From<toml::de::Error> for PicocompError {
    fn from(err: toml::de::Error) -> Self {
        PicocompError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for PicocompError {
    fn from(err: toml::ser::Error) -> Self {
        PicocompError::Toml(err.to_string())
    }
}

impl From<serde_json::Error> for PicocompError {
    fn from(err: serde_json::Error) -> Self {
        PicocompError::Json(err)
    }
}

impl From<reedline::ReedlineError> for PicocompError {
    fn from(err: reedline::ReedlineError) -> Self {
        PicocompError::Repl(err.to_string())
    }
}

impl From<String> for PicocompError {
    fn from(msg: String) -> Self {
        PicocompError::Generic(msg)
    }
}

impl From<&str> for PicocompError {
    fn from(msg: &str) -> Self {
        PicocompError::Generic(msg.to_owned())
    }
}
