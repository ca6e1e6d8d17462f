//! Configuration management for picocomp
//!
//! This module handles loading, parsing, and validating configuration:
//! - Configuration file (TOML format)
//! - Command-line arguments (applied by the CLI layer)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::parser::{CharClasses, DEFAULT_DELIMITERS, DEFAULT_SEPARATORS, LineLexer};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Line lexer configuration
    #[serde(default)]
    pub lexer: LexerConfig,

    /// Completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// History configuration (interactive mode)
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Character sets used to split command lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexerConfig {
    /// Characters separating words (dropped)
    #[serde(default = "default_delimiters")]
    pub delimiters: String,

    /// Characters separating words and kept as words of their own
    #[serde(default = "default_separators")]
    pub separators: String,
}

/// Completion behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Command the shell glue registers completion for
    #[serde(default = "default_program")]
    pub program: String,

    /// Directory scanned for serial devices
    #[serde(default = "default_device_dir")]
    pub device_dir: PathBuf,

    /// File name prefixes identifying serial devices
    #[serde(default = "default_device_prefixes")]
    pub device_prefixes: Vec<String>,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Path to log file (None for stderr)
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_delimiters() -> String {
    DEFAULT_DELIMITERS.to_string()
}

fn default_separators() -> String {
    DEFAULT_SEPARATORS.to_string()
}

fn default_program() -> String {
    "picocom".to_string()
}

fn default_device_dir() -> PathBuf {
    PathBuf::from("/dev")
}

fn default_device_prefixes() -> Vec<String> {
    ["ttyS", "ttyUSB", "ttyACM", "ttyAMA", "rfcomm"]
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".picocomp_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            delimiters: default_delimiters(),
            separators: default_separators(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            device_dir: default_device_dir(),
            device_prefixes: default_device_prefixes(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `~/.picocomp/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".picocomp")
            .join("config.toml")
    }

    /// Load configuration from a file
    ///
    /// With no explicit path, a missing default file yields the default
    /// configuration. An explicit path must exist.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Serialize configuration to TOML text
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file, creating parent directories
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        self.lexer.validate()?;

        if self.completion.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "completion.program".to_string(),
                value: self.completion.program.clone(),
            }
            .into());
        }

        if self.completion.device_prefixes.is_empty()
            || self.completion.device_prefixes.iter().any(String::is_empty)
        {
            return Err(ConfigError::InvalidValue {
                field: "completion.device_prefixes".to_string(),
                value: format!("{:?}", self.completion.device_prefixes),
            }
            .into());
        }

        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl LexerConfig {
    /// Characters with a fixed meaning to the lexer
    const RESERVED: &'static [char] = &['\'', '"', '`', '\\', '$'];

    /// Validate the character sets
    pub fn validate(&self) -> Result<()> {
        if self.delimiters.is_empty() {
            return Err(ConfigError::MissingField("lexer.delimiters".to_string()).into());
        }

        for (field, set) in [
            ("lexer.delimiters", &self.delimiters),
            ("lexer.separators", &self.separators),
        ] {
            if set.contains(Self::RESERVED) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: set.clone(),
                }
                .into());
            }
        }

        if self.separators.chars().any(|c| self.delimiters.contains(c)) {
            return Err(ConfigError::InvalidValue {
                field: "lexer.separators".to_string(),
                value: self.separators.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Build the character classes for the lexer
    pub fn char_classes(&self) -> CharClasses {
        CharClasses::new(&self.delimiters, &self.separators)
    }

    /// Build a lexer from this configuration
    pub fn lexer(&self) -> LineLexer {
        LineLexer::new(self.char_classes())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lexer.delimiters, " \t\n");
        assert_eq!(config.lexer.separators, "=><");
        assert_eq!(config.completion.program, "picocom");
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [lexer]
            separators = "=:"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.lexer.separators, "=:");
        assert_eq!(config.lexer.delimiters, " \t\n");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.completion.device_dir, PathBuf::from("/dev"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[lexer\nseparators = 1").unwrap_err();
        assert!(err.to_string().contains("Invalid config format"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.completion.device_prefixes = vec!["ttyUSB".to_string()];

        let text = config.to_toml().unwrap();
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.completion.device_prefixes, vec!["ttyUSB"]);
        assert_eq!(parsed.lexer.delimiters, config.lexer.delimiters);
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load_from_file(Some(Path::new("/nonexistent/picocomp.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("picocomp-config-{}", std::process::id()))
            .join("config.toml");
        let mut config = Config::default();
        config.completion.program = "microcom".to_string();

        config.save(&path).unwrap();
        let loaded = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(loaded.completion.program, "microcom");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_validate_overlapping_sets() {
        let mut config = Config::default();
        config.lexer.separators = "= ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_reserved_characters() {
        let mut config = Config::default();
        config.lexer.separators = "=$".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.lexer.delimiters = " '".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_delimiters_and_prefixes() {
        let mut config = Config::default();
        config.lexer.delimiters.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.completion.device_prefixes = vec![String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lexer_from_config() {
        let lexer = LexerConfig {
            delimiters: " ".to_string(),
            separators: ":".to_string(),
        }
        .lexer();
        assert_eq!(lexer.split("a:b", 3), vec!["a", ":", "b"]);
    }
}
