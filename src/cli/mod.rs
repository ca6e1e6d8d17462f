//! Command-line interface for picocomp
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - The one-shot `complete` and `split` requests issued by shell glue
//! - Shell integration and configuration subcommands

pub mod completion;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, LogLevel};
use crate::error::Result;
use crate::repl::completion::{CompletionEngine, CompletionResult, Fallback, PicocomCandidateProvider};
use crate::repl::describe_words;

/// Command line completion for picocom, driven by a shell-aware lexer
#[derive(Parser, Debug)]
#[command(
    name = "picocomp",
    version,
    about = "Context-sensitive completion for picocom command lines",
    long_about = "Splits partially typed command lines the way a POSIX shell would
(quotes, escapes, nested substitutions) and completes picocom options,
option values, mapping lists and serial devices."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for picocomp
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Complete a command line
    Complete {
        /// Cursor offset in bytes (defaults to the end of the line)
        #[arg(long, value_name = "OFFSET")]
        point: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Bash)]
        format: OutputFormat,

        /// Command line to complete
        #[arg(value_name = "LINE", allow_hyphen_values = true)]
        line: String,
    },

    /// Show how a command line splits into words
    Split {
        /// Cursor offset in bytes (defaults to the end of the line)
        #[arg(long, value_name = "OFFSET")]
        point: Option<usize>,

        /// Command line to split
        #[arg(value_name = "LINE", allow_hyphen_values = true)]
        line: String,
    },

    /// Print shell integration script
    Init {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,

        /// Command to register completion for
        #[arg(long = "command", value_name = "NAME")]
        program: Option<String>,
    },

    /// Try completion in an interactive line editor (default)
    Try,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

/// Output format of the `complete` subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Hint line followed by one candidate per line
    Bash,
    /// Serialized completion result
    Json,
    /// Candidates only
    Plain,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        // Validate loaded configuration
        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_logging_args(&mut config, args);

        Ok(config)
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to start the line editor
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Complete {
                point,
                format,
                line,
            }) => {
                let output = self.complete(line, *point, *format)?;
                if !output.is_empty() {
                    println!("{}", output);
                }
                Ok(true)
            }
            Some(Commands::Split { point, line }) => {
                let cursor = point.unwrap_or(line.len());
                println!("{}", describe_words(&self.config.lexer.lexer(), line, cursor));
                Ok(true)
            }
            Some(Commands::Init { shell, program }) => {
                let program = program.as_deref().unwrap_or(&self.config.completion.program);
                print!("{}", completion::generate_init(shell, program)?);
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Try) | None => Ok(false),
        }
    }

    /// Build a completion engine from the effective configuration
    pub fn completion_engine(&self) -> CompletionEngine {
        let provider = Arc::new(PicocomCandidateProvider::new(&self.config.completion));
        CompletionEngine::new(self.config.lexer.lexer(), provider)
    }

    /// Run one completion request and render it
    ///
    /// # Arguments
    /// * `line` - Command line
    /// * `point` - Cursor offset, end of line when absent
    /// * `format` - Output format
    fn complete(&self, line: &str, point: Option<usize>, format: OutputFormat) -> Result<String> {
        let cursor = point.unwrap_or(line.len());
        let result = self.completion_engine().complete(line, cursor);
        render_completion(&result, format)
    }

    /// Show version information
    fn show_version(&self) {
        println!("picocomp version {}", clap::crate_version!());
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist, defaults apply");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("# Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }
}

/// Render a completion result for the host
///
/// The `bash` format starts with a hint line (`start=N` plus any of
/// `nospace`, `nosort`, `default`, `commands`) followed by one candidate
/// per line.
pub fn render_completion(result: &CompletionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Plain => Ok(result.candidates.join("\n")),
        OutputFormat::Bash => {
            let mut hints = vec![format!("start={}", result.start)];
            if result.hints.no_space {
                hints.push("nospace".to_string());
            }
            if result.hints.no_sort {
                hints.push("nosort".to_string());
            }
            match result.hints.fallback {
                Some(Fallback::Files) => hints.push("default".to_string()),
                Some(Fallback::Commands) => hints.push("commands".to_string()),
                None => {}
            }

            let mut lines = vec![hints.join(" ")];
            lines.extend(result.candidates.iter().cloned());
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionConfig;

    fn create_test_cli(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        config.completion = CompletionConfig {
            device_dir: PathBuf::from("/nonexistent/picocomp/dev"),
            ..CompletionConfig::default()
        };
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["picocomp"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config_file.is_none());
    }

    #[test]
    fn test_cli_complete_args() {
        let args = CliArgs::try_parse_from(vec![
            "picocomp",
            "complete",
            "--point",
            "10",
            "--format",
            "json",
            "--",
            "picocom -b",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Complete {
                point,
                format,
                line,
            }) => {
                assert_eq!(point, Some(10));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(line, "picocom -b");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags_with_subcommand() {
        let args = CliArgs::try_parse_from(vec!["picocomp", "-v", "split", "a b"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Some(Commands::Split { .. })));
    }

    #[test]
    fn test_cli_init_command_override() {
        let args =
            CliArgs::try_parse_from(vec!["picocomp", "init", "zsh", "--command", "microcom"]).unwrap();
        match args.command {
            Some(Commands::Init { shell, program }) => {
                assert_eq!(shell, "zsh");
                assert_eq!(program.as_deref(), Some("microcom"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_logging_args_override_config() {
        let args = CliArgs::try_parse_from(vec!["picocomp", "--vv"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_logging_args(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Trace);

        let args = CliArgs::try_parse_from(vec!["picocomp", "-q"]).unwrap();
        CliInterface::apply_logging_args(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_try_is_default() {
        let cli = create_test_cli(&["picocomp"]);
        assert!(!cli.handle_subcommand().unwrap());

        let cli = create_test_cli(&["picocomp", "try"]);
        assert!(!cli.handle_subcommand().unwrap());
    }

    #[test]
    fn test_complete_bash_format() {
        let cli = create_test_cli(&["picocomp"]);
        let output = cli
            .complete("picocom --imap crlf,ig", None, OutputFormat::Bash)
            .unwrap();

        assert_eq!(output, "start=15 nospace nosort\ncrlf,igncr\ncrlf,ignlf");
    }

    #[test]
    fn test_complete_bash_format_fallback() {
        let cli = create_test_cli(&["picocomp"]);
        let output = cli
            .complete("picocom -b 9600 /dev/tty", None, OutputFormat::Bash)
            .unwrap();

        assert_eq!(output, "start=16 default");
    }

    #[test]
    fn test_complete_with_point() {
        let cli = create_test_cli(&["picocomp"]);
        let output = cli
            .complete("picocom --fl /dev/ttyS0", Some(12), OutputFormat::Plain)
            .unwrap();

        assert_eq!(output, "--flow");
    }

    #[test]
    fn test_complete_json_format() {
        let cli = create_test_cli(&["picocomp"]);
        let output = cli
            .complete("picocom -y ", None, OutputFormat::Json)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["start"], 11);
        assert_eq!(json["candidates"], serde_json::json!(["o", "e", "n"]));
        assert_eq!(json["hints"]["no_sort"], true);
    }
}
