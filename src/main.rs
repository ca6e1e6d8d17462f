//! picocomp - completion for picocom command lines
//!
//! Answers one-shot completion requests from shell glue and offers an
//! interactive line editor for trying completion out.
//!
//! # Usage
//!
//! ```bash
//! # Register completion for picocom in bash
//! eval "$(picocomp init bash)"
//!
//! # Complete a line directly
//! picocomp complete -- 'picocom --imap crlf,'
//! ```

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use picocomp::cli::CliInterface;
use picocomp::error::Result;
use picocomp::repl::ReplEngine;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the line editor
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli)?;

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_interactive_mode(&cli)
}

/// Run the interactive line editor until Ctrl-C or Ctrl-D
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let mut repl = ReplEngine::new(cli.config())?;

    if !cli.args().quiet {
        println!(
            "Type a {} command line and press Tab to complete. Ctrl-D exits.",
            cli.config().completion.program
        );
    }

    while repl.is_running() {
        match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => println!("{}", repl.describe(&line)),
            Some(_) => continue,
            None => break,
        }
    }

    Ok(())
}

/// Initialize logging system based on configuration and verbosity
///
/// Logs go to stderr unless a log file is configured, so stdout only ever
/// carries completion output. `PICOCOMP_LOG` overrides the level filter.
///
/// # Arguments
/// * `cli` - CLI interface with the effective configuration
fn initialize_logging(cli: &CliInterface) -> Result<()> {
    let logging = &cli.config().logging;
    let level = logging.level.to_tracing_level();

    let writer = match &logging.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var("PICOCOMP_LOG")
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(logging.file_path.is_none())
        .with_writer(writer);

    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }

    Ok(())
}
