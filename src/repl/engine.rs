use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::parser::{LineLexer, dequote};

use super::completer::PicocomCompleter;
use super::completion::{CompletionEngine, PicocomCandidateProvider};
use super::prompt::PicocompPrompt;

const COMPLETION_MENU: &str = "completion_menu";

/// Interactive line editor for trying out completion
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Prompt shown before each line
    prompt: PicocompPrompt,

    /// Lexer used to show how accepted lines split
    lexer: LineLexer,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `config` - Effective configuration (lexer, completion, history)
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(config: &Config) -> Result<Self> {
        let lexer = config.lexer.lexer();
        let provider = Arc::new(PicocomCandidateProvider::new(&config.completion));
        let completer = PicocomCompleter::new(CompletionEngine::new(lexer.clone(), provider));

        let history = if config.history.persist {
            FileBackedHistory::with_file(config.history.max_size, config.history.file_path.clone())?
        } else {
            FileBackedHistory::new(config.history.max_size)?
        };

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(Box::new(completer))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            prompt: PicocompPrompt::new(config.completion.program.clone()),
            lexer,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line or None on Ctrl-C / Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            signal => {
                debug!("Line editor stopped by {:?}", signal);
                self.running = false;
                Ok(None)
            }
        }
    }

    /// Describe how a line splits into words
    ///
    /// # Arguments
    /// * `line` - Accepted input line
    ///
    /// # Returns
    /// * `String` - One word per line with its dequoted value
    pub fn describe(&self, line: &str) -> String {
        describe_words(&self.lexer, line, line.len())
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Render the words of a line up to the cursor with their dequoted values
///
/// # Arguments
/// * `lexer` - Lexer to split with
/// * `line` - Input line
/// * `cursor` - Cursor offset (byte index)
pub fn describe_words(lexer: &LineLexer, line: &str, cursor: usize) -> String {
    lexer
        .split(line, cursor)
        .iter()
        .enumerate()
        .map(|(idx, word)| format!("{idx}\t{word:?}\t{:?}", dequote(word)))
        .collect::<Vec<_>>()
        .join("\n")
}
