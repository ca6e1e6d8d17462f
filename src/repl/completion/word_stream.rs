//! Word stream with cursor awareness for completion
//!
//! This module wraps the words produced by the line lexer and answers the
//! questions the completion state machine asks: which word is under the
//! cursor, which words come before it, and where a replacement starts.

use crate::parser::{CharClasses, LineLexer, clamp_cursor, dequote};

/// Words of a line up to the cursor
#[derive(Debug, Clone)]
pub struct WordStream {
    /// Raw words; the last one is the word under the cursor
    pub words: Vec<String>,
    /// Cursor position (byte index in the original input)
    pub cursor: usize,
    /// Whether the current word is a pending separator run such as `=`
    separator_pending: bool,
}

impl WordStream {
    /// Split a line with the given lexer and wrap the result
    ///
    /// # Arguments
    /// * `lexer` - Lexer to split with
    /// * `line` - The input line
    /// * `cursor` - Cursor position (byte index)
    pub fn from_line(lexer: &LineLexer, line: &str, cursor: usize) -> Self {
        let cursor = clamp_cursor(line, cursor);
        let words = lexer.split(line, cursor);
        Self::new(words, cursor, lexer.classes())
    }

    /// Wrap already-split words
    ///
    /// # Arguments
    /// * `words` - Lexer output; an empty vector is treated as one empty word
    /// * `cursor` - Cursor position the words were split at
    /// * `classes` - Character classes the words were split with
    pub fn new(mut words: Vec<String>, cursor: usize, classes: &CharClasses) -> Self {
        if words.is_empty() {
            words.push(String::new());
        }
        let separator_pending = words
            .last()
            .is_some_and(|word| classes.is_separator_run(word));

        Self {
            words,
            cursor,
            separator_pending,
        }
    }

    /// Get all words before the word under the cursor
    pub fn words_before_cursor(&self) -> &[String] {
        &self.words[..self.words.len() - 1]
    }

    /// Get the raw word under the cursor
    pub fn current_word(&self) -> &str {
        self.words.last().map(String::as_str).unwrap_or("")
    }

    /// Get the word before the one under the cursor
    pub fn previous_word(&self) -> Option<&str> {
        self.words_before_cursor().last().map(String::as_str)
    }

    /// Check if the cursor sits right after a separator run
    pub fn separator_pending(&self) -> bool {
        self.separator_pending
    }

    /// Get the raw text being completed
    ///
    /// Right after a separator such as `=`, nothing of the value has been
    /// typed yet, so the prefix is empty.
    pub fn current_prefix(&self) -> &str {
        if self.separator_pending {
            ""
        } else {
            self.current_word()
        }
    }

    /// Get the literal value of the text being completed
    pub fn current_literal(&self) -> String {
        dequote(self.current_prefix())
    }

    /// Get the completion start position (where to insert the completion)
    pub fn completion_start(&self) -> usize {
        self.cursor - self.current_prefix().len()
    }
}
