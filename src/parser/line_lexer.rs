//! Shell-aware line splitter
//!
//! This module splits a partially typed command line into raw words, stopping
//! at the cursor. It follows shell quoting closely enough for completion:
//! - Single quotes, double quotes and backticks
//! - Backslash escapes
//! - `$(...)` and `${...}` substitutions, nested to any depth
//! - Configurable delimiter and separator sets
//!
//! Words are returned verbatim: quote and escape markers are kept so that
//! [`dequote`](super::dequote::dequote) can recover the literal value later.
//! The last word is always the one under the cursor (possibly empty).

use tracing::trace;

/// Default word delimiters (discarded between words)
pub const DEFAULT_DELIMITERS: &str = " \t\n";

/// Default separators (break words and are kept as words of their own)
pub const DEFAULT_SEPARATORS: &str = "=><";

const BACKSLASH: char = '\\';
const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';
const BACKTICK: char = '`';
const DOLLAR: char = '$';

/// Character classification used by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClasses {
    /// Characters that separate words and are dropped
    delimiters: Vec<char>,
    /// Characters that separate words and are kept as words
    separators: Vec<char>,
}

impl CharClasses {
    /// Create a classification from delimiter and separator sets
    ///
    /// # Arguments
    /// * `delimiters` - Every character of this string is a delimiter
    /// * `separators` - Every character of this string is a separator
    pub fn new(delimiters: &str, separators: &str) -> Self {
        Self {
            delimiters: delimiters.chars().collect(),
            separators: separators.chars().collect(),
        }
    }

    /// Check if a character is a word delimiter
    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    /// Check if a character is a separator
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }

    /// Check if a character opens a quoted context
    pub fn is_quote_opener(c: char) -> bool {
        matches!(c, SINGLE_QUOTE | DOUBLE_QUOTE | BACKTICK)
    }

    /// Check if a whole word is made of separator characters
    pub fn is_separator_run(&self, word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| self.is_separator(c))
    }
}

impl Default for CharClasses {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS, DEFAULT_SEPARATORS)
    }
}

/// Lexer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    /// Between words
    Delimiter,
    /// Inside an unquoted word
    Word,
    /// Inside `'...'`
    SingleQuote,
    /// Inside `"..."`
    DoubleQuote,
    /// Inside `` `...` ``
    Backtick,
    /// Inside `$(...)`
    ParenExpansion,
    /// Inside `${...}`
    BraceExpansion,
}

impl LexerState {
    /// Check if this is a top-level state (no open quoting context)
    pub fn is_top_level(self) -> bool {
        matches!(self, LexerState::Delimiter | LexerState::Word)
    }

    fn for_quote(c: char) -> Self {
        match c {
            SINGLE_QUOTE => LexerState::SingleQuote,
            DOUBLE_QUOTE => LexerState::DoubleQuote,
            _ => LexerState::Backtick,
        }
    }
}

/// Line lexer with configurable character classes
#[derive(Debug, Clone, Default)]
pub struct LineLexer {
    classes: CharClasses,
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Mutable scanning state, local to one `split` call
struct Scan {
    words: Vec<String>,
    word: String,
    state: LexerState,
    stack: Vec<LexerState>,
}

impl Scan {
    fn new() -> Self {
        Self {
            words: Vec::new(),
            word: String::new(),
            state: LexerState::Delimiter,
            stack: Vec::new(),
        }
    }

    /// Close the word in progress, if any
    fn close_word(&mut self) {
        if self.state == LexerState::Word {
            self.words.push(std::mem::take(&mut self.word));
        }
    }

    /// Enter a nested context, remembering where to return
    fn enter(&mut self, next: LexerState) {
        self.stack.push(self.state);
        self.state = next;
    }

    /// Leave the current nested context
    fn leave(&mut self) {
        self.state = self.stack.pop().unwrap_or(LexerState::Word);
    }

    /// Copy the character following a backslash, if there is one
    fn escape_next(&mut self, chars: &mut Chars<'_>) {
        if let Some(next) = chars.next() {
            self.word.push(next);
        }
    }

    /// Handle `$`: enter an expansion when followed by `(` or `{`
    fn dollar(&mut self, chars: &mut Chars<'_>) {
        let next = match chars.peek() {
            Some('(') => LexerState::ParenExpansion,
            Some('{') => LexerState::BraceExpansion,
            _ => return,
        };
        if let Some(opener) = chars.next() {
            self.word.push(opener);
        }
        self.enter(next);
    }
}

impl LineLexer {
    /// Create a lexer with the given character classes
    pub fn new(classes: CharClasses) -> Self {
        Self { classes }
    }

    /// Get the character classes
    pub fn classes(&self) -> &CharClasses {
        &self.classes
    }

    /// Split the line up to the cursor into raw words
    ///
    /// # Arguments
    /// * `line` - The whole input line
    /// * `cursor` - Cursor position (byte index); clamped to the line and
    ///   moved back to a character boundary if needed
    ///
    /// # Returns
    /// * `Vec<String>` - Raw words; never empty, the last one is the word
    ///   under the cursor
    pub fn split(&self, line: &str, cursor: usize) -> Vec<String> {
        let prefix = &line[..clamp_cursor(line, cursor)];
        let mut scan = Scan::new();
        let mut chars = prefix.chars().peekable();

        while let Some(c) = chars.next() {
            match scan.state {
                LexerState::Delimiter | LexerState::Word => {
                    self.top_level(&mut scan, &mut chars, c);
                }
                LexerState::SingleQuote => {
                    scan.word.push(c);
                    if c == SINGLE_QUOTE {
                        scan.leave();
                    }
                }
                LexerState::Backtick => {
                    scan.word.push(c);
                    match c {
                        BACKSLASH => scan.escape_next(&mut chars),
                        BACKTICK => scan.leave(),
                        _ => {}
                    }
                }
                LexerState::DoubleQuote => {
                    scan.word.push(c);
                    match c {
                        BACKSLASH => scan.escape_next(&mut chars),
                        BACKTICK => scan.enter(LexerState::Backtick),
                        DOLLAR => scan.dollar(&mut chars),
                        DOUBLE_QUOTE => scan.leave(),
                        _ => {}
                    }
                }
                LexerState::ParenExpansion | LexerState::BraceExpansion => {
                    scan.word.push(c);
                    let closer = if scan.state == LexerState::ParenExpansion {
                        ')'
                    } else {
                        '}'
                    };
                    match c {
                        BACKSLASH => scan.escape_next(&mut chars),
                        DOLLAR => scan.dollar(&mut chars),
                        c if c == closer => scan.leave(),
                        c if CharClasses::is_quote_opener(c) => {
                            scan.enter(LexerState::for_quote(c))
                        }
                        _ => {}
                    }
                }
            }
        }

        if !scan.stack.is_empty() {
            trace!(
                "Line ends inside {:?} (depth {})",
                scan.state,
                scan.stack.len()
            );
        }

        let Scan {
            mut words, word, ..
        } = scan;
        words.push(word);
        words
    }

    /// Handle one character while no quoting context is open
    fn top_level(&self, scan: &mut Scan, chars: &mut Chars<'_>, c: char) {
        if self.classes.is_delimiter(c) {
            scan.close_word();
            scan.state = LexerState::Delimiter;
            return;
        }

        if self.classes.is_separator(c) {
            scan.close_word();
            scan.word.push(c);
            while let Some(&next) = chars.peek() {
                if !self.classes.is_separator(next) {
                    break;
                }
                scan.word.push(next);
                chars.next();
            }
            if chars.peek().is_some() {
                scan.words.push(std::mem::take(&mut scan.word));
                scan.state = LexerState::Delimiter;
            } else {
                // Separator run ends at the cursor: keep it as the current word
                scan.state = LexerState::Word;
            }
            return;
        }

        scan.state = LexerState::Word;
        scan.word.push(c);
        match c {
            BACKSLASH => scan.escape_next(chars),
            DOLLAR => scan.dollar(chars),
            c if CharClasses::is_quote_opener(c) => scan.enter(LexerState::for_quote(c)),
            _ => {}
        }
    }
}

/// Clamp a cursor offset to the line and align it to a character boundary
pub fn clamp_cursor(line: &str, cursor: usize) -> usize {
    let mut pos = cursor.min(line.len());
    while !line.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Split a line with the default delimiter and separator sets
///
/// # Examples
///
/// ```
/// use picocomp::parser::split_line;
///
/// let words = split_line("picocom --imap crlf, -", 22);
/// assert_eq!(words, vec!["picocom", "--imap", "crlf,", "-"]);
/// ```
pub fn split_line(line: &str, cursor: usize) -> Vec<String> {
    LineLexer::default().split(line, cursor)
}
