//! Quote removal for raw words
//!
//! Recovers the literal value of a word produced by the line lexer by
//! stripping single quotes, double quotes and backslash escapes. Command and
//! parameter substitutions are not evaluated; their text is copied as-is.

const BACKSLASH: char = '\\';
const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteMode {
    Outside,
    Single,
    Double,
}

/// Remove quoting and escaping from a raw word
///
/// Backslash escapes the next character outside quotes and inside double
/// quotes; inside single quotes every character is literal. A trailing lone
/// backslash is kept. Unterminated quotes simply run to the end of the word.
///
/// # Examples
///
/// ```
/// use picocomp::parser::dequote;
///
/// assert_eq!(dequote(r#""a\"b""#), "a\"b");
/// assert_eq!(dequote("'crlf,lfcr'"), "crlf,lfcr");
/// ```
pub fn dequote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut mode = QuoteMode::Outside;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match (mode, c) {
            (QuoteMode::Single, SINGLE_QUOTE) => mode = QuoteMode::Outside,
            (QuoteMode::Single, c) => out.push(c),

            (_, BACKSLASH) => match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            },

            (QuoteMode::Outside, SINGLE_QUOTE) => mode = QuoteMode::Single,
            (QuoteMode::Outside, DOUBLE_QUOTE) => mode = QuoteMode::Double,
            (QuoteMode::Double, DOUBLE_QUOTE) => mode = QuoteMode::Outside,

            (_, c) => out.push(c),
        }
    }

    out
}
