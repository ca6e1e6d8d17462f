//! Filtering of comma-separated value lists
//!
//! Options such as `--imap crlf,igncr` take several values in one word. When
//! completing such a word, values the user already listed should not be
//! offered again.

use std::collections::HashSet;

use crate::parser::dequote;

/// Return the reference values not already present in a raw list word
///
/// The word is dequoted, then split on commas and whitespace; empty entries
/// are ignored. Reference order is preserved and matching is exact.
///
/// # Arguments
/// * `raw` - Raw (possibly quoted) word holding the values chosen so far
/// * `reference` - Known values, assumed free of duplicates
///
/// # Returns
/// * `Vec<String>` - Reference values not yet chosen
///
/// # Examples
///
/// ```
/// use picocomp::repl::completion::filter_chosen;
///
/// let left = filter_chosen("\"crlf,igncr\"", &["crlf", "crcrlf", "igncr", "lfcr"]);
/// assert_eq!(left, vec!["crcrlf", "lfcr"]);
/// ```
pub fn filter_chosen<S: AsRef<str>>(raw: &str, reference: &[S]) -> Vec<String> {
    let literal = dequote(raw);
    let chosen: HashSet<&str> = literal
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|value| !value.is_empty())
        .collect();

    reference
        .iter()
        .map(|value| value.as_ref())
        .filter(|value| !chosen.contains(value))
        .map(str::to_string)
        .collect()
}
