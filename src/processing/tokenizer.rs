//! Cell tokenization.
//!
//! Cells are split on runs of whitespace and `, . ; ! ?`, each piece is
//! lowercased and trimmed, and a piece is kept only if it is longer than
//! three characters and not a stop word.

use lazy_static::lazy_static;
use regex::Regex;

use super::filter::{normalize, StopWordSet};
use crate::MIN_KEYWORD_CHARS;

lazy_static! {
    static ref DELIMITERS: Regex = Regex::new(r"[\s,.;!?]+").unwrap();
}

/// Split a cell into normalized candidate words, before any filtering.
///
/// Consecutive delimiters form a single boundary; empty pieces are skipped.
pub fn split_words(cell: &str) -> impl Iterator<Item = String> + '_ {
    DELIMITERS
        .split(cell)
        .map(normalize)
        .filter(|word| !word.is_empty())
}

/// Whether a normalized word survives the length and stop-word rules.
pub fn is_accepted(word: &str, stop_words: &StopWordSet) -> bool {
    !word.is_empty() && word.chars().count() >= MIN_KEYWORD_CHARS && !stop_words.contains(word)
}

/// Lazily yield the accepted words of a cell.
pub fn tokenize<'a>(
    cell: &'a str,
    stop_words: &'a StopWordSet,
) -> impl Iterator<Item = String> + 'a {
    split_words(cell).filter(move |word| is_accepted(word, stop_words))
}
