//! Stop-word filtering.
//!
//! A [`StopWordSet`] is the union of a built-in list of common English words,
//! contractions and profanity with whatever the caller adds. Membership is an
//! exact match against the normalized (lowercased, trimmed) word.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_STOP_WORDS: HashSet<String> = default_stop_words();
}

fn default_stop_words() -> HashSet<String> {
    [
        // Articles, prepositions, conjunctions
        "the", "is", "at", "which", "on", "and", "a", "in", "with", "not",
        "from", "to", "onto", "into", "was", "what", "that", "this", "your",
        "when", "have", "just", "like", "been", "here", "there", "where",
        "can", "cannot", "those", "she", "then", "these", "their", "also",
        // Contractions
        "we're", "it's", "don't", "that's", "can't", "wont", "you're", "i've",
        "i'll", "there's", "he's", "she's", "isn't", "what's", "we'll",
        "they're", "doesn't", "dont",
        // Web and markup noise
        "https", "http", "nbsp", "amp",
        // Profanity
        "shit", "shitty", "fuck", "fucking", "fucked",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Lowercase and trim a word the same way the tokenizer does.
pub fn normalize(word: &str) -> String {
    word.to_lowercase().trim().to_string()
}

/// A set of normalized stop words, used only for membership tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl Default for StopWordSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StopWordSet {
    /// The built-in list only.
    pub fn with_defaults() -> Self {
        Self {
            words: DEFAULT_STOP_WORDS.clone(),
        }
    }

    /// An empty set (nothing is a stop word).
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Built-in list plus `extra`.
    pub fn with_additional<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::with_defaults();
        set.extend(extra);
        set
    }

    /// Only the given words, no built-in list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Parse a comma-separated stop-word setting, dropping blank entries.
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(normalize)
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Add words, normalizing each one.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = normalize(word.as_ref());
            if !word.is_empty() {
                self.words.insert(word);
            }
        }
    }

    /// Check whether an already-normalized word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
