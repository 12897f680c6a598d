//! Insertion-ordered word frequency table.

use std::collections::HashMap;

use crate::types::RankedList;

/// Word → count, remembering the order in which words were first seen.
///
/// First-seen order is the tie-breaker when ranking, so identical input
/// always ranks identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCount {
    /// Position of each word in `entries`
    index: HashMap<String, usize>,
    /// Words with counts, in first-seen order
    entries: Vec<(String, usize)>,
}

impl WordCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, 1));
            }
        }
    }

    /// Occurrences of `word` (0 if never seen).
    pub fn get(&self, word: &str) -> usize {
        self.index
            .get(word)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Rank by count descending; `sort_by` is stable, so ties keep first-seen order.
    pub fn rank(&self) -> RankedList {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl Extend<String> for WordCount {
    fn extend<I: IntoIterator<Item = String>>(&mut self, words: I) {
        for word in words {
            self.add(word);
        }
    }
}
