//! Frequency counting over a row set, globally or per column.

use tracing::{debug, warn};

use super::word_count::WordCount;
use crate::error::{ExtractError, Result};
use crate::processing::{tokenize, StopWordSet};
use crate::types::{RaggedRowPolicy, Ranked, Scope};

/// Count tables produced by one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    Global(WordCount),
    /// One table per column of the first row; empty when there were no rows
    PerColumn(Vec<WordCount>),
}

impl Aggregation {
    /// Rank every table.
    pub fn rank(&self) -> Ranked {
        match self {
            Aggregation::Global(table) => Ranked::Global(table.rank()),
            Aggregation::PerColumn(tables) => {
                Ranked::PerColumn(tables.iter().map(WordCount::rank).collect())
            }
        }
    }

    /// Accepted words counted, summed over every table.
    pub fn total_words(&self) -> usize {
        match self {
            Aggregation::Global(table) => table.total(),
            Aggregation::PerColumn(tables) => tables.iter().map(WordCount::total).sum(),
        }
    }
}

/// Feeds cells through the tokenizer and counts accepted words.
pub struct Aggregator<'a> {
    stop_words: &'a StopWordSet,
    ragged_rows: RaggedRowPolicy,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator that pads ragged rows.
    pub fn new(stop_words: &'a StopWordSet) -> Self {
        Self {
            stop_words,
            ragged_rows: RaggedRowPolicy::Pad,
        }
    }

    /// Set the ragged-row policy for per-column counting.
    pub fn with_ragged_rows(mut self, policy: RaggedRowPolicy) -> Self {
        self.ragged_rows = policy;
        self
    }

    /// Count words for the given scope.
    pub fn aggregate<R, S>(&self, rows: &[R], scope: Scope) -> Result<Aggregation>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        match scope {
            Scope::Global => Ok(Aggregation::Global(self.count_global(rows))),
            Scope::PerColumn => Ok(Aggregation::PerColumn(self.count_per_column(rows)?)),
        }
    }

    /// Count every cell of every row into a single table.
    pub fn count_global<R, S>(&self, rows: &[R]) -> WordCount
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut table = WordCount::new();
        for row in rows {
            for cell in row.as_ref() {
                table.extend(tokenize(cell.as_ref(), self.stop_words));
            }
        }
        table
    }

    /// Count each column into its own table, applying the ragged-row policy.
    ///
    /// The column count comes from the first row. Under [`RaggedRowPolicy::Reject`]
    /// any width mismatch fails before anything is counted; otherwise this is
    /// [`Aggregator::count_per_column_padded`].
    pub fn count_per_column<R, S>(&self, rows: &[R]) -> Result<Vec<WordCount>>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if self.ragged_rows == RaggedRowPolicy::Reject {
            if let Some(first) = rows.first() {
                let columns = first.as_ref().len();
                let mismatch = rows
                    .iter()
                    .map(|row| row.as_ref().len())
                    .enumerate()
                    .find(|&(_, width)| width != columns);
                if let Some((row, found)) = mismatch {
                    return Err(ExtractError::RaggedRow {
                        row,
                        expected: columns,
                        found,
                    });
                }
            }
        }

        Ok(self.count_per_column_padded(rows))
    }

    /// Count each column into its own table, padding ragged rows.
    ///
    /// Short rows behave as if their missing cells were empty and extra cells
    /// are ignored.
    pub fn count_per_column_padded<R, S>(&self, rows: &[R]) -> Vec<WordCount>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let Some(first) = rows.first() else {
            return Vec::new();
        };

        let columns = first.as_ref().len();
        let mut tables = vec![WordCount::new(); columns];
        let mut ragged = 0;

        for row in rows {
            let cells = row.as_ref();
            if cells.len() != columns {
                ragged += 1;
            }

            for (table, cell) in tables.iter_mut().zip(cells) {
                table.extend(tokenize(cell.as_ref(), self.stop_words));
            }
        }

        if ragged > 0 {
            warn!(
                ragged_rows = ragged,
                expected_columns = columns,
                "Padded or truncated rows whose width differs from the first row"
            );
        }

        for (idx, table) in tables.iter().enumerate() {
            debug!(column = idx + 1, distinct_words = table.len(), "Counted column");
        }

        tables
    }
}
