//! Scope, ranked results and the output table.

use serde::{Deserialize, Serialize};

/// How word frequencies are partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// One count table across every cell of every row
    #[default]
    Global,
    /// One count table per source column
    PerColumn,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::PerColumn => write!(f, "per_column"),
        }
    }
}

/// Words with their counts, most frequent first.
///
/// Equal counts keep the order in which the words were first seen.
pub type RankedList = Vec<(String, usize)>;

/// Ranked results for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranked {
    Global(RankedList),
    PerColumn(Vec<RankedList>),
}

impl Ranked {
    /// Number of distinct words summed over every list.
    pub fn distinct_words(&self) -> usize {
        match self {
            Ranked::Global(list) => list.len(),
            Ranked::PerColumn(columns) => columns.iter().map(Vec::len).sum(),
        }
    }

    /// Whether no word survived filtering.
    pub fn is_empty(&self) -> bool {
        self.distinct_words() == 0
    }
}

/// The serialized artifact of a run: an optional header followed by text rows.
///
/// Global results have no header and two cells per row (`word`, `count`).
/// Per-column results carry a `column_1..column_N` header and one
/// `word:count` cell per column, padded with empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl OutputTable {
    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.header.is_none()
    }

    /// Header first (if any), then the data rows.
    pub fn records(&self) -> impl Iterator<Item = &Vec<String>> {
        self.header.iter().chain(self.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_display_matches_serde_name() {
        assert_eq!(Scope::PerColumn.to_string(), "per_column");
        assert_eq!(
            serde_json::to_value(Scope::PerColumn).unwrap(),
            serde_json::json!("per_column")
        );
    }

    #[test]
    fn test_records_include_header_first() {
        let table = OutputTable {
            header: Some(vec!["column_1".to_string()]),
            rows: vec![vec!["apple:2".to_string()]],
        };
        let records: Vec<_> = table.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][0], "column_1");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_ranked_distinct_words() {
        let ranked = Ranked::PerColumn(vec![
            vec![("apple".to_string(), 2)],
            vec![("orange".to_string(), 1), ("banana".to_string(), 1)],
        ]);
        assert_eq!(ranked.distinct_words(), 3);
        assert!(Ranked::Global(vec![]).is_empty());
    }
}
