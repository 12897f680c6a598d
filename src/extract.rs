//! Extraction entry points.
//!
//! [`extract`] is the pure core: rows in, output table out, no I/O.
//! [`Extractor`] carries stop words, scope and ragged-row policy from
//! configuration, and [`read_rows`] loads the input file for callers
//! that start from disk.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::Aggregator;
use crate::error::{ExtractError, Result};
use crate::output::build_table;
use crate::processing::StopWordSet;
use crate::types::{ExtractorConfig, OutputTable, RaggedRowPolicy, Ranked, Scope};

/// Extract a ranked keyword table from parsed rows.
///
/// Ragged rows are padded (missing cells count as empty, extra cells are
/// ignored), so this never fails. An empty row set yields an empty table.
pub fn extract<R, S>(rows: &[R], stop_words: &StopWordSet, scope: Scope) -> OutputTable
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let aggregator = Aggregator::new(stop_words);
    let ranked = match scope {
        Scope::Global => Ranked::Global(aggregator.count_global(rows).rank()),
        Scope::PerColumn => Ranked::PerColumn(
            aggregator
                .count_per_column_padded(rows)
                .iter()
                .map(|table| table.rank())
                .collect(),
        ),
    };
    build_table(&ranked)
}

/// Counts describing one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    pub rows: usize,
    /// Number of count tables (1 for global scope)
    pub columns: usize,
    pub distinct_words: usize,
    pub total_words: usize,
}

impl ExtractionSummary {
    /// Whether no keyword survived filtering.
    pub fn is_empty(&self) -> bool {
        self.distinct_words == 0
    }
}

/// Result of [`Extractor::run`].
#[derive(Debug, Clone)]
pub struct Extraction {
    pub ranked: Ranked,
    pub table: OutputTable,
    pub summary: ExtractionSummary,
}

/// Configured extraction.
#[derive(Debug, Clone)]
pub struct Extractor {
    stop_words: StopWordSet,
    scope: Scope,
    ragged_rows: RaggedRowPolicy,
}

impl Extractor {
    /// Create an extractor that pads ragged rows.
    pub fn new(stop_words: StopWordSet, scope: Scope) -> Self {
        Self {
            stop_words,
            scope,
            ragged_rows: RaggedRowPolicy::Pad,
        }
    }

    /// Built-in stop words plus the configured list, with the configured scope and policy.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        let stop_words = StopWordSet::with_additional(StopWordSet::parse_list(&config.stop_words));
        Self::new(stop_words, config.scope).with_ragged_rows(config.ragged_rows)
    }

    pub fn with_ragged_rows(mut self, policy: RaggedRowPolicy) -> Self {
        self.ragged_rows = policy;
        self
    }

    /// Count, rank and render. Fails only on a ragged row under the reject policy.
    pub fn run<R, S>(&self, rows: &[R]) -> Result<Extraction>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if rows.is_empty() {
            warn!(scope = %self.scope, "No input rows, producing an empty result");
        }

        let aggregation = Aggregator::new(&self.stop_words)
            .with_ragged_rows(self.ragged_rows)
            .aggregate(rows, self.scope)?;

        let ranked = aggregation.rank();
        let table = build_table(&ranked);

        let summary = ExtractionSummary {
            rows: rows.len(),
            columns: match &ranked {
                Ranked::Global(_) => 1,
                Ranked::PerColumn(columns) => columns.len(),
            },
            distinct_words: ranked.distinct_words(),
            total_words: aggregation.total_words(),
        };

        info!(
            scope = %self.scope,
            rows = summary.rows,
            columns = summary.columns,
            distinct_words = summary.distinct_words,
            total_words = summary.total_words,
            "Extracted keywords"
        );

        Ok(Extraction {
            ranked,
            table,
            summary,
        })
    }
}

/// Parse CSV bytes into rows of cells.
///
/// Rows may differ in width; the aggregator's ragged-row policy decides what
/// that means. With `has_headers` the first line is skipped. Bytes that are
/// not valid UTF-8 become U+FFFD instead of failing the run.
pub fn parse_rows(bytes: &[u8], has_headers: bool) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut lossy_rows = 0;
    for record in reader.byte_records() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            lossy_rows += 1;
        }
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    if lossy_rows > 0 {
        warn!(rows = lossy_rows, "Replaced invalid UTF-8 in input rows");
    }

    Ok(rows)
}

/// Read and parse the whole input file.
pub fn read_rows(path: &Path, has_headers: bool) -> Result<Vec<Vec<String>>> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    parse_rows(&bytes, has_headers)
}
