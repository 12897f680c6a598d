//! Keyword Extractor Library
//!
//! Reads a CSV dataset, counts keyword frequencies globally or per column,
//! ranks them deterministically and writes the result back out as CSV.
//! The extraction core ([`extract`]) is pure; reading input, persisting
//! output and scheduling runs are layered around it.

pub mod aggregate;
pub mod api;
pub mod error;
pub mod extract;
pub mod jobs;
pub mod output;
pub mod processing;
pub mod types;

pub use aggregate::{Aggregation, Aggregator, WordCount};
pub use error::{ExtractError, Result};
pub use extract::{extract, read_rows, Extraction, ExtractionSummary, Extractor};
pub use output::{CsvFileSink, OutputDirectory, OutputSink};
pub use processing::StopWordSet;
pub use types::{ExtractorConfig, OutputTable, RaggedRowPolicy, Ranked, RankedList, Scope};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::*;
    pub use crate::error::{ExtractError, Result};
    pub use crate::extract::*;
    pub use crate::output::*;
    pub use crate::processing::*;
    pub use crate::types::*;
}

/// Shortest word (in characters) that counts as a keyword
pub const MIN_KEYWORD_CHARS: usize = 4;

/// Default directory for generated CSV files
pub const DEFAULT_OUTPUT_DIR: &str = "keyword-data";

/// Default output file name, without extension
pub const DEFAULT_OUTPUT_NAME: &str = "keyword-results";

/// Default minutes between scheduled runs
pub const DEFAULT_INTERVAL_MINUTES: u64 = 5;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3021;
