//! Error types for keyword extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised by the extraction pipeline and its I/O collaborators.
///
/// An empty input is not an error: it produces an empty result. Write failures
/// are always surfaced as [`ExtractError::WriteFailure`] so callers can tell them
/// apart from a run that simply found no keywords.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A row's width differs from the first row under the reject policy
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Input file missing or unreadable
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not parseable CSV
    #[error("Invalid CSV input: {0}")]
    InvalidCsv(#[from] csv::Error),

    /// Output directory or file could not be created, written or renamed
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// In-memory CSV encoding of an output table failed
    #[error("Failed to encode output table: {0}")]
    Encode(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested output file does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ExtractError {
    /// Whether this error came from persisting output.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, ExtractError::WriteFailure { .. })
    }
}
