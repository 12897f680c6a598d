//! Configuration types for keyword extraction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::table::Scope;
use crate::error::{ExtractError, Result};
use crate::{DEFAULT_INTERVAL_MINUTES, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_NAME};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "KEYWORD_EXTRACTOR";

/// Optional configuration file name (any format the `config` crate understands).
pub const CONFIG_FILE: &str = "keyword-extractor";

/// What to do with rows whose width differs from the first row
/// when counting per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaggedRowPolicy {
    /// Missing cells count as empty, extra cells are ignored
    #[default]
    Pad,
    /// Fail the run with `ExtractError::RaggedRow`
    Reject,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Input CSV file
    pub csv_path: Option<PathBuf>,

    /// Directory generated CSV files are written to
    pub output_dir: PathBuf,

    /// Output file name without the `.csv` extension
    pub output_name: String,

    /// Minutes between scheduled runs
    pub interval_minutes: u64,

    /// Comma-separated stop words added to the built-in list
    pub stop_words: String,

    /// Global or per-column counting
    pub scope: Scope,

    /// Ragged-row handling for per-column counting
    pub ragged_rows: RaggedRowPolicy,

    /// Whether the first input line is a header rather than data
    pub has_headers: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            stop_words: String::new(),
            scope: Scope::Global,
            ragged_rows: RaggedRowPolicy::Pad,
            has_headers: false,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from `keyword-extractor.{toml,yaml,json}` (if present)
    /// overlaid with `KEYWORD_EXTRACTOR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::load(Some(CONFIG_FILE))
    }

    /// Load configuration from an optional file plus the environment.
    pub fn load(file: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(name) = file {
            builder = builder.add_source(config::File::with_name(name).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings a run cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_minutes == 0 {
            return Err(ExtractError::Config(
                "interval_minutes must be at least 1".to_string(),
            ));
        }

        let name = self.output_name.trim();
        if name.is_empty() {
            return Err(ExtractError::Config("output_name must not be empty".to_string()));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ExtractError::Config(format!(
                "output_name must be a plain file name: {name}"
            )));
        }

        Ok(())
    }

    /// File name of the generated CSV.
    pub fn output_file_name(&self) -> String {
        format!("{}.csv", self.output_name.trim())
    }

    /// Full path of the generated CSV.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }

    /// Whether the configured input file currently exists.
    pub fn input_exists(&self) -> bool {
        self.csv_path.as_deref().is_some_and(Path::is_file)
    }

    /// File name of the input CSV, if one is configured.
    pub fn input_file_name(&self) -> Option<String> {
        self.csv_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Apply a partial update.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(csv_path) = update.csv_path {
            self.csv_path = Some(csv_path);
        }
        if let Some(output_name) = update.output_name {
            self.output_name = output_name;
        }
        if let Some(interval_minutes) = update.interval_minutes {
            self.interval_minutes = interval_minutes;
        }
        if let Some(stop_words) = update.stop_words {
            self.stop_words = stop_words;
        }
        if let Some(scope) = update.scope {
            self.scope = scope;
        }
        if let Some(ragged_rows) = update.ragged_rows {
            self.ragged_rows = ragged_rows;
        }
        if let Some(has_headers) = update.has_headers {
            self.has_headers = has_headers;
        }
    }
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub csv_path: Option<PathBuf>,
    pub output_name: Option<String>,
    pub interval_minutes: Option<u64>,
    pub stop_words: Option<String>,
    pub scope: Option<Scope>,
    pub ragged_rows: Option<RaggedRowPolicy>,
    pub has_headers: Option<bool>,
}
