//! Persisting output tables and managing generated CSV files.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use super::table_writer::to_csv_bytes;
use crate::error::{ExtractError, Result};
use crate::types::OutputTable;

/// Destination for a finished output table.
///
/// Implementations either persist the whole table or fail; a failed persist
/// must not leave a partially written artifact behind.
pub trait OutputSink: Send + Sync {
    /// Write the table, returning a description of where it went.
    fn persist(&self, table: &OutputTable) -> Result<String>;
}

/// Writes tables as CSV files, atomically replacing the previous output.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Mode the output should end up with: the previous file's, or a
    /// world-readable default. Temp files are created owner-only.
    fn target_permissions(&self) -> Option<fs::Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        }
    }

    fn write_failure(&self, source: std::io::Error) -> ExtractError {
        ExtractError::WriteFailure {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputSink for CsvFileSink {
    fn persist(&self, table: &OutputTable) -> Result<String> {
        let bytes = to_csv_bytes(table)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.write_failure(e))?;

        // Same directory as the target so the rename never crosses filesystems
        let mut tmp = tempfile::Builder::new()
            .prefix(".keyword-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| self.write_failure(e))?;

        if let Some(permissions) = self.target_permissions() {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| self.write_failure(e))?;
        }
        tmp.write_all(&bytes).map_err(|e| self.write_failure(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_failure(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_failure(e.error))?;

        info!(
            path = %self.path.display(),
            rows = table.len(),
            bytes = bytes.len(),
            "Wrote keyword table"
        );

        Ok(self.path.display().to_string())
    }
}

/// The directory generated CSV files live in.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    dir: PathBuf,
}

impl OutputDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A sink for `<dir>/<file_name>`.
    pub fn sink(&self, file_name: &str) -> CsvFileSink {
        CsvFileSink::new(self.dir.join(file_name))
    }

    /// Names of the `.csv` files in the directory, sorted. A missing
    /// directory has no outputs.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ExtractError::ReadFailure {
                    path: self.dir.clone(),
                    source: e,
                })
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_csv_name(name))
            .collect();
        names.sort();

        Ok(names)
    }

    /// Delete one generated file by name.
    pub fn delete(&self, name: &str) -> Result<PathBuf> {
        if !is_csv_name(name) || name.contains('/') || name.contains('\\') {
            return Err(ExtractError::NotFound(format!("not a generated CSV file: {name}")));
        }

        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(ExtractError::NotFound(path.display().to_string()));
        }

        fs::remove_file(&path).map_err(|source| ExtractError::WriteFailure {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "Deleted output file");
        Ok(path)
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

fn is_csv_name(name: &str) -> bool {
    !name.starts_with('.') && name.len() > ".csv".len() && name.ends_with(".csv")
}
