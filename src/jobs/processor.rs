//! Run processor: read input, extract, persist, record.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::store::RunStore;
use crate::error::{ExtractError, Result};
use crate::extract::{read_rows, ExtractionSummary, Extractor};
use crate::output::{OutputDirectory, OutputSink};
use crate::types::{ExtractorConfig, RunStatus, RunStatusResponse, RunTrigger, SettingsUpdate};

/// Result of one successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: ExtractionSummary,
    pub output_path: String,
}

/// Run one extraction synchronously: read the input file, extract, hand the
/// table to `sink`.
pub fn execute_run(config: &ExtractorConfig, sink: &dyn OutputSink) -> Result<RunOutcome> {
    let csv_path = config
        .csv_path
        .as_deref()
        .ok_or_else(|| ExtractError::Config("csv_path is not set".to_string()))?;

    let rows = read_rows(csv_path, config.has_headers)?;
    let extraction = Extractor::from_config(config).run(&rows)?;
    let output_path = sink.persist(&extraction.table)?;

    Ok(RunOutcome {
        summary: extraction.summary,
        output_path,
    })
}

/// Owns the current settings and run history, and guarantees at most one
/// run is in flight.
pub struct RunProcessor {
    settings: RwLock<ExtractorConfig>,
    runs: RwLock<RunStore>,
    in_flight: AtomicBool,
}

impl RunProcessor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            settings: RwLock::new(config),
            runs: RwLock::new(RunStore::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current settings.
    pub async fn settings(&self) -> ExtractorConfig {
        self.settings.read().await.clone()
    }

    /// Apply a partial update; invalid results leave the settings untouched.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<ExtractorConfig> {
        let mut settings = self.settings.write().await;
        let mut next = settings.clone();
        next.apply(update);
        next.validate()?;
        *settings = next.clone();

        info!(
            scope = %next.scope,
            interval_minutes = next.interval_minutes,
            output = %next.output_path().display(),
            "Settings updated"
        );
        Ok(next)
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the in-flight slot and record a pending run. `None` if busy.
    pub async fn begin(&self, trigger: RunTrigger) -> Option<Uuid> {
        // Lock first: no await may sit between claiming the slot and recording the run.
        let mut runs = self.runs.write().await;
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        runs.cleanup_old_runs();
        Some(runs.create_run(trigger))
    }

    /// Execute a run claimed with [`RunProcessor::begin`] and release the slot.
    ///
    /// The slot is released even if this future is dropped part way through;
    /// the run is then recorded as failed.
    pub async fn process_run(&self, run_id: Uuid) -> Option<RunStatusResponse> {
        let mut slot = InFlightSlot {
            processor: self,
            run_id,
            finished: false,
        };
        self.runs.write().await.start_run(run_id);

        let config = self.settings().await;
        info!(
            run_id = %run_id,
            input = ?config.csv_path,
            scope = %config.scope,
            "Starting extraction run"
        );

        let result = tokio::task::spawn_blocking(move || {
            let sink = OutputDirectory::new(&config.output_dir).sink(&config.output_file_name());
            execute_run(&config, &sink)
        })
        .await;

        {
            let mut runs = self.runs.write().await;
            match result {
                Ok(Ok(outcome)) => {
                    info!(
                        run_id = %run_id,
                        rows = outcome.summary.rows,
                        keywords = outcome.summary.distinct_words,
                        output = %outcome.output_path,
                        "Extraction run complete"
                    );
                    runs.complete_run(run_id, &outcome.summary, outcome.output_path);
                }
                Ok(Err(e)) => {
                    error!(run_id = %run_id, error = %e, "Extraction run failed");
                    runs.fail_run(run_id, e.to_string());
                }
                Err(e) => {
                    error!(run_id = %run_id, error = %e, "Extraction task aborted");
                    runs.fail_run(run_id, e.to_string());
                }
            }
        }

        slot.finished = true;
        drop(slot);
        self.run_status(run_id).await
    }

    /// Run to completion now. `None` if another run is in flight.
    pub async fn run_now(&self, trigger: RunTrigger) -> Option<RunStatusResponse> {
        let run_id = self.begin(trigger).await?;
        self.process_run(run_id).await
    }

    /// Start a run on its own task. `None` if busy.
    ///
    /// Dropping or aborting whoever awaits the handle does not cancel the run.
    pub async fn spawn_run(
        self: &Arc<Self>,
        trigger: RunTrigger,
    ) -> Option<(Uuid, JoinHandle<Option<RunStatusResponse>>)> {
        let run_id = self.begin(trigger).await?;
        let processor = Arc::clone(self);
        let handle = tokio::spawn(async move { processor.process_run(run_id).await });
        Some((run_id, handle))
    }

    pub async fn run_status(&self, run_id: Uuid) -> Option<RunStatusResponse> {
        self.runs.read().await.get_run_status(run_id)
    }

    /// Status of the most recent run.
    pub async fn latest_run(&self) -> Option<RunStatusResponse> {
        self.runs.read().await.latest().map(|run| run.to_response())
    }

    /// Number of tracked runs by status.
    pub async fn run_counts(&self) -> HashMap<RunStatus, usize> {
        self.runs.read().await.get_run_counts()
    }
}

/// Holds the in-flight slot for one run and gives it back on drop.
struct InFlightSlot<'a> {
    processor: &'a RunProcessor,
    run_id: Uuid,
    finished: bool,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!(run_id = %self.run_id, "Extraction run cancelled before it finished");
            if let Ok(mut runs) = self.processor.runs.try_write() {
                runs.fail_run(self.run_id, "run cancelled before it finished".to_string());
            }
        }
        self.processor.in_flight.store(false, Ordering::Release);
    }
}
