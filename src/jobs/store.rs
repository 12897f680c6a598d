//! Run store for tracking extraction runs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::extract::ExtractionSummary;
use crate::types::{RunStatus, RunStatusResponse, RunTrigger};

/// How long finished runs are kept.
const RUN_RETENTION_HOURS: i64 = 1;

/// In-memory store of recent extraction runs.
pub struct RunStore {
    runs: HashMap<Uuid, RunRecord>,
}

/// Internal record for tracking a run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub trigger: RunTrigger,
    pub rows_read: usize,
    pub keywords: usize,
    pub output_path: Option<String>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn new(run_id: Uuid, trigger: RunTrigger) -> Self {
        Self {
            run_id,
            status: RunStatus::Pending,
            trigger,
            rows_read: 0,
            keywords: 0,
            output_path: None,
            error: None,
            started_at: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn complete(&mut self, summary: &ExtractionSummary, output_path: String) {
        self.status = RunStatus::Completed;
        self.rows_read = summary.rows;
        self.keywords = summary.distinct_words;
        self.output_path = Some(output_path);
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: String) {
        self.status = RunStatus::Failed;
        self.error = Some(error);
        self.completed_at = Some(Utc::now());
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, RunStatus::Completed | RunStatus::Failed)
    }

    pub fn to_response(&self) -> RunStatusResponse {
        RunStatusResponse {
            run_id: self.run_id,
            status: self.status,
            trigger: self.trigger,
            rows_read: self.rows_read,
            keywords: self.keywords,
            output_path: self.output_path.clone(),
            error: self.error.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

impl RunStore {
    pub fn new() -> Self {
        Self {
            runs: HashMap::new(),
        }
    }

    /// Record a new pending run and return its ID.
    pub fn create_run(&mut self, trigger: RunTrigger) -> Uuid {
        let run_id = Uuid::new_v4();
        self.runs.insert(run_id, RunRecord::new(run_id, trigger));
        run_id
    }

    pub fn get_run(&self, run_id: Uuid) -> Option<&RunRecord> {
        self.runs.get(&run_id)
    }

    pub fn start_run(&mut self, run_id: Uuid) -> bool {
        self.update(run_id, RunRecord::start)
    }

    pub fn complete_run(
        &mut self,
        run_id: Uuid,
        summary: &ExtractionSummary,
        output_path: String,
    ) -> bool {
        self.update(run_id, |run| run.complete(summary, output_path))
    }

    pub fn fail_run(&mut self, run_id: Uuid, error: String) -> bool {
        self.update(run_id, |run| run.fail(error))
    }

    pub fn get_run_status(&self, run_id: Uuid) -> Option<RunStatusResponse> {
        self.runs.get(&run_id).map(RunRecord::to_response)
    }

    /// Most recently created run.
    pub fn latest(&self) -> Option<&RunRecord> {
        self.runs.values().max_by_key(|run| run.created_at)
    }

    /// Drop finished runs older than the retention window.
    pub fn cleanup_old_runs(&mut self) {
        let cutoff = Utc::now() - chrono::Duration::hours(RUN_RETENTION_HOURS);
        self.runs.retain(|_, run| {
            !run.is_finished() || run.completed_at.map_or(true, |t| t > cutoff)
        });
    }

    /// Count of runs by status.
    pub fn get_run_counts(&self) -> HashMap<RunStatus, usize> {
        let mut counts = HashMap::new();
        for run in self.runs.values() {
            *counts.entry(run.status).or_insert(0) += 1;
        }
        counts
    }

    fn update(&mut self, run_id: Uuid, f: impl FnOnce(&mut RunRecord)) -> bool {
        match self.runs.get_mut(&run_id) {
            Some(run) => {
                f(run);
                true
            }
            None => false,
        }
    }
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}
