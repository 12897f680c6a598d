//! Extraction run types and request/response definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::ExtractorConfig;

/// What started a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunTrigger {
    /// Fired by the periodic scheduler
    Scheduled,
    /// Requested through the API
    Manual,
}

impl std::fmt::Display for RunTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunTrigger::Scheduled => write!(f, "scheduled"),
            RunTrigger::Manual => write!(f, "manual"),
        }
    }
}

/// Status of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Run is recorded but not started
    Pending,
    /// Run is reading, extracting or writing
    Running,
    /// Output was written
    Completed,
    /// Run failed
    Failed,
}

/// Response when triggering a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRunResponse {
    /// ID of the created run
    pub run_id: Uuid,

    /// Whether the run was accepted
    pub accepted: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response with run status information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusResponse {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub trigger: RunTrigger,

    /// Input rows read
    pub rows_read: usize,

    /// Distinct keywords written (summed over columns for per-column runs)
    pub keywords: usize,

    /// Where the output was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Whether periodic runs are currently scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScheduleState {
    Active { interval_minutes: u64 },
    Paused { reason: String },
}

impl ScheduleState {
    pub fn is_active(&self) -> bool {
        matches!(self, ScheduleState::Active { .. })
    }
}

/// Response to reading or updating settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub settings: ExtractorConfig,
    pub input_exists: bool,
    pub schedule: ScheduleState,
}

/// Response after deleting a generated CSV file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutputResponse {
    pub deleted: String,

    /// Whether deleting this file paused scheduled runs
    pub schedule_paused: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
