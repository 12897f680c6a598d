//! Periodic scheduling of extraction runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::processor::RunProcessor;
use crate::types::{RunTrigger, ScheduleState};

/// Runs an extraction every `interval_minutes` while the input file exists.
///
/// The first tick fires immediately. A tick that arrives while another run
/// is in flight is skipped.
pub struct Scheduler {
    processor: Arc<RunProcessor>,
    task: Mutex<Option<JoinHandle<()>>>,
    state: Mutex<ScheduleState>,
}

impl Scheduler {
    pub fn new(processor: Arc<RunProcessor>) -> Self {
        Self {
            processor,
            task: Mutex::new(None),
            state: Mutex::new(ScheduleState::Paused {
                reason: "not started".to_string(),
            }),
        }
    }

    /// Cancel any running schedule and start a new one from the current settings.
    ///
    /// Stays paused when the input file does not exist. A run already in
    /// flight finishes on its own task.
    pub async fn reschedule(&self) -> ScheduleState {
        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
        }

        let config = self.processor.settings().await;
        let state = if !config.input_exists() {
            let reason = match &config.csv_path {
                Some(path) => format!("input file does not exist: {}", path.display()),
                None => "no input file configured".to_string(),
            };
            warn!(reason = %reason, "Not scheduling keyword extraction");
            ScheduleState::Paused { reason }
        } else {
            let processor = Arc::clone(&self.processor);
            let period = Duration::from_secs(config.interval_minutes.max(1) * 60);

            *task = Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    ticker.tick().await;
                    // The run lives on its own task so aborting this loop detaches it.
                    match processor.spawn_run(RunTrigger::Scheduled).await {
                        Some((run_id, run)) => {
                            if let Ok(Some(status)) = run.await {
                                debug!(
                                    run_id = %run_id,
                                    status = ?status.status,
                                    "Scheduled run finished"
                                );
                            }
                        }
                        None => info!("Previous run still in flight, skipping scheduled run"),
                    }
                }
            }));

            info!(
                interval_minutes = config.interval_minutes,
                "Scheduled recurring keyword extraction"
            );
            ScheduleState::Active {
                interval_minutes: config.interval_minutes,
            }
        };

        *self.state.lock().await = state.clone();
        state
    }

    /// Stop scheduled runs. A run already in flight finishes on its own task.
    pub async fn pause(&self, reason: impl Into<String>) -> ScheduleState {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
        }

        let state = ScheduleState::Paused {
            reason: reason.into(),
        };
        info!(state = ?state, "Paused scheduled keyword extraction");
        *self.state.lock().await = state.clone();
        state
    }

    pub async fn state(&self) -> ScheduleState {
        self.state.lock().await.clone()
    }
}
