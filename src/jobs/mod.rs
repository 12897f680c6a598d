//! Run processing and scheduling.

mod processor;
mod scheduler;
mod store;

pub use processor::{execute_run, RunOutcome, RunProcessor};
pub use scheduler::Scheduler;
pub use store::{RunRecord, RunStore};
