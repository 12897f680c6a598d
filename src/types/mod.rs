//! Core types for the keyword extractor.

mod config;
mod run;
mod table;

pub use config::{ExtractorConfig, RaggedRowPolicy, SettingsUpdate, CONFIG_FILE, ENV_PREFIX};
pub use run::{
    DeleteOutputResponse, RunStatus, RunStatusResponse, RunTrigger, ScheduleState,
    SettingsResponse, TriggerRunResponse,
};
pub use table::{OutputTable, Ranked, RankedList, Scope};
