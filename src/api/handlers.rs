//! HTTP request handlers for the keyword extractor.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ExtractError;
use crate::jobs::{RunProcessor, Scheduler};
use crate::output::OutputDirectory;
use crate::types::{
    DeleteOutputResponse, RunStatus, RunStatusResponse, RunTrigger, SettingsResponse,
    SettingsUpdate, TriggerRunResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub processor: Arc<RunProcessor>,
    pub scheduler: Scheduler,
}

impl AppState {
    pub fn new(processor: Arc<RunProcessor>) -> Self {
        let scheduler = Scheduler::new(Arc::clone(&processor));
        Self {
            processor,
            scheduler,
        }
    }
}

/// Error body returned by failing handlers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Maps library errors onto HTTP responses.
pub struct ApiError(ExtractError);

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ExtractError::Config(_) | ExtractError::RaggedRow { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ExtractError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    run_in_flight: bool,
    runs: HashMap<RunStatus, usize>,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        run_in_flight: state.processor.is_running(),
        runs: state.processor.run_counts().await,
    })
}

/// Trigger an extraction run now.
pub async fn trigger_run(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<TriggerRunResponse>) {
    match state.processor.spawn_run(RunTrigger::Manual).await {
        Some((run_id, _)) => {
            info!(run_id = %run_id, "Manual extraction run started");
            (
                StatusCode::ACCEPTED,
                Json(TriggerRunResponse {
                    run_id,
                    accepted: true,
                    message: None,
                }),
            )
        }
        None => (
            StatusCode::CONFLICT,
            Json(TriggerRunResponse {
                run_id: Uuid::nil(),
                accepted: false,
                message: Some("An extraction run is already in progress".to_string()),
            }),
        ),
    }
}

/// Get run status.
pub async fn get_run_status(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<Uuid>,
) -> Result<Json<RunStatusResponse>, StatusCode> {
    match state.processor.run_status(run_id).await {
        Some(status) => Ok(Json(status)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Current settings and schedule.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsResponse> {
    let settings = state.processor.settings().await;
    Json(SettingsResponse {
        input_exists: settings.input_exists(),
        settings,
        schedule: state.scheduler.state().await,
    })
}

/// Update settings and restart the schedule.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = state.processor.update_settings(update).await?;
    let schedule = state.scheduler.reschedule().await;

    Ok(Json(SettingsResponse {
        input_exists: settings.input_exists(),
        settings,
        schedule,
    }))
}

/// List generated CSV files.
pub async fn list_outputs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let settings = state.processor.settings().await;
    let outputs = OutputDirectory::new(&settings.output_dir).list()?;
    Ok(Json(outputs))
}

/// Delete one generated CSV file.
///
/// Deleting the current output (or a file named like the current input)
/// pauses scheduled runs until settings are saved again.
pub async fn delete_output(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<DeleteOutputResponse>, ApiError> {
    let settings = state.processor.settings().await;
    OutputDirectory::new(&settings.output_dir).delete(&name)?;

    let is_active_file = name == settings.output_file_name()
        || settings.input_file_name().as_deref() == Some(name.as_str());

    let notice = if is_active_file {
        state
            .scheduler
            .pause(format!("active file {name} was deleted"))
            .await;
        warn!(file = %name, "Deleted active file, scheduled extraction cleared");
        Some(
            "The scheduled keyword extraction was cleared because the associated CSV file was \
             deleted. Provide a valid input file and save settings to resume."
                .to_string(),
        )
    } else {
        None
    };

    Ok(Json(DeleteOutputResponse {
        deleted: name,
        schedule_paused: is_active_file,
        notice,
    }))
}
