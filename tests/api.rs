//! HTTP API behavior, driven through the router without a listener.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use keyword_extractor::api::{build_router, AppState};
use keyword_extractor::jobs::RunProcessor;
use keyword_extractor::types::{ExtractorConfig, RunStatus};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn setup(input: &str) -> (TempDir, ExtractorConfig, Router) {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("reviews.csv");
    fs::write(&csv_path, input).unwrap();

    let config = ExtractorConfig {
        csv_path: Some(csv_path),
        output_dir: dir.path().join("keyword-data"),
        ..Default::default()
    };
    let processor = Arc::new(RunProcessor::new(config.clone()));
    let app = build_router(Arc::new(AppState::new(processor)));
    (dir, config, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn write_output(dir: &Path, name: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), "word,1\n").unwrap();
}

#[tokio::test]
async fn test_health() {
    let (_dir, _config, app) = setup("");
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["run_in_flight"], false);
    assert_eq!(body["runs"], serde_json::json!({}));
}

#[tokio::test]
async fn test_manual_run_writes_output() {
    let (_dir, config, app) = setup("cats and dogs\ndogs are great\n");

    let (status, body) = send(&app, "POST", "/runs", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["accepted"], true);
    let run_id = body["run_id"].as_str().unwrap().to_string();

    let mut completed = false;
    for _ in 0..100 {
        let (status, body) = send(&app, "GET", &format!("/runs/{run_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == "completed" {
            assert_eq!(body["keywords"], 3);
            assert_eq!(body["trigger"], "manual");
            completed = true;
            break;
        }
        assert_ne!(body["status"], "failed");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(completed, "run did not complete");

    assert_eq!(
        fs::read_to_string(config.output_path()).unwrap(),
        "dogs,2\ncats,1\ngreat,1\n"
    );

    let (_, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(body["runs"]["completed"], 1);
}

#[tokio::test]
async fn test_unknown_run_is_not_found() {
    let (_dir, _config, app) = setup("");
    let uri = format!("/runs/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_roundtrip_and_validation() {
    let (_dir, _config, app) = setup("alpha beta\n");

    let (status, body) = send(&app, "GET", "/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_exists"], true);
    assert_eq!(body["settings"]["scope"], "global");

    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(serde_json::json!({ "interval_minutes": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("interval_minutes"));

    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(serde_json::json!({ "stop_words": "alpha", "scope": "per_column" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["stop_words"], "alpha");
    assert_eq!(body["settings"]["scope"], "per_column");
    assert_eq!(body["schedule"]["state"], "active");
}

#[tokio::test]
async fn test_settings_with_missing_input_pause_schedule() {
    let (dir, _config, app) = setup("");
    let missing = dir.path().join("nope.csv");

    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(serde_json::json!({ "csv_path": missing })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_exists"], false);
    assert_eq!(body["schedule"]["state"], "paused");
}

#[tokio::test]
async fn test_list_and_delete_outputs() {
    let (_dir, config, app) = setup("");
    write_output(&config.output_dir, "older.csv");
    write_output(&config.output_dir, &config.output_file_name());
    fs::write(config.output_dir.join("notes.txt"), "").unwrap();

    let (status, body) = send(&app, "GET", "/outputs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["keyword-results.csv", "older.csv"]));

    let (status, body) = send(&app, "DELETE", "/outputs/older.csv", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["schedule_paused"], false);

    let (status, body) = send(&app, "DELETE", "/outputs/keyword-results.csv", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["schedule_paused"], true);
    assert!(body["notice"].is_string());

    let (status, _) = send(&app, "DELETE", "/outputs/older.csv", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/settings", None).await;
    assert_eq!(body["schedule"]["state"], "paused");
}
