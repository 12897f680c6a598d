//! Keyword Extractor Service - Main Entry Point
//!
//! Runs keyword extraction on a schedule and exposes a small HTTP API for
//! triggering runs, changing settings and managing generated files.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyword_extractor::api::{self, AppState};
use keyword_extractor::jobs::RunProcessor;
use keyword_extractor::types::ExtractorConfig;
use keyword_extractor::DEFAULT_PORT;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "keyword_extractor=info,tower_http=debug".into()),
    );
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let config = ExtractorConfig::from_env()?;

    info!("Starting Keyword Extractor v{}", env!("CARGO_PKG_VERSION"));
    info!(
        input = ?config.csv_path,
        output = %config.output_path().display(),
        scope = %config.scope,
        interval_minutes = config.interval_minutes,
        "Loaded configuration"
    );

    // Initialize components
    let processor = Arc::new(RunProcessor::new(config));
    let state = Arc::new(AppState::new(processor));
    state.scheduler.reschedule().await;

    let app = api::build_router(Arc::clone(&state));

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
