//! Screening API Server
//!
//! Thin HTTP facade over the cascade engine: deserializes patient
//! attributes, invokes whichever risk model was selected at startup, and
//! serializes the result record.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod model;
mod routes;

pub use config::Settings;
pub use model::{ModelError, RiskModel};

/// Application state shared across handlers
///
/// The model is read-only after startup, so plain `Arc` sharing suffices;
/// handlers never take a lock.
pub struct AppState {
    /// Selected risk model, real or heuristic
    pub model: RiskModel,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a selected model
    pub fn new(model: RiskModel) -> Self {
        Self {
            model,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::get_health))
        .route("/api/predict", post(routes::predict::post_predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(addr: &str, model: RiskModel) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(model));
    let app = create_router(state);

    info!("Starting screening API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
