//! fileproc library - File Processor service
//!
//! HTTP-fronted file intake pipeline: uploads land in an intake directory,
//! a background loop records each file in SQLite and relocates it to a
//! processed-files directory.

use std::sync::Arc;

use axum::Router;
use fileproc_common::Config;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod processor;

/// Application state shared across HTTP handlers and the processing loop
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service configuration (paths, interval)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::service_info))
        .route("/health", get(api::health_check))
        .route("/upload/", post(api::upload_file))
        .route("/trigger-processing/", post(api::trigger_processing))
        .route("/list-files/", get(api::list_files))
        .route("/list-database/", get(api::list_database))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
