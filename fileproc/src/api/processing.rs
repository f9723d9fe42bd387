//! Manual processing trigger endpoint

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::processor;
use crate::AppState;

/// Trigger acknowledgment
#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub message: String,
}

/// POST /trigger-processing/
///
/// Schedules a single processing pass as a fire-and-forget background task.
/// The perpetual loop keeps its own schedule; this runs one extra cycle now.
/// Cycle errors are logged, never surfaced to the client.
pub async fn trigger_processing(State(state): State<AppState>) -> Json<TriggerResponse> {
    tokio::spawn(async move {
        if let Err(e) = processor::run_cycle(&state.db, &state.config).await {
            error!("Error in file processing: {}", e);
        }
    });

    Json(TriggerResponse {
        message: "File processing triggered".to_string(),
    })
}
