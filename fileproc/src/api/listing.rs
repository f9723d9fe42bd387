//! Listing endpoints for the intake/processed directories and the database

use std::path::Path;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::db::{self, FileRecord};
use crate::error::ApiResult;
use crate::AppState;

/// Directory listings of the intake and processed stores
#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    pub uploaded_files: Vec<String>,
    pub processed_files: Vec<String>,
}

/// All processed-file records
#[derive(Debug, Serialize)]
pub struct ListDatabaseResponse {
    pub records: Vec<FileRecord>,
}

/// GET /list-files/
///
/// Lists both directories; a directory that does not exist yet is reported
/// as an empty list, not an error.
pub async fn list_files(State(state): State<AppState>) -> ApiResult<Json<ListFilesResponse>> {
    Ok(Json(ListFilesResponse {
        uploaded_files: read_dir_names(&state.config.upload_dir).await?,
        processed_files: read_dir_names(&state.config.processed_dir).await?,
    }))
}

/// GET /list-database/
pub async fn list_database(State(state): State<AppState>) -> ApiResult<Json<ListDatabaseResponse>> {
    let records = db::list_file_records(&state.db).await?;
    Ok(Json(ListDatabaseResponse { records }))
}

async fn read_dir_names(dir: &Path) -> std::io::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}
