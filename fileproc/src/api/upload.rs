//! File upload endpoint

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Upload acknowledgment
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

/// POST /upload/
///
/// Accepts a single multipart file field named `file` and writes its bytes
/// verbatim into the intake directory under the declared filename. An
/// existing intake file of the same name is overwritten without warning.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|name| name.to_string())
            .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to upload file: {}", e)))?;

        let dest = state.config.upload_dir.join(&filename);
        tokio::fs::write(&dest, &bytes)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to upload file: {}", e)))?;

        info!("File saved to: {}", dest.display());

        return Ok(Json(UploadResponse {
            message: format!("File '{}' uploaded successfully", filename),
        }));
    }

    Err(ApiError::BadRequest("No file provided".to_string()))
}
