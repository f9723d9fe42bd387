//! Service description endpoint

use axum::Json;
use serde_json::{json, Value};

/// GET /
///
/// Service description and endpoint list.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the File Processor API",
        "endpoints": {
            "/upload/": "POST - Upload a file (use multipart/form-data with 'file' field)",
            "/trigger-processing/": "POST - Manually trigger file processing",
            "/list-files/": "GET - List uploaded and processed files",
            "/list-database/": "GET - List processed-file records",
        }
    }))
}
