use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::api::{validate, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub hostname: String,
    pub ip: String,
    pub path: String,
    pub content: String,
}

/// `GET /sftp/api/v1.0/get-file?ip=<ipv4>&path=<string>`
///
/// Validate → registry check → acquire session → existence probe → read.
pub async fn get_file(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<FileResponse>, ApiError> {
    let req = validate::validate_query(&params).map_err(ApiError::Validation)?;

    let host = state
        .registry
        .get(&req.ip)
        .ok_or(ApiError::UnregisteredHost)?;

    let session = state.cache.acquire(host).await.map_err(|e| {
        warn!(ip = %req.ip, error = %e, "Failed to acquire session");
        ApiError::Upstream(e)
    })?;

    let exists = session.file_exists(&req.path).await.map_err(|e| {
        warn!(ip = %req.ip, path = %req.path, error = %e, "Existence probe failed");
        ApiError::Upstream(e)
    })?;
    if !exists {
        debug!(ip = %req.ip, path = %req.path, "File not found");
        return Err(ApiError::NotFound);
    }

    let hostname = session.hostname().await;
    let content = session.read_file(&req.path).await.map_err(|e| {
        warn!(ip = %req.ip, path = %req.path, error = %e, "Read failed");
        ApiError::Upstream(e)
    })?;

    debug!(ip = %req.ip, path = %req.path, bytes = content.len(), "Served file");
    Ok(Json(FileResponse {
        hostname,
        ip: req.ip,
        path: req.path,
        content,
    }))
}
