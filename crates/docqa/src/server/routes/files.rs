//! Stored file management endpoints

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{
    DeleteRequest, DeleteResponse, StoredFile, UploadError, UploadResponse, UploadedDocument,
};

/// Response for file list
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<StoredFile>,
    pub total: usize,
}

/// Response for prefix deletion
#[derive(Debug, Serialize)]
pub struct PrefixDeleteResponse {
    pub prefix: String,
    pub deleted: usize,
}

/// POST /api/upload - Upload one or more files to storage
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut uploaded = Vec::new();
    let mut errors = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        Error::invalid_request(format!("Failed to read multipart field: {}", e))
    })? {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let content_type = field.content_type().unwrap_or("").to_string();

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                errors.push(UploadError {
                    filename,
                    error: format!("Failed to read file: {}", e),
                });
                continue;
            }
        };

        tracing::info!("Uploading {} ({} bytes)", filename, data.len());
        let document = UploadedDocument::with_content_type(&filename, data, &content_type);

        match state.uploader().upload(&document, None).await {
            Ok(outcome) => uploaded.push(outcome),
            Err(e) => errors.push(UploadError {
                filename,
                error: e.to_string(),
            }),
        }
    }

    if uploaded.is_empty() && errors.is_empty() {
        return Err(Error::invalid_request("No files in upload"));
    }

    Ok(Json(UploadResponse { uploaded, errors }))
}

/// GET /api/files - List stored files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    let files = state.uploader().list_files().await?;
    Ok(Json(FileListResponse {
        total: files.len(),
        files,
    }))
}

/// POST /api/files/delete - Delete the given files
pub async fn delete_files(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>> {
    if request.paths.is_empty() {
        return Err(Error::invalid_request("No files selected"));
    }

    let results = state.uploader().delete_files(&request.paths).await;
    Ok(Json(DeleteResponse::from_outcomes(results)))
}

/// DELETE /api/files/prefix/*prefix - Delete every file under a prefix
pub async fn delete_by_prefix(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Result<Json<PrefixDeleteResponse>> {
    let deleted = state.uploader().delete_by_prefix(&prefix).await?;
    Ok(Json(PrefixDeleteResponse { prefix, deleted }))
}
