//! Upload-and-ask endpoint: one question about one document

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::generation::QaService;
use crate::server::state::AppState;
use crate::types::{AskResponse, UploadedDocument};

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Error {
    Error::invalid_request(format!("Failed to read multipart field: {}", e))
}

/// POST /api/ask - Upload a document and ask a question about it
///
/// Fields: `file` (required), `question` (required), `filename` (optional
/// object name). A storage failure does not stop the answer; it is reported
/// in `storage_error` instead.
pub async fn ask_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    let mut question: Option<String> = None;
    let mut custom_name: Option<String> = None;
    let mut document: Option<UploadedDocument> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "question" => question = Some(field.text().await.map_err(multipart_error)?),
            "filename" => custom_name = Some(field.text().await.map_err(multipart_error)?),
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                document = Some(UploadedDocument::with_content_type(
                    &filename,
                    data,
                    &content_type,
                ));
            }
            other => tracing::debug!("Ignoring multipart field {:?}", other),
        }
    }

    let question = question.unwrap_or_default();
    QaService::validate_question(&question)?;
    let document =
        document.ok_or_else(|| Error::invalid_request("Missing 'file' field"))?;
    // Nothing is stored for a request that will be rejected
    QaService::validate_document(&document)?;

    tracing::info!(
        "Question about {} ({} bytes): \"{}\"",
        document.filename,
        document.len(),
        question.trim()
    );

    let (object_uri, storage_error) = if state.config().storage.persist_uploads {
        match state
            .uploader()
            .upload(&document, custom_name.as_deref())
            .await
        {
            Ok(outcome) => (Some(outcome.uri), None),
            Err(e) => {
                tracing::warn!("Continuing without a persisted copy: {}", e);
                (None, Some(e.to_string()))
            }
        }
    } else {
        (None, None)
    };

    let answer = state.qa().ask(&document, &question).await?;

    Ok(Json(AskResponse {
        answer,
        filename: document.filename,
        object_uri,
        storage_error,
        model: state.qa().provider().model().to_string(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}
