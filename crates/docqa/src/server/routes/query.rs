//! Query endpoint over files already in storage

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::generation::QaService;
use crate::server::state::AppState;
use crate::types::{GenerateRequest, GenerateResponse, QueryRequest, QueryResponse};

/// POST /api/query - Ask a question about selected stored files
pub async fn query_files(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    QaService::validate_question(&request.question)?;
    QaService::validate_temperature(request.temperature)?;
    if request.files.is_empty() {
        return Err(Error::invalid_request("Select at least one document"));
    }

    tracing::info!(
        "Query over {} files: \"{}\"",
        request.files.len(),
        request.question.trim()
    );

    let mut documents = Vec::with_capacity(request.files.len());
    for path in &request.files {
        documents.push(state.uploader().read_file(path).await?);
    }

    let answer = state
        .qa()
        .ask_many(&documents, &request.question, request.temperature)
        .await?;

    Ok(Json(QueryResponse {
        answer,
        files: request.files,
        model: state.qa().provider().model().to_string(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// POST /api/generate - Free-form prompt with an optional temperature
pub async fn generate_text(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let start = Instant::now();
    let text = state
        .qa()
        .generate(&request.prompt, request.temperature)
        .await?;

    Ok(Json(GenerateResponse {
        text,
        model: state.qa().provider().model().to_string(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}
