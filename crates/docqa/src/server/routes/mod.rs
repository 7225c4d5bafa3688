//! API routes for the document QA server

pub mod ask;
pub mod files;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload + ask in one step - with larger body limit for file uploads
        .route(
            "/ask",
            post(ask::ask_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Stored files
        .route(
            "/upload",
            post(files::upload_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/files", get(files::list_files))
        .route("/files/delete", post(files::delete_files))
        .route("/files/prefix/*prefix", delete(files::delete_by_prefix))
        // Query over stored files
        .route("/query", post(query::query_files))
        .route("/generate", post(query::generate_text))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "docqa",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Ask questions about uploaded documents using Gemini",
        "model": state.qa().provider().model(),
        "storage": state.uploader().store().name(),
        "endpoints": {
            "POST /api/ask": "Upload a document and ask a question about it (multipart: file, question, filename?)",
            "POST /api/upload": "Upload documents to storage (multipart)",
            "GET /api/files": "List stored documents",
            "POST /api/files/delete": "Delete stored documents",
            "DELETE /api/files/prefix/*prefix": "Delete stored documents by prefix",
            "POST /api/query": "Ask a question about stored documents",
            "POST /api/generate": "Free-form prompt (prompt, temperature?)"
        }
    }))
}
