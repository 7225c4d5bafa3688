//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

/// Answer to a question about an uploaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The model's answer
    pub answer: String,
    /// Filename the question was about
    pub filename: String,
    /// Storage reference when the upload was persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_uri: Option<String>,
    /// Why the upload was not persisted, if it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_error: Option<String>,
    /// Model used
    pub model: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Result of storing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Object path inside the bucket
    pub object_path: String,
    /// Storage reference (e.g. `gs://bucket/path`)
    pub uri: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type written with the object
    pub content_type: String,
}

/// Per-file results of a multi-file upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uploaded: Vec<UploadOutcome>,
    pub errors: Vec<UploadError>,
}

/// Upload failure for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadError {
    pub filename: String,
    pub error: String,
}

/// Result of deleting one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub path: String,
    pub success: bool,
    pub message: String,
}

/// Results of a delete request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub results: Vec<DeleteOutcome>,
    pub deleted: usize,
}

impl DeleteResponse {
    pub fn from_outcomes(results: Vec<DeleteOutcome>) -> Self {
        let deleted = results.iter().filter(|r| r.success).count();
        Self { results, deleted }
    }
}

/// Answer to a query over stored files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub files: Vec<String>,
    pub model: String,
    pub processing_time_ms: u64,
}

/// Model output for a free-form prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
    pub model: String,
    pub processing_time_ms: u64,
}

/// Whether each provider answered its health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub storage: bool,
    pub llm: bool,
}
