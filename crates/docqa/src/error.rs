//! Error types for the document QA service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for document QA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Document QA errors
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration; fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Object storage failure (network, permission, bucket)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generative-AI provider failure; carries the provider's message
    #[error("API error: {0}")]
    Api(String),

    /// Bad input from the caller
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Stored object not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an API error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the caller can report this error and keep serving
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone()),
            Error::Storage(msg) => (StatusCode::BAD_GATEWAY, "storage_error", msg.clone()),
            Error::Api(msg) => (StatusCode::BAD_GATEWAY, "api_error", msg.clone()),
            Error::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Not found: {}", what),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
