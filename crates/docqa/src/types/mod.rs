//! Core types for the document QA service

pub mod document;
pub mod query;
pub mod response;

pub use document::{content_type_for, StoredFile, UploadedDocument};
pub use query::{DeleteRequest, GenerateRequest, QueryRequest};
pub use response::{
    AskResponse, DeleteOutcome, DeleteResponse, GenerateResponse, QueryResponse,
    ReadinessResponse, UploadError, UploadOutcome, UploadResponse,
};
