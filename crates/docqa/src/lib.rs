//! docqa: Ask questions about uploaded documents
//!
//! Uploaded documents are persisted to Google Cloud Storage (or a local
//! directory) and sent, together with the user's question, to Google
//! Gemini. The answer is returned over a small HTTP API and a single-page
//! upload form.

pub mod config;
pub mod error;
pub mod generation;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AppConfig, Secrets};
pub use error::{Error, Result};
pub use generation::QaService;
pub use storage::DocumentUploader;
pub use types::{
    document::{StoredFile, UploadedDocument},
    query::QueryRequest,
    response::{AskResponse, QueryResponse, UploadOutcome},
};
