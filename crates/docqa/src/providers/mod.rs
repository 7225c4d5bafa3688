//! Provider abstractions for document storage and answer generation
//!
//! Trait-based so the storage backend (GCS or local filesystem) and the
//! model provider can be swapped without touching the request flow.

pub mod document_store;
pub mod gemini_client;
pub mod llm;
pub mod local;

#[cfg(feature = "gcp")]
pub mod gcp;

pub use document_store::{DocumentStoreProvider, StoredObjectInfo};
pub use gemini_client::GeminiClient;
pub use llm::LlmProvider;
pub use local::LocalDocumentStore;
