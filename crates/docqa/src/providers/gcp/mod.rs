//! Google Cloud Platform provider implementations
//!
//! - Google Cloud Storage for persisting uploaded documents

mod gcs_store;

pub use gcs_store::GcsDocumentStore;
