//! Document store provider trait for persisting uploaded files

use async_trait::async_trait;
use crate::error::Result;

/// Metadata about a stored object
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObjectInfo {
    /// Full object name (path inside the bucket)
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Trait for object storage
///
/// Implementations:
/// - `LocalDocumentStore`: Local filesystem
/// - `GcsDocumentStore`: Google Cloud Storage
///
/// Every call is a single attempt. Writes overwrite an existing object of
/// the same name.
#[async_trait]
pub trait DocumentStoreProvider: Send + Sync {
    /// Store an object
    ///
    /// Returns the storage URI
    async fn store_document(
        &self,
        object_name: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String>;

    /// Retrieve object data
    async fn get_document(&self, object_name: &str) -> Result<Vec<u8>>;

    /// Check if an object exists
    async fn exists(&self, object_name: &str) -> Result<bool>;

    /// Delete an object
    async fn delete_document(&self, object_name: &str) -> Result<()>;

    /// List objects whose name starts with `prefix`
    async fn list_documents(&self, prefix: &str) -> Result<Vec<StoredObjectInfo>>;

    /// Storage URI for an object name
    fn uri_for(&self, object_name: &str) -> String;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
