//! Document uploader
//!
//! Wraps a [`DocumentStoreProvider`] with the object naming policy
//! (`base_path` + optional timestamp prefix), content-type detection and an
//! optional per-call timeout. Every store failure surfaces as
//! [`Error::Storage`]; a missing object on read is [`Error::NotFound`].

use chrono::Local;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::providers::DocumentStoreProvider;
use crate::types::document::sanitize_filename;
use crate::types::{DeleteOutcome, StoredFile, UploadOutcome, UploadedDocument};

/// Uploads, lists and deletes documents under a base path
pub struct DocumentUploader {
    store: Arc<dyn DocumentStoreProvider>,
    base_path: String,
    timestamp_prefix: bool,
    timeout: Option<Duration>,
}

impl DocumentUploader {
    /// Create an uploader over a store
    pub fn new(store: Arc<dyn DocumentStoreProvider>, config: &StorageConfig) -> Self {
        tracing::info!(
            "Initialized uploader for {} store (base path: {:?})",
            store.name(),
            config.base_path
        );
        Self {
            store,
            base_path: config.base_path.trim_matches('/').to_string(),
            timestamp_prefix: config.timestamp_prefix,
            timeout: config.timeout(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStoreProvider> {
        &self.store
    }

    /// Join a relative name onto the base path
    fn full_path(&self, name: &str) -> String {
        let name = name.trim_start_matches('/');
        if self.base_path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.base_path, name)
        }
    }

    /// Object name for an upload
    ///
    /// A custom name is used as given (relative to the base path); otherwise
    /// the filename is prefixed with a `YYYYMMDD_HHMMSS_` timestamp unless
    /// that is disabled.
    pub fn object_name(&self, filename: &str, custom_name: Option<&str>) -> Result<String> {
        let name = match custom_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(custom) => {
                let custom = custom.trim_start_matches('/');
                if custom.is_empty()
                    || custom.ends_with('/')
                    || custom.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
                {
                    return Err(Error::invalid_request(format!(
                        "Invalid object name: {:?}",
                        custom
                    )));
                }
                custom.to_string()
            }
            None => {
                let filename = sanitize_filename(filename).ok_or_else(|| {
                    Error::invalid_request(format!("Invalid filename: {:?}", filename))
                })?;
                if self.timestamp_prefix {
                    format!("{}_{}", Local::now().format("%Y%m%d_%H%M%S"), filename)
                } else {
                    filename
                }
            }
        };

        Ok(self.full_path(&name))
    }

    /// Run a store call, bounded by the configured timeout
    async fn bounded<T, F>(&self, what: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                Error::Storage(format!("{} timed out after {}s", what, limit.as_secs_f64()))
            })?,
            None => call.await,
        };

        result.map_err(|e| match e {
            Error::Storage(_) | Error::NotFound(_) | Error::InvalidRequest(_) => e,
            other => Error::Storage(other.to_string()),
        })
    }

    /// Upload a document. Overwrites an existing object of the same name.
    pub async fn upload(
        &self,
        document: &UploadedDocument,
        custom_name: Option<&str>,
    ) -> Result<UploadOutcome> {
        let object_path = self.object_name(&document.filename, custom_name)?;

        let uri = self
            .bounded(
                "Upload",
                self.store
                    .store_document(&object_path, &document.bytes, &document.content_type),
            )
            .await
            .inspect_err(|e| tracing::error!("Error uploading {}: {}", document.filename, e))?;

        tracing::info!("Successfully uploaded file to {}", object_path);

        Ok(UploadOutcome {
            object_path,
            uri,
            size: document.len() as u64,
            content_type: document.content_type.clone(),
        })
    }

    /// Only objects under the base path may be read back
    fn check_within_base(&self, object_path: &str) -> Result<()> {
        let under_base = self.base_path.is_empty()
            || object_path
                .strip_prefix(self.base_path.as_str())
                .is_some_and(|rest| rest.len() > 1 && rest.starts_with('/'));
        let clean = object_path
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..");

        if under_base && clean {
            Ok(())
        } else {
            Err(Error::invalid_request(format!(
                "{:?} is not a stored document",
                object_path
            )))
        }
    }

    /// Read a stored object back as a document
    pub async fn read_file(&self, object_path: &str) -> Result<UploadedDocument> {
        self.check_within_base(object_path)?;
        tracing::info!("Reading file: {}", object_path);
        let data = self
            .bounded("Read", self.store.get_document(object_path))
            .await?;
        tracing::info!("Successfully read {} bytes", data.len());

        let filename = object_path.rsplit('/').next().unwrap_or(object_path);
        Ok(UploadedDocument::new(filename, data))
    }

    /// List files under the base path, skipping directory placeholders
    pub async fn list_files(&self) -> Result<Vec<StoredFile>> {
        let prefix = if self.base_path.is_empty() {
            String::new()
        } else {
            format!("{}/", self.base_path)
        };

        tracing::info!("Listing files from path: {:?}", prefix);
        let objects = self
            .bounded("List", self.store.list_documents(&prefix))
            .await?;

        let files: Vec<StoredFile> = objects
            .into_iter()
            .filter(|o| !o.name.ends_with('/'))
            .map(|o| StoredFile::new(o.name, o.size))
            .collect();

        tracing::info!("Found {} files", files.len());
        Ok(files)
    }

    /// Delete one object. Never fails; the outcome says what happened.
    pub async fn delete_file(&self, object_path: &str) -> DeleteOutcome {
        match self.remove_if_exists(object_path).await {
            Ok(true) => {
                tracing::info!("Successfully deleted file: {}", object_path);
                DeleteOutcome {
                    path: object_path.to_string(),
                    success: true,
                    message: format!("File {} deleted successfully", object_path),
                }
            }
            Ok(false) => {
                let message = format!("File {} does not exist", object_path);
                tracing::warn!("{}", message);
                DeleteOutcome {
                    path: object_path.to_string(),
                    success: false,
                    message,
                }
            }
            Err(e) => {
                let message = format!("Error deleting file {}: {}", object_path, e);
                tracing::error!("{}", message);
                DeleteOutcome {
                    path: object_path.to_string(),
                    success: false,
                    message,
                }
            }
        }
    }

    async fn remove_if_exists(&self, object_path: &str) -> Result<bool> {
        if !self.bounded("Exists", self.store.exists(object_path)).await? {
            return Ok(false);
        }
        self.bounded("Delete", self.store.delete_document(object_path))
            .await?;
        Ok(true)
    }

    /// Delete several objects, one at a time
    pub async fn delete_files(&self, object_paths: &[String]) -> Vec<DeleteOutcome> {
        let mut results = Vec::with_capacity(object_paths.len());
        for path in object_paths {
            results.push(self.delete_file(path).await);
        }

        let successful = results.iter().filter(|r| r.success).count();
        tracing::info!("Deleted {} out of {} files", successful, object_paths.len());
        results
    }

    /// Delete every object whose name starts with `prefix` (relative to the
    /// base path). Returns how many were deleted.
    pub async fn delete_by_prefix(&self, prefix: &str) -> Result<usize> {
        let full_prefix = self.full_path(prefix);
        if full_prefix.is_empty() {
            return Err(Error::invalid_request(
                "Refusing to delete with an empty prefix",
            ));
        }

        let objects = self
            .bounded("List", self.store.list_documents(&full_prefix))
            .await
            .inspect_err(|e| {
                tracing::error!("Error deleting files with prefix {}: {}", prefix, e)
            })?;

        let mut count = 0;
        for object in objects {
            self.bounded("Delete", self.store.delete_document(&object.name))
                .await
                .inspect_err(|e| {
                    tracing::error!("Error deleting files with prefix {}: {}", prefix, e)
                })?;
            count += 1;
        }

        tracing::info!("Successfully deleted {} files with prefix {}", count, prefix);
        Ok(count)
    }
}
