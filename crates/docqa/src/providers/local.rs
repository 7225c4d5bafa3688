//! Local filesystem document store
//!
//! Mirrors object-storage semantics on disk: object names are `/`-separated
//! paths below a root directory. Used for development and tests.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

use super::document_store::{DocumentStoreProvider, StoredObjectInfo};

/// Filesystem-backed object store
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| {
            Error::Config(format!(
                "Failed to create local storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        tracing::info!("Local document store at {}", root.display());
        Ok(Self { root })
    }

    /// Resolve an object name to a path below the root
    fn resolve(&self, object_name: &str) -> Result<PathBuf> {
        let relative = Path::new(object_name);
        let safe = !object_name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(Error::Storage(format!(
                "Invalid object name: {:?}",
                object_name
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentStoreProvider for LocalDocumentStore {
    async fn store_document(
        &self,
        object_name: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<String> {
        let path = self.resolve(object_name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", object_name, e)))?;

        Ok(self.uri_for(object_name))
    }

    async fn get_document(&self, object_name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(object_name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(object_name.to_string()))
            }
            Err(e) => Err(Error::Storage(format!(
                "Failed to read {}: {}",
                object_name, e
            ))),
        }
    }

    async fn exists(&self, object_name: &str) -> Result<bool> {
        let path = self.resolve(object_name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Storage(format!(
                "Failed to stat {}: {}",
                object_name, e
            ))),
        }
    }

    async fn delete_document(&self, object_name: &str) -> Result<()> {
        let path = self.resolve(object_name)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| Error::Storage(format!("Failed to delete {}: {}", object_name, e)))
    }

    async fn list_documents(&self, prefix: &str) -> Result<Vec<StoredObjectInfo>> {
        let root = self.root.clone();
        let prefix = prefix.to_string();

        // walkdir is sync, run it off the async workers
        tokio::task::spawn_blocking(move || {
            let mut objects = Vec::new();
            for entry in walkdir::WalkDir::new(&root).sort_by_file_name() {
                let entry =
                    entry.map_err(|e| Error::Storage(format!("Failed to list objects: {}", e)))?;
                if !entry.file_type().is_file() {
                    continue;
                }

                let Ok(relative) = entry.path().strip_prefix(&root) else {
                    continue;
                };
                let name = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                if name.starts_with(&prefix) {
                    let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                    objects.push(StoredObjectInfo { name, size });
                }
            }
            Ok(objects)
        })
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    fn uri_for(&self, object_name: &str) -> String {
        format!("file://{}", self.root.join(object_name).display())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).unwrap();

        let uri = store
            .store_document("documents/invoice.pdf", b"%PDF-1.4 total", "application/pdf")
            .await
            .unwrap();
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("invoice.pdf"));
        assert_eq!(
            store.get_document("documents/invoice.pdf").await.unwrap(),
            b"%PDF-1.4 total"
        );

        store
            .store_document("documents/invoice.pdf", b"v2", "application/pdf")
            .await
            .unwrap();
        assert_eq!(store.get_document("documents/invoice.pdf").await.unwrap(), b"v2");
    }

    #[tokio::test]
    async fn test_list_with_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).unwrap();
        store.store_document("documents/a.txt", b"aa", "text/plain").await.unwrap();
        store.store_document("documents/sub/b.txt", b"bbb", "text/plain").await.unwrap();
        store.store_document("other/c.txt", b"c", "text/plain").await.unwrap();

        let listed = store.list_documents("documents/").await.unwrap();
        assert_eq!(
            listed,
            vec![
                StoredObjectInfo { name: "documents/a.txt".into(), size: 2 },
                StoredObjectInfo { name: "documents/sub/b.txt".into(), size: 3 },
            ]
        );
        assert_eq!(store.list_documents("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).unwrap();

        assert!(matches!(
            store.get_document("nope.txt").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(!store.exists("nope.txt").await.unwrap());

        store.store_document("x.txt", b"x", "text/plain").await.unwrap();
        assert!(store.exists("x.txt").await.unwrap());
        store.delete_document("x.txt").await.unwrap();
        assert!(!store.exists("x.txt").await.unwrap());
        assert!(matches!(
            store.delete_document("x.txt").await.unwrap_err(),
            Error::Storage(_)
        ));
    }

    #[tokio::test]
    async fn test_rejects_escaping_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).unwrap();

        for name in ["../escape.txt", "/etc/passwd", "", "a/../../b"] {
            assert!(
                matches!(
                    store.store_document(name, b"x", "text/plain").await,
                    Err(Error::Storage(_))
                ),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_exists_reports_io_failures() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).unwrap();
        store.store_document("report.pdf", b"x", "application/pdf").await.unwrap();

        // A regular file in the middle of the path is not "missing"
        assert!(matches!(
            store.exists("report.pdf/child.pdf").await,
            Err(Error::Storage(_))
        ));
        assert!(!store.exists("other.pdf").await.unwrap());
    }

    #[test]
    fn test_health_and_uri() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path().join("objects")).unwrap();

        tokio_test::assert_ok!(tokio_test::block_on(store.health_check()));
        assert_eq!(store.name(), "local");
        assert_eq!(
            store.uri_for("a/b.pdf"),
            format!("file://{}", dir.path().join("objects").join("a/b.pdf").display())
        );
    }
}
