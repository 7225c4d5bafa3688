//! Application state for the document QA server

use std::sync::Arc;

use crate::config::{AppConfig, Secrets, StorageBackend, StorageConfig};
use crate::error::Result;
use crate::generation::QaService;
use crate::providers::{DocumentStoreProvider, GeminiClient, LlmProvider, LocalDocumentStore};
use crate::storage::DocumentUploader;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Storage uploader (GCS or local)
    uploader: DocumentUploader,
    /// Question answering over the LLM provider
    qa: QaService,
}

impl AppState {
    /// Create application state from validated configuration and secrets
    pub async fn new(config: AppConfig, secrets: &Secrets) -> Result<Self> {
        tracing::info!(
            "Initializing document QA state (storage: {:?}, model: {})",
            config.storage.backend,
            config.gemini.model
        );

        let store: Arc<dyn DocumentStoreProvider> = match config.storage.backend {
            StorageBackend::Local => Arc::new(LocalDocumentStore::new(&config.storage.local_root)?),
            StorageBackend::Gcs => gcs_store(&config.storage, secrets).await?,
        };

        let llm: Arc<dyn LlmProvider> =
            Arc::new(GeminiClient::new(secrets.api_key.clone(), config.gemini.clone())?);

        Ok(Self::from_parts(config, store, llm))
    }

    /// Assemble state from already-built providers
    pub fn from_parts(
        config: AppConfig,
        store: Arc<dyn DocumentStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let uploader = DocumentUploader::new(store, &config.storage);
        let qa = QaService::new(llm);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                uploader,
                qa,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the storage uploader
    pub fn uploader(&self) -> &DocumentUploader {
        &self.inner.uploader
    }

    /// Get the QA service
    pub fn qa(&self) -> &QaService {
        &self.inner.qa
    }
}

#[cfg(feature = "gcp")]
async fn gcs_store(
    config: &StorageConfig,
    secrets: &Secrets,
) -> Result<Arc<dyn DocumentStoreProvider>> {
    let store =
        crate::providers::gcp::GcsDocumentStore::new(secrets, config.endpoint.clone()).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "gcp"))]
async fn gcs_store(
    _config: &StorageConfig,
    _secrets: &Secrets,
) -> Result<Arc<dyn DocumentStoreProvider>> {
    Err(crate::error::Error::Config(
        "GCS storage selected but the `gcp` feature is disabled".to_string(),
    ))
}
