//! Google Cloud Storage document store
//!
//! Writes uploaded documents to a GCS bucket using the service-account
//! credential from [`Secrets`].

use async_trait::async_trait;

use google_cloud_storage::client::google_cloud_auth::credentials::CredentialsFile;
use google_cloud_storage::client::{Client as GcsClient, ClientConfig};
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::Error as HttpError;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use crate::config::Secrets;
use crate::error::{Error, Result};
use crate::providers::document_store::{DocumentStoreProvider, StoredObjectInfo};

/// Google Cloud Storage document store
pub struct GcsDocumentStore {
    client: GcsClient,
    bucket: String,
}

impl GcsDocumentStore {
    /// Create a new GCS document store
    ///
    /// # Arguments
    /// * `secrets` - bucket name and service-account credential
    /// * `endpoint` - storage API override (e.g. a local emulator)
    pub async fn new(secrets: &Secrets, endpoint: Option<String>) -> Result<Self> {
        let credentials: CredentialsFile = serde_json::from_str(&secrets.credential_blob)
            .map_err(|e| Error::Config(format!("Invalid service account credential: {}", e)))?;

        let mut config = ClientConfig::default()
            .with_credentials(credentials)
            .await
            .map_err(|e| Error::Config(format!("Failed to create GCS client: {}", e)))?;

        if let Some(endpoint) = endpoint {
            tracing::info!("Using GCS endpoint override: {}", endpoint);
            config.storage_endpoint = endpoint;
        }

        tracing::info!("Connected to GCS bucket: {}", secrets.bucket_name);

        Ok(Self {
            client: GcsClient::new(config),
            bucket: secrets.bucket_name.clone(),
        })
    }
}

/// Only a 404 means the object is missing; anything else is a storage failure
fn object_error(action: &str, object_name: &str, e: HttpError) -> Error {
    match e {
        HttpError::Response(ref r) if r.code == 404 => Error::NotFound(object_name.to_string()),
        e => Error::Storage(format!("Failed to {} {} in GCS: {}", action, object_name, e)),
    }
}

#[async_trait]
impl DocumentStoreProvider for GcsDocumentStore {
    async fn store_document(
        &self,
        object_name: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String> {
        let mut media = Media::new(object_name.to_string());
        media.content_type = content_type.to_string().into();

        self.client
            .upload_object(
                &UploadObjectRequest {
                    bucket: self.bucket.clone(),
                    ..Default::default()
                },
                data.to_vec(),
                &UploadType::Simple(media),
            )
            .await
            .map_err(|e| Error::Storage(format!("Failed to upload to GCS: {}", e)))?;

        Ok(self.uri_for(object_name))
    }

    async fn get_document(&self, object_name: &str) -> Result<Vec<u8>> {
        self.client
            .download_object(
                &GetObjectRequest {
                    bucket: self.bucket.clone(),
                    object: object_name.to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await
            .map_err(|e| object_error("download", object_name, e))
    }

    async fn exists(&self, object_name: &str) -> Result<bool> {
        match self
            .client
            .get_object(&GetObjectRequest {
                bucket: self.bucket.clone(),
                object: object_name.to_string(),
                ..Default::default()
            })
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match object_error("stat", object_name, e) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn delete_document(&self, object_name: &str) -> Result<()> {
        self.client
            .delete_object(&DeleteObjectRequest {
                bucket: self.bucket.clone(),
                object: object_name.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| Error::Storage(format!("Failed to delete {} from GCS: {}", object_name, e)))
    }

    async fn list_documents(&self, prefix: &str) -> Result<Vec<StoredObjectInfo>> {
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let list_request = ListObjectsRequest {
                bucket: self.bucket.clone(),
                prefix: Some(prefix.to_string()).filter(|p| !p.is_empty()),
                page_token: page_token.take(),
                ..Default::default()
            };

            let page = self
                .client
                .list_objects(&list_request)
                .await
                .map_err(|e| Error::Storage(format!("Failed to list GCS objects: {}", e)))?;

            for item in page.items.unwrap_or_default() {
                objects.push(StoredObjectInfo {
                    name: item.name,
                    size: item.size.max(0) as u64,
                });
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(objects)
    }

    fn uri_for(&self, object_name: &str) -> String {
        format!("gs://{}/{}", self.bucket, object_name)
    }

    async fn health_check(&self) -> Result<bool> {
        // Try to list objects (with limit 1) to check bucket access
        let list_request = ListObjectsRequest {
            bucket: self.bucket.clone(),
            max_results: Some(1),
            ..Default::default()
        };

        self.client
            .list_objects(&list_request)
            .await
            .map(|_| true)
            .map_err(|e| Error::Storage(format!("GCS health check failed: {}", e)))
    }

    fn name(&self) -> &str {
        "gcs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_cloud_storage::http::error::ErrorResponse;
    use serde_json::json;

    fn response_error(code: u16, message: &str) -> HttpError {
        let body: ErrorResponse = serde_json::from_value(json!({
            "code": code,
            "message": message,
            "errors": [],
        }))
        .unwrap();
        HttpError::Response(body)
    }

    #[test]
    fn test_only_404_is_not_found() {
        assert!(matches!(
            object_error("stat", "documents/a.pdf", response_error(404, "No such object")),
            Error::NotFound(name) if name == "documents/a.pdf"
        ));

        match object_error(
            "stat",
            "documents/a.pdf",
            response_error(403, "caller does not have storage.objects.get access"),
        ) {
            Error::Storage(msg) => assert!(msg.contains("storage.objects.get access"), "{}", msg),
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}
