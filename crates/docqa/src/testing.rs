//! In-process fakes for the provider traits

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::generation::PromptPart;
use crate::providers::{DocumentStoreProvider, LlmProvider, StoredObjectInfo};

/// Bucket held in memory, with `gs://` URIs
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<BTreeMap<String, (Vec<u8>, String)>>,
    fail_writes: bool,
    deny_all: bool,
}

const FORBIDDEN: &str = "403 Forbidden: caller does not have storage.objects.get access";

impl MemoryStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Mutex::new(BTreeMap::new()),
            fail_writes: false,
            deny_all: false,
        }
    }

    /// A bucket the service account may not write to
    pub fn read_only(bucket: &str) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(bucket)
        }
    }

    /// A bucket the service account may not touch at all
    pub fn denied(bucket: &str) -> Self {
        Self {
            fail_writes: true,
            deny_all: true,
            ..Self::new(bucket)
        }
    }

    fn check_access(&self) -> Result<()> {
        if self.deny_all {
            return Err(Error::Storage(FORBIDDEN.to_string()));
        }
        Ok(())
    }

    pub fn content_type_of(&self, object_name: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(object_name)
            .map(|(_, ct)| ct.clone())
    }

    pub fn object_names(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl DocumentStoreProvider for MemoryStore {
    async fn store_document(
        &self,
        object_name: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String> {
        if self.fail_writes {
            return Err(Error::Storage("403 Forbidden: permission denied".to_string()));
        }
        self.objects.lock().unwrap().insert(
            object_name.to_string(),
            (data.to_vec(), content_type.to_string()),
        );
        Ok(self.uri_for(object_name))
    }

    async fn get_document(&self, object_name: &str) -> Result<Vec<u8>> {
        self.check_access()?;
        self.objects
            .lock()
            .unwrap()
            .get(object_name)
            .map(|(data, _)| data.clone())
            .ok_or_else(|| Error::NotFound(object_name.to_string()))
    }

    async fn exists(&self, object_name: &str) -> Result<bool> {
        self.check_access()?;
        Ok(self.objects.lock().unwrap().contains_key(object_name))
    }

    async fn delete_document(&self, object_name: &str) -> Result<()> {
        self.check_access()?;
        self.objects
            .lock()
            .unwrap()
            .remove(object_name)
            .map(|_| ())
            .ok_or_else(|| Error::Storage(format!("404 No such object: {}", object_name)))
    }

    async fn list_documents(&self, prefix: &str) -> Result<Vec<StoredObjectInfo>> {
        self.check_access()?;
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, (data, _))| StoredObjectInfo {
                name: name.clone(),
                size: data.len() as u64,
            })
            .collect())
    }

    fn uri_for(&self, object_name: &str) -> String {
        format!("gs://{}/{}", self.bucket, object_name)
    }

    async fn health_check(&self) -> Result<bool> {
        self.check_access()?;
        Ok(true)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Store whose calls never complete, like an unreachable network
pub struct StalledStore;

#[async_trait]
impl DocumentStoreProvider for StalledStore {
    async fn store_document(&self, _: &str, _: &[u8], _: &str) -> Result<String> {
        std::future::pending().await
    }

    async fn get_document(&self, _: &str) -> Result<Vec<u8>> {
        std::future::pending().await
    }

    async fn exists(&self, _: &str) -> Result<bool> {
        std::future::pending().await
    }

    async fn delete_document(&self, _: &str) -> Result<()> {
        std::future::pending().await
    }

    async fn list_documents(&self, _: &str) -> Result<Vec<StoredObjectInfo>> {
        std::future::pending().await
    }

    fn uri_for(&self, object_name: &str) -> String {
        format!("gs://unreachable/{}", object_name)
    }

    async fn health_check(&self) -> Result<bool> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

/// Model that returns a canned answer and records every request
pub struct FakeLlm {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<Vec<PromptPart>>>,
}

impl FakeLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            reply: Ok(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<PromptPart>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn generate(&self, parts: &[PromptPart], _temperature: Option<f32>) -> Result<String> {
        self.requests.lock().unwrap().push(parts.to_vec());
        self.reply.clone().map_err(Error::Api)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.reply.is_ok())
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}
