//! LLM provider trait for answering questions

use async_trait::async_trait;
use crate::error::Result;
use crate::generation::PromptPart;

/// Trait for text generation
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one generation request built from `parts` and return the text.
    /// `temperature` overrides the configured default when set.
    async fn generate(&self, parts: &[PromptPart], temperature: Option<f32>) -> Result<String>;

    /// Check if the provider is reachable and the credentials are accepted
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
