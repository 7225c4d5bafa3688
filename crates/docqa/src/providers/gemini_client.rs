//! Gemini client for answer generation via the Generative Language API
//!
//! One `generateContent` request per call, authenticated with an API key.
//! No retries; a timeout applies only when configured.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::generation::PromptPart;
use crate::providers::llm::LlmProvider;

/// Gemini client
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    /// * `api_key` - Generative Language API key
    /// * `config` - model, endpoint and generation settings
    pub fn new(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!("Initializing Gemini client with model: {}", config.model);

        Ok(Self {
            http,
            api_key: api_key.into(),
            config,
        })
    }

    /// Model resource URL
    fn model_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!("{}:generateContent", self.model_url())
    }

    fn build_request(&self, parts: &[PromptPart], temperature: Option<f32>) -> GenerateRequest {
        let parts = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part::Text { text: text.clone() },
                PromptPart::InlineData { mime_type, data } => Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(data),
                    },
                },
            })
            .collect();

        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: temperature.unwrap_or(self.config.temperature),
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason", default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateResponse {
    /// Concatenate the text parts of the first candidate
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::Api(format!("Prompt blocked by Gemini: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api("No candidates in Gemini response".to_string()))?;

        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Api(match finish_reason {
                Some(reason) => format!("No text in Gemini response (finish reason: {})", reason),
                None => "No text in Gemini response".to_string(),
            }));
        }

        Ok(text)
    }
}

/// Pull the provider's own message out of an error body, if it has one
fn provider_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

fn request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Api(format!("Gemini request timed out: {}", e))
    } else {
        Error::Api(format!("Gemini request failed: {}", e))
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, parts: &[PromptPart], temperature: Option<f32>) -> Result<String> {
        let request = self.build_request(parts, temperature);

        tracing::debug!("Generating response from Gemini ({} parts)", parts.len());

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "Gemini generation failed ({}): {}",
                status,
                provider_message(&body)
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("Failed to parse Gemini response: {}", e)))?;

        gen_response.into_text()
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .http
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(request_error)?;
        Ok(response.status().is_success())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
