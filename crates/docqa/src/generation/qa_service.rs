//! Question answering over uploaded documents

use std::sync::Arc;
use std::time::Instant;

use crate::config::TEMPERATURE_RANGE;
use crate::error::{Error, Result};
use crate::providers::LlmProvider;
use crate::types::UploadedDocument;

use super::prompt::{PromptBuilder, PromptPart};

/// Asks the model one question per call. Stateless; no history is kept.
#[derive(Clone)]
pub struct QaService {
    llm: Arc<dyn LlmProvider>,
}

impl QaService {
    /// Create a service over an LLM provider
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// The underlying provider
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    /// Reject blank questions before any network call
    pub fn validate_question(question: &str) -> Result<()> {
        if question.trim().is_empty() {
            return Err(Error::invalid_request("Question must not be empty"));
        }
        Ok(())
    }

    /// Reject empty uploads
    pub fn validate_document(document: &UploadedDocument) -> Result<()> {
        if document.is_empty() {
            return Err(Error::invalid_request(format!(
                "Uploaded file '{}' is empty",
                document.filename
            )));
        }
        Ok(())
    }

    /// Reject a temperature override outside what the model accepts
    pub fn validate_temperature(temperature: Option<f32>) -> Result<()> {
        match temperature {
            Some(t) if !TEMPERATURE_RANGE.contains(&t) => Err(Error::invalid_request(format!(
                "temperature must be between {} and {}, got {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end(),
                t
            ))),
            _ => Ok(()),
        }
    }

    /// Answer a question about one uploaded document
    pub async fn ask(&self, document: &UploadedDocument, question: &str) -> Result<String> {
        Self::validate_question(question)?;
        Self::validate_document(document)?;

        tracing::info!(
            "Asking {} about {} ({} bytes, {})",
            self.llm.model(),
            document.filename,
            document.len(),
            document.content_type
        );

        let parts = PromptBuilder::for_document(document, question);
        self.run(&parts, None).await
    }

    /// Answer a question about several documents at once
    pub async fn ask_many(
        &self,
        documents: &[UploadedDocument],
        question: &str,
        temperature: Option<f32>,
    ) -> Result<String> {
        Self::validate_question(question)?;
        Self::validate_temperature(temperature)?;
        if documents.is_empty() {
            return Err(Error::invalid_request("Select at least one document"));
        }

        tracing::info!("Processing query for {} files", documents.len());
        let parts = PromptBuilder::for_documents(documents, question);
        self.run(&parts, temperature).await
    }

    /// Free-form generation with an optional temperature override
    pub async fn generate(&self, prompt: &str, temperature: Option<f32>) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::invalid_request("Prompt must not be empty"));
        }
        Self::validate_temperature(temperature)?;
        self.run(&[PromptPart::text(prompt)], temperature).await
    }

    async fn run(&self, parts: &[PromptPart], temperature: Option<f32>) -> Result<String> {
        let start = Instant::now();
        match self.llm.generate(parts, temperature).await {
            Ok(answer) => {
                tracing::info!(
                    "Generated answer ({} chars) in {:.1}s",
                    answer.len(),
                    start.elapsed().as_secs_f64()
                );
                Ok(answer)
            }
            Err(e) => {
                tracing::error!("Generation with {} failed: {}", self.llm.name(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeLlm;

    #[tokio::test]
    async fn test_ask_returns_answer() {
        let llm = Arc::new(FakeLlm::answering("$1,204.50"));
        let qa = QaService::new(llm.clone());
        let doc = UploadedDocument::new("invoice.pdf", b"%PDF-1.4".to_vec());

        let answer = qa.ask(&doc, "What is the total amount?").await.unwrap();
        assert_eq!(answer, "$1,204.50");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].last(),
            Some(&PromptPart::text("What is the total amount?"))
        );
    }

    #[tokio::test]
    async fn test_blank_question_never_reaches_model() {
        let llm = Arc::new(FakeLlm::answering("unused"));
        let qa = QaService::new(llm.clone());
        let doc = UploadedDocument::new("a.txt", b"text".to_vec());

        let err = qa.ask(&doc, "   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_document_rejected() {
        let qa = QaService::new(Arc::new(FakeLlm::answering("unused")));
        let doc = UploadedDocument::new("a.txt", Vec::new());
        assert!(matches!(
            qa.ask(&doc, "anything?").await.unwrap_err(),
            Error::InvalidRequest(_)
        ));
    }

    #[tokio::test]
    async fn test_provider_error_is_propagated() {
        let qa = QaService::new(Arc::new(FakeLlm::failing("API key not valid")));
        let doc = UploadedDocument::new("a.txt", b"text".to_vec());

        match qa.ask(&doc, "question?").await.unwrap_err() {
            Error::Api(msg) => assert_eq!(msg, "API key not valid"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ask_many_requires_documents() {
        let qa = QaService::new(Arc::new(FakeLlm::answering("ok")));
        assert!(qa.ask_many(&[], "question?", None).await.is_err());

        let docs = vec![UploadedDocument::new("a.txt", b"a".to_vec())];
        assert_eq!(qa.ask_many(&docs, "question?", Some(0.3)).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_temperature_out_of_range_never_reaches_model() {
        let llm = Arc::new(FakeLlm::answering("unused"));
        let qa = QaService::new(llm.clone());
        let docs = vec![UploadedDocument::new("a.txt", b"a".to_vec())];

        for t in [-0.1, 2.5, f32::NAN] {
            assert!(matches!(
                qa.ask_many(&docs, "question?", Some(t)).await.unwrap_err(),
                Error::InvalidRequest(_)
            ));
        }
        assert!(qa.generate("Say hi", Some(5.0)).await.is_err());
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_as_is() {
        let llm = Arc::new(FakeLlm::answering("Hello!"));
        let qa = QaService::new(llm.clone());

        assert_eq!(qa.generate("Say hi", Some(0.7)).await.unwrap(), "Hello!");
        assert_eq!(llm.requests(), vec![vec![PromptPart::text("Say hi")]]);
        assert!(matches!(
            qa.generate("  ", None).await.unwrap_err(),
            Error::InvalidRequest(_)
        ));
    }
}
