//! Prompt construction for document questions

use bytes::Bytes;

use crate::types::UploadedDocument;

/// One piece of a generation request
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    /// Plain text
    Text(String),
    /// Raw file content sent alongside the text
    InlineData {
        mime_type: String,
        data: Bytes,
    },
}

impl PromptPart {
    /// Text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Inline file part
    pub fn inline(document: &UploadedDocument) -> Self {
        Self::InlineData {
            mime_type: document.content_type.clone(),
            data: document.bytes.clone(),
        }
    }
}

/// Prompt builder for document questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the parts for one question about one document.
    ///
    /// Text documents are inlined into the prompt; anything else (PDF,
    /// spreadsheets, Word files) is sent as inline data followed by the
    /// question.
    pub fn for_document(document: &UploadedDocument, question: &str) -> Vec<PromptPart> {
        match document.as_text() {
            Some(text) => vec![PromptPart::Text(Self::text_prompt(text, question))],
            None => vec![
                PromptPart::inline(document),
                PromptPart::text(question.trim()),
            ],
        }
    }

    /// Build the parts for one question over several documents
    pub fn for_documents(documents: &[UploadedDocument], question: &str) -> Vec<PromptPart> {
        let mut parts: Vec<PromptPart> = documents
            .iter()
            .map(|doc| match doc.as_text() {
                Some(text) => PromptPart::Text(format!("File: {}\n\n{}", doc.filename, text)),
                None => PromptPart::inline(doc),
            })
            .collect();

        parts.push(PromptPart::text(question.trim()));
        parts
    }

    /// Prompt for a question about extracted text
    pub fn text_prompt(content: &str, question: &str) -> String {
        format!("Content: {}\n\nQuery: {}", content, question.trim())
    }
}
