//! Answer generation for document questions

pub mod prompt;
pub mod qa_service;

pub use prompt::{PromptBuilder, PromptPart};
pub use qa_service::QaService;
