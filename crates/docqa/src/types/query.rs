//! Request types for the JSON endpoints

use serde::{Deserialize, Serialize};

/// Question about files already in storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question
    pub question: String,
    /// Full object paths of the selected files
    pub files: Vec<String>,
    /// Temperature override
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Files to delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Full object paths
    pub paths: Vec<String>,
}

/// Free-form prompt, no document attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}
