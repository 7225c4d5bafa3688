//! Uploaded and stored document types

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content types the upload form advertises
const KNOWN_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xls", "application/vnd.ms-excel"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
];

/// Detect the MIME type of a file from its extension
pub fn content_type_for(filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    KNOWN_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| mime.to_string())
        .unwrap_or_else(|| {
            mime_guess::from_path(filename)
                .first_or_octet_stream()
                .to_string()
        })
}

/// Strip any client-side directories from an uploaded filename
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// A file submitted by the user. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Original filename (final path component only)
    pub filename: String,
    /// Raw content
    pub bytes: Bytes,
    /// MIME type
    pub content_type: String,
}

impl UploadedDocument {
    /// Create a document, deriving the content type from the filename
    pub fn new(filename: &str, bytes: impl Into<Bytes>) -> Self {
        let filename = sanitize_filename(filename)
            .unwrap_or_else(|| format!("file_{}.bin", uuid::Uuid::new_v4()));
        let content_type = content_type_for(&filename);
        Self {
            filename,
            bytes: bytes.into(),
            content_type,
        }
    }

    /// Create a document with an explicit content type
    pub fn with_content_type(filename: &str, bytes: impl Into<Bytes>, content_type: &str) -> Self {
        let mut doc = Self::new(filename, bytes);
        if !content_type.is_empty() && content_type != "application/octet-stream" {
            doc.content_type = content_type.to_string();
        }
        doc
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document has no content
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content as text, when the type is textual and the bytes are UTF-8
    pub fn as_text(&self) -> Option<&str> {
        let textual = self.content_type.starts_with("text/")
            || self.content_type == "application/json"
            || self.content_type == "application/xml";
        if !textual {
            return None;
        }
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// An object already persisted in storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Last path component
    pub name: String,
    /// Full object path in the bucket
    pub full_path: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Human-readable size, e.g. "12.3 KB"
    pub size: String,
}

impl StoredFile {
    /// Describe a stored object
    pub fn new(full_path: impl Into<String>, size_bytes: u64) -> Self {
        let full_path = full_path.into();
        let name = full_path.rsplit('/').next().unwrap_or(&full_path).to_string();
        Self {
            name,
            full_path,
            size_bytes,
            size: format!("{:.1} KB", size_bytes as f64 / 1024.0),
        }
    }
}
