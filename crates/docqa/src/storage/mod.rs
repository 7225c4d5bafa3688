//! Storage uploader: object naming, content types and bounded store calls

pub mod uploader;

pub use uploader::DocumentUploader;
