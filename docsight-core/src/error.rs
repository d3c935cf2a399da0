//! Boundary error types.
//!
//! Internal plumbing uses `anyhow`; these are the failures callers are
//! expected to match on.

use thiserror::Error;

/// PDF could not be turned into pages + metadata
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to load PDF: {0}")]
    LoadError(String),

    #[error("Failed to extract text from page {page}: {reason}")]
    PageError { page: u32, reason: String },

    #[error("No PDF backend compiled in (enable the lopdf-backend feature)")]
    NoBackend,
}

/// Image could not be inspected
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("'{name}' is not an image (type: {mime_type})")]
    NotAnImage { name: String, mime_type: String },

    #[error("Failed to decode image '{name}': {reason}")]
    DecodeError { name: String, reason: String },
}

/// Summary generation failed
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SummaryError {
    /// Summary requested before an analysis with text was available
    #[error("No document analysis or full text available")]
    InputError,

    #[error("Invalid summary pattern: {0}")]
    PatternError(String),
}

/// Embedding model failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Failed to load embedding model: {0}")]
    LoadFailed(String),

    #[error("Failed to generate embedding: {0}")]
    EmbedFailed(String),
}
