//! PDF Backend trait
//!
//! Defines the interface that all PDF extraction backends must implement.
//! All backends produce the same `ExtractedPdf`:
//! - one `PageText` per page, in page order, 1-indexed
//! - text items per page in content-stream order
//! - info dictionary entries that are text or numbers, in dictionary order

use crate::types::ExtractedPdf;
use anyhow::Result;

/// Backend trait for PDF extraction
pub trait PdfBackend: Send + Sync {
    /// Extract PDF bytes to pages and metadata
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedPdf>;

    /// Backend identifier for logging/debugging
    fn name(&self) -> &str;

    /// Check if backend is healthy/ready
    fn is_healthy(&self) -> bool;
}

// Re-export backends
#[cfg(feature = "lopdf-backend")]
pub mod lopdf_backend;

#[cfg(feature = "lopdf-backend")]
pub use lopdf_backend::LopdfBackend;
