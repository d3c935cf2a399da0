// Preprocessor abstraction for document extraction
//
// This module defines the boundary between PDF parsing (bytes -> pages + metadata)
// and everything the dashboard derives from it. The PDF library itself is
// treated as an opaque capability behind this trait.

use crate::types::ExtractedPdf;
use anyhow::Result;
use std::path::Path;

/// Preprocessor trait - converts documents to page text and metadata
///
/// Preprocessors handle:
/// - Document format parsing
/// - Per-page text extraction, in page order
/// - Document info dictionary (creation date, title, producer, ...)
///
/// Everything after this point works with `ExtractedPdf` and never touches bytes.
pub trait Preprocessor: Send + Sync {
    /// Main entry point: extract pages and metadata from raw bytes
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedPdf>;

    /// Convenience method: Process from file path
    fn process_file(&self, input: &Path) -> Result<ExtractedPdf> {
        let pdf_bytes = std::fs::read(input)?;
        self.extract(&pdf_bytes)
    }

    /// Get preprocessor name for debugging/logging
    fn name(&self) -> &str;

    /// Check if preprocessor supports the given MIME type
    fn supports_mime_type(&self, mime_type: &str) -> bool;
}
