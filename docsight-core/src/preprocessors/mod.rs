//! Document Preprocessors
//!
//! This module provides the extraction layer that turns raw PDF bytes into
//! the page-ordered text and metadata the analyzer and the info panel work on.
//!
//! ## Architecture
//!
//! ```text
//! PDF bytes
//!     ↓
//! [PdfBackend] (lopdf, ...)
//!     ↓
//! ExtractedPdf (page count, per-page text items, info dictionary)
//!     ↓
//! [DocumentAnalyzer] / [pdf_document_info]
//! ```
//!
//! ## Available Preprocessors
//!
//! - `PdfPreprocessor` - PDF documents via the lopdf backend
//! - (Future) other backends behind the same `PdfBackend` trait

pub mod traits;
pub mod pdf;

// Re-export main types
pub use traits::Preprocessor;
pub use pdf::{PdfPreprocessor, PdfBackend, PdfBackendImpl};

// Re-export backends
#[cfg(feature = "lopdf-backend")]
pub use pdf::LopdfBackend;
