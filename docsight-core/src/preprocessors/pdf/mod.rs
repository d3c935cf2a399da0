//! PDF Preprocessor
//!
//! Main preprocessor for PDF documents. Uses pluggable backends to extract
//! page text and the document info dictionary.

pub mod backends;

use crate::error::ExtractionError;
use crate::preprocessors::traits::Preprocessor;
use crate::types::ExtractedPdf;
use anyhow::Result;

pub use backends::PdfBackend;

#[cfg(feature = "lopdf-backend")]
pub use backends::LopdfBackend;

/// Backend enum for runtime backend selection
pub enum PdfBackendImpl {
    #[cfg(feature = "lopdf-backend")]
    Lopdf(LopdfBackend),
    /// Placeholder when no backend is compiled in; every extraction fails
    Unavailable,
}

impl PdfBackend for PdfBackendImpl {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedPdf> {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.extract(pdf_bytes),
            PdfBackendImpl::Unavailable => {
                let _ = pdf_bytes;
                Err(ExtractionError::NoBackend.into())
            }
        }
    }

    fn name(&self) -> &str {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.name(),
            PdfBackendImpl::Unavailable => "unavailable",
        }
    }

    fn is_healthy(&self) -> bool {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.is_healthy(),
            PdfBackendImpl::Unavailable => false,
        }
    }
}

/// PDF Preprocessor with pluggable backend
pub struct PdfPreprocessor {
    backend: PdfBackendImpl,
}

impl PdfPreprocessor {
    /// Create PdfPreprocessor with the pure Rust lopdf backend
    #[cfg(feature = "lopdf-backend")]
    pub fn new_with_lopdf() -> Self {
        Self {
            backend: PdfBackendImpl::Lopdf(LopdfBackend::new()),
        }
    }

    /// Best backend compiled into this build
    pub fn new_default() -> Self {
        #[cfg(feature = "lopdf-backend")]
        {
            Self::new_with_lopdf()
        }
        #[cfg(not(feature = "lopdf-backend"))]
        {
            Self {
                backend: PdfBackendImpl::Unavailable,
            }
        }
    }

    /// Get the backend name for logging
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Check if the backend is healthy
    pub fn is_healthy(&self) -> bool {
        self.backend.is_healthy()
    }
}

impl Default for PdfPreprocessor {
    fn default() -> Self {
        Self::new_default()
    }
}

impl Preprocessor for PdfPreprocessor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedPdf> {
        self.backend.extract(pdf_bytes)
    }

    fn name(&self) -> &str {
        "PdfPreprocessor"
    }

    fn supports_mime_type(&self, mime_type: &str) -> bool {
        mime_type == "application/pdf"
    }
}
