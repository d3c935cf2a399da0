// Docsight Core Library
//
// Document insight pipeline: PDF analysis, image inspection, keyword-driven
// summaries and the dashboard state that ties them to one selected file.

pub mod types;
pub mod error;
pub mod config;
pub mod ingestion;
pub mod preprocessors;
pub mod embedding;
pub mod analyzer;
pub mod inspector;
pub mod summary;
pub mod voice;
pub mod controller;
pub mod profiler;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{ExtractionError, InspectError, ModelError, SummaryError};
pub use config::DashboardConfig;
pub use ingestion::{DropPayload, DropZone, FileHandle};
pub use preprocessors::{PdfPreprocessor, Preprocessor};
pub use embedding::{ModelHandle, ModelState, SentenceEmbedder};
pub use analyzer::DocumentAnalyzer;
pub use inspector::ImageInspector;
pub use summary::{SummaryGenerator, SummaryPanel};
pub use voice::{Voice, VoiceReader};
pub use controller::{Dashboard, DashboardSnapshot, Tab};
pub use profiler::StepProfiler;

// Re-export backends for direct use
#[cfg(feature = "lopdf-backend")]
pub use preprocessors::LopdfBackend;

#[cfg(feature = "fastembed-model")]
pub use embedding::MiniLmEmbedder;
