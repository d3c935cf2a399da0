//! Image Inspector and the PDF info panel builder.
//!
//! Both produce the editable [`DocumentInfo`] mapping shown beside the
//! selected file.

use crate::analyzer::parse_pdf_date;
use crate::config::InspectorConfig;
use crate::error::InspectError;
use crate::ingestion::FileHandle;
use crate::types::{format_kb, DocumentInfo, ExtractedPdf, FileKind, InfoValue};
use chrono::{DateTime, Local};
use image::ImageReader;
use std::fmt::Write;
use std::io::Cursor;
use tracing::{debug, warn};

pub struct ImageInspector {
    timestamp_format: String,
}

impl ImageInspector {
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    pub fn inspect(&self, file: &FileHandle) -> Result<DocumentInfo, InspectError> {
        if file.kind() != FileKind::Image {
            return Err(InspectError::NotAnImage {
                name: file.name().to_string(),
                mime_type: file.mime_type().to_string(),
            });
        }

        let (width, height) = image_dimensions(file)?;
        debug!("🖼️  {}: {}x{}", file.name(), width, height);

        let mut info = DocumentInfo::new();
        info.insert("File Name", file.name());
        info.insert("File Type", file.mime_type());
        info.insert("File Size", format_kb(file.size()));
        info.insert("Dimensions", format!("{width}x{height}"));
        info.insert(
            "Last Modified",
            format_timestamp(&file.last_modified(), &self.timestamp_format),
        );
        Ok(info)
    }
}

impl Default for ImageInspector {
    fn default() -> Self {
        Self::new(&InspectorConfig::default())
    }
}

/// Pixel dimensions read from the image header
fn image_dimensions(file: &FileHandle) -> Result<(u32, u32), InspectError> {
    let decode_error = |reason: String| InspectError::DecodeError {
        name: file.name().to_string(),
        reason,
    };

    ImageReader::new(Cursor::new(file.bytes()))
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .into_dimensions()
        .map_err(|e| decode_error(e.to_string()))
}

/// Format with a user supplied chrono pattern; a bad pattern falls back to RFC 3339
fn format_timestamp(timestamp: &DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(pattern)).is_err() {
        warn!("⚠️  Invalid timestamp format '{}', using RFC 3339", pattern);
        return timestamp.to_rfc3339();
    }
    out
}

/// Info panel for a PDF selection: page count first, then every text or
/// numeric Info dictionary entry in order. Date entries are shown as
/// `YYYY-MM-DD`.
pub fn pdf_document_info(pdf: &ExtractedPdf) -> DocumentInfo {
    let mut info = DocumentInfo::new();
    info.insert("Number of Pages", pdf.page_count);

    for (key, value) in &pdf.metadata {
        let value = match (key.as_str(), value) {
            ("CreationDate" | "ModDate", InfoValue::Text(raw)) => {
                InfoValue::Text(parse_pdf_date(raw).unwrap_or_else(|| "Invalid Date".to_string()))
            }
            _ => value.clone(),
        };
        info.insert(key.as_str(), value);
    }
    info
}
