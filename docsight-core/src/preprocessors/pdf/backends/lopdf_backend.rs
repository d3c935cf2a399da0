//! lopdf backend - pure Rust, in-process PDF extraction
//!
//! Loads the document from memory, walks pages in order and reads the
//! trailer's Info dictionary. No native libraries, no temp files.

use super::PdfBackend;
use crate::error::ExtractionError;
use crate::types::{ExtractedPdf, InfoValue, PageText};
use anyhow::Result;
use lopdf::{Dictionary, Document, Object};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(document: &Document) -> Result<Vec<PageText>> {
        // get_pages is keyed by 1-indexed page number, already sorted
        let mut pages = Vec::new();
        for page_number in document.get_pages().keys() {
            let text = document
                .extract_text(&[*page_number])
                .map_err(|e| ExtractionError::PageError {
                    page: *page_number,
                    reason: e.to_string(),
                })?;

            // One item per text line the content stream produced
            let items: Vec<String> = text.lines().map(str::to_string).collect();
            debug!("   📄 Page {}: {} text items", page_number, items.len());

            pages.push(PageText {
                page_number: *page_number,
                items,
            });
        }
        Ok(pages)
    }

    fn extract_metadata(document: &Document) -> Vec<(String, InfoValue)> {
        let Some(info) = Self::info_dictionary(document) else {
            return Vec::new();
        };

        info.iter()
            .filter_map(|(key, value)| {
                let key = String::from_utf8_lossy(key).to_string();
                let value = Self::resolve(document, value);
                let value = match value {
                    Object::String(bytes, _) => InfoValue::Text(decode_pdf_string(bytes)),
                    Object::Integer(i) => InfoValue::Number(*i as f64),
                    Object::Real(r) => InfoValue::Number(f64::from(*r)),
                    // Names, arrays, booleans etc. are not shown in the panel
                    _ => return None,
                };
                Some((key, value))
            })
            .collect()
    }

    fn info_dictionary(document: &Document) -> Option<&Dictionary> {
        let info = document.trailer.get(b"Info").ok()?;
        Self::resolve(document, info).as_dict().ok()
    }

    fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => document.get_object(*id).unwrap_or(object),
            _ => object,
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedPdf> {
        let document = Document::load_mem(pdf_bytes)
            .map_err(|e| ExtractionError::LoadError(e.to_string()))?;

        let pages = Self::extract_pages(&document)?;
        let metadata = Self::extract_metadata(&document);

        Ok(ExtractedPdf {
            page_count: pages.len() as u32,
            pages,
            metadata,
        })
    }

    fn name(&self) -> &str {
        "lopdf"
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

/// Decode a PDF text string: UTF-16BE when it carries a BOM, otherwise
/// UTF-8 if valid, falling back to Latin-1 (close enough to PDFDocEncoding)
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
