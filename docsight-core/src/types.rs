use serde::{Deserialize, Serialize};
use std::fmt;

// ===== FILE CLASSIFICATION =====

/// Coarse file discriminant used to route a selection.
/// Derived from the declared MIME type, never from content sniffing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `image/*`
    Image,
    /// exactly `application/pdf`
    Pdf,
    /// anything else, ignored by the dashboard
    Other,
}

impl FileKind {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            FileKind::Image
        } else if mime_type == "application/pdf" {
            FileKind::Pdf
        } else {
            FileKind::Other
        }
    }
}

// ===== ANALYSIS TYPES =====

/// Coarse three-bucket text complexity plus the two degraded states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextComplexity {
    Simple,
    Medium,
    Complex,
    /// Model answered but produced no embedding
    Undetermined,
    /// No embedding model ready when the analysis ran
    ModelNotLoaded,
}

impl TextComplexity {
    pub fn label(&self) -> &'static str {
        match self {
            TextComplexity::Simple => "Simple",
            TextComplexity::Medium => "Medium",
            TextComplexity::Complex => "Complex",
            TextComplexity::Undetermined => "Unable to determine",
            TextComplexity::ModelNotLoaded => "Model not loaded",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Simple" => Some(TextComplexity::Simple),
            "Medium" => Some(TextComplexity::Medium),
            "Complex" => Some(TextComplexity::Complex),
            "Unable to determine" => Some(TextComplexity::Undetermined),
            "Model not loaded" => Some(TextComplexity::ModelNotLoaded),
            _ => None,
        }
    }
}

impl fmt::Display for TextComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Serialized as the display label so reports read the same as the panel
impl Serialize for TextComplexity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TextComplexity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        TextComplexity::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown complexity label '{label}'")))
    }
}

/// Result of analyzing one PDF. Produced once, never mutated;
/// a new analysis replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub file_name: String,
    /// Human readable, e.g. "12.50 KB"
    pub file_size: String,
    pub page_count: u32,
    /// `YYYY-MM-DD` or empty
    pub creation_date: String,
    pub text_complexity: TextComplexity,
    pub word_count: usize,
    /// Characters of the full text (separators included) per word
    pub average_word_length: f64,
}

/// Analyzer output: the analysis (if extraction succeeded) and the
/// page-ordered text it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub analysis: Option<DocumentAnalysis>,
    pub full_text: String,
}

impl AnalysisOutcome {
    pub fn failed() -> Self {
        Self::default()
    }
}

// ===== EXTRACTION TYPES =====

/// Text content of one page, as the items the backend produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed
    pub page_number: u32,
    pub items: Vec<String>,
}

impl PageText {
    /// Items joined by single spaces, followed by one trailing space
    pub fn joined(&self) -> String {
        let mut text = self.items.join(" ");
        text.push(' ');
        text
    }
}

/// Everything the PDF boundary hands back for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPdf {
    pub page_count: u32,
    /// In page order, one per page
    pub pages: Vec<PageText>,
    /// Info dictionary entries in dictionary order (text and numbers only)
    pub metadata: Vec<(String, InfoValue)>,
}

impl ExtractedPdf {
    pub fn metadata_value(&self, key: &str) -> Option<&InfoValue> {
        self.metadata.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Page texts concatenated in page order
    pub fn full_text(&self) -> String {
        self.pages.iter().map(PageText::joined).collect()
    }
}

// ===== INFO PANEL =====

/// A metadata value shown in the info panel: text or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Number(f64),
    Text(String),
}

impl InfoValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoValue::Text(s) => Some(s),
            InfoValue::Number(_) => None,
        }
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Text(s) => f.write_str(s),
            // integral numbers print without a trailing ".0"
            InfoValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            InfoValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for InfoValue {
    fn from(value: &str) -> Self {
        InfoValue::Text(value.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(value: String) -> Self {
        InfoValue::Text(value)
    }
}

impl From<u32> for InfoValue {
    fn from(value: u32) -> Self {
        InfoValue::Number(value as f64)
    }
}

/// Open label → value mapping behind the editable info panel.
/// Keeps insertion order; re-inserting a label replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    entries: Vec<(String, InfoValue)>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<InfoValue>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&InfoValue> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `"{:.2} KB"` as shown everywhere a file size is displayed
pub fn format_kb(size: u64) -> String {
    format!("{:.2} KB", size as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_mime() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("image/svg+xml"), FileKind::Image);
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_mime("application/pdfx"), FileKind::Other);
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Other);
    }

    #[test]
    fn test_complexity_serializes_as_label() {
        let json = serde_json::to_string(&TextComplexity::ModelNotLoaded).unwrap();
        assert_eq!(json, "\"Model not loaded\"");
        let back: TextComplexity = serde_json::from_str("\"Unable to determine\"").unwrap();
        assert_eq!(back, TextComplexity::Undetermined);
    }

    #[test]
    fn test_analysis_uses_camel_case() {
        let analysis = DocumentAnalysis {
            file_name: "a.pdf".to_string(),
            file_size: format_kb(2048),
            page_count: 2,
            creation_date: String::new(),
            text_complexity: TextComplexity::Simple,
            word_count: 0,
            average_word_length: 0.0,
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["fileName"], "a.pdf");
        assert_eq!(value["fileSize"], "2.00 KB");
        assert_eq!(value["textComplexity"], "Simple");
    }

    #[test]
    fn test_full_text_joins_items_with_trailing_space_per_page() {
        let pdf = ExtractedPdf {
            page_count: 2,
            pages: vec![
                PageText { page_number: 1, items: vec!["Hello".into(), "world".into()] },
                PageText { page_number: 2, items: vec!["Bye".into()] },
            ],
            metadata: vec![],
        };
        assert_eq!(pdf.full_text(), "Hello world Bye ");
    }

    #[test]
    fn test_document_info_keeps_order_and_replaces() {
        let mut info = DocumentInfo::new();
        info.insert("Number of Pages", 3u32);
        info.insert("Title", "Report");
        info.insert("Number of Pages", 4u32);

        assert_eq!(info.labels(), vec!["Number of Pages", "Title"]);
        assert_eq!(info.get("Number of Pages"), Some(&InfoValue::Number(4.0)));
        assert_eq!(info.get("Number of Pages").unwrap().to_string(), "4");
    }
}
