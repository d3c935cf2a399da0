//! Dashboard Controller
//!
//! Owns the single current selection and everything derived from it:
//! analysis, full text, info panel, voice description. Files are routed to
//! the analyzer or the inspector by MIME type.
//!
//! Tab switches are asymmetric. Image and Document are where a file gets
//! selected, so entering them clears the selection. Summary and Voice
//! consume the selection and leave it alone.
//!
//! Document analysis is split into `begin_document_analysis` and
//! `complete_document_analysis` so a caller can run the analyzer elsewhere
//! and hand the outcome back. Each begin issues a ticket with a sequence
//! number; the configured [`ResultPolicy`] decides which completions land.

use crate::analyzer::DocumentAnalyzer;
use crate::config::{DashboardConfig, ResultPolicy, SummaryConfig};
use crate::embedding::{handle_for, ModelHandle};
use crate::ingestion::{DropPayload, DropZone, FileHandle};
use crate::inspector::{pdf_document_info, ImageInspector};
use crate::preprocessors::{PdfPreprocessor, Preprocessor};
use crate::summary::{SummaryGenerator, SummaryPanel};
use crate::types::*;
use crate::voice::VoiceReader;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Image,
    Document,
    Summary,
    Voice,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Image, Tab::Document, Tab::Summary, Tab::Voice];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Image => "image",
            Tab::Document => "document",
            Tab::Summary => "summary",
            Tab::Voice => "voice",
        }
    }

    /// Entering these tabs starts a fresh selection
    pub fn resets_selection(&self) -> bool {
        matches!(self, Tab::Image | Tab::Document)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Unknown tab '{}' (expected image, document, summary or voice)", s))
    }
}

/// Issued when a document analysis starts; hand it back with the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    sequence: u64,
    file_id: Uuid,
}

impl AnalysisTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn file_id(&self) -> Uuid {
        self.file_id
    }
}

/// What the current selection looks like from outside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSummary {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub kind: FileKind,
}

impl From<&FileHandle> for SelectionSummary {
    fn from(file: &FileHandle) -> Self {
        Self {
            id: file.id(),
            name: file.name().to_string(),
            mime_type: file.mime_type().to_string(),
            size: file.size(),
            kind: file.kind(),
        }
    }
}

/// Serializable view of the whole dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub active_tab: Tab,
    pub selection: Option<SelectionSummary>,
    pub analysis: Option<DocumentAnalysis>,
    pub file_description: String,
    pub info: DocumentInfo,
    pub summary: Option<String>,
    pub model_state: String,
    pub voice: VoiceReader,
}

pub fn image_description(file: &FileHandle) -> String {
    format!(
        "This is an image file named {}. It has a size of {}.",
        file.name(),
        format_kb(file.size())
    )
}

pub fn document_description(file: &FileHandle) -> String {
    format!(
        "This is a document file named {}. It has a size of {}.",
        file.name(),
        format_kb(file.size())
    )
}

pub fn analysis_description(analysis: &DocumentAnalysis) -> String {
    format!(
        "This is a PDF document named {}. It has {} pages and a text complexity of {}. \
         The document contains approximately {} words with an average word length of {:.2} characters.",
        analysis.file_name,
        analysis.page_count,
        analysis.text_complexity,
        analysis.word_count,
        analysis.average_word_length
    )
}

pub struct Dashboard {
    analyzer: DocumentAnalyzer,
    pdf: Arc<dyn Preprocessor>,
    inspector: ImageInspector,
    summarizer: SummaryGenerator,
    policy: ResultPolicy,

    active_tab: Tab,
    selection: Option<FileHandle>,
    analysis: Option<DocumentAnalysis>,
    full_text: String,
    file_description: String,
    info: DocumentInfo,
    summary: SummaryPanel,
    voice: VoiceReader,
    image_zone: DropZone,
    document_zone: DropZone,

    // last sequence number handed out
    issued: u64,
    // tickets at or below this were invalidated by a tab reset
    invalidated_through: u64,
    in_flight: usize,
}

impl Dashboard {
    /// Create a dashboard with explicit extraction and model capabilities
    pub fn new(
        config: &DashboardConfig,
        pdf: Arc<dyn Preprocessor>,
        model: Arc<ModelHandle>,
    ) -> Result<Self> {
        let analyzer = DocumentAnalyzer::new(Arc::clone(&pdf), model, config.complexity.clone());
        let summarizer = SummaryGenerator::new(config.summary.clone())?;

        Ok(Self {
            analyzer,
            pdf,
            inspector: ImageInspector::new(&config.inspector),
            summarizer,
            policy: config.analysis.result_policy,
            active_tab: Tab::default(),
            selection: None,
            analysis: None,
            full_text: String::new(),
            file_description: String::new(),
            info: DocumentInfo::new(),
            summary: SummaryPanel::default(),
            voice: VoiceReader::new(&config.voice),
            image_zone: DropZone::new(FileKind::Image),
            document_zone: DropZone::new(FileKind::Pdf),
            issued: 0,
            invalidated_through: 0,
            in_flight: 0,
        })
    }

    /// Create a dashboard with the default PDF backend and the configured model
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let pdf = PdfPreprocessor::new_default();
        info!("🔧 PDF backend: {}", pdf.backend_name());
        Self::new(config, Arc::new(pdf), handle_for(&config.model))
    }

    /// Dashboard whose summary uses a non-default summary config
    pub fn with_summary_config(mut self, config: SummaryConfig) -> Result<Self> {
        self.summarizer = SummaryGenerator::new(config)?;
        Ok(self)
    }

    // ===== TABS =====

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        debug!("🗂️  Tab {} -> {}", self.active_tab, tab);
        self.active_tab = tab;
        if tab.resets_selection() {
            self.clear_selection();
        }
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.analysis = None;
        self.full_text.clear();
        self.file_description.clear();
        self.info = DocumentInfo::new();
        // whatever is still running belongs to the old selection
        self.invalidated_through = self.issued;
    }

    // ===== SELECTION =====

    /// Route a file by MIME type. Returns false when the type is ignored.
    pub fn open(&mut self, file: FileHandle) -> bool {
        match file.kind() {
            FileKind::Image => {
                self.select_image(file);
                true
            }
            FileKind::Pdf => {
                self.select_document(file);
                true
            }
            FileKind::Other => {
                warn!(
                    "🚫 Ignoring '{}': unsupported type {}",
                    file.name(),
                    file.mime_type()
                );
                false
            }
        }
    }

    pub fn select_image(&mut self, file: FileHandle) {
        info!("🖼️  Selected image: {}", file.name());
        self.file_description = image_description(&file);
        match self.inspector.inspect(&file) {
            Ok(info) => self.info = info,
            Err(e) => error!("❌ Error inspecting image: {}", e),
        }
        self.selection = Some(file);
    }

    /// Select a PDF and run its analysis to completion
    pub fn select_document(&mut self, file: FileHandle) {
        let ticket = self.begin_document_analysis(file.clone());
        let outcome = self.analyzer.analyze(&file);
        self.complete_document_analysis(ticket, outcome);
    }

    /// Make `file` the selection, fill the info panel and hand out a ticket
    /// for its analysis. Run [`DocumentAnalyzer::analyze`] on the same file
    /// and pass the outcome to [`complete_document_analysis`](Self::complete_document_analysis).
    pub fn begin_document_analysis(&mut self, file: FileHandle) -> AnalysisTicket {
        info!("📄 Selected document: {}", file.name());
        self.issued += 1;
        self.in_flight += 1;
        let ticket = AnalysisTicket {
            sequence: self.issued,
            file_id: file.id(),
        };

        self.file_description = document_description(&file);
        match self.pdf.extract(file.bytes()) {
            Ok(pdf) => self.info = pdf_document_info(&pdf),
            Err(e) => error!("❌ Error parsing PDF: {}", e),
        }
        self.selection = Some(file);
        ticket
    }

    /// Apply an analysis outcome. Returns true when it replaced the
    /// dashboard's analysis.
    pub fn complete_document_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: AnalysisOutcome,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.policy == ResultPolicy::LatestRequest
            && (ticket.sequence != self.issued || ticket.sequence <= self.invalidated_through)
        {
            debug!(
                "⏭️  Discarding stale analysis #{} (latest #{})",
                ticket.sequence, self.issued
            );
            return false;
        }

        let Some(analysis) = outcome.analysis else {
            // failed analyses leave the previous result in place
            return false;
        };

        self.file_description = analysis_description(&analysis);
        self.analysis = Some(analysis);
        self.full_text = outcome.full_text;
        true
    }

    pub fn drop_image(&mut self, payload: &DropPayload) -> bool {
        match self.image_zone.drop_payload(payload) {
            Some(file) => {
                self.select_image(file);
                true
            }
            None => false,
        }
    }

    pub fn drop_document(&mut self, payload: &DropPayload) -> bool {
        match self.document_zone.drop_payload(payload) {
            Some(file) => {
                self.select_document(file);
                true
            }
            None => false,
        }
    }

    pub fn image_zone_mut(&mut self) -> &mut DropZone {
        &mut self.image_zone
    }

    pub fn document_zone_mut(&mut self) -> &mut DropZone {
        &mut self.document_zone
    }

    // ===== SUMMARY / INFO / VOICE =====

    pub fn generate_summary(&mut self) -> &str {
        self.summary
            .generate(&self.summarizer, self.analysis.as_ref(), &self.full_text)
    }

    pub fn can_generate_summary(&self) -> bool {
        SummaryPanel::can_generate(self.analysis.as_ref(), &self.full_text)
    }

    pub fn edit_info(&mut self, label: &str, value: impl Into<InfoValue>) {
        self.info.insert(label, value);
    }

    pub fn save_info(&self) -> &DocumentInfo {
        let entries: Vec<String> = self.info.iter().map(|(l, v)| format!("{l}={v}")).collect();
        info!("💾 Saving document info: {}", entries.join(", "));
        &self.info
    }

    pub fn voice_mut(&mut self) -> &mut VoiceReader {
        &mut self.voice
    }

    /// Toggle the reader on the current file description
    pub fn toggle_reading(&mut self) -> bool {
        let description = self.file_description.clone();
        self.voice.toggle(&description);
        self.voice.is_reading()
    }

    // ===== ACCESSORS =====

    pub fn selection(&self) -> Option<&FileHandle> {
        self.selection.as_ref()
    }

    pub fn analysis(&self) -> Option<&DocumentAnalysis> {
        self.analysis.as_ref()
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn file_description(&self) -> &str {
        &self.file_description
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    pub fn voice(&self) -> &VoiceReader {
        &self.voice
    }

    pub fn analyzer(&self) -> &DocumentAnalyzer {
        &self.analyzer
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight > 0
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            active_tab: self.active_tab,
            selection: self.selection.as_ref().map(SelectionSummary::from),
            analysis: self.analysis.clone(),
            file_description: self.file_description.clone(),
            info: self.info.clone(),
            summary: self.summary.summary.clone(),
            model_state: self.analyzer.model().state().label().to_string(),
            voice: self.voice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::SentenceEmbedder;
    use crate::error::ModelError;
    use crate::summary::SUMMARY_FALLBACK;
    use chrono::Local;

    /// Serves the same pages for any input; fails on empty input
    struct CannedPdf;

    impl Preprocessor for CannedPdf {
        fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedPdf> {
            if pdf_bytes.is_empty() {
                return Err(anyhow!("empty file"));
            }
            Ok(ExtractedPdf {
                page_count: 3,
                pages: vec![
                    PageText { page_number: 1, items: vec!["Apple Apple".into()] },
                    PageText { page_number: 2, items: vec!["Banana Banana Banana".into()] },
                    PageText { page_number: 3, items: vec!["Cherry".into()] },
                ],
                metadata: vec![("Title".to_string(), InfoValue::from("Fruit"))],
            })
        }
        fn name(&self) -> &str {
            "canned"
        }
        fn supports_mime_type(&self, mime_type: &str) -> bool {
            mime_type == "application/pdf"
        }
    }

    struct Half;

    impl SentenceEmbedder for Half {
        fn embed(&self, texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, ModelError> {
            Ok(texts.iter().map(|_| vec![0.5, 0.5]).collect())
        }
        fn name(&self) -> &str {
            "half"
        }
    }

    fn dashboard_with(policy: ResultPolicy, model: Arc<ModelHandle>) -> Dashboard {
        let mut config = DashboardConfig::default();
        config.analysis.result_policy = policy;
        Dashboard::new(&config, Arc::new(CannedPdf), model).unwrap()
    }

    fn dashboard() -> Dashboard {
        dashboard_with(ResultPolicy::LatestRequest, ModelHandle::unavailable())
    }

    fn pdf(name: &str) -> FileHandle {
        FileHandle::new(vec![b'%'; 1024], name, "application/pdf", Local::now())
    }

    #[test]
    fn test_tab_parse_and_display() {
        assert_eq!("summary".parse::<Tab>().unwrap(), Tab::Summary);
        assert_eq!("Voice".parse::<Tab>().unwrap(), Tab::Voice);
        assert!("settings".parse::<Tab>().is_err());
        assert_eq!(Tab::Document.to_string(), "document");
        assert_eq!(Tab::default(), Tab::Image);
    }

    #[test]
    fn test_select_document_fills_state() {
        let mut dashboard = dashboard();
        dashboard.select_document(pdf("fruit.pdf"));

        let analysis = dashboard.analysis().unwrap();
        assert_eq!(analysis.page_count, 3);
        assert_eq!(analysis.text_complexity, TextComplexity::ModelNotLoaded);
        assert_eq!(dashboard.full_text(), "Apple Apple Banana Banana Banana Cherry ");
        assert_eq!(dashboard.info().labels(), vec!["Number of Pages", "Title"]);
        assert_eq!(
            dashboard.file_description(),
            "This is a PDF document named fruit.pdf. It has 3 pages and a text complexity of \
             Model not loaded. The document contains approximately 0 words with an average \
             word length of 0.00 characters."
        );
        assert!(!dashboard.is_analyzing());
    }

    #[test]
    fn test_failed_analysis_keeps_generic_description() {
        let mut dashboard = dashboard();
        let empty = FileHandle::new(vec![], "empty.pdf", "application/pdf", Local::now());
        dashboard.select_document(empty);

        assert!(dashboard.analysis().is_none());
        assert_eq!(dashboard.selection().unwrap().name(), "empty.pdf");
        assert_eq!(
            dashboard.file_description(),
            "This is a document file named empty.pdf. It has a size of 0.00 KB."
        );
    }

    #[test]
    fn test_tab_reset_is_asymmetric() {
        let mut dashboard = dashboard();
        dashboard.select_document(pdf("fruit.pdf"));
        dashboard.switch_tab(Tab::Summary);

        dashboard.switch_tab(Tab::Voice);
        assert!(dashboard.selection().is_some());
        assert!(dashboard.analysis().is_some());

        dashboard.switch_tab(Tab::Image);
        assert!(dashboard.selection().is_none());
        assert!(dashboard.analysis().is_none());
        assert_eq!(dashboard.full_text(), "");
        assert_eq!(dashboard.file_description(), "");
        assert!(dashboard.info().is_empty());
    }

    #[test]
    fn test_summary_tab_uses_current_analysis() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.generate_summary(), SUMMARY_FALLBACK);

        dashboard.select_document(pdf("fruit.pdf"));
        dashboard.switch_tab(Tab::Summary);
        assert!(dashboard.can_generate_summary());
        let summary = dashboard.generate_summary().to_string();
        assert!(summary.contains("Key topics: banana, apple, cherry"));
        assert_eq!(dashboard.summary().summary.as_deref(), Some(summary.as_str()));
    }

    #[test]
    fn test_latest_request_discards_older_completion() {
        let mut dashboard = dashboard();
        let first = pdf("first.pdf");
        let second = pdf("second.pdf");

        let first_ticket = dashboard.begin_document_analysis(first.clone());
        let second_ticket = dashboard.begin_document_analysis(second.clone());
        assert!(dashboard.is_analyzing());

        let second_outcome = dashboard.analyzer().analyze(&second);
        let first_outcome = dashboard.analyzer().analyze(&first);

        assert!(dashboard.complete_document_analysis(second_ticket, second_outcome));
        // the first file finishes last but was superseded
        assert!(!dashboard.complete_document_analysis(first_ticket, first_outcome));
        assert_eq!(dashboard.analysis().unwrap().file_name, "second.pdf");
        assert!(!dashboard.is_analyzing());
    }

    #[test]
    fn test_last_completed_lets_slowest_win() {
        let mut dashboard = dashboard_with(ResultPolicy::LastCompleted, ModelHandle::unavailable());
        let first = pdf("first.pdf");
        let second = pdf("second.pdf");

        let first_ticket = dashboard.begin_document_analysis(first.clone());
        let second_ticket = dashboard.begin_document_analysis(second.clone());
        let second_outcome = dashboard.analyzer().analyze(&second);
        let first_outcome = dashboard.analyzer().analyze(&first);

        assert!(dashboard.complete_document_analysis(second_ticket, second_outcome));
        assert!(dashboard.complete_document_analysis(first_ticket, first_outcome));
        assert_eq!(dashboard.analysis().unwrap().file_name, "first.pdf");
    }

    #[test]
    fn test_tab_reset_invalidates_in_flight_analysis() {
        let mut dashboard = dashboard();
        let file = pdf("late.pdf");
        let ticket = dashboard.begin_document_analysis(file.clone());
        dashboard.switch_tab(Tab::Document);

        let outcome = dashboard.analyzer().analyze(&file);
        assert!(!dashboard.complete_document_analysis(ticket, outcome));
        assert!(dashboard.analysis().is_none());
    }

    #[test]
    fn test_model_loaded_lazily_by_first_document() {
        let model = ModelHandle::with_loader(|| Ok(Arc::new(Half) as Arc<dyn SentenceEmbedder>));
        let mut dashboard = dashboard_with(ResultPolicy::LatestRequest, model);
        assert_eq!(dashboard.snapshot().model_state, "unloaded");

        dashboard.select_document(pdf("fruit.pdf"));
        let analysis = dashboard.analysis().unwrap();
        assert_eq!(analysis.text_complexity, TextComplexity::Medium);
        assert_eq!(analysis.word_count, 7);
        assert_eq!(dashboard.snapshot().model_state, "ready");
    }

    #[test]
    fn test_open_routes_by_mime_type() {
        let mut dashboard = dashboard();
        let text = FileHandle::new(b"hello".to_vec(), "notes.txt", "text/plain", Local::now());
        assert!(!dashboard.open(text));
        assert!(dashboard.selection().is_none());

        assert!(dashboard.open(pdf("fruit.pdf")));
        assert!(dashboard.analysis().is_some());

        // undecodable image: selection and description change, panel stays
        let image = FileHandle::new(vec![0u8; 2048], "blank.png", "image/png", Local::now());
        assert!(dashboard.open(image));
        assert_eq!(dashboard.selection().unwrap().name(), "blank.png");
        assert_eq!(
            dashboard.file_description(),
            "This is an image file named blank.png. It has a size of 2.00 KB."
        );
        assert_eq!(dashboard.info().labels(), vec!["Number of Pages", "Title"]);
    }

    #[test]
    fn test_drops_respect_zone_kind() {
        let mut dashboard = dashboard();
        dashboard.document_zone_mut().drag_mut().drag_enter();
        let payload = DropPayload::new(vec![pdf("dropped.pdf")]);

        assert!(!dashboard.drop_image(&payload));
        assert!(dashboard.drop_document(&payload));
        assert!(!dashboard.document_zone_mut().drag().is_dragging());
        assert_eq!(dashboard.analysis().unwrap().file_name, "dropped.pdf");
    }

    #[test]
    fn test_edit_and_save_info() {
        let mut dashboard = dashboard();
        dashboard.select_document(pdf("fruit.pdf"));
        dashboard.edit_info("Title", "Orchard Notes");
        dashboard.edit_info("Author", "Grower");

        let saved = dashboard.save_info();
        assert_eq!(saved.get("Title").unwrap().to_string(), "Orchard Notes");
        assert_eq!(saved.labels(), vec!["Number of Pages", "Title", "Author"]);
    }

    #[test]
    fn test_voice_reads_description() {
        let mut dashboard = dashboard();
        dashboard.select_document(pdf("fruit.pdf"));
        dashboard.switch_tab(Tab::Voice);
        assert!(dashboard.toggle_reading());
        assert!(!dashboard.toggle_reading());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut dashboard = dashboard();
        dashboard.select_document(pdf("fruit.pdf"));
        let value = serde_json::to_value(dashboard.snapshot()).unwrap();

        assert_eq!(value["activeTab"], "image");
        assert_eq!(value["selection"]["name"], "fruit.pdf");
        assert_eq!(value["analysis"]["pageCount"], 3);
        assert_eq!(value["modelState"], "unloaded");
    }
}
