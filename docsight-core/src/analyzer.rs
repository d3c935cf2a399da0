//! Document Analyzer
//!
//! Turns a PDF selection into a [`DocumentAnalysis`] plus the page-ordered
//! full text. Extraction failures never escape: they are logged and reported
//! as an outcome without analysis and with empty text.

use crate::config::ComplexityConfig;
use crate::embedding::{ModelHandle, SentenceEmbedder};
use crate::ingestion::FileHandle;
use crate::preprocessors::Preprocessor;
use crate::types::*;
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct DocumentAnalyzer {
    preprocessor: Arc<dyn Preprocessor>,
    model: Arc<ModelHandle>,
    complexity: ComplexityConfig,
}

impl DocumentAnalyzer {
    pub fn new(
        preprocessor: Arc<dyn Preprocessor>,
        model: Arc<ModelHandle>,
        complexity: ComplexityConfig,
    ) -> Self {
        Self {
            preprocessor,
            model,
            complexity,
        }
    }

    pub fn model(&self) -> &Arc<ModelHandle> {
        &self.model
    }

    /// Analyze a PDF-typed handle. Callers route by MIME type first.
    pub fn analyze(&self, file: &FileHandle) -> AnalysisOutcome {
        info!("📄 Analyzing document: {}", file.name());
        match self.try_analyze(file) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("❌ Error analyzing PDF '{}': {}", file.name(), e);
                AnalysisOutcome::failed()
            }
        }
    }

    fn try_analyze(&self, file: &FileHandle) -> Result<AnalysisOutcome> {
        let extracted = self.preprocessor.extract(file.bytes())?;

        let creation_date = match extracted.metadata_value("CreationDate") {
            Some(InfoValue::Text(raw)) => parse_pdf_date(raw).unwrap_or_default(),
            _ => String::new(),
        };

        let full_text = extracted.full_text();

        let mut analysis = DocumentAnalysis {
            file_name: file.name().to_string(),
            file_size: format_kb(file.size()),
            page_count: extracted.page_count,
            creation_date,
            text_complexity: TextComplexity::ModelNotLoaded,
            word_count: 0,
            average_word_length: 0.0,
        };

        // First need of the model triggers its one-time load
        self.model.ensure_loaded();
        match self.model.embedder() {
            Some(model) => {
                analysis.text_complexity = self.score_complexity(model.as_ref(), &full_text);
                let stats = word_stats(&full_text);
                analysis.word_count = stats.word_count;
                analysis.average_word_length = stats.average_word_length;
            }
            None => {
                warn!("⚠️  Embedding model not loaded, skipping complexity");
            }
        }

        info!(
            "✅ Analyzed '{}': {} pages, complexity {}",
            analysis.file_name, analysis.page_count, analysis.text_complexity
        );

        Ok(AnalysisOutcome {
            analysis: Some(analysis),
            full_text,
        })
    }

    fn score_complexity(&self, model: &dyn SentenceEmbedder, full_text: &str) -> TextComplexity {
        let embeddings = match model.embed(&[full_text.to_string()]) {
            Ok(embeddings) => embeddings,
            Err(e) => {
                warn!("⚠️  {}", e);
                return TextComplexity::Undetermined;
            }
        };

        match embeddings.first() {
            Some(vector) if !vector.is_empty() => {
                let score = vector.iter().map(|v| f64::from(*v)).sum::<f64>() / vector.len() as f64;
                classify_complexity(score, &self.complexity)
            }
            _ => TextComplexity::Undetermined,
        }
    }
}

/// Bucket an averaged embedding scalar. Bounds are inclusive to `Medium`.
pub fn classify_complexity(score: f64, config: &ComplexityConfig) -> TextComplexity {
    if score < config.simple_below {
        TextComplexity::Simple
    } else if score > config.complex_above {
        TextComplexity::Complex
    } else {
        TextComplexity::Medium
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS...`) into `YYYY-MM-DD`.
/// The first two characters are dropped whatever they are; the next eight
/// must be digits.
pub fn parse_pdf_date(raw: &str) -> Option<String> {
    let digits: String = raw.chars().skip(2).take(8).collect();
    if digits.chars().count() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}-{}-{}", &digits[0..4], &digits[4..6], &digits[6..8]))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordStats {
    pub word_count: usize,
    pub average_word_length: f64,
}

/// Word count is the number of pieces the text splits into on whitespace
/// runs, empty leading/trailing pieces included. The average divides the
/// UTF-16 length of the whole text (separators included) by that count, so
/// astral characters weigh two.
pub fn word_stats(full_text: &str) -> WordStats {
    let mut word_count = 1;
    let mut in_gap = false;
    for c in full_text.chars() {
        if is_separator(c) {
            if !in_gap {
                word_count += 1;
            }
            in_gap = true;
        } else {
            in_gap = false;
        }
    }
    let average_word_length = full_text.encode_utf16().count() as f64 / word_count as f64;
    WordStats {
        word_count,
        average_word_length,
    }
}

/// Unicode space separators, line terminators and the BOM.
/// Unlike `char::is_whitespace` it leaves out U+0085.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
