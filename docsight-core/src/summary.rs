//! Summary Generator
//!
//! Builds a fixed-template narrative from an analysis and the document text
//! using frequency keywords, a capitalized-word entity heuristic and
//! first/last paragraph previews. None of this is real NLP.

use crate::config::SummaryConfig;
use crate::error::SummaryError;
use crate::types::DocumentAnalysis;
use regex::Regex;
use std::collections::HashMap;
use tracing::{error, info};

/// Shown in place of a summary whenever generation fails
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary. Please try again.";

/// Most frequent tokens of length >= `min_keyword_length`, most frequent
/// first. Equal counts keep first-occurrence order.
pub fn extract_keywords(text: &str, config: &SummaryConfig) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let tokens = lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| token.len() >= config.min_keyword_length);

    for token in tokens {
        match index.get(token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(config.keyword_count)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// The top keyword, or empty when there are none
pub fn main_topic(keywords: &[String]) -> &str {
    keywords.first().map(String::as_str).unwrap_or("")
}

/// Finds "entities" in free text. Swap in a real recognizer behind this.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &str;
}

/// Heuristic: runs of capitalized words ("Acme Corp", "London").
/// Matches keep their trailing space and are de-duplicated as found, in
/// first-seen order.
pub struct CapitalizedSequenceExtractor {
    pattern: Regex,
    limit: usize,
}

impl CapitalizedSequenceExtractor {
    pub fn new(limit: usize) -> Result<Self, SummaryError> {
        let pattern = Regex::new(r"[A-Z][a-z]+ (?:[A-Z][a-z]+ ?)*")
            .map_err(|e| SummaryError::PatternError(e.to_string()))?;
        Ok(Self { pattern, limit })
    }
}

impl EntityExtractor for CapitalizedSequenceExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let mut entities: Vec<String> = Vec::new();
        for found in self.pattern.find_iter(text) {
            if entities.len() == self.limit {
                break;
            }
            let entity = found.as_str();
            if !entities.iter().any(|e| e == entity) {
                entities.push(entity.to_string());
            }
        }
        entities
    }

    fn name(&self) -> &str {
        "capitalized-sequence"
    }
}

pub struct SummaryGenerator {
    config: SummaryConfig,
    paragraph_break: Regex,
    entities: Box<dyn EntityExtractor>,
}

impl SummaryGenerator {
    pub fn new(config: SummaryConfig) -> Result<Self, SummaryError> {
        let paragraph_break =
            Regex::new(r"\n\s*\n").map_err(|e| SummaryError::PatternError(e.to_string()))?;
        let entities = Box::new(CapitalizedSequenceExtractor::new(config.entity_limit)?);
        Ok(Self {
            config,
            paragraph_break,
            entities,
        })
    }

    pub fn with_entity_extractor(mut self, extractor: Box<dyn EntityExtractor>) -> Self {
        self.entities = extractor;
        self
    }

    /// Split on blank lines (a newline, optional whitespace, another newline)
    pub fn split_paragraphs<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.paragraph_break.split(text).collect()
    }

    pub fn generate(
        &self,
        analysis: Option<&DocumentAnalysis>,
        full_text: &str,
    ) -> Result<String, SummaryError> {
        let analysis = match analysis {
            Some(analysis) if !full_text.is_empty() => analysis,
            _ => return Err(SummaryError::InputError),
        };

        let keywords = extract_keywords(full_text, &self.config);
        let topic = main_topic(&keywords);
        let related: Vec<&str> = keywords
            .iter()
            .skip(1)
            .take(self.config.related_topic_count)
            .map(String::as_str)
            .collect();
        let entities = self.entities.extract(full_text);

        let paragraphs = self.split_paragraphs(full_text);
        let first = paragraphs.first().map(|p| p.trim()).unwrap_or("");
        let last = paragraphs.last().map(|p| p.trim()).unwrap_or("");
        let opening = head_chars(first, self.config.preview_chars);
        let closing = tail_chars(last, self.config.preview_chars);

        let label = analysis.text_complexity.label();
        let lines = [
            format!("Document: {}", analysis.file_name),
            format!("Pages: {}", analysis.page_count),
            format!("Complexity: {label}"),
            format!("Word Count: {}", analysis.word_count),
            String::new(),
            "Content Description:".to_string(),
            format!(
                "This document appears to be about {topic}. It discusses topics related to {}, among others.",
                related.join(", ")
            ),
            String::new(),
            "The document begins with:".to_string(),
            format!("\"{opening}...\""),
            String::new(),
            format!(
                "Key points or entities mentioned include: {}.",
                entities.join(", ")
            ),
            String::new(),
            "The document concludes with:".to_string(),
            format!("\"...{closing}\""),
            String::new(),
            format!(
                "Overall, this {}-complexity document contains {} words across {} pages, with an average word length of {:.2} characters.",
                label.to_lowercase(),
                analysis.word_count,
                analysis.page_count,
                analysis.average_word_length
            ),
            String::new(),
            format!("Key topics: {}", keywords.join(", ")),
        ];

        info!(
            "📝 Summary for '{}': {} keywords, {} entities",
            analysis.file_name,
            keywords.len(),
            entities.len()
        );
        Ok(lines.join("\n"))
    }

    /// Like [`generate`](Self::generate) but never fails
    pub fn summarize(&self, analysis: Option<&DocumentAnalysis>, full_text: &str) -> String {
        self.generate(analysis, full_text).unwrap_or_else(|e| {
            error!("❌ Error generating summary: {}", e);
            SUMMARY_FALLBACK.to_string()
        })
    }
}

fn head_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

/// Summary tab state. Each request replaces the summary whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryPanel {
    pub summary: Option<String>,
    pub is_generating: bool,
}

impl SummaryPanel {
    pub fn generate(
        &mut self,
        generator: &SummaryGenerator,
        analysis: Option<&DocumentAnalysis>,
        full_text: &str,
    ) -> &str {
        self.is_generating = true;
        let summary = generator.summarize(analysis, full_text);
        self.is_generating = false;
        self.summary.insert(summary)
    }

    /// Whether the generate action is available
    pub fn can_generate(analysis: Option<&DocumentAnalysis>, full_text: &str) -> bool {
        analysis.is_some() && !full_text.is_empty()
    }
}
