use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Default value functions for serde
fn default_simple_below() -> f64 {
    0.3
}

fn default_complex_above() -> f64 {
    0.7
}

fn default_keyword_count() -> usize {
    10
}

fn default_min_keyword_length() -> usize {
    4 // tokens of 3 characters or fewer are noise
}

fn default_related_topic_count() -> usize {
    4
}

fn default_entity_limit() -> usize {
    5
}

fn default_preview_chars() -> usize {
    200
}

fn default_timestamp_format() -> String {
    // Matches en-US Date.toLocaleString(), e.g. "3/15/2024, 2:05:09 PM"
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_pitch() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub complexity: ComplexityConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub inspector: InspectorConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Thresholds on the averaged embedding scalar.
/// Both bounds are inclusive to `Medium`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityConfig {
    /// Scores strictly below this are `Simple`
    #[serde(default = "default_simple_below")]
    pub simple_below: f64,
    /// Scores strictly above this are `Complex`
    #[serde(default = "default_complex_above")]
    pub complex_above: f64,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            simple_below: default_simple_below(),
            complex_above: default_complex_above(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Maximum number of keywords kept
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,
    /// Minimum token length to count as a keyword
    #[serde(default = "default_min_keyword_length")]
    pub min_keyword_length: usize,
    /// Keywords after the main topic listed as related topics
    #[serde(default = "default_related_topic_count")]
    pub related_topic_count: usize,
    /// Maximum number of pseudo-entities kept
    #[serde(default = "default_entity_limit")]
    pub entity_limit: usize,
    /// Characters shown from the first and last paragraphs
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            keyword_count: default_keyword_count(),
            min_keyword_length: default_min_keyword_length(),
            related_topic_count: default_related_topic_count(),
            entity_limit: default_entity_limit(),
            preview_chars: default_preview_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// chrono format string for the "Last Modified" entry (local time)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// What to do when analyses overlap (a second file dropped before the
/// first finished).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultPolicy {
    /// Only the most recently requested analysis may update state
    #[default]
    LatestRequest,
    /// Whichever analysis finishes last wins, regardless of start order
    LastCompleted,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub result_policy: ResultPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// No embedding model; analyses report "Model not loaded"
    #[default]
    None,
    /// all-MiniLM-L6-v2 via fastembed (requires the fastembed-model feature)
    MiniLm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub kind: ModelKind,
    #[serde(default = "default_true")]
    pub show_download_progress: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::None,
            show_download_progress: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default)]
    pub voice: crate::voice::Voice,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: crate::voice::Voice::default(),
            speed: default_speed(),
            pitch: default_pitch(),
        }
    }
}

impl DashboardConfig {
    /// Load config from file path (functional approach)
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                warn!("⚠️  Failed to load config from {}: {}, using defaults", p, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
