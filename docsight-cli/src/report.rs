//! JSON report written after a run

use anyhow::Result;
use chrono::{DateTime, Utc};
use docsight_core::{DashboardSnapshot, StepProfiler};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTiming {
    pub step: String,
    pub millis: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub config: Option<String>,
    pub dashboard: DashboardSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timings: Vec<StepTiming>,
}

impl Report {
    pub fn new(input: &str, config: Option<&Path>, dashboard: DashboardSnapshot) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.to_string(),
            config: config.map(|p| p.display().to_string()),
            dashboard,
            timings: Vec::new(),
        }
    }

    pub fn with_timings(mut self, profiler: &StepProfiler) -> Self {
        self.timings = profiler
            .timings()
            .iter()
            .map(|(step, duration)| StepTiming {
                step: step.clone(),
                millis: duration.as_millis(),
            })
            .collect();
        self
    }

    pub fn save(&self, output_path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        debug!("Report for '{}': {} bytes, {} timings", self.input, json.len(), self.timings.len());
        std::fs::write(output_path, json)?;
        info!("💾 Report written: {}", output_path);
        Ok(())
    }
}

/// `{input stem}_docsight.json` next to the working directory
pub fn default_output_path(input: &str) -> String {
    let input_name = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{input_name}_docsight.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsight_core::{Dashboard, DashboardConfig};

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path("reports/q3.pdf"), "q3_docsight.json");
        assert_eq!(default_output_path("photo.final.png"), "photo.final_docsight.json");
    }

    #[test]
    fn test_save_writes_camel_case_json() {
        let dashboard = Dashboard::from_config(&DashboardConfig::default()).unwrap();
        let mut profiler = StepProfiler::new(true);
        profiler.time_step("noop", || ());
        let report = Report::new("in.pdf", None, dashboard.snapshot()).with_timings(&profiler);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.save(path.to_str().unwrap()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["input"], "in.pdf");
        assert_eq!(value["dashboard"]["activeTab"], "image");
        assert_eq!(value["timings"][0]["step"], "noop");
        assert!(value["generatedAt"].is_string());
    }
}
