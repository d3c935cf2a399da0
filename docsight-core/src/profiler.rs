use std::time::{Duration, Instant};

/// Wall-clock timing of named steps; a disabled profiler just runs them
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        println!("⏱️  {}: {}ms", step_name, elapsed.as_millis());
        self.timings.push((step_name.to_string(), elapsed));
        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn total(&self) -> Duration {
        self.timings.iter().map(|(_, d)| *d).sum()
    }

    /// Per-step table with share of total
    pub fn report(&self) -> Vec<String> {
        if !self.enabled || self.timings.is_empty() {
            return Vec::new();
        }

        let total = self.total();
        let mut lines = Vec::with_capacity(self.timings.len() + 1);
        for (step, duration) in &self.timings {
            let share = if total.is_zero() {
                0.0
            } else {
                duration.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            lines.push(format!(
                "   {:.<35} {}ms ({:.1}%)",
                step,
                duration.as_millis(),
                share
            ));
        }
        lines.push(format!("   {:.<35} {}ms", "Total", total.as_millis()));
        lines
    }

    pub fn print_summary(&self) {
        let lines = self.report();
        if lines.is_empty() {
            return;
        }
        println!("\n📊 Performance Summary:");
        for line in lines {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_profiler_records_nothing() {
        let mut profiler = StepProfiler::new(false);
        let value = profiler.time_step("parse", || 41 + 1);
        assert_eq!(value, 42);
        assert!(profiler.timings().is_empty());
        assert!(profiler.report().is_empty());
    }

    #[test]
    fn test_enabled_profiler_records_steps_in_order() {
        let mut profiler = StepProfiler::new(true);
        profiler.time_step("analyze", || ());
        profiler.time_step("summarize", || ());

        let names: Vec<&str> = profiler.timings().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["analyze", "summarize"]);

        let report = profiler.report();
        assert_eq!(report.len(), 3);
        assert!(report[0].contains("analyze"));
        assert!(report[2].contains("Total"));
    }
}
