//! Suite-level reporting.
//!
//! The user-visible contract is a per-scenario pass/fail/skip report plus a
//! summary; there is no partial-success semantics beyond it. Skips count as
//! trivially passing for exit-code purposes.

use crate::scenario::{Outcome, ScenarioReport};
use crate::result::EscaparateResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregated results for one suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,
    /// Base URL the suite ran against
    pub base_url: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Total wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Per-scenario reports, in execution order
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Create an empty report
    #[must_use]
    pub fn new(suite: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            base_url: base_url.into(),
            started_at: Utc::now(),
            duration_ms: 0,
            scenarios: Vec::new(),
        }
    }

    /// Append a scenario report
    pub fn push(&mut self, report: ScenarioReport) {
        self.scenarios.push(report);
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|r| r.outcome.is_passed())
            .count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|r| r.outcome.is_failed())
            .count()
    }

    /// Count skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|r| r.outcome.is_skipped())
            .count()
    }

    /// Total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether no scenario failed (skips pass trivially)
    #[must_use]
    pub fn all_green(&self) -> bool {
        self.failed_count() == 0
    }

    /// Failed scenario reports
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioReport> {
        self.scenarios
            .iter()
            .filter(|r| r.outcome.is_failed())
            .collect()
    }

    /// Render a plain-text report
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("suite {} against {}\n", self.suite, self.base_url));
        for report in &self.scenarios {
            let (label, detail) = match &report.outcome {
                Outcome::Passed => ("PASS", String::new()),
                Outcome::Skipped { reason } => ("SKIP", format!(" ({reason})")),
                Outcome::Failed { error } => ("FAIL", format!(" ({error})")),
            };
            out.push_str(&format!(
                "{label} {}::{} [{}ms]{detail}\n",
                report.group, report.name, report.duration_ms
            ));
            for note in &report.notes {
                out.push_str(&format!("     note: {note}\n"));
            }
        }
        out.push_str(&format!(
            "{} total, {} passed, {} failed, {} skipped in {}ms\n",
            self.total(),
            self.passed_count(),
            self.failed_count(),
            self.skipped_count(),
            self.duration_ms
        ));
        out
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> EscaparateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as JSON to a file
    pub fn write_json(&self, path: impl AsRef<Path>) -> EscaparateResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: Outcome) -> ScenarioReport {
        ScenarioReport {
            name: "login".to_string(),
            group: "auth".to_string(),
            outcome,
            duration_ms: 12,
            notes: Vec::new(),
            screenshot: None,
        }
    }

    #[test]
    fn test_counts_and_all_green() {
        let mut suite = SuiteReport::new("storefront", "https://shop.test/");
        suite.push(report(Outcome::Passed));
        suite.push(report(Outcome::Skipped {
            reason: "no login link".to_string(),
        }));
        assert_eq!(suite.total(), 2);
        assert_eq!(suite.passed_count(), 1);
        assert_eq!(suite.skipped_count(), 1);
        assert!(suite.all_green());
    }

    #[test]
    fn test_skips_do_not_fail_the_run() {
        let mut suite = SuiteReport::new("storefront", "https://shop.test/");
        suite.push(report(Outcome::Skipped {
            reason: "sort dropdown absent".to_string(),
        }));
        assert!(suite.all_green());
    }

    #[test]
    fn test_failure_breaks_all_green() {
        let mut suite = SuiteReport::new("storefront", "https://shop.test/");
        suite.push(report(Outcome::Failed {
            error: "checkout button enabled on empty cart".to_string(),
        }));
        assert!(!suite.all_green());
        assert_eq!(suite.failures().len(), 1);
    }

    #[test]
    fn test_render_lists_outcomes_and_notes() {
        let mut suite = SuiteReport::new("storefront", "https://shop.test/");
        let mut noted = report(Outcome::Passed);
        noted.notes.push("ordering not verified".to_string());
        suite.push(noted);
        suite.push(report(Outcome::Failed {
            error: "boom".to_string(),
        }));
        let text = suite.render();
        assert!(text.contains("PASS auth::login"));
        assert!(text.contains("note: ordering not verified"));
        assert!(text.contains("FAIL auth::login"));
        assert!(text.contains("1 failed"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut suite = SuiteReport::new("storefront", "https://shop.test/");
        suite.push(report(Outcome::Passed));
        let json = suite.to_json().unwrap();
        let parsed: SuiteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total(), 1);
        assert_eq!(parsed.suite, "storefront");
    }

    #[test]
    fn test_write_json_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let suite = SuiteReport::new("storefront", "https://shop.test/");
        suite.write_json(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"suite\""));
    }
}
