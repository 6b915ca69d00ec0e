//! Output formatting and progress reporting

use console::{style, Style, Term};
use escaparate::{Outcome, ScenarioReport, SuiteReport};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for scenario execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over the scenario list
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Finish the progress bar
    pub fn finish_progress(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print one scenario result line and advance progress
    pub fn scenario(&self, report: &ScenarioReport) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
        let name = format!("{}::{} [{}ms]", report.group, report.name, report.duration_ms);
        match &report.outcome {
            Outcome::Passed => self.success(&name),
            Outcome::Skipped { reason } => self.skip(&format!("{name} ({reason})")),
            Outcome::Failed { error } => self.failure(&format!("{name} ({error})")),
        }
        for note in &report.notes {
            self.warning(&format!("  note: {note}"));
        }
        if let Some(ref screenshot) = report.screenshot {
            self.info(&format!("  screenshot: {screenshot}"));
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a skip message
    pub fn skip(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⊘").yellow().bold().to_string()
        } else {
            "SKIP".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print the suite summary
    pub fn summary(&self, suite: &SuiteReport) {
        if self.quiet && suite.all_green() {
            return;
        }

        let _ = self.term.write_line("");

        let passed = suite.passed_count();
        let failed = suite.failed_count();
        let skipped = suite.skipped_count();
        let duration_secs = suite.duration_ms as f64 / 1000.0;

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();
            let skipped_style = Style::new().yellow();

            let status = if failed > 0 {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };

            let _ = self.term.write_line(&format!(
                "{} {} scenarios in {:.2}s ({} passed, {} failed, {} skipped)",
                status,
                suite.total(),
                duration_secs,
                passed_style.apply_to(passed),
                if failed > 0 {
                    failed_style.apply_to(failed).to_string()
                } else {
                    failed.to_string()
                },
                skipped_style.apply_to(skipped)
            ));
        } else {
            let status = if failed > 0 { "FAILED" } else { "PASSED" };
            let total = suite.total();
            let _ = self.term.write_line(&format!(
                "{status} {total} scenarios in {duration_secs:.2}s ({passed} passed, {failed} failed, {skipped} skipped)"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(outcome: Outcome) -> ScenarioReport {
        ScenarioReport {
            name: "login".to_string(),
            group: "auth".to_string(),
            outcome,
            duration_ms: 7,
            notes: vec!["ordering not verified".to_string()],
            screenshot: None,
        }
    }

    #[test]
    fn test_new_reporter() {
        let reporter = ProgressReporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_scenario_lines_do_not_panic() {
        let reporter = ProgressReporter::new(false, false);
        reporter.scenario(&sample(Outcome::Passed));
        reporter.scenario(&sample(Outcome::Skipped {
            reason: "no login link".to_string(),
        }));
        reporter.scenario(&sample(Outcome::Failed {
            error: "boom".to_string(),
        }));
    }

    #[test]
    fn test_summary_does_not_panic() {
        let reporter = ProgressReporter::new(false, false);
        let mut suite = SuiteReport::new("storefront", "https://shop.test/");
        suite.push(sample(Outcome::Passed));
        reporter.summary(&suite);
    }

    #[test]
    fn test_quiet_mode_still_prints_failures() {
        let reporter = ProgressReporter::new(false, true);
        reporter.success("hidden");
        reporter.skip("hidden");
        reporter.warning("hidden");
        reporter.info("hidden");
        reporter.failure("shown");
    }

    #[test]
    fn test_progress_bar_lifecycle() {
        let mut reporter = ProgressReporter::new(false, false);
        reporter.start_progress(3, "running scenarios");
        reporter.scenario(&sample(Outcome::Passed));
        reporter.finish_progress();
    }
}
