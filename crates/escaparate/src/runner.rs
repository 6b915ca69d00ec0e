//! Sequential scenario runner with total isolation.
//!
//! Every scenario gets a fresh page from the factory and runs to its own
//! outcome; nothing is shared between scenarios and a failure or timeout in
//! one never cancels the rest (unless fail-fast is requested).

use crate::config::SuiteConfig;
use crate::page::Page;
use crate::reporter::SuiteReport;
use crate::result::EscaparateResult;
use crate::scenario::{Outcome, Scenario, ScenarioCx, ScenarioReport};
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::time::Instant;

/// Factory producing one isolated page per scenario
pub type PageFactory = Box<dyn Fn() -> BoxFuture<'static, EscaparateResult<Page>> + Send + Sync>;

/// Scenario runner
pub struct Runner {
    config: SuiteConfig,
    fail_fast: bool,
    artifacts_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("fail_fast", &self.fail_fast)
            .field("artifacts_dir", &self.artifacts_dir)
            .finish_non_exhaustive()
    }
}

impl Runner {
    /// Create a runner for a suite configuration
    #[must_use]
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config,
            fail_fast: false,
            artifacts_dir: None,
        }
    }

    /// Stop after the first failing scenario
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Write failure screenshots under this directory
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    /// Run the scenarios in order, reporting each as it finishes.
    ///
    /// A page-factory error fails that scenario alone; the rest proceed.
    pub async fn run(
        &self,
        suite_name: &str,
        scenarios: &[Scenario],
        new_page: &PageFactory,
        mut on_report: impl FnMut(&ScenarioReport),
    ) -> SuiteReport {
        let started = Instant::now();
        let mut suite = SuiteReport::new(suite_name, self.config.base_url.clone());

        for scenario in scenarios {
            let report = match new_page().await {
                Ok(page) => {
                    let mut cx = ScenarioCx::new(page, self.config.clone());
                    let mut report = scenario.execute(&mut cx).await;
                    if report.outcome.is_failed() {
                        report.screenshot = self.capture_failure(scenario, &cx.page).await;
                    }
                    report
                }
                Err(error) => ScenarioReport {
                    name: scenario.name.to_string(),
                    group: scenario.group.to_string(),
                    outcome: Outcome::Failed {
                        error: format!("could not open page: {error}"),
                    },
                    duration_ms: 0,
                    notes: Vec::new(),
                    screenshot: None,
                },
            };

            on_report(&report);
            let failed = report.outcome.is_failed();
            suite.push(report);
            if failed && self.fail_fast {
                tracing::warn!("fail-fast: stopping after first failure");
                break;
            }
        }

        suite.duration_ms = started.elapsed().as_millis() as u64;
        suite
    }

    async fn capture_failure(&self, scenario: &Scenario, page: &Page) -> Option<String> {
        let dir = self.artifacts_dir.as_ref()?;
        let png = match page.screenshot().await {
            Ok(png) if !png.is_empty() => png,
            Ok(_) => return None,
            Err(error) => {
                tracing::debug!(%error, "failure screenshot unavailable");
                return None;
            }
        };
        if let Err(error) = std::fs::create_dir_all(dir) {
            tracing::debug!(%error, "could not create artifacts dir");
            return None;
        }
        let path = dir.join(format!("{}__{}.png", scenario.group, scenario.name));
        match std::fs::write(&path, png) {
            Ok(()) => Some(path.display().to_string()),
            Err(error) => {
                tracing::debug!(%error, "could not write failure screenshot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockPage;
    use crate::result::EscaparateError;
    use crate::scenario::Flow;

    fn mock_factory() -> PageFactory {
        Box::new(|| Box::pin(async { Ok(Page::new(Box::new(MockPage::new()))) }))
    }

    fn passing(cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
        let _ = cx;
        Box::pin(async { Ok(Flow::Completed) })
    }

    fn failing(cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
        let _ = cx;
        Box::pin(async { Err(EscaparateError::assertion("nope")) })
    }

    #[tokio::test]
    async fn test_runner_isolates_failures() {
        let runner = Runner::new(SuiteConfig::default());
        let scenarios = vec![
            Scenario::new("cart", "fails", failing),
            Scenario::new("cart", "passes", passing),
        ];
        let factory = mock_factory();
        let suite = runner
            .run("storefront", &scenarios, &factory, |_| {})
            .await;
        assert_eq!(suite.total(), 2);
        assert_eq!(suite.failed_count(), 1);
        assert_eq!(suite.passed_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_fast_stops_after_failure() {
        let runner = Runner::new(SuiteConfig::default()).with_fail_fast();
        let scenarios = vec![
            Scenario::new("cart", "fails", failing),
            Scenario::new("cart", "never_runs", passing),
        ];
        let factory = mock_factory();
        let suite = runner
            .run("storefront", &scenarios, &factory, |_| {})
            .await;
        assert_eq!(suite.total(), 1);
    }

    #[tokio::test]
    async fn test_factory_error_fails_only_that_scenario() {
        let runner = Runner::new(SuiteConfig::default());
        let flaky: PageFactory = {
            let calls = std::sync::atomic::AtomicUsize::new(0);
            Box::new(move || {
                let n = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Box::pin(async move {
                    if n == 0 {
                        Err(EscaparateError::BrowserLaunch {
                            message: "no chromium".to_string(),
                        })
                    } else {
                        Ok(Page::new(Box::new(MockPage::new())))
                    }
                })
            })
        };
        let scenarios = vec![
            Scenario::new("auth", "first", passing),
            Scenario::new("auth", "second", passing),
        ];
        let suite = runner.run("storefront", &scenarios, &flaky, |_| {}).await;
        assert_eq!(suite.failed_count(), 1);
        assert_eq!(suite.passed_count(), 1);
    }

    #[tokio::test]
    async fn test_on_report_sees_every_scenario() {
        let runner = Runner::new(SuiteConfig::default());
        let scenarios = vec![
            Scenario::new("a", "one", passing),
            Scenario::new("b", "two", passing),
        ];
        let factory = mock_factory();
        let mut seen = Vec::new();
        runner
            .run("storefront", &scenarios, &factory, |r| {
                seen.push(r.name.clone());
            })
            .await;
        assert_eq!(seen, vec!["one".to_string(), "two".to_string()]);
    }
}
