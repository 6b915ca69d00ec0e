//! Scenarios and the runner.
//!
//! A scenario is an independent navigate → locate → interact → assert
//! sequence. Bodies declare how they finished through [`Flow`]: completing
//! normally, or skipping because a probed optional element was absent. The
//! runner folds body results, errors and timeouts into an [`Outcome`] and
//! never lets one scenario affect another.

use crate::config::SuiteConfig;
use crate::page::Page;
use crate::result::{EscaparateError, EscaparateResult};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default per-scenario timeout (60 seconds)
pub const DEFAULT_SCENARIO_TIMEOUT_MS: u64 = 60_000;

/// How a scenario body finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// The body ran all its steps
    Completed,
    /// An optional element was absent; the rest of the body was skipped
    Skipped(String),
}

impl Flow {
    /// Skip with a reason
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }
}

/// Final classification of a scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// All assertions held
    Passed,
    /// Optional element absent; passed trivially
    Skipped {
        /// Why the scenario skipped
        reason: String,
    },
    /// An assertion, navigation or timeout failed
    Failed {
        /// The failure message
        error: String,
    },
}

impl Outcome {
    /// Whether the scenario passed
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Whether the scenario failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the scenario skipped
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Report for a single scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Scenario group (auth, cart, ...)
    pub group: String,
    /// Final outcome
    pub outcome: Outcome,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Recorded notes (weak-assertion flags and similar)
    pub notes: Vec<String>,
    /// Failure screenshot path, when one was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

/// Execution context handed to a scenario body.
///
/// Owns the scenario's page and collects notes along the way.
#[derive(Debug)]
pub struct ScenarioCx {
    /// The scenario's isolated page
    pub page: Page,
    /// Suite configuration
    pub config: SuiteConfig,
    notes: Vec<String>,
}

impl ScenarioCx {
    /// Create a context for one scenario run
    #[must_use]
    pub fn new(page: Page, config: SuiteConfig) -> Self {
        Self {
            page,
            config,
            notes: Vec::new(),
        }
    }

    /// Record a note on the report (e.g. a weak-assertion flag)
    pub fn note(&mut self, note: impl Into<String>) {
        let note = note.into();
        tracing::warn!(%note, "scenario note");
        self.notes.push(note);
    }

    /// Notes recorded so far
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Locator over a chain, bounded by the configured action timeout
    #[must_use]
    pub fn find(&self, chain: impl Into<crate::SelectorChain>) -> crate::Locator<'_> {
        self.page
            .locator(chain)
            .with_timeout(self.config.action_timeout())
    }

    /// Navigate to a path under the configured base URL and settle
    pub async fn goto(&self, path: &str) -> EscaparateResult<()> {
        let url = self.config.url(path);
        self.page.goto(&url).await?;
        self.page
            .wait_for_load_state(crate::LoadState::NetworkIdle, self.config.navigation_wait())
            .await
    }

    /// Navigate to the storefront entry point and settle
    pub async fn goto_base(&self) -> EscaparateResult<()> {
        self.goto("").await
    }

    /// Let the page re-render after an action (configurable pause)
    pub async fn settle(&self) {
        self.page
            .wait_for_timeout(Duration::from_millis(self.config.settle_ms))
            .await;
    }
}

/// A scenario body: an async function over the context
pub type ScenarioBody =
    for<'a> fn(&'a mut ScenarioCx) -> BoxFuture<'a, EscaparateResult<Flow>>;

/// A named, independently runnable scenario
#[derive(Clone)]
pub struct Scenario {
    /// Scenario name
    pub name: &'static str,
    /// Scenario group
    pub group: &'static str,
    /// Per-scenario timeout
    pub timeout: Duration,
    body: ScenarioBody,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Scenario {
    /// Create a scenario with the default timeout
    #[must_use]
    pub fn new(group: &'static str, name: &'static str, body: ScenarioBody) -> Self {
        Self {
            name,
            group,
            timeout: Duration::from_millis(DEFAULT_SCENARIO_TIMEOUT_MS),
            body,
        }
    }

    /// Override the scenario timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fully qualified name (`group::name`)
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.group, self.name)
    }

    /// Run the body against a context, folding every ending into a report.
    ///
    /// A timeout or error aborts this scenario only.
    pub async fn execute(&self, cx: &mut ScenarioCx) -> ScenarioReport {
        let started = Instant::now();
        tracing::info!(scenario = %self.qualified_name(), "running");
        let outcome = match tokio::time::timeout(self.timeout, (self.body)(cx)).await {
            Ok(Ok(Flow::Completed)) => Outcome::Passed,
            Ok(Ok(Flow::Skipped(reason))) => Outcome::Skipped { reason },
            Ok(Err(error)) => Outcome::Failed {
                error: error.to_string(),
            },
            Err(_) => Outcome::Failed {
                error: EscaparateError::Timeout {
                    ms: self.timeout.as_millis() as u64,
                    waiting_for: "scenario to finish".to_string(),
                }
                .to_string(),
            },
        };
        ScenarioReport {
            name: self.name.to_string(),
            group: self.group.to_string(),
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
            notes: cx.notes.clone(),
            screenshot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockPage;

    fn cx() -> ScenarioCx {
        ScenarioCx::new(
            Page::new(Box::new(MockPage::new())),
            SuiteConfig::default(),
        )
    }

    fn passing_body(_cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
        Box::pin(async { Ok(Flow::Completed) })
    }

    fn skipping_body(_cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
        Box::pin(async { Ok(Flow::skipped("login link not present")) })
    }

    fn failing_body(_cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
        Box::pin(async {
            Err(EscaparateError::assertion("cart stayed empty"))
        })
    }

    fn hanging_body(_cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Flow::Completed)
        })
    }

    #[tokio::test]
    async fn test_completed_flow_is_passed() {
        let scenario = Scenario::new("cart", "add_item", passing_body);
        let report = scenario.execute(&mut cx()).await;
        assert!(report.outcome.is_passed());
        assert_eq!(report.group, "cart");
    }

    #[tokio::test]
    async fn test_skipped_flow_carries_reason() {
        let scenario = Scenario::new("auth", "login", skipping_body);
        let report = scenario.execute(&mut cx()).await;
        match report.outcome {
            Outcome::Skipped { ref reason } => assert!(reason.contains("login link")),
            ref other => panic!("expected skip, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_becomes_failed_outcome() {
        let scenario = Scenario::new("cart", "checkout", failing_body);
        let report = scenario.execute(&mut cx()).await;
        match report.outcome {
            Outcome::Failed { ref error } => assert!(error.contains("cart stayed empty")),
            ref other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_aborts_only_this_scenario() {
        let scenario = Scenario::new("edge", "hang", hanging_body)
            .with_timeout(Duration::from_millis(20));
        let report = scenario.execute(&mut cx()).await;
        assert!(report.outcome.is_failed());

        // A later scenario still runs normally.
        let next = Scenario::new("edge", "after_hang", passing_body);
        let report = next.execute(&mut cx()).await;
        assert!(report.outcome.is_passed());
    }

    #[tokio::test]
    async fn test_notes_land_on_the_report() {
        fn noting_body(cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
            Box::pin(async move {
                cx.note("ordering not verified");
                Ok(Flow::Completed)
            })
        }
        let scenario = Scenario::new("catalog", "sort", noting_body);
        let report = scenario.execute(&mut cx()).await;
        assert_eq!(report.notes, vec!["ordering not verified".to_string()]);
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let json = serde_json::to_string(&Outcome::Skipped {
            reason: "absent".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"status\":\"skipped\""));
    }

    #[test]
    fn test_qualified_name() {
        let scenario = Scenario::new("a11y", "homepage_scan", passing_body);
        assert_eq!(scenario.qualified_name(), "a11y::homepage_scan");
    }
}
