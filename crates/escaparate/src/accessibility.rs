//! Accessibility audits via axe-core injection.
//!
//! The audit collaborator is axe-core, injected into the page and driven
//! through `evaluate`. A passing page returns an empty violation list for
//! the configured WCAG tag filter.
//!
//! The axe bundle is not vendored: it is read at runtime from the path in
//! `ESCAPARATE_AXE_PATH` (falling back to `./axe.min.js`).

use crate::page::Page;
use crate::result::{EscaparateError, EscaparateResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable pointing at the axe-core bundle
pub const AXE_PATH_ENV: &str = "ESCAPARATE_AXE_PATH";

/// Default axe-core bundle location
pub const DEFAULT_AXE_PATH: &str = "axe.min.js";

/// WCAG tag filters understood by axe-core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagTag {
    /// WCAG 2.0 level A
    Wcag2A,
    /// WCAG 2.0 level AA
    Wcag2AA,
    /// WCAG 2.1 level A
    Wcag21A,
    /// WCAG 2.1 level AA
    Wcag21AA,
    /// WCAG 2.2 level AA
    Wcag22AA,
    /// axe-core best practices (not a WCAG criterion)
    BestPractice,
}

impl WcagTag {
    /// The axe-core tag string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wcag2A => "wcag2a",
            Self::Wcag2AA => "wcag2aa",
            Self::Wcag21A => "wcag21a",
            Self::Wcag21AA => "wcag21aa",
            Self::Wcag22AA => "wcag22aa",
            Self::BestPractice => "best-practice",
        }
    }

    /// The A/AA filter used for storefront scans
    #[must_use]
    pub const fn level_a_aa() -> [Self; 4] {
        [Self::Wcag2A, Self::Wcag2AA, Self::Wcag21A, Self::Wcag21AA]
    }
}

impl std::fmt::Display for WcagTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Impact level axe-core assigns to a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Minor impact
    Minor,
    /// Moderate impact
    Moderate,
    /// Serious impact
    Serious,
    /// Critical impact
    Critical,
}

/// One offending node inside a violation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationNode {
    /// Outer HTML of the node
    pub html: String,
    /// Selector path to the node
    pub target: Vec<String>,
}

/// A reported deviation from a WCAG success criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// axe rule id (e.g. "color-contrast")
    pub id: String,
    /// Impact level, when axe assigns one
    #[serde(default)]
    pub impact: Option<Impact>,
    /// Rule description
    pub description: String,
    /// Short remediation hint
    pub help: String,
    /// Rule documentation URL
    pub help_url: String,
    /// Tags the rule carries (WCAG criteria and more)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Offending nodes
    #[serde(default)]
    pub nodes: Vec<ViolationNode>,
}

/// Outcome of an axe scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResults {
    /// Violations for the configured tag filter; empty means passing
    pub violations: Vec<Violation>,
}

impl ScanResults {
    /// Whether the scan found no violations
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Rule ids of all violations, for failure messages
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.id.as_str()).collect()
    }
}

/// Builder for an axe-core scan with a WCAG tag filter
#[derive(Debug, Clone, Default)]
pub struct AxeAudit {
    tags: Vec<WcagTag>,
}

impl AxeAudit {
    /// Create an audit with no tag filter (all rules)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the filter
    #[must_use]
    pub fn with_tag(mut self, tag: WcagTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add several tags to the filter
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = WcagTag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// The configured filter
    #[must_use]
    pub fn tags(&self) -> &[WcagTag] {
        &self.tags
    }

    /// The `axe.run` expression for this filter.
    ///
    /// The result is trimmed to the [`ScanResults`] schema in page context
    /// so CDP only serializes what the suite consumes.
    #[must_use]
    pub fn run_script(&self) -> String {
        let run_only = if self.tags.is_empty() {
            String::from("{}")
        } else {
            let values = self
                .tags
                .iter()
                .map(|t| format!("{:?}", t.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{runOnly: {{type: 'tag', values: [{values}]}}}}")
        };
        format!(
            "axe.run(document, {run_only}).then(res => ({{ \
             violations: res.violations.map(v => ({{ \
             id: v.id, impact: v.impact || null, description: v.description, \
             help: v.help, helpUrl: v.helpUrl, tags: v.tags, \
             nodes: v.nodes.map(n => ({{html: n.html, target: n.target}})) }})) }}))"
        )
    }

    /// Run the scan against a page, injecting axe-core if needed
    pub async fn run(&self, page: &Page) -> EscaparateResult<ScanResults> {
        if !is_axe_loaded(page).await? {
            inject_axe(page).await?;
            if !is_axe_loaded(page).await? {
                return Err(EscaparateError::AccessibilityScan {
                    message: "axe-core did not initialize after injection".to_string(),
                });
            }
        }

        let raw = page.evaluate(&self.run_script()).await?;
        let results: ScanResults =
            serde_json::from_value(raw).map_err(|e| EscaparateError::AccessibilityScan {
                message: format!("could not parse axe results: {e}"),
            })?;
        tracing::info!(
            violations = results.violations.len(),
            tags = ?self.tags,
            "axe scan complete"
        );
        Ok(results)
    }
}

/// Resolve the axe-core bundle path
#[must_use]
pub fn axe_bundle_path() -> PathBuf {
    std::env::var(AXE_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_AXE_PATH), PathBuf::from)
}

async fn is_axe_loaded(page: &Page) -> EscaparateResult<bool> {
    match page.evaluate("typeof axe !== 'undefined'").await? {
        serde_json::Value::Bool(b) => Ok(b),
        _ => Ok(false),
    }
}

async fn inject_axe(page: &Page) -> EscaparateResult<()> {
    let path = axe_bundle_path();
    let source =
        std::fs::read_to_string(&path).map_err(|e| EscaparateError::AccessibilityScan {
            message: format!(
                "could not read axe bundle at {} (set {AXE_PATH_ENV}): {e}",
                path.display()
            ),
        })?;
    page.evaluate(&source).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockPage;
    use serde_json::json;

    #[test]
    fn test_tag_strings() {
        assert_eq!(WcagTag::Wcag2A.as_str(), "wcag2a");
        assert_eq!(WcagTag::Wcag21AA.as_str(), "wcag21aa");
        assert_eq!(WcagTag::BestPractice.as_str(), "best-practice");
    }

    #[test]
    fn test_run_script_lists_filter_tags() {
        let audit = AxeAudit::new().with_tags(WcagTag::level_a_aa());
        let script = audit.run_script();
        assert!(script.contains("\"wcag2a\""));
        assert!(script.contains("\"wcag21aa\""));
        assert!(script.contains("runOnly"));
    }

    #[test]
    fn test_run_script_without_filter_has_no_run_only() {
        let script = AxeAudit::new().run_script();
        assert!(!script.contains("runOnly"));
    }

    #[test]
    fn test_violation_deserializes_from_axe_shape() {
        let raw = json!({
            "violations": [{
                "id": "color-contrast",
                "impact": "serious",
                "description": "Elements must have sufficient color contrast",
                "help": "Elements must meet minimum color contrast ratio thresholds",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/color-contrast",
                "tags": ["wcag2aa", "wcag143"],
                "nodes": [{"html": "<a class=\"nav\">Shop</a>", "target": ["a.nav"]}]
            }]
        });
        let results: ScanResults = serde_json::from_value(raw).unwrap();
        assert!(!results.is_clean());
        assert_eq!(results.rule_ids(), vec!["color-contrast"]);
        let violation = &results.violations[0];
        assert_eq!(violation.impact, Some(Impact::Serious));
        assert_eq!(violation.nodes[0].target, vec!["a.nav"]);
    }

    #[test]
    fn test_empty_violations_is_clean() {
        let results: ScanResults = serde_json::from_value(json!({"violations": []})).unwrap();
        assert!(results.is_clean());
    }

    #[tokio::test]
    async fn test_run_parses_clean_scan_from_loaded_page() {
        let page = Page::new(Box::new(
            MockPage::new()
                // axe already present, then a clean scan
                .with_eval_result(json!(true))
                .with_eval_result(json!({"violations": []})),
        ));
        let results = AxeAudit::new()
            .with_tags(WcagTag::level_a_aa())
            .run(&page)
            .await
            .unwrap();
        assert!(results.is_clean());
    }

    #[tokio::test]
    async fn test_run_surfaces_violations() {
        let page = Page::new(Box::new(
            MockPage::new()
                .with_eval_result(json!(true))
                .with_eval_result(json!({"violations": [{
                    "id": "image-alt",
                    "impact": "critical",
                    "description": "Images must have alternate text",
                    "help": "Images must have alternate text",
                    "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt",
                    "tags": ["wcag2a"],
                    "nodes": []
                }]})),
        ));
        let results = AxeAudit::new().with_tag(WcagTag::Wcag2A).run(&page).await.unwrap();
        assert_eq!(results.rule_ids(), vec!["image-alt"]);
    }
}
