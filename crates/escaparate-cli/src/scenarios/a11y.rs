//! Accessibility scenarios: axe scans and landmark checks.

use crate::selectors;
use escaparate::prelude::*;
use serde::Deserialize;

fn assert_clean(results: &escaparate::ScanResults) -> EscaparateResult<()> {
    if results.is_clean() {
        Ok(())
    } else {
        Err(EscaparateError::assertion(format!(
            "axe reported {} violation(s): {}",
            results.violations.len(),
            results.rule_ids().join(", ")
        )))
    }
}

/// Homepage passes an axe scan filtered to WCAG 2.0/2.1 A and AA.
pub async fn homepage_accessibility_scan(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;
    let results = AxeAudit::new()
        .with_tags(WcagTag::level_a_aa())
        .run(&cx.page)
        .await?;
    assert_clean(&results)?;
    Ok(Flow::Completed)
}

/// A product page passes an axe scan filtered to WCAG 2.0 A and AA.
pub async fn product_page_accessibility_scan(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;
    cx.find(selectors::product_link())
        .resolve()
        .await?
        .click()
        .await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;

    let results = AxeAudit::new()
        .with_tag(WcagTag::Wcag2A)
        .with_tag(WcagTag::Wcag2AA)
        .run(&cx.page)
        .await?;
    assert_clean(&results)?;
    Ok(Flow::Completed)
}

#[derive(Debug, Deserialize)]
struct ButtonLabel {
    text: String,
    label: String,
}

/// First five visible buttons, with text content and aria-label.
const BUTTON_LABELS_SCRIPT: &str = "Array.from(document.querySelectorAll('button'))\
    .filter(el => { const r = el.getBoundingClientRect(); return r.width > 0 && r.height > 0; })\
    .slice(0, 5)\
    .map(el => ({text: (el.textContent || '').trim(), label: el.getAttribute('aria-label') || ''}))";

/// Landmarks exist and visible buttons carry an accessible name.
pub async fn landmarks_and_button_labels(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;

    expect_visible(&cx.page, &selectors::nav_landmark(), cx.config.action_wait()).await?;
    expect_visible(&cx.page, &selectors::main_landmark(), cx.config.action_wait()).await?;

    let raw = cx.page.evaluate(BUTTON_LABELS_SCRIPT).await?;
    let buttons: Vec<ButtonLabel> =
        serde_json::from_value(raw).map_err(|e| EscaparateError::Evaluation {
            message: format!("could not parse button labels: {e}"),
        })?;
    for (index, button) in buttons.iter().enumerate() {
        if button.text.is_empty() && button.label.is_empty() {
            return Err(EscaparateError::assertion(format!(
                "visible button #{index} has neither text nor aria-label"
            )));
        }
    }
    Ok(Flow::Completed)
}
