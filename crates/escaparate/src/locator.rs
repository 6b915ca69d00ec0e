//! Locators: auto-waiting element queries over a selector chain.
//!
//! A [`Locator`] re-evaluates its chain on every poll; the first candidate
//! selector with a visible match wins. [`Locator::probe`] is the soft form
//! used to gate optional scenario steps: absence within the bound resolves
//! to `None` instead of failing the scenario.

use crate::page::Page;
use crate::result::{EscaparateError, EscaparateResult};
use crate::selector::{Selector, SelectorChain};
use crate::wait::{wait_until_soft, WaitOptions};
use std::time::Duration;

/// Default timeout for locator resolution (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for locator resolution (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// An auto-waiting element query
#[derive(Debug)]
pub struct Locator<'a> {
    page: &'a Page,
    chain: SelectorChain,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a> Locator<'a> {
    /// Create a locator (normally via [`Page::locator`])
    #[must_use]
    pub fn new(page: &'a Page, chain: SelectorChain) -> Self {
        Self {
            page,
            chain,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set the resolution timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The chain this locator queries
    #[must_use]
    pub const fn chain(&self) -> &SelectorChain {
        &self.chain
    }

    fn wait_options(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(self.timeout.as_millis() as u64)
            .with_poll_interval(self.poll_interval.as_millis() as u64)
    }

    /// Current match count of the winning candidate (no waiting)
    pub async fn count(&self) -> EscaparateResult<usize> {
        for candidate in self.chain.candidates() {
            let count = self.page.driver().count(candidate).await?;
            if count > 0 {
                return Ok(count);
            }
        }
        Ok(0)
    }

    /// Winning candidate right now, visible matches only (no waiting)
    async fn winner(&self) -> EscaparateResult<Option<Selector>> {
        for candidate in self.chain.candidates() {
            if self.page.driver().count(candidate).await? > 0
                && self.page.driver().is_visible(candidate).await?
            {
                return Ok(Some(candidate.clone()));
            }
        }
        Ok(None)
    }

    /// Existence probe: wait for a visible match, `None` on absence.
    ///
    /// Absence within the bound is an answer, not an error; scenarios use it
    /// to skip optional steps instead of failing against an uncontrolled
    /// third-party page.
    pub async fn probe(&self) -> EscaparateResult<Option<ResolvedLocator<'a>>> {
        let this = self;
        let found = wait_until_soft(
            || async move { Ok(this.winner().await?.is_some()) },
            self.wait_options(),
            &format!("visible {}", self.chain.describe()),
        )
        .await?;
        if !found {
            tracing::debug!(chain = %self.chain.describe(), "probe: absent within bound");
            return Ok(None);
        }
        let selector = self.winner().await?;
        Ok(selector.map(|selector| ResolvedLocator {
            page: self.page,
            selector,
        }))
    }

    /// Required resolution: wait for a visible match or fail the scenario
    pub async fn resolve(&self) -> EscaparateResult<ResolvedLocator<'a>> {
        self.probe().await?.ok_or_else(|| EscaparateError::Timeout {
            ms: self.timeout.as_millis() as u64,
            waiting_for: format!("visible {}", self.chain.describe()),
        })
    }
}

/// A locator pinned to the candidate selector that won resolution.
///
/// The underlying query is still re-run per call; only the choice of
/// candidate is fixed.
#[derive(Debug)]
pub struct ResolvedLocator<'a> {
    page: &'a Page,
    selector: Selector,
}

impl ResolvedLocator<'_> {
    /// The winning selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Click the element
    pub async fn click(&self) -> EscaparateResult<()> {
        tracing::debug!(selector = %self.selector.describe(), "click");
        self.page.driver().click(&self.selector).await
    }

    /// Fill the element with text
    pub async fn fill(&self, text: &str) -> EscaparateResult<()> {
        tracing::debug!(selector = %self.selector.describe(), "fill");
        self.page.driver().fill(&self.selector, text).await
    }

    /// Select an option by index
    pub async fn select_option(&self, index: usize) -> EscaparateResult<()> {
        self.page.driver().select_option(&self.selector, index).await
    }

    /// Press a key with the element focused
    pub async fn press(&self, key: &str) -> EscaparateResult<()> {
        self.page.driver().press(&self.selector, key).await
    }

    /// Text content of the element
    pub async fn text_content(&self) -> EscaparateResult<Option<String>> {
        self.page.driver().text_content(&self.selector).await
    }

    /// Attribute value of the element
    pub async fn attribute(&self, name: &str) -> EscaparateResult<Option<String>> {
        self.page.driver().attribute(&self.selector, name).await
    }

    /// Form value of the element
    pub async fn value(&self) -> EscaparateResult<Option<String>> {
        self.page.driver().value(&self.selector).await
    }

    /// Whether the element is currently visible
    pub async fn is_visible(&self) -> EscaparateResult<bool> {
        self.page.driver().is_visible(&self.selector).await
    }

    /// Whether the element is disabled
    pub async fn is_disabled(&self) -> EscaparateResult<bool> {
        self.page.driver().is_disabled(&self.selector).await
    }

    /// Current match count for the winning selector
    pub async fn count(&self) -> EscaparateResult<usize> {
        self.page.driver().count(&self.selector).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockEffect, MockElement, MockPage};

    fn short(locator: Locator<'_>) -> Locator<'_> {
        locator
            .with_timeout(Duration::from_millis(50))
            .with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_probe_absent_resolves_to_none() {
        let page = Page::new(Box::new(MockPage::new()));
        let probed = short(page.locator(SelectorChain::css("a[href*=\"account/login\"]")))
            .probe()
            .await
            .unwrap();
        assert!(probed.is_none());
    }

    #[tokio::test]
    async fn test_probe_present_resolves_to_some() {
        let page = Page::new(Box::new(
            MockPage::new().with_element(MockElement::new(".cart-item")),
        ));
        let probed = short(page.locator(SelectorChain::css(".cart-item")))
            .probe()
            .await
            .unwrap();
        assert!(probed.is_some());
    }

    #[tokio::test]
    async fn test_first_matching_candidate_wins() {
        let page = Page::new(Box::new(
            MockPage::new()
                .with_element(MockElement::new(".error").with_text("Invalid login")),
        ));
        let chain = SelectorChain::css(".errors").or_css(".error").or_css("[role=\"alert\"]");
        let resolved = short(page.locator(chain)).resolve().await.unwrap();
        assert_eq!(resolved.selector().css, ".error");
    }

    #[tokio::test]
    async fn test_hidden_element_does_not_resolve() {
        let page = Page::new(Box::new(
            MockPage::new().with_element(MockElement::new(".cart-item").hidden()),
        ));
        let probed = short(page.locator(SelectorChain::css(".cart-item")))
            .probe()
            .await
            .unwrap();
        assert!(probed.is_none());
    }

    #[tokio::test]
    async fn test_resolve_absent_is_timeout() {
        let page = Page::new(Box::new(MockPage::new()));
        let err = short(page.locator(SelectorChain::css("#missing")))
            .resolve()
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_resolved_interactions_route_to_driver() {
        let page = Page::new(Box::new(
            MockPage::new().with_element(
                MockElement::new("input[type=\"email\"]")
                    .on_click(MockEffect::Navigate("clicked".to_string())),
            ),
        ));
        let resolved = short(page.locator(SelectorChain::css("input[type=\"email\"]")))
            .resolve()
            .await
            .unwrap();
        resolved.fill("test@example.com").await.unwrap();
        assert_eq!(resolved.value().await.unwrap(), Some("test@example.com".to_string()));
        resolved.click().await.unwrap();
        assert_eq!(page.current_url().await.unwrap(), "clicked");
    }

    #[tokio::test]
    async fn test_count_uses_first_candidate_with_matches() {
        let page = Page::new(Box::new(
            MockPage::new().with_element(MockElement::new("[class*=\"cart-item\"]").with_count(3)),
        ));
        let chain = SelectorChain::css(".cart-item").or_css("[class*=\"cart-item\"]");
        let count = page.locator(chain).count().await.unwrap();
        assert_eq!(count, 3);
    }
}
