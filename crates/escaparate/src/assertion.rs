//! Hard assertions with bounded timeouts.
//!
//! Each `expect_*` polls the live page until the expected state materializes
//! or the bound expires; expiry maps to
//! [`EscaparateError::AssertionFailed`], which is scenario-terminal. Soft
//! gating belongs to [`Locator::probe`](crate::Locator::probe), not here.

use crate::page::Page;
use crate::result::{EscaparateError, EscaparateResult};
use crate::selector::SelectorChain;
use crate::wait::{wait_until_soft, WaitOptions};
use serde::{Deserialize, Serialize};

/// Pattern for matching page URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// Contains substring
    Contains(String),
    /// Regex match
    Regex(String),
}

impl UrlPattern {
    /// Regex pattern shorthand
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(pattern) => url == pattern,
            Self::Contains(pattern) => url.contains(pattern),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(url))
                .unwrap_or(false),
        }
    }

    /// Human-readable form for failure messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Exact(p) => format!("url == {p:?}"),
            Self::Contains(p) => format!("url contains {p:?}"),
            Self::Regex(p) => format!("url matches /{p}/"),
        }
    }
}

fn failed(what: &str, options: WaitOptions) -> EscaparateError {
    EscaparateError::assertion(format!("{what} did not hold within {}ms", options.timeout_ms))
}

/// Expect the page URL to match a pattern within the bound
pub async fn expect_url(
    page: &Page,
    pattern: &UrlPattern,
    options: WaitOptions,
) -> EscaparateResult<()> {
    let held = wait_until_soft(
        || async move { Ok(pattern.matches(&page.current_url().await?)) },
        options,
        &pattern.describe(),
    )
    .await?;
    if held {
        Ok(())
    } else {
        let current = page.current_url().await.unwrap_or_default();
        Err(EscaparateError::assertion(format!(
            "{} did not hold within {}ms (current url: {current})",
            pattern.describe(),
            options.timeout_ms
        )))
    }
}

/// Expect a visible match for the chain within the bound
pub async fn expect_visible(
    page: &Page,
    chain: &SelectorChain,
    options: WaitOptions,
) -> EscaparateResult<()> {
    let resolved = page
        .locator(chain)
        .with_timeout(options.timeout())
        .with_poll_interval(options.poll_interval())
        .probe()
        .await?;
    match resolved {
        Some(_) => Ok(()),
        None => Err(failed(&format!("visible {}", chain.describe()), options)),
    }
}

/// Expect at least `minimum` matches for the chain within the bound
pub async fn expect_count_at_least(
    page: &Page,
    chain: &SelectorChain,
    minimum: usize,
    options: WaitOptions,
) -> EscaparateResult<()> {
    let held = wait_until_soft(
        || async move { Ok(page.locator(chain).count().await? >= minimum) },
        options,
        &format!(">= {minimum} matches for {}", chain.describe()),
    )
    .await?;
    if held {
        Ok(())
    } else {
        Err(failed(
            &format!(">= {minimum} matches for {}", chain.describe()),
            options,
        ))
    }
}

/// Expect the chain to resolve to an element holding a form value
pub async fn expect_value(
    page: &Page,
    chain: &SelectorChain,
    expected: &str,
    options: WaitOptions,
) -> EscaparateResult<()> {
    let held = wait_until_soft(
        || async move {
            for candidate in chain.candidates() {
                if page.driver().value(candidate).await?.as_deref() == Some(expected) {
                    return Ok(true);
                }
            }
            Ok(false)
        },
        options,
        &format!("value {expected:?} on {}", chain.describe()),
    )
    .await?;
    if held {
        Ok(())
    } else {
        Err(failed(
            &format!("value {expected:?} on {}", chain.describe()),
            options,
        ))
    }
}

/// Expect the first match of the chain to be disabled
///
/// Negative scenarios use this against checkout controls; an enabled control
/// is an immediate failure once the bound expires.
pub async fn expect_disabled(
    page: &Page,
    chain: &SelectorChain,
    options: WaitOptions,
) -> EscaparateResult<()> {
    let held = wait_until_soft(
        || async move {
            for candidate in chain.candidates() {
                if page.driver().count(candidate).await? > 0 {
                    return page.driver().is_disabled(candidate).await;
                }
            }
            Ok(false)
        },
        options,
        &format!("disabled {}", chain.describe()),
    )
    .await?;
    if held {
        Ok(())
    } else {
        Err(failed(&format!("disabled {}", chain.describe()), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockElement, MockPage};

    fn fast() -> WaitOptions {
        WaitOptions::new().with_timeout(50).with_poll_interval(5)
    }

    mod url_pattern_tests {
        use super::*;

        #[test]
        fn test_contains() {
            let pattern = UrlPattern::Contains("/cart".to_string());
            assert!(pattern.matches("https://shop.test/cart"));
            assert!(!pattern.matches("https://shop.test/"));
        }

        #[test]
        fn test_regex_alternation() {
            let pattern = UrlPattern::regex("account|customer");
            assert!(pattern.matches("https://shop.test/account/login"));
            assert!(pattern.matches("https://shop.test/customer/orders"));
            assert!(!pattern.matches("https://shop.test/collections/all"));
        }

        #[test]
        fn test_invalid_regex_never_matches() {
            let pattern = UrlPattern::regex("(unclosed");
            assert!(!pattern.matches("anything"));
        }

        #[test]
        fn test_exact() {
            let pattern = UrlPattern::Exact("https://shop.test/".to_string());
            assert!(pattern.matches("https://shop.test/"));
            assert!(!pattern.matches("https://shop.test/cart"));
        }
    }

    mod expect_tests {
        use super::*;

        #[tokio::test]
        async fn test_expect_url_passes() {
            let page = Page::new(Box::new(MockPage::new()));
            page.goto("https://shop.test/checkouts/123").await.unwrap();
            expect_url(&page, &UrlPattern::regex("checkout|checkouts"), fast())
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_expect_url_failure_reports_current_url() {
            let page = Page::new(Box::new(MockPage::new()));
            page.goto("https://shop.test/").await.unwrap();
            let err = expect_url(&page, &UrlPattern::regex("account|customer"), fast())
                .await
                .unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("account|customer"));
            assert!(msg.contains("https://shop.test/"));
        }

        #[tokio::test]
        async fn test_expect_visible_fails_on_hidden() {
            let page = Page::new(Box::new(
                MockPage::new().with_element(MockElement::new(".errors").hidden()),
            ));
            let err = expect_visible(&page, &SelectorChain::css(".errors"), fast())
                .await
                .unwrap_err();
            assert!(matches!(err, EscaparateError::AssertionFailed { .. }));
        }

        #[tokio::test]
        async fn test_expect_count_at_least() {
            let page = Page::new(Box::new(
                MockPage::new().with_element(MockElement::new(".cart-item").with_count(2)),
            ));
            let chain = SelectorChain::css(".cart-item");
            expect_count_at_least(&page, &chain, 1, fast()).await.unwrap();
            let err = expect_count_at_least(&page, &chain, 3, fast())
                .await
                .unwrap_err();
            assert!(matches!(err, EscaparateError::AssertionFailed { .. }));
        }

        #[tokio::test]
        async fn test_expect_value() {
            let page = Page::new(Box::new(
                MockPage::new()
                    .with_element(MockElement::new("input[type=\"number\"]").with_value("2")),
            ));
            expect_value(&page, &SelectorChain::css("input[type=\"number\"]"), "2", fast())
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_expect_disabled_fails_on_enabled_control() {
            let page = Page::new(Box::new(
                MockPage::new()
                    .with_element(MockElement::new("button[name=\"checkout\"]")),
            ));
            let err = expect_disabled(&page, &SelectorChain::css("button[name=\"checkout\"]"), fast())
                .await
                .unwrap_err();
            assert!(matches!(err, EscaparateError::AssertionFailed { .. }));
        }

        #[tokio::test]
        async fn test_expect_disabled_passes_on_disabled_control() {
            let page = Page::new(Box::new(
                MockPage::new()
                    .with_element(MockElement::new("button[name=\"checkout\"]").disabled()),
            ));
            expect_disabled(&page, &SelectorChain::css("button[name=\"checkout\"]"), fast())
                .await
                .unwrap();
        }
    }
}
