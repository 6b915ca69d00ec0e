//! Selectors and prioritized fallback chains.
//!
//! A third-party storefront offers no stable test ids, so every lookup is a
//! [`SelectorChain`]: an ordered list of candidate selectors tried front to
//! back, where the first selector with at least one match wins. Chains are
//! re-evaluated on every use and never cached.

use serde::{Deserialize, Serialize};

/// A single element query: a CSS selector plus an optional text filter.
///
/// The text filter plays the role of Playwright's `:has-text()` and is
/// applied in page context against `textContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// CSS selector
    pub css: String,
    /// Substring the element's text content must contain
    pub text: Option<String>,
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
            text: None,
        }
    }

    /// Create a CSS selector filtered by text content
    #[must_use]
    pub fn css_with_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
            text: Some(text.into()),
        }
    }

    /// Human-readable form for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.text {
            Some(text) => format!("{} (text: {text:?})", self.css),
            None => self.css.clone(),
        }
    }

    /// JS expression producing the array of matching elements
    #[must_use]
    pub fn matches_expr(&self) -> String {
        let base = format!("Array.from(document.querySelectorAll({:?}))", self.css);
        match &self.text {
            Some(text) => {
                format!("{base}.filter(el => (el.textContent || '').includes({text:?}))")
            }
            None => base,
        }
    }

    /// JS expression producing the first matching element (or undefined)
    #[must_use]
    pub fn first_expr(&self) -> String {
        format!("({})[0]", self.matches_expr())
    }

    /// JS expression counting matches
    #[must_use]
    pub fn count_query(&self) -> String {
        format!("({}).length", self.matches_expr())
    }

    /// JS expression testing whether the first match is rendered and visible
    #[must_use]
    pub fn visible_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             const s = window.getComputedStyle(el); \
             return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none'; }})()",
            self.first_expr()
        )
    }

    /// JS expression returning the first match's text content (or null)
    #[must_use]
    pub fn text_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.textContent : null; }})()",
            self.first_expr()
        )
    }

    /// JS expression returning an attribute of the first match (or null)
    #[must_use]
    pub fn attribute_query(&self, name: &str) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.getAttribute({name:?}) : null; }})()",
            self.first_expr()
        )
    }

    /// JS expression returning the first match's form value (or null)
    #[must_use]
    pub fn value_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el && 'value' in el ? el.value : null; }})()",
            self.first_expr()
        )
    }

    /// JS expression testing whether the first match is disabled
    ///
    /// Covers the `disabled` property, the `disabled` attribute (present on
    /// anchors styled as buttons) and `aria-disabled`.
    #[must_use]
    pub fn disabled_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             return el.disabled === true || el.hasAttribute('disabled') || \
             el.getAttribute('aria-disabled') === 'true'; }})()",
            self.first_expr()
        )
    }

    /// JS statement clicking the first match; returns whether it existed
    #[must_use]
    pub fn click_script(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             el.scrollIntoView({{block: 'center'}}); el.click(); return true; }})()",
            self.first_expr()
        )
    }

    /// JS statement filling the first match and firing input/change events
    #[must_use]
    pub fn fill_script(&self, value: &str) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             el.focus(); el.value = {value:?}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); return true; }})()",
            self.first_expr()
        )
    }

    /// JS statement selecting an option by index and firing a change event
    #[must_use]
    pub fn select_option_script(&self, index: usize) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             if (el.options && el.options.length <= {index}) return false; \
             el.selectedIndex = {index}; \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); return true; }})()",
            self.first_expr()
        )
    }

    /// JS statement focusing the first match; returns whether it existed
    #[must_use]
    pub fn focus_script(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.focus(); return true; }})()",
            self.first_expr()
        )
    }
}

/// An ordered fallback list of selectors.
///
/// Resolution tries each selector in order; the first one with a match wins
/// and later entries are not consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Start a chain from a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            selectors: vec![Selector::css(selector)],
        }
    }

    /// Start a chain from a text-filtered CSS selector
    #[must_use]
    pub fn css_with_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selectors: vec![Selector::css_with_text(selector, text)],
        }
    }

    /// Append a CSS fallback
    #[must_use]
    pub fn or_css(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(Selector::css(selector));
        self
    }

    /// Append a text-filtered fallback
    #[must_use]
    pub fn or_css_with_text(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.selectors.push(Selector::css_with_text(selector, text));
        self
    }

    /// The candidates in priority order
    #[must_use]
    pub fn candidates(&self) -> &[Selector] {
        &self.selectors
    }

    /// The highest-priority selector
    #[must_use]
    pub fn primary(&self) -> &Selector {
        // A chain always holds at least one selector by construction.
        &self.selectors[0]
    }

    /// Human-readable form for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        self.selectors
            .iter()
            .map(Selector::describe)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl From<Selector> for SelectorChain {
    fn from(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }
}

impl From<&SelectorChain> for SelectorChain {
    fn from(chain: &SelectorChain) -> Self {
        chain.clone()
    }
}
