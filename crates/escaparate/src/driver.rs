//! Abstract page driver seam.
//!
//! Scenario logic talks to [`PageDriver`], never to a concrete browser.
//! [`CdpDriver`] (behind the `browser` feature) drives a real Chromium tab
//! over CDP; [`MockPage`] drives a scripted DOM and is what the behavior
//! tests run against.

use crate::result::{EscaparateError, EscaparateResult};
use crate::selector::Selector;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Abstract driver trait for page automation.
///
/// All operations are selector-level so the mock can interpret them without
/// a JavaScript engine. Implementations must re-evaluate selectors on every
/// call; nothing here caches element handles.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> EscaparateResult<()>;

    /// Get the current URL
    async fn current_url(&self) -> EscaparateResult<String>;

    /// Get `document.readyState`
    async fn ready_state(&self) -> EscaparateResult<String>;

    /// Wait out a quiet window after load (network-idle approximation)
    async fn wait_for_network_quiet(&self, window: std::time::Duration) -> EscaparateResult<()> {
        tokio::time::sleep(window).await;
        Ok(())
    }

    /// Evaluate a script in page context
    async fn evaluate(&self, script: &str) -> EscaparateResult<Value>;

    /// Count elements matching a selector
    async fn count(&self, selector: &Selector) -> EscaparateResult<usize>;

    /// Whether the first match is rendered and visible
    async fn is_visible(&self, selector: &Selector) -> EscaparateResult<bool>;

    /// Text content of the first match
    async fn text_content(&self, selector: &Selector) -> EscaparateResult<Option<String>>;

    /// Attribute value of the first match
    async fn attribute(&self, selector: &Selector, name: &str)
        -> EscaparateResult<Option<String>>;

    /// Form value of the first match
    async fn value(&self, selector: &Selector) -> EscaparateResult<Option<String>>;

    /// Whether the first match is disabled
    async fn is_disabled(&self, selector: &Selector) -> EscaparateResult<bool>;

    /// Click the first match
    async fn click(&self, selector: &Selector) -> EscaparateResult<()>;

    /// Fill the first match with text
    async fn fill(&self, selector: &Selector, text: &str) -> EscaparateResult<()>;

    /// Select an option by index on the first match
    async fn select_option(&self, selector: &Selector, index: usize) -> EscaparateResult<()>;

    /// Press a key with the first match focused
    async fn press(&self, selector: &Selector, key: &str) -> EscaparateResult<()>;

    /// Capture a PNG screenshot of the page
    async fn screenshot(&self) -> EscaparateResult<Vec<u8>>;
}

// ============================================================================
// Scripted mock driver
// ============================================================================

/// Side effect applied when a scripted element is clicked or keyed
#[derive(Debug, Clone)]
pub enum MockEffect {
    /// Change the page URL
    Navigate(String),
    /// Make the element registered under this key visible
    Reveal(String),
    /// Hide the element registered under this key
    Hide(String),
    /// Set the value of the element registered under this key
    SetValue {
        /// Registration key of the target element
        key: String,
        /// New value
        value: String,
    },
}

/// A scripted element inside [`MockPage`]
#[derive(Debug, Clone)]
pub struct MockElement {
    /// CSS selector this element answers to
    pub key: String,
    /// Text content
    pub text: String,
    /// Form value
    pub value: String,
    /// Whether the element is rendered and visible
    pub visible: bool,
    /// Whether the element is disabled
    pub disabled: bool,
    /// Simulated match count for the key
    pub count: usize,
    /// Attribute map
    pub attributes: HashMap<String, String>,
    /// Effects applied on click
    pub on_click: Vec<MockEffect>,
    /// Effects applied on key press
    pub on_press: Vec<MockEffect>,
}

impl MockElement {
    /// Create a visible element answering to `key`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: String::new(),
            value: String::new(),
            visible: true,
            disabled: false,
            count: 1,
            attributes: HashMap::new(),
            on_click: Vec::new(),
            on_press: Vec::new(),
        }
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set form value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the simulated match count
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Register the element hidden; a [`MockEffect::Reveal`] can show it
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the element disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Append a click effect
    #[must_use]
    pub fn on_click(mut self, effect: MockEffect) -> Self {
        self.on_click.push(effect);
        self
    }

    /// Append a key-press effect
    #[must_use]
    pub fn on_press(mut self, effect: MockEffect) -> Self {
        self.on_press.push(effect);
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        if self.key != selector.css {
            return false;
        }
        match &selector.text {
            Some(text) => self.text.contains(text.as_str()),
            None => true,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    elements: Vec<MockElement>,
    eval_results: VecDeque<Value>,
    history: Vec<String>,
}

/// Scripted page driver for tests.
///
/// Elements are registered under the exact CSS selector string the scenario
/// will query with; a selector matches when its CSS equals the registration
/// key and its text filter (if any) is contained in the element's text.
#[derive(Debug, Default)]
pub struct MockPage {
    state: Mutex<MockState>,
}

impl MockPage {
    /// Create an empty scripted page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scripted element
    #[must_use]
    pub fn with_element(self, element: MockElement) -> Self {
        self.state.lock().unwrap().elements.push(element);
        self
    }

    /// Queue a result for the next `evaluate` call (FIFO)
    #[must_use]
    pub fn with_eval_result(self, value: Value) -> Self {
        self.state.lock().unwrap().eval_results.push_back(value);
        self
    }

    /// Calls recorded so far, as `op:detail` strings
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().history.clone()
    }

    /// Whether an operation was recorded
    #[must_use]
    pub fn was_called(&self, op: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .history
            .iter()
            .any(|c| c.starts_with(op))
    }

    fn record(&self, entry: String) {
        self.state.lock().unwrap().history.push(entry);
    }

    fn apply_effects(state: &mut MockState, effects: &[MockEffect]) {
        for effect in effects {
            match effect {
                MockEffect::Navigate(url) => state.url.clone_from(url),
                MockEffect::Reveal(key) => {
                    for el in state.elements.iter_mut().filter(|el| &el.key == key) {
                        el.visible = true;
                    }
                }
                MockEffect::Hide(key) => {
                    for el in state.elements.iter_mut().filter(|el| &el.key == key) {
                        el.visible = false;
                        el.count = 0;
                    }
                }
                MockEffect::SetValue { key, value } => {
                    for el in state.elements.iter_mut().filter(|el| &el.key == key) {
                        el.value.clone_from(value);
                    }
                }
            }
        }
    }

    fn with_match<T>(
        &self,
        selector: &Selector,
        f: impl FnOnce(&MockElement) -> T,
    ) -> Option<T> {
        let state = self.state.lock().unwrap();
        state
            .elements
            .iter()
            .find(|el| el.matches(selector) && el.count > 0)
            .map(f)
    }

    fn missing(selector: &Selector) -> EscaparateError {
        EscaparateError::Input {
            message: format!("no scripted element matches {}", selector.describe()),
        }
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn navigate(&self, url: &str) -> EscaparateResult<()> {
        self.record(format!("navigate:{url}"));
        self.state.lock().unwrap().url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> EscaparateResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn ready_state(&self) -> EscaparateResult<String> {
        Ok("complete".to_string())
    }

    async fn wait_for_network_quiet(
        &self,
        _window: std::time::Duration,
    ) -> EscaparateResult<()> {
        // Scripted DOM has no network.
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> EscaparateResult<Value> {
        self.record(format!("evaluate:{script}"));
        self.state.lock().unwrap().eval_results.pop_front().ok_or_else(|| {
            EscaparateError::Evaluation {
                message: "no scripted eval result queued".to_string(),
            }
        })
    }

    async fn count(&self, selector: &Selector) -> EscaparateResult<usize> {
        Ok(self.with_match(selector, |el| el.count).unwrap_or(0))
    }

    async fn is_visible(&self, selector: &Selector) -> EscaparateResult<bool> {
        Ok(self.with_match(selector, |el| el.visible).unwrap_or(false))
    }

    async fn text_content(&self, selector: &Selector) -> EscaparateResult<Option<String>> {
        Ok(self.with_match(selector, |el| el.text.clone()))
    }

    async fn attribute(
        &self,
        selector: &Selector,
        name: &str,
    ) -> EscaparateResult<Option<String>> {
        Ok(self
            .with_match(selector, |el| el.attributes.get(name).cloned())
            .flatten())
    }

    async fn value(&self, selector: &Selector) -> EscaparateResult<Option<String>> {
        Ok(self.with_match(selector, |el| el.value.clone()))
    }

    async fn is_disabled(&self, selector: &Selector) -> EscaparateResult<bool> {
        Ok(self.with_match(selector, |el| el.disabled).unwrap_or(false))
    }

    async fn click(&self, selector: &Selector) -> EscaparateResult<()> {
        self.record(format!("click:{}", selector.describe()));
        let mut state = self.state.lock().unwrap();
        let effects = state
            .elements
            .iter()
            .find(|el| el.matches(selector) && el.count > 0)
            .map(|el| el.on_click.clone())
            .ok_or_else(|| Self::missing(selector))?;
        Self::apply_effects(&mut state, &effects);
        Ok(())
    }

    async fn fill(&self, selector: &Selector, text: &str) -> EscaparateResult<()> {
        self.record(format!("fill:{}={text}", selector.describe()));
        let mut state = self.state.lock().unwrap();
        let el = state
            .elements
            .iter_mut()
            .find(|el| el.matches(selector) && el.count > 0)
            .ok_or_else(|| Self::missing(selector))?;
        el.value = text.to_string();
        Ok(())
    }

    async fn select_option(&self, selector: &Selector, index: usize) -> EscaparateResult<()> {
        self.record(format!("select:{}#{index}", selector.describe()));
        let mut state = self.state.lock().unwrap();
        let el = state
            .elements
            .iter_mut()
            .find(|el| el.matches(selector) && el.count > 0)
            .ok_or_else(|| Self::missing(selector))?;
        el.value = format!("option:{index}");
        Ok(())
    }

    async fn press(&self, selector: &Selector, key: &str) -> EscaparateResult<()> {
        self.record(format!("press:{}+{key}", selector.describe()));
        let mut state = self.state.lock().unwrap();
        let effects = state
            .elements
            .iter()
            .find(|el| el.matches(selector) && el.count > 0)
            .map(|el| el.on_press.clone())
            .ok_or_else(|| Self::missing(selector))?;
        Self::apply_effects(&mut state, &effects);
        Ok(())
    }

    async fn screenshot(&self) -> EscaparateResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

// ============================================================================
// Real CDP driver (behind the `browser` feature)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{async_trait, EscaparateError, EscaparateResult, PageDriver, Selector, Value};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
    use chromiumoxide::page::Page as CdpPage;

    /// Page driver over a live Chromium tab
    #[derive(Debug, Clone)]
    pub struct CdpDriver {
        page: CdpPage,
    }

    impl CdpDriver {
        /// Wrap a chromiumoxide page
        #[must_use]
        pub fn new(page: CdpPage) -> Self {
            Self { page }
        }

        async fn eval(&self, script: &str) -> EscaparateResult<Value> {
            let params = EvaluateParams::builder()
                .expression(script.to_string())
                .await_promise(true)
                .return_by_value(true)
                .build()
                .map_err(|e| EscaparateError::Evaluation { message: e })?;
            let result =
                self.page
                    .evaluate(params)
                    .await
                    .map_err(|e| EscaparateError::Evaluation {
                        message: e.to_string(),
                    })?;
            Ok(result.value().cloned().unwrap_or(Value::Null))
        }

        async fn eval_bool(&self, script: &str, selector: &Selector) -> EscaparateResult<bool> {
            match self.eval(script).await? {
                Value::Bool(b) => Ok(b),
                other => Err(EscaparateError::Evaluation {
                    message: format!(
                        "expected boolean for {}, got {other}",
                        selector.describe()
                    ),
                }),
            }
        }

        async fn act(&self, script: &str, selector: &Selector) -> EscaparateResult<()> {
            if self.eval_bool(script, selector).await? {
                Ok(())
            } else {
                Err(EscaparateError::Input {
                    message: format!("no element matches {}", selector.describe()),
                })
            }
        }

        fn opt_string(value: Value) -> Option<String> {
            match value {
                Value::String(s) => Some(s),
                _ => None,
            }
        }
    }

    #[async_trait]
    impl PageDriver for CdpDriver {
        async fn navigate(&self, url: &str) -> EscaparateResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| EscaparateError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> EscaparateResult<String> {
            let value = self.eval("window.location.href").await?;
            Self::opt_string(value).ok_or_else(|| EscaparateError::Evaluation {
                message: "location.href did not evaluate to a string".to_string(),
            })
        }

        async fn ready_state(&self) -> EscaparateResult<String> {
            let value = self.eval("document.readyState").await?;
            Self::opt_string(value).ok_or_else(|| EscaparateError::Evaluation {
                message: "document.readyState did not evaluate to a string".to_string(),
            })
        }

        async fn evaluate(&self, script: &str) -> EscaparateResult<Value> {
            self.eval(script).await
        }

        async fn count(&self, selector: &Selector) -> EscaparateResult<usize> {
            match self.eval(&selector.count_query()).await? {
                Value::Number(n) => Ok(n.as_u64().unwrap_or(0) as usize),
                other => Err(EscaparateError::Evaluation {
                    message: format!("expected count for {}, got {other}", selector.describe()),
                }),
            }
        }

        async fn is_visible(&self, selector: &Selector) -> EscaparateResult<bool> {
            self.eval_bool(&selector.visible_query(), selector).await
        }

        async fn text_content(&self, selector: &Selector) -> EscaparateResult<Option<String>> {
            Ok(Self::opt_string(self.eval(&selector.text_query()).await?))
        }

        async fn attribute(
            &self,
            selector: &Selector,
            name: &str,
        ) -> EscaparateResult<Option<String>> {
            Ok(Self::opt_string(
                self.eval(&selector.attribute_query(name)).await?,
            ))
        }

        async fn value(&self, selector: &Selector) -> EscaparateResult<Option<String>> {
            Ok(Self::opt_string(self.eval(&selector.value_query()).await?))
        }

        async fn is_disabled(&self, selector: &Selector) -> EscaparateResult<bool> {
            self.eval_bool(&selector.disabled_query(), selector).await
        }

        async fn click(&self, selector: &Selector) -> EscaparateResult<()> {
            self.act(&selector.click_script(), selector).await
        }

        async fn fill(&self, selector: &Selector, text: &str) -> EscaparateResult<()> {
            self.act(&selector.fill_script(text), selector).await
        }

        async fn select_option(&self, selector: &Selector, index: usize) -> EscaparateResult<()> {
            self.act(&selector.select_option_script(index), selector)
                .await
        }

        async fn press(&self, selector: &Selector, key: &str) -> EscaparateResult<()> {
            use chromiumoxide::cdp::browser_protocol::input::{
                DispatchKeyEventParams, DispatchKeyEventType,
            };

            self.act(&selector.focus_script(), selector).await?;

            let text = match key {
                "Enter" => Some("\r".to_string()),
                k if k.chars().count() == 1 => Some(k.to_string()),
                _ => None,
            };

            let mut down = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyDown)
                .key(key.to_string());
            if let Some(ref text) = text {
                down = down.text(text.clone());
            }
            let down = down.build().map_err(|e| EscaparateError::Input {
                message: e.to_string(),
            })?;
            self.page
                .execute(down)
                .await
                .map_err(|e| EscaparateError::Input {
                    message: e.to_string(),
                })?;

            let up = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyUp)
                .key(key.to_string())
                .build()
                .map_err(|e| EscaparateError::Input {
                    message: e.to_string(),
                })?;
            self.page
                .execute(up)
                .await
                .map_err(|e| EscaparateError::Input {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn screenshot(&self) -> EscaparateResult<Vec<u8>> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let screenshot =
                self.page
                    .execute(params)
                    .await
                    .map_err(|e| EscaparateError::Screenshot {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| EscaparateError::Screenshot {
                    message: e.to_string(),
                })
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(css: &str) -> Selector {
        Selector::css(css)
    }

    #[tokio::test]
    async fn test_mock_navigate_tracks_url() {
        let page = MockPage::new();
        page.navigate("https://sauce-demo.myshopify.com/").await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://sauce-demo.myshopify.com/"
        );
        assert!(page.was_called("navigate"));
    }

    #[tokio::test]
    async fn test_mock_count_zero_for_unregistered_selector() {
        let page = MockPage::new();
        assert_eq!(page.count(&sel(".cart-item")).await.unwrap(), 0);
        assert!(!page.is_visible(&sel(".cart-item")).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_text_filter_gates_match() {
        let page = MockPage::new()
            .with_element(MockElement::new("a").with_text("Log in"));
        let with_text = Selector::css_with_text("a", "Log in");
        let wrong_text = Selector::css_with_text("a", "Sign up");
        assert_eq!(page.count(&with_text).await.unwrap(), 1);
        assert_eq!(page.count(&wrong_text).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mock_click_applies_navigate_effect() {
        let page = MockPage::new().with_element(
            MockElement::new("button[type=\"submit\"]")
                .on_click(MockEffect::Navigate("https://shop.test/account".to_string())),
        );
        page.click(&sel("button[type=\"submit\"]")).await.unwrap();
        assert_eq!(page.current_url().await.unwrap(), "https://shop.test/account");
    }

    #[tokio::test]
    async fn test_mock_click_reveal_makes_element_visible() {
        let page = MockPage::new()
            .with_element(
                MockElement::new("button[name=\"add\"]")
                    .on_click(MockEffect::Reveal(".cart-item".to_string())),
            )
            .with_element(MockElement::new(".cart-item").hidden());
        assert!(!page.is_visible(&sel(".cart-item")).await.unwrap());
        page.click(&sel("button[name=\"add\"]")).await.unwrap();
        assert!(page.is_visible(&sel(".cart-item")).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_click_missing_element_errors() {
        let page = MockPage::new();
        let err = page.click(&sel("#nope")).await.unwrap_err();
        assert!(matches!(err, EscaparateError::Input { .. }));
    }

    #[tokio::test]
    async fn test_mock_fill_updates_value() {
        let page = MockPage::new()
            .with_element(MockElement::new("input[name*=\"quantity\"]").with_value("1"));
        page.fill(&sel("input[name*=\"quantity\"]"), "2").await.unwrap();
        assert_eq!(
            page.value(&sel("input[name*=\"quantity\"]")).await.unwrap(),
            Some("2".to_string())
        );
    }

    #[tokio::test]
    async fn test_mock_eval_results_are_fifo() {
        let page = MockPage::new()
            .with_eval_result(Value::Bool(true))
            .with_eval_result(Value::String("second".to_string()));
        assert_eq!(page.evaluate("a").await.unwrap(), Value::Bool(true));
        assert_eq!(
            page.evaluate("b").await.unwrap(),
            Value::String("second".to_string())
        );
        assert!(page.evaluate("c").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_disabled_and_attributes() {
        let page = MockPage::new().with_element(
            MockElement::new("button[name=\"checkout\"]")
                .disabled()
                .with_attribute("aria-label", "Check out"),
        );
        let s = sel("button[name=\"checkout\"]");
        assert!(page.is_disabled(&s).await.unwrap());
        assert_eq!(
            page.attribute(&s, "aria-label").await.unwrap(),
            Some("Check out".to_string())
        );
        assert_eq!(page.attribute(&s, "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_hide_effect_removes_matches() {
        let page = MockPage::new()
            .with_element(
                MockElement::new("a.remove")
                    .on_click(MockEffect::Hide(".cart-item".to_string())),
            )
            .with_element(MockElement::new(".cart-item").with_count(2));
        assert_eq!(page.count(&sel(".cart-item")).await.unwrap(), 2);
        page.click(&sel("a.remove")).await.unwrap();
        assert_eq!(page.count(&sel(".cart-item")).await.unwrap(), 0);
    }
}
