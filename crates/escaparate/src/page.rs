//! Page façade over the driver seam.

use crate::driver::PageDriver;
use crate::result::EscaparateResult;
use crate::selector::SelectorChain;
use crate::wait::{wait_until, LoadState, WaitOptions, NETWORK_IDLE_THRESHOLD_MS};
use crate::Locator;
use std::time::Duration;

/// A single page session.
///
/// One page per scenario; pages are never shared and carry no state beyond
/// the driver handle.
pub struct Page {
    driver: Box<dyn PageDriver>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}

impl Page {
    /// Wrap a driver
    #[must_use]
    pub fn new(driver: Box<dyn PageDriver>) -> Self {
        Self { driver }
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &dyn PageDriver {
        &*self.driver
    }

    /// Navigate to a URL and wait for the `load` event
    pub async fn goto(&self, url: &str) -> EscaparateResult<()> {
        tracing::debug!(url, "navigating");
        self.driver.navigate(url).await?;
        self.wait_for_load_state(LoadState::Load, WaitOptions::default())
            .await
    }

    /// Wait for a page load state with a bounded timeout
    pub async fn wait_for_load_state(
        &self,
        state: LoadState,
        options: WaitOptions,
    ) -> EscaparateResult<()> {
        let wanted = state.ready_state();
        let driver = &*self.driver;
        wait_until(
            || async move {
                let ready = driver.ready_state().await?;
                Ok(ready == wanted || ready == "complete")
            },
            options,
            state.event_name(),
        )
        .await?;
        if state == LoadState::NetworkIdle {
            self.driver
                .wait_for_network_quiet(Duration::from_millis(NETWORK_IDLE_THRESHOLD_MS))
                .await?;
        }
        Ok(())
    }

    /// Build a locator over a selector chain
    #[must_use]
    pub fn locator(&self, chain: impl Into<SelectorChain>) -> Locator<'_> {
        Locator::new(self, chain.into())
    }

    /// Current URL
    pub async fn current_url(&self) -> EscaparateResult<String> {
        self.driver.current_url().await
    }

    /// Evaluate a script in page context
    pub async fn evaluate(&self, script: &str) -> EscaparateResult<serde_json::Value> {
        self.driver.evaluate(script).await
    }

    /// Capture a PNG screenshot
    pub async fn screenshot(&self) -> EscaparateResult<Vec<u8>> {
        self.driver.screenshot().await
    }

    /// Unconditional pause, for storefronts that re-render after actions
    pub async fn wait_for_timeout(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
