//! Suite configuration.

use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default storefront under test
pub const DEFAULT_BASE_URL: &str = "https://sauce-demo.myshopify.com/";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "ESCAPARATE_BASE_URL";

/// Configuration shared by every scenario in a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Storefront entry point
    pub base_url: String,
    /// Run the browser headless
    pub headless: bool,
    /// Bound for navigation + load-state waits (ms)
    pub navigation_timeout_ms: u64,
    /// Bound for existence probes and assertions (ms)
    pub action_timeout_ms: u64,
    /// Pause after actions that make the storefront re-render (ms)
    pub settle_ms: u64,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            navigation_timeout_ms: 30_000,
            action_timeout_ms: 5_000,
            settle_ms: 1_000,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl SuiteConfig {
    /// Defaults plus environment overrides
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Override the action/probe bound
    #[must_use]
    pub const fn with_action_timeout_ms(mut self, ms: u64) -> Self {
        self.action_timeout_ms = ms;
        self
    }

    /// Override the settle pause
    #[must_use]
    pub const fn with_settle_ms(mut self, ms: u64) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Join a path onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Wait options for navigation and load states
    #[must_use]
    pub const fn navigation_wait(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.navigation_timeout_ms,
            poll_interval_ms: 50,
        }
    }

    /// Wait options for probes and assertions
    #[must_use]
    pub const fn action_wait(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.action_timeout_ms,
            poll_interval_ms: 50,
        }
    }

    /// The probe/assertion bound as a Duration
    #[must_use]
    pub const fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }
}
