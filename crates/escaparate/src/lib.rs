//! Escaparate: page-interaction harness for storefront e2e scenarios.
//!
//! The harness is the reusable skeleton under a flat list of scenario
//! scripts run against a live third-party storefront:
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌───────────────┐
//! │ Scenario     │    │ Locators /    │    │ Headless      │
//! │ scripts      │───►│ probes /      │───►│ browser (CDP) │
//! │ (Rust)       │    │ assertions    │    │ or MockPage   │
//! └──────────────┘    └───────────────┘    └───────────────┘
//! ```
//!
//! Everything element-shaped goes through a [`SelectorChain`] (prioritized
//! fallback selectors, first match wins) and a bounded wait. Optional steps
//! are gated by [`Locator::probe`]: absence skips, it never fails. The
//! `browser` feature enables real Chromium control via chromiumoxide;
//! without it, [`MockPage`] drives a scripted DOM for tests.

#![warn(missing_docs)]

mod accessibility;
mod assertion;
mod browser;
mod config;
mod driver;
mod locator;
mod page;
mod reporter;
mod result;
mod runner;
mod scenario;
mod selector;
mod wait;

pub use accessibility::{
    axe_bundle_path, AxeAudit, Impact, ScanResults, Violation, ViolationNode, WcagTag,
    AXE_PATH_ENV, DEFAULT_AXE_PATH,
};
pub use assertion::{
    expect_count_at_least, expect_disabled, expect_url, expect_value, expect_visible, UrlPattern,
};
#[cfg(feature = "browser")]
pub use browser::Browser;
pub use browser::BrowserConfig;
pub use config::{SuiteConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
#[cfg(feature = "browser")]
pub use driver::CdpDriver;
pub use driver::{MockEffect, MockElement, MockPage, PageDriver};
pub use locator::{Locator, ResolvedLocator, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
pub use page::Page;
pub use reporter::SuiteReport;
pub use result::{EscaparateError, EscaparateResult};
pub use runner::{PageFactory, Runner};
pub use scenario::{
    Flow, Outcome, Scenario, ScenarioBody, ScenarioCx, ScenarioReport,
    DEFAULT_SCENARIO_TIMEOUT_MS,
};
pub use selector::{Selector, SelectorChain};
pub use wait::{
    wait_until, wait_until_soft, LoadState, WaitOptions, DEFAULT_WAIT_TIMEOUT_MS,
    NETWORK_IDLE_THRESHOLD_MS,
};

/// Prelude for scenario scripts
pub mod prelude {
    pub use super::accessibility::{AxeAudit, WcagTag};
    pub use super::assertion::{
        expect_count_at_least, expect_disabled, expect_url, expect_value, expect_visible,
        UrlPattern,
    };
    pub use super::config::SuiteConfig;
    pub use super::locator::{Locator, ResolvedLocator};
    pub use super::page::Page;
    pub use super::result::{EscaparateError, EscaparateResult};
    pub use super::scenario::{Flow, Outcome, Scenario, ScenarioCx, ScenarioReport};
    pub use super::selector::{Selector, SelectorChain};
    pub use super::wait::{LoadState, WaitOptions};
}
