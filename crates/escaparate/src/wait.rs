//! Bounded waits and page load states.
//!
//! Every suspension point in a scenario goes through a bounded poll: either
//! the condition holds within the timeout or the wait surfaces
//! [`EscaparateError::Timeout`] for that scenario alone.

use crate::result::{EscaparateError, EscaparateResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Quiet window used to approximate network idle (500ms)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

/// Page load states
///
/// `NetworkIdle` is approximated as `document.readyState === "complete"`
/// followed by a quiet window of [`NETWORK_IDLE_THRESHOLD_MS`]; the suite
/// does not track individual CDP requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    #[default]
    Load,
    /// Wait for `DOMContentLoaded`
    DomContentLoaded,
    /// Wait for the network to settle
    NetworkIdle,
}

impl LoadState {
    /// The `document.readyState` value that satisfies this state
    #[must_use]
    pub const fn ready_state(&self) -> &'static str {
        match self {
            Self::Load | Self::NetworkIdle => "complete",
            Self::DomContentLoaded => "interactive",
        }
    }

    /// Event name used in messages
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::NetworkIdle => "networkidle",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

/// Options for wait operations
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll an async condition until it holds or the bound expires.
///
/// Returns the elapsed time on success. Errors from the condition itself
/// propagate immediately; only expiry maps to [`EscaparateError::Timeout`].
pub async fn wait_until<F, Fut>(
    mut check: F,
    options: WaitOptions,
    waiting_for: &str,
) -> EscaparateResult<Duration>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = EscaparateResult<bool>>,
{
    let started = Instant::now();
    let deadline = started + options.timeout();
    loop {
        if check().await? {
            return Ok(started.elapsed());
        }
        if Instant::now() >= deadline {
            return Err(EscaparateError::Timeout {
                ms: options.timeout_ms,
                waiting_for: waiting_for.to_string(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Variant of [`wait_until`] that swallows expiry into `Ok(false)`.
///
/// This is the primitive behind existence probes: absence within the bound
/// is an answer, not an error.
pub async fn wait_until_soft<F, Fut>(
    check: F,
    options: WaitOptions,
    waiting_for: &str,
) -> EscaparateResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = EscaparateResult<bool>>,
{
    match wait_until(check, options, waiting_for).await {
        Ok(_) => Ok(true),
        Err(EscaparateError::Timeout { .. }) => Ok(false),
        Err(other) => Err(other),
    }
}
