//! Result and error types for Escaparate.

use thiserror::Error;

/// Result type for harness operations
pub type EscaparateResult<T> = Result<T, EscaparateError>;

/// Errors that can occur while driving a page
#[derive(Debug, Error)]
pub enum EscaparateError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    Evaluation {
        /// Error message
        message: String,
    },

    /// Input dispatch error
    #[error("Input dispatch failed: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was being waited for
        waiting_for: String,
    },

    /// Assertion failed (expected state did not materialize within its bound)
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Accessibility scan could not run
    #[error("Accessibility scan failed: {message}")]
    AccessibilityScan {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EscaparateError {
    /// Shorthand for an assertion failure
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Whether this error is a bounded-wait expiry
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_carries_bound() {
        let err = EscaparateError::Timeout {
            ms: 5000,
            waiting_for: "visible .cart-item".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("5000"));
        assert!(msg.contains(".cart-item"));
    }

    #[test]
    fn test_assertion_shorthand() {
        let err = EscaparateError::assertion("checkout enabled on empty cart");
        assert!(err.to_string().contains("checkout enabled"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_is_timeout() {
        let err = EscaparateError::Timeout {
            ms: 100,
            waiting_for: "load".to_string(),
        };
        assert!(err.is_timeout());
    }
}
