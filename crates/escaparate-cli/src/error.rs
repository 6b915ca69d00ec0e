//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario execution error
    #[error("Suite execution failed: {message}")]
    SuiteExecution {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Harness error
    #[error("Harness error: {0}")]
    Harness(#[from] escaparate::EscaparateError),
}

impl CliError {
    /// Create a suite execution error
    #[must_use]
    pub fn suite_execution(message: impl Into<String>) -> Self {
        Self::SuiteExecution {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_execution_error() {
        let err = CliError::suite_execution("2 scenarios failed");
        assert!(err.to_string().contains("Suite execution"));
        assert!(err.to_string().contains("2 scenarios"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("unknown filter");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_harness_error_from() {
        let err: CliError = escaparate::EscaparateError::assertion("cart empty").into();
        assert!(err.to_string().contains("Harness"));
    }
}
