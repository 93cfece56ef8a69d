//! Error types for the application shell

use thiserror::Error;

/// Result type for shell and CLI operations
pub type AppResult<T> = Result<T, AppError>;

/// Errors outside the calculator core.
///
/// Calculation errors never reach this type: they are shown on the
/// display and recovered from in place.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration value rejected
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Configuration file is not valid JSON for [`crate::config::CalcConfig`]
    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Log subscriber could not be installed
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl AppError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a logging error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
