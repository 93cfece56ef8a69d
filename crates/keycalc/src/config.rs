//! Application configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default. Command-line flags are applied on top with the `with_*` builders.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::keymap::Mode;

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// How long an error message stays on the display, in milliseconds
    pub error_display_ms: u64,
    /// Keypad mode at startup
    pub start_mode: Mode,
    /// Draw the on-screen keypad
    pub show_keypad: bool,
    /// `tracing` filter directive used when logging to a file
    pub log_filter: String,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            error_display_ms: 1500,
            start_mode: Mode::Basic,
            show_keypad: true,
            log_filter: "info".to_string(),
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the shell cannot honor
    pub fn validate(&self) -> AppResult<()> {
        if self.error_display_ms == 0 {
            return Err(AppError::config("error_display_ms must be positive"));
        }
        Ok(())
    }

    /// Set the error display delay
    #[must_use]
    pub const fn with_error_display_ms(mut self, ms: u64) -> Self {
        self.error_display_ms = ms;
        self
    }

    /// Set the starting mode
    #[must_use]
    pub const fn with_start_mode(mut self, mode: Mode) -> Self {
        self.start_mode = mode;
        self
    }

    /// Show or hide the keypad
    #[must_use]
    pub const fn with_show_keypad(mut self, show: bool) -> Self {
        self.show_keypad = show;
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Error display delay as a [`Duration`]
    #[must_use]
    pub const fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }
}
