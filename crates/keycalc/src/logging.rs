//! Log setup
//!
//! The terminal belongs to the UI, so logs only go to a file. Without one,
//! no subscriber is installed and every event is dropped.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Parses a filter directive such as `info` or `keycalc=debug`
pub fn parse_filter(directive: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| AppError::logging(format!("invalid filter '{directive}': {e}")))
}

/// Installs the global subscriber writing to `path`
pub fn init_file(path: &Path, directive: &str) -> AppResult<()> {
    let filter = parse_filter(directive)?;
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::logging(e.to_string()))
}
