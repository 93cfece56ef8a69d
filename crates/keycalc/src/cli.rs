//! Command-line interface
//!
//! Flags override whatever the configuration file says.

use std::path::PathBuf;

use clap::Parser;

use crate::config::CalcConfig;
use crate::error::AppResult;
use crate::keymap::Mode;

/// keycalc: a keyboard-driven accumulator calculator
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "KEYCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keypad mode at startup
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// How long errors stay on the display, in milliseconds
    #[arg(long)]
    pub error_ms: Option<u64>,

    /// Hide the on-screen keypad
    #[arg(long)]
    pub no_keypad: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Type these keys without opening the terminal UI, then print the display
    #[arg(short, long)]
    pub keys: Option<String>,

    /// Print the final snapshot as JSON (with --keys)
    #[arg(long, requires = "keys")]
    pub json: bool,
}

impl Cli {
    /// Builds the effective configuration
    pub fn config(&self) -> AppResult<CalcConfig> {
        let mut config = match &self.config {
            Some(path) => CalcConfig::load(path)?,
            None => CalcConfig::new(),
        };

        if let Some(mode) = self.mode {
            config = config.with_start_mode(mode);
        }
        if let Some(ms) = self.error_ms {
            config = config.with_error_display_ms(ms);
        }
        if self.no_keypad {
            config = config.with_show_keypad(false);
        }
        match self.verbose {
            0 => {}
            1 => config = config.with_log_filter("debug"),
            _ => config = config.with_log_filter("trace"),
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["keycalc"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    // ===== Parsing =====

    #[test]
    fn test_parse_defaults() {
        let cli = parse(&[]);
        assert!(cli.mode.is_none());
        assert!(cli.error_ms.is_none());
        assert!(!cli.no_keypad);
        assert_eq!(cli.verbose, 0);
        assert!(cli.keys.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse(&["--mode", "advanced"]).mode, Some(Mode::Advanced));
        assert_eq!(parse(&["-m", "basic"]).mode, Some(Mode::Basic));
    }

    #[test]
    fn test_parse_bad_mode() {
        assert!(Cli::try_parse_from(["keycalc", "--mode", "scientific"]).is_err());
    }

    #[test]
    fn test_parse_verbose_count() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn test_json_requires_keys() {
        assert!(Cli::try_parse_from(["keycalc", "--json"]).is_err());
        let cli = parse(&["--keys", "1+1=", "--json"]);
        assert!(cli.json);
        assert_eq!(cli.keys.as_deref(), Some("1+1="));
    }

    // ===== Effective config =====

    #[test]
    fn test_config_defaults() {
        let config = parse(&[]).config().unwrap();
        assert_eq!(config, CalcConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = parse(&["--mode", "advanced", "--error-ms", "300", "--no-keypad", "-v"])
            .config()
            .unwrap();
        assert_eq!(config.start_mode, Mode::Advanced);
        assert_eq!(config.error_display_ms, 300);
        assert!(!config.show_keypad);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_config_trace_level() {
        let config = parse(&["-vvv"]).config().unwrap();
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn test_config_rejects_zero_delay() {
        let err = parse(&["--error-ms", "0"]).config().unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"start_mode": "advanced", "error_display_ms": 900}"#)
            .unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--error-ms", "100"])
            .config()
            .unwrap();
        assert_eq!(config.start_mode, Mode::Advanced);
        assert_eq!(config.error_display_ms, 100);
    }
}
