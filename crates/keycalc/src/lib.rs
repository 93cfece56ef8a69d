//! keycalc - keyboard-driven accumulator calculator
//!
//! A pocket-calculator state machine with a terminal frontend. Operators are
//! applied left to right as they are typed, with no precedence: `2 + 3 * 4 =`
//! is 20.
//!
//! # Layers
//!
//! - [`core`]: the pure accumulator. Actions in, render snapshots out.
//! - [`keymap`]: the character table shared by the terminal and `--keys`.
//! - `tui`: ratatui shell owning the keypad and the error timer.
//! - [`driver`]: one trait over both, so behavior checks run against either.
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut acc = Accumulator::new();
//! for action in [
//!     Action::Digit(2),
//!     Action::Operator(OperatorKind::Add),
//!     Action::Digit(3),
//!     Action::Operator(OperatorKind::Mul),
//!     Action::Digit(4),
//! ] {
//!     acc.apply(action).unwrap();
//! }
//! let snapshot = acc.dispatch(Action::Evaluate);
//! assert_eq!(snapshot.display_text, "20");
//! assert_eq!(snapshot.history_text, "5 × 4 =");
//!
//! // Errors are values, shown in place of the display
//! acc.clear();
//! acc.input_digit(1).unwrap();
//! assert_eq!(acc.reciprocal(), Ok(Outcome::Rendered));
//! acc.input_digit(0).unwrap();
//! assert_eq!(acc.reciprocal(), Err(CalcError::DivideByZero));
//! assert!(acc.snapshot().is_error);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod script;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalcConfig;
    pub use crate::core::{
        Accumulator, Action, CalcError, CalcResult, CalculatorState, OperatorKind, Outcome,
        RenderSnapshot,
    };
    pub use crate::driver::{AccumulatorDriver, CalculatorDriver};
    pub use crate::error::{AppError, AppResult};
    pub use crate::keymap::{action_for_char, KeyAction, Mode};
    pub use crate::script::run_keys;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    #[cfg(feature = "tui")]
    pub use crate::tui::CalculatorApp;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut acc = Accumulator::new();
        acc.input_digit(7).unwrap();
        assert_eq!(acc.snapshot().display_text, "7");
    }

    #[test]
    fn test_operators_have_no_precedence() {
        assert_eq!(run_keys("2+3*4=", Mode::Basic).display_text, "20");
        assert_eq!(run_keys("10-4/2=", Mode::Basic).display_text, "3");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CalcError::InputTooLong.to_string(), "Maximum digits reached");
        assert_eq!(CalcError::DivideByZero.to_string(), "Cannot divide by zero");
        assert_eq!(
            CalcError::NegativeSqrt.to_string(),
            "Cannot calculate square root of negative number"
        );
    }

    #[test]
    fn test_driver_through_prelude() {
        let mut driver = AccumulatorDriver::new();
        driver.press_keys("6*7=").unwrap();
        assert_eq!(driver.display(), "42");
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_app_through_prelude() {
        let app = CalculatorApp::new(&CalcConfig::new().with_start_mode(Mode::Advanced));
        assert_eq!(app.mode(), Mode::Advanced);
    }
}
