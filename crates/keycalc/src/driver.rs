//! Unified calculator driver
//!
//! **Write the check once, run it against every frontend.** The
//! [`CalculatorDriver`] trait presses keys and reads the display; the
//! `verify_*` functions encode the calculator's behavioral guarantees on top
//! of it and panic with a message when one does not hold.

use crate::core::{Accumulator, Action, CalcError, CalcResult, Outcome};
use crate::keymap::{action_for_char, KeyAction, Mode};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Sends one action
    fn press(&mut self, action: Action) -> CalcResult<Outcome>;

    /// Types a string of keys through the shared key table.
    ///
    /// Returns the last error, if any key was rejected. Keys that map to
    /// nothing are skipped.
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        let mut last = Ok(());
        for c in keys.chars() {
            if let KeyAction::Calc(action) = action_for_char(c, Mode::Advanced) {
                if let Err(err) = self.press(action) {
                    last = Err(err);
                }
            }
        }
        last
    }

    /// Main display text
    fn display(&self) -> String;

    /// History line
    fn history(&self) -> String;

    /// Memory indicator
    fn memory(&self) -> String;

    /// True while an error message is shown
    fn is_error(&self) -> bool;

    /// Resets the calculator (memory survives)
    fn clear(&mut self) {
        let _ = self.press(Action::Clear);
    }
}

/// Driver over the bare accumulator
#[derive(Debug, Default)]
pub struct AccumulatorDriver {
    accumulator: Accumulator,
}

impl AccumulatorDriver {
    /// Creates a driver with a fresh accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying accumulator
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }
}

impl CalculatorDriver for AccumulatorDriver {
    fn press(&mut self, action: Action) -> CalcResult<Outcome> {
        self.accumulator.apply(action)
    }

    fn display(&self) -> String {
        self.accumulator.snapshot().display_text
    }

    fn history(&self) -> String {
        self.accumulator.snapshot().history_text
    }

    fn memory(&self) -> String {
        self.accumulator.snapshot().memory_text
    }

    fn is_error(&self) -> bool {
        self.accumulator.snapshot().is_error
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Action, CalcResult, CalculatorDriver, Outcome};
    use crate::config::CalcConfig;
    use crate::keymap::{KeyAction, Mode};
    use crate::tui::{CalculatorApp, InputHandler};

    /// Driver over the full terminal app, minus the terminal
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a driver around an app in advanced mode
        #[must_use]
        pub fn new() -> Self {
            let config = CalcConfig::new().with_start_mode(Mode::Advanced);
            Self {
                app: CalculatorApp::new(&config),
            }
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        /// Lets the error display time run out
        pub fn expire_error(&mut self) {
            let later = Instant::now() + self.app.timer().delay();
            self.app.tick(later);
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: Action) -> CalcResult<Outcome> {
            self.app.press(action, Instant::now())
        }

        /// Sends real key events, so the app's own mode gating applies
        fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
            let handler = InputHandler::new();
            let mut last = Ok(());
            for c in keys.chars() {
                let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                match handler.handle_key(event, self.app.mode()) {
                    KeyAction::Calc(action) => {
                        if let Err(err) = self.app.press(action, Instant::now()) {
                            last = Err(err);
                        }
                    }
                    other => self.app.handle_action(other, Instant::now()),
                }
            }
            last
        }

        fn display(&self) -> String {
            self.app.snapshot().display_text.clone()
        }

        fn history(&self) -> String {
            self.app.snapshot().history_text.clone()
        }

        fn memory(&self) -> String {
            self.app.snapshot().memory_text.clone()
        }

        fn is_error(&self) -> bool {
            self.app.snapshot().is_error
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared behavior checks =====
// These work with ANY CalculatorDriver implementation

/// A 16th digit is rejected and the 15 typed ones stay
pub fn verify_digit_cap<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("123456789012345").is_ok());
    assert_eq!(driver.display(), "1.234568e+14");

    assert_eq!(driver.press(Action::Digit(6)), Err(CalcError::InputTooLong));
    assert!(driver.is_error());
    assert_eq!(driver.display(), "Maximum digits reached");

    driver.clear();
    assert!(!driver.is_error());
}

/// A second decimal point changes nothing
pub fn verify_decimal_idempotent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("3."), Ok(()));
    assert_eq!(driver.press(Action::Decimal), Ok(Outcome::Unchanged));
    assert!(driver.press_keys("5").is_ok());
    assert_eq!(driver.display(), "3.5");
}

/// `2 + 3 * 4 =` is 20: no operator precedence
pub fn verify_sequential_evaluation<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("2+3*4=").is_ok());
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.history(), "5 × 4 =");
}

/// Division by zero shows an error and keeps the operand
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("5/0").is_ok());
    assert_eq!(driver.press(Action::Evaluate), Err(CalcError::DivideByZero));
    assert!(driver.is_error());
    assert_eq!(driver.display(), "Cannot divide by zero");
    driver.clear();
}

/// Bare equals repeats the last operation
pub fn verify_repeated_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("5+3=").is_ok());
    assert_eq!(driver.display(), "8");
    assert!(driver.press_keys("=").is_ok());
    assert_eq!(driver.display(), "11");
}

/// Square root of a negative operand is rejected
pub fn verify_negative_sqrt<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("4n").is_ok());
    assert_eq!(driver.press(Action::Sqrt), Err(CalcError::NegativeSqrt));
    assert_eq!(
        driver.display(),
        "Cannot calculate square root of negative number"
    );
    driver.clear();
}

/// `1 / 3 = * 3 =` gives exactly 1
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("1/3=").is_ok());
    assert_eq!(driver.display(), "0.3333333333");
    assert!(driver.press_keys("*3=").is_ok());
    assert_eq!(driver.display(), "1");
}

/// Clear resets everything but memory
pub fn verify_clear_keeps_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let _ = driver.press(Action::MemoryClear);
    assert!(driver.press_keys("9a+1").is_ok());
    assert_eq!(driver.memory(), "M: 9");

    driver.clear();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.history(), "");
    assert_eq!(driver.memory(), "M: 9");

    let _ = driver.press(Action::MemoryClear);
    assert_eq!(driver.memory(), "");
}

/// Percent takes a share of the pending operand
pub fn verify_percentage<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("200+10%").is_ok());
    assert_eq!(driver.display(), "20");
    assert!(driver.press_keys("=").is_ok());
    assert_eq!(driver.display(), "220");
}

/// Runs every check in order
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_cap(driver);
    verify_decimal_idempotent(driver);
    verify_sequential_evaluation(driver);
    verify_divide_by_zero(driver);
    verify_repeated_equals(driver);
    verify_negative_sqrt(driver);
    verify_rounding(driver);
    verify_clear_keeps_memory(driver);
    verify_percentage(driver);
}
