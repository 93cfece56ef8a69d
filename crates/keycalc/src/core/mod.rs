//! Accumulator core: state machine, arithmetic and number formatting
//!
//! Everything in here is pure. No terminal, no clock, no I/O beyond
//! `tracing` events. The shell in [`crate::tui`] drives it with actions
//! and paints the snapshots it returns.

mod accumulator;
pub mod format;
mod operations;

pub use accumulator::{Accumulator, Action, CalculatorState, Outcome, RenderSnapshot};
pub use operations::{round_decimal, snap_significant, OperatorKind, UnaryOp};

use thiserror::Error;

/// Maximum number of digits a typed literal may hold (sign and point excluded)
pub const MAX_DIGITS: usize = 15;

/// Result type for accumulator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Recoverable calculator errors.
///
/// None of these is fatal: the shell shows the message in place of the
/// display and clears the machine after a short delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A digit was typed into a literal that already holds [`MAX_DIGITS`] digits
    #[error("Maximum digits reached")]
    InputTooLong,
    /// Division (or reciprocal) with a zero divisor
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// The result is not a finite number
    #[error("Result is too large")]
    ResultOverflow,
    /// Square root of a negative operand
    #[error("Cannot calculate square root of negative number")]
    NegativeSqrt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display_input_too_long() {
        assert_eq!(CalcError::InputTooLong.to_string(), "Maximum digits reached");
    }

    #[test]
    fn test_calc_error_display_divide_by_zero() {
        assert_eq!(CalcError::DivideByZero.to_string(), "Cannot divide by zero");
    }

    #[test]
    fn test_calc_error_display_overflow() {
        assert_eq!(CalcError::ResultOverflow.to_string(), "Result is too large");
    }

    #[test]
    fn test_calc_error_display_negative_sqrt() {
        assert_eq!(
            CalcError::NegativeSqrt.to_string(),
            "Cannot calculate square root of negative number"
        );
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivideByZero);
        assert!(err.to_string().contains("divide"));
    }

    #[test]
    fn test_calc_error_copy() {
        let err = CalcError::ResultOverflow;
        let copied = err;
        assert_eq!(err, copied);
    }
}
