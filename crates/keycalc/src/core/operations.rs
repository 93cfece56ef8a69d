//! Binary and unary arithmetic for the accumulator
//!
//! Error prevention: every result that leaves this module is finite.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Scale used to round binary results to 10 decimal places
const DECIMAL_SCALE: f64 = 1e10;

/// Above this magnitude a scaled value is already integral
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Significant digits kept behind a computed result
const GUARD_DIGITS: usize = 15;

/// Pending binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
}

impl OperatorKind {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Returns the typographic symbol used in the history line
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "−",
            Self::Mul => "×",
            Self::Div => "÷",
        }
    }

    /// Returns the ASCII key bound to this operator
    #[must_use]
    pub const fn key(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Maps an ASCII operator key to its kind
    #[must_use]
    pub const fn from_key(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// Applies the operator to `left` and `right` without rounding.
    ///
    /// Fails with [`CalcError::DivideByZero`] for a zero divisor and with
    /// [`CalcError::ResultOverflow`] when the result is not finite.
    pub fn apply(&self, left: f64, right: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => {
                if right == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                left / right
            }
        };
        check_finite(result)
    }
}

/// Single-operand functions from the advanced keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Square root (√x)
    Sqrt,
    /// Square (x²)
    Square,
    /// Reciprocal (1/x)
    Reciprocal,
}

impl UnaryOp {
    /// Applies the function to `operand`
    pub fn apply(&self, operand: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Sqrt => {
                if operand < 0.0 {
                    return Err(CalcError::NegativeSqrt);
                }
                operand.sqrt()
            }
            Self::Square => operand * operand,
            Self::Reciprocal => {
                if operand == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                1.0 / operand
            }
        };
        check_finite(result)
    }

    /// Builds the history trace for an already formatted operand
    #[must_use]
    pub fn trace(&self, operand: &str) -> String {
        match self {
            Self::Sqrt => format!("√{operand}"),
            Self::Square => format!("{operand}²"),
            Self::Reciprocal => format!("1/{operand}"),
        }
    }
}

fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::ResultOverflow)
    }
}

/// Rounds to 10 decimal places, half away from zero.
///
/// Values whose scaled magnitude is already an exact integer in `f64`
/// are returned untouched, so large results never pick up scaling noise.
#[must_use]
pub fn round_decimal(value: f64) -> f64 {
    let scaled = value * DECIMAL_SCALE;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    scaled.round() / DECIMAL_SCALE
}

/// Snaps a value to 15 significant digits, dropping binary representation noise.
#[must_use]
pub fn snap_significant(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    format!("{:.*e}", GUARD_DIGITS - 1, value)
        .parse()
        .unwrap_or(value)
}
