//! The accumulator state machine
//!
//! A sequential, single-pending-operator calculator: `2 + 3 * 4` is
//! `(2 + 3) * 4`. Every transition either succeeds and reports how much of
//! the screen changed, or fails with a [`CalcError`] and leaves the numeric
//! state exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::format::{digit_count, format_number, number_to_string, parse_operand};
use super::operations::{round_decimal, snap_significant, OperatorKind, UnaryOp};
use super::{CalcError, CalcResult, MAX_DIGITS};

/// Keypad labels for the ten digits
const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A single user intent, independent of how it was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Type a digit (0-9)
    Digit(u8),
    /// Type the decimal point
    Decimal,
    /// Choose a binary operator
    Operator(OperatorKind),
    /// The "=" key
    Evaluate,
    /// Reset everything except memory
    Clear,
    /// Erase the last typed character
    Backspace,
    /// Flip the sign of the current operand
    Negate,
    /// Percentage of the pending operand (or of one)
    Percent,
    /// Square root
    Sqrt,
    /// Square
    Square,
    /// Reciprocal
    Reciprocal,
    /// MC
    MemoryClear,
    /// MR
    MemoryRecall,
    /// M+
    MemoryAdd,
    /// M−
    MemorySubtract,
}

impl Action {
    /// Returns the keypad label for this action
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_LABELS.get(usize::from(*d)).copied().unwrap_or("?"),
            Self::Decimal => ".",
            Self::Operator(op) => op.symbol(),
            Self::Evaluate => "=",
            Self::Clear => "C",
            Self::Backspace => "⌫",
            Self::Negate => "±",
            Self::Percent => "%",
            Self::Sqrt => "√",
            Self::Square => "x²",
            Self::Reciprocal => "1/x",
            Self::MemoryClear => "MC",
            Self::MemoryRecall => "MR",
            Self::MemoryAdd => "M+",
            Self::MemorySubtract => "M−",
        }
    }

    /// Returns true for functions only offered in advanced mode
    #[must_use]
    pub const fn is_advanced(&self) -> bool {
        matches!(
            self,
            Self::Sqrt
                | Self::Square
                | Self::Reciprocal
                | Self::MemoryClear
                | Self::MemoryRecall
                | Self::MemoryAdd
                | Self::MemorySubtract
        )
    }
}

/// How much of the screen an accepted action changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The main display changed and must be repainted
    Rendered,
    /// Only the memory indicator changed
    MemoryIndicator,
    /// Nothing changed
    Unchanged,
}

/// Everything a renderer needs to paint the calculator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Main display: the current operand, or the error message
    pub display_text: String,
    /// Trace of the last operation
    pub history_text: String,
    /// `M: <value>` while memory is nonzero, empty otherwise
    pub memory_text: String,
    /// True while an error message is on the display
    pub is_error: bool,
}

/// Calculation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorState {
    /// Literal being typed or the last result, never empty
    pub current_operand: String,
    /// Left operand captured by the pending operator
    pub pending_operand: Option<f64>,
    /// Operator waiting for its right operand
    pub pending_operator: Option<OperatorKind>,
    /// The next digit starts a new literal
    pub awaiting_fresh_operand: bool,
    /// Memory register, survives [`Accumulator::clear`]
    pub memory: f64,
    /// Display-only trace of the last operation
    pub history_text: String,
    /// Unrounded value of a computed result. Arithmetic uses it in place of
    /// the 10-place literal until the user edits the operand; history and
    /// memory only ever see the literal
    #[serde(skip)]
    current_value: Option<f64>,
    /// The pending operand as it was on the display
    #[serde(skip)]
    pending_shown: Option<f64>,
    /// Operator and right operand (exact, then as shown) reapplied by a bare "="
    #[serde(skip)]
    last_operation: Option<(OperatorKind, f64, f64)>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_operand: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_fresh_operand: false,
            memory: 0.0,
            history_text: String::new(),
            current_value: None,
            pending_shown: None,
            last_operation: None,
        }
    }
}

impl CalculatorState {
    /// Numeric value of the current operand
    #[must_use]
    pub fn current_number(&self) -> f64 {
        self.current_value
            .unwrap_or_else(|| parse_operand(&self.current_operand))
    }

    /// Value of the operand as displayed, used for every user-visible trace
    fn shown_number(&self) -> f64 {
        parse_operand(&self.current_operand)
    }

    fn set_literal(&mut self, literal: String) {
        self.current_operand = literal;
        self.current_value = None;
    }

    fn input_digit(&mut self, digit: u8) -> CalcResult<Outcome> {
        let Some(label) = DIGIT_LABELS.get(usize::from(digit)) else {
            return Ok(Outcome::Unchanged);
        };

        if digit_count(&self.current_operand) >= MAX_DIGITS {
            return Err(CalcError::InputTooLong);
        }

        if self.awaiting_fresh_operand {
            self.set_literal((*label).to_string());
            self.awaiting_fresh_operand = false;
            return Ok(Outcome::Rendered);
        }

        let literal = match self.current_operand.as_str() {
            "0" => (*label).to_string(),
            "-0" => format!("-{label}"),
            other => format!("{other}{label}"),
        };
        self.set_literal(literal);
        Ok(Outcome::Rendered)
    }

    fn input_decimal(&mut self) -> Outcome {
        if self.awaiting_fresh_operand {
            self.set_literal("0.".to_string());
            self.awaiting_fresh_operand = false;
            return Outcome::Rendered;
        }

        // Exponent literals only come from results and cannot take a point
        if self.current_operand.contains(['.', 'e']) {
            return Outcome::Unchanged;
        }

        let literal = format!("{}.", self.current_operand);
        self.set_literal(literal);
        Outcome::Rendered
    }

    fn set_operator(&mut self, op: OperatorKind) -> CalcResult<Outcome> {
        if self.pending_operator.is_some() && !self.awaiting_fresh_operand {
            self.evaluate()?;
        }

        let shown = self.shown_number();
        self.pending_operand = Some(self.current_number());
        self.pending_shown = Some(shown);
        self.pending_operator = Some(op);
        self.awaiting_fresh_operand = true;
        self.history_text = format!("{} {}", format_number(shown), op.symbol());
        Ok(Outcome::Rendered)
    }

    fn evaluate(&mut self) -> CalcResult<Outcome> {
        let (left, left_shown, op, right, right_shown) =
            match (self.pending_operator, self.pending_operand) {
                (Some(op), Some(left)) => {
                    let left_shown = self.pending_shown.unwrap_or(left);
                    let (right, right_shown) = if self.awaiting_fresh_operand {
                        (left, left_shown)
                    } else {
                        (self.current_number(), self.shown_number())
                    };
                    (left, left_shown, op, right, right_shown)
                }
                _ => match self.last_operation {
                    Some((op, right, right_shown)) => (
                        self.current_number(),
                        self.shown_number(),
                        op,
                        right,
                        right_shown,
                    ),
                    None => return Ok(Outcome::Unchanged),
                },
            };

        let raw = op.apply(left, right)?;

        self.history_text = format!(
            "{} {} {} =",
            format_number(left_shown),
            op.symbol(),
            format_number(right_shown)
        );
        self.current_operand = number_to_string(round_decimal(raw));
        self.current_value = Some(snap_significant(raw));
        self.pending_operand = None;
        self.pending_shown = None;
        self.pending_operator = None;
        self.awaiting_fresh_operand = true;
        self.last_operation = Some((op, right, right_shown));
        Ok(Outcome::Rendered)
    }

    fn clear(&mut self) {
        *self = Self {
            memory: self.memory,
            ..Self::default()
        };
    }

    fn backspace(&mut self) -> Outcome {
        if self.awaiting_fresh_operand {
            return Outcome::Unchanged;
        }

        let mut literal = self.current_operand.clone();
        literal.pop();
        // Never leave a dangling exponent marker behind
        while literal.ends_with(['e', '+']) || literal.ends_with("e-") {
            literal.pop();
        }
        if literal.is_empty() || literal == "-" {
            literal = "0".to_string();
        }

        self.set_literal(literal);
        Outcome::Rendered
    }

    fn negate(&mut self) -> Outcome {
        self.current_operand = number_to_string(-parse_operand(&self.current_operand));
        self.current_value = self.current_value.map(|v| -v);
        Outcome::Rendered
    }

    fn percent(&mut self) -> CalcResult<Outcome> {
        let current = self.current_number();
        let value = match (self.pending_operator, self.pending_operand) {
            (Some(_), Some(pending)) => pending * current / 100.0,
            _ => current / 100.0,
        };
        if !value.is_finite() {
            return Err(CalcError::ResultOverflow);
        }

        self.set_literal(number_to_string(value));
        Ok(Outcome::Rendered)
    }

    fn unary(&mut self, op: UnaryOp) -> CalcResult<Outcome> {
        let operand = self.current_number();
        let result = op.apply(operand)?;

        self.history_text = op.trace(&format_number(self.shown_number()));
        self.set_literal(number_to_string(result));
        self.awaiting_fresh_operand = true;
        Ok(Outcome::Rendered)
    }

    fn memory_recall(&mut self) -> Outcome {
        self.set_literal(number_to_string(self.memory));
        self.awaiting_fresh_operand = true;
        Outcome::Rendered
    }

    fn memory_accumulate(&mut self, sign: f64) -> CalcResult<Outcome> {
        let updated = self.memory + sign * self.shown_number();
        if !updated.is_finite() {
            return Err(CalcError::ResultOverflow);
        }

        self.memory = snap_significant(updated);
        self.awaiting_fresh_operand = true;
        Ok(Outcome::MemoryIndicator)
    }
}

/// The calculator core: state plus the error currently on display
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    state: CalculatorState,
    error: Option<CalcError>,
}

impl Accumulator {
    /// Creates an accumulator in its default state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the calculation state
    #[must_use]
    pub const fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// The error currently on display, if any
    #[must_use]
    pub const fn error(&self) -> Option<CalcError> {
        self.error
    }

    /// Applies an action and returns the snapshot to paint
    pub fn dispatch(&mut self, action: Action) -> RenderSnapshot {
        let _ = self.apply(action);
        self.snapshot()
    }

    /// Applies an action.
    ///
    /// A failure is also recorded for the next [`snapshot`](Self::snapshot);
    /// an accepted action that repaints the display clears it. Actions that
    /// only touch memory leave an error message in place.
    pub fn apply(&mut self, action: Action) -> CalcResult<Outcome> {
        debug!(?action, operand = %self.state.current_operand, "apply");

        let result = match action {
            Action::Digit(d) => self.state.input_digit(d),
            Action::Decimal => Ok(self.state.input_decimal()),
            Action::Operator(op) => self.state.set_operator(op),
            Action::Evaluate => self.state.evaluate(),
            Action::Clear => {
                self.state.clear();
                Ok(Outcome::Rendered)
            }
            Action::Backspace => Ok(self.state.backspace()),
            Action::Negate => Ok(self.state.negate()),
            Action::Percent => self.state.percent(),
            Action::Sqrt => self.state.unary(UnaryOp::Sqrt),
            Action::Square => self.state.unary(UnaryOp::Square),
            Action::Reciprocal => self.state.unary(UnaryOp::Reciprocal),
            Action::MemoryClear => {
                self.state.memory = 0.0;
                Ok(Outcome::MemoryIndicator)
            }
            Action::MemoryRecall => Ok(self.state.memory_recall()),
            Action::MemoryAdd => self.state.memory_accumulate(1.0),
            Action::MemorySubtract => self.state.memory_accumulate(-1.0),
        };

        match result {
            Ok(Outcome::Rendered) => self.error = None,
            Ok(_) => {}
            Err(err) => {
                warn!(?action, error = %err, "action rejected");
                self.error = Some(err);
            }
        }
        result
    }

    /// Builds the snapshot for the current state
    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        let display_text = match self.error {
            Some(err) => err.to_string(),
            None => display_literal(&self.state.current_operand),
        };
        let memory_text = if self.state.memory == 0.0 {
            String::new()
        } else {
            format!("M: {}", format_number(self.state.memory))
        };

        RenderSnapshot {
            display_text,
            history_text: self.state.history_text.clone(),
            memory_text,
            is_error: self.error.is_some(),
        }
    }

    /// Typed digit
    pub fn input_digit(&mut self, digit: u8) -> CalcResult<Outcome> {
        self.apply(Action::Digit(digit))
    }

    /// Typed decimal point
    pub fn input_decimal(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Decimal)
    }

    /// Chosen operator, chaining any pending operation first
    pub fn set_operator(&mut self, op: OperatorKind) -> CalcResult<Outcome> {
        self.apply(Action::Operator(op))
    }

    /// The "=" key
    pub fn evaluate(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Evaluate)
    }

    /// Resets everything except memory and drops any error message
    pub fn clear(&mut self) {
        let _ = self.apply(Action::Clear);
    }

    /// Erase the last typed character
    pub fn backspace(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Backspace)
    }

    /// Flip the sign
    pub fn negate(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Negate)
    }

    /// Percentage
    pub fn percent(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Percent)
    }

    /// Square root
    pub fn sqrt(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Sqrt)
    }

    /// Square
    pub fn square(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Square)
    }

    /// Reciprocal
    pub fn reciprocal(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::Reciprocal)
    }

    /// MC
    pub fn memory_clear(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::MemoryClear)
    }

    /// MR
    pub fn memory_recall(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::MemoryRecall)
    }

    /// M+
    pub fn memory_add(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::MemoryAdd)
    }

    /// M−
    pub fn memory_subtract(&mut self) -> CalcResult<Outcome> {
        self.apply(Action::MemorySubtract)
    }
}

/// Display text for an operand literal; a trailing point stays visible while typing
fn display_literal(literal: &str) -> String {
    let formatted = format_number(parse_operand(literal));
    if literal.ends_with('.') && !formatted.contains(['.', 'e']) {
        format!("{formatted}.")
    } else {
        formatted
    }
}
