//! Character-to-action table shared by interactive and scripted input
//!
//! The terminal handler and `--keys` both funnel characters through
//! [`action_for_char`], so a script replays exactly what a user would type.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::{Action, OperatorKind};

/// Keypad mode
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Digits, operators, clear, backspace, percent and sign
    #[default]
    Basic,
    /// Basic plus √, x², 1/x and the memory keys
    Advanced,
}

impl Mode {
    /// Returns the other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Basic => Self::Advanced,
            Self::Advanced => Self::Basic,
        }
    }

    /// Returns true if `action` is reachable in this mode
    #[must_use]
    pub const fn allows(self, action: Action) -> bool {
        matches!(self, Self::Advanced) || !action.is_advanced()
    }

    /// Human-readable name for the status line
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Advanced => "Advanced",
        }
    }
}

/// What a key press asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the accumulator
    Calc(Action),
    /// Switch between basic and advanced mode
    ToggleMode,
    /// Leave the application
    Quit,
    /// Ignored input
    None,
}

/// Maps a typed character to an action in the given mode.
///
/// Advanced-only functions map to [`KeyAction::None`] in basic mode.
#[must_use]
pub fn action_for_char(c: char, mode: Mode) -> KeyAction {
    let action = match c {
        '0'..='9' => c.to_digit(10).map(|d| Action::Digit(d as u8)),
        '.' | ',' => Some(Action::Decimal),
        '=' | '\n' | '\r' => Some(Action::Evaluate),
        'c' | 'C' | '\u{1b}' => Some(Action::Clear),
        '\u{8}' | '\u{7f}' => Some(Action::Backspace),
        '%' => Some(Action::Percent),
        'n' => Some(Action::Negate),
        'q' => Some(Action::Sqrt),
        's' => Some(Action::Square),
        'i' => Some(Action::Reciprocal),
        'x' => Some(Action::MemoryClear),
        'r' => Some(Action::MemoryRecall),
        'a' => Some(Action::MemoryAdd),
        'd' => Some(Action::MemorySubtract),
        '\t' => return KeyAction::ToggleMode,
        _ => OperatorKind::from_key(c).map(Action::Operator),
    };

    match action {
        Some(action) if mode.allows(action) => KeyAction::Calc(action),
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_basic() {
        assert_eq!(Mode::default(), Mode::Basic);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Basic.toggled(), Mode::Advanced);
        assert_eq!(Mode::Advanced.toggled(), Mode::Basic);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Advanced).unwrap(), "\"advanced\"");
        let mode: Mode = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(mode, Mode::Basic);
    }

    #[test]
    fn test_digits() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(
                action_for_char(c, Mode::Basic),
                KeyAction::Calc(Action::Digit(i as u8))
            );
        }
    }

    #[test]
    fn test_operators() {
        for op in OperatorKind::ALL {
            assert_eq!(
                action_for_char(op.key(), Mode::Basic),
                KeyAction::Calc(Action::Operator(op))
            );
        }
    }

    #[test]
    fn test_decimal_accepts_comma() {
        assert_eq!(
            action_for_char(',', Mode::Basic),
            KeyAction::Calc(Action::Decimal)
        );
        assert_eq!(
            action_for_char('.', Mode::Basic),
            KeyAction::Calc(Action::Decimal)
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(action_for_char('=', Mode::Basic), KeyAction::Calc(Action::Evaluate));
        assert_eq!(action_for_char('c', Mode::Basic), KeyAction::Calc(Action::Clear));
        assert_eq!(action_for_char('C', Mode::Basic), KeyAction::Calc(Action::Clear));
        assert_eq!(action_for_char('%', Mode::Basic), KeyAction::Calc(Action::Percent));
        assert_eq!(action_for_char('n', Mode::Basic), KeyAction::Calc(Action::Negate));
        assert_eq!(action_for_char('\t', Mode::Basic), KeyAction::ToggleMode);
    }

    #[test]
    fn test_advanced_keys_gated() {
        for c in ['q', 's', 'i', 'x', 'r', 'a', 'd'] {
            assert_eq!(action_for_char(c, Mode::Basic), KeyAction::None, "{c}");
            assert!(matches!(
                action_for_char(c, Mode::Advanced),
                KeyAction::Calc(action) if action.is_advanced()
            ));
        }
    }

    #[test]
    fn test_unknown_chars() {
        for c in ['z', '^', '(', ' ', 'é'] {
            assert_eq!(action_for_char(c, Mode::Advanced), KeyAction::None);
        }
    }
}
