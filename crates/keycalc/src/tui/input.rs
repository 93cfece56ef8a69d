//! Keyboard input handling
//!
//! Translates crossterm key events into [`KeyAction`]s. Printable keys go
//! through the shared character table in [`crate::keymap`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Action;
use crate::keymap::{action_for_char, KeyAction, Mode};

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action for the given mode
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, mode: Mode) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => action_for_char(c, mode),
            KeyCode::Enter => KeyAction::Calc(Action::Evaluate),
            KeyCode::Esc => KeyAction::Calc(Action::Clear),
            KeyCode::Backspace => KeyAction::Calc(Action::Backspace),
            KeyCode::Tab | KeyCode::BackTab => KeyAction::ToggleMode,
            _ => KeyAction::None,
        }
    }
}
