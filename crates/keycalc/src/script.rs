//! Scripted input
//!
//! Replays a string of keys against an [`Accumulator`] with no terminal and
//! no error timer: an error stays on the display until a later key clears it.

use tracing::debug;

use crate::core::{Accumulator, RenderSnapshot};
use crate::keymap::{action_for_char, KeyAction, Mode};

/// Types `keys` starting in `mode` and returns the final snapshot.
///
/// Tab toggles the mode as it does interactively. Characters with no
/// binding in the current mode are skipped.
#[must_use]
pub fn run_keys(keys: &str, mode: Mode) -> RenderSnapshot {
    let mut accumulator = Accumulator::new();
    let mut mode = mode;

    for c in keys.chars() {
        match action_for_char(c, mode) {
            KeyAction::Calc(action) => {
                let _ = accumulator.apply(action);
            }
            KeyAction::ToggleMode => mode = mode.toggled(),
            KeyAction::Quit | KeyAction::None => debug!(key = ?c, ?mode, "skipped"),
        }
    }

    accumulator.snapshot()
}
