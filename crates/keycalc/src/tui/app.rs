//! TUI application state
//!
//! Owns the accumulator, the latest snapshot, the keypad and the error
//! timer. Every method that can change what is on screen takes `now` so the
//! event loop, not the app, decides what time it is.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tracing::{debug, info};

use super::input::InputHandler;
use super::keypad::Keypad;
use super::timer::ErrorTimer;
use super::ui::screen_layout;
use crate::config::CalcConfig;
use crate::core::{Accumulator, Action, CalcResult, Outcome, RenderSnapshot};
use crate::keymap::{KeyAction, Mode};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    accumulator: Accumulator,
    snapshot: RenderSnapshot,
    mode: Mode,
    keypad: Keypad,
    show_keypad: bool,
    timer: ErrorTimer,
    input: InputHandler,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(&CalcConfig::default())
    }
}

impl CalculatorApp {
    /// Creates an app from configuration
    #[must_use]
    pub fn new(config: &CalcConfig) -> Self {
        let accumulator = Accumulator::new();
        let snapshot = accumulator.snapshot();
        Self {
            accumulator,
            snapshot,
            mode: config.start_mode,
            keypad: Keypad::new(config.start_mode),
            show_keypad: config.show_keypad,
            timer: ErrorTimer::new(config.error_display()),
            input: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Returns the snapshot to paint
    #[must_use]
    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    /// Returns the underlying accumulator
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the current mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the keypad is drawn
    #[must_use]
    pub fn show_keypad(&self) -> bool {
        self.show_keypad
    }

    /// Returns the error timer
    #[must_use]
    pub fn timer(&self) -> &ErrorTimer {
        &self.timer
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handles a key press
    pub fn handle_key(&mut self, event: KeyEvent, now: Instant) {
        let action = self.input.handle_key(event, self.mode);
        self.handle_action(action, now);
    }

    /// Handles an already translated key action
    pub fn handle_action(&mut self, action: KeyAction, now: Instant) {
        match action {
            KeyAction::Calc(action) => {
                let _ = self.press(action, now);
            }
            KeyAction::ToggleMode => self.toggle_mode(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Sends an action to the accumulator and manages the error timer.
    ///
    /// Actions hidden in the current mode are ignored.
    pub fn press(&mut self, action: Action, now: Instant) -> CalcResult<Outcome> {
        if !self.mode.allows(action) {
            debug!(?action, mode = ?self.mode, "action not available in mode");
            return Ok(Outcome::Unchanged);
        }

        let result = self.accumulator.apply(action);
        self.keypad.highlight(action);
        self.snapshot = self.accumulator.snapshot();

        match result {
            Ok(Outcome::Rendered) => self.timer.cancel(),
            Ok(_) => {}
            Err(_) => {
                if !self.timer.is_armed() {
                    info!(delay_ms = self.timer.delay().as_millis(), "error timer armed");
                }
                self.timer.arm(now);
            }
        }
        result
    }

    /// Handles a mouse click at terminal cell (`x`, `y`) in a frame of `frame` size
    pub fn click(&mut self, frame: Rect, x: u16, y: u16, now: Instant) {
        if !self.show_keypad {
            return;
        }
        let layout = screen_layout(frame, true);
        if let Some(action) = layout
            .keypad
            .and_then(|area| self.keypad.hit_test(area, x, y))
        {
            let _ = self.press(action, now);
        }
    }

    /// Clears the error once its display time is over
    pub fn tick(&mut self, now: Instant) {
        if self.timer.fire(now) {
            info!("error timer fired, clearing");
            self.accumulator.clear();
            self.keypad.release_all();
            self.snapshot = self.accumulator.snapshot();
        }
    }

    /// Switches between basic and advanced mode
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.keypad.set_mode(self.mode);
        info!(mode = self.mode.label(), "mode toggled");
    }

    /// How long the event loop may block waiting for input
    #[must_use]
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.timer.remaining(now).map_or(idle, |left| left.min(idle))
    }
}
