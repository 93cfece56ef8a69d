//! Terminal frontend for the calculator
//!
//! A thin shell: it turns key and mouse events into accumulator actions,
//! paints snapshots, and owns the error timer. No arithmetic lives here.

mod app;
mod input;
mod keypad;
mod timer;
mod ui;

pub use app::CalculatorApp;
pub use input::InputHandler;
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use timer::{ErrorTimer, DEFAULT_ERROR_DISPLAY};
pub use ui::{render, screen_layout, CalculatorUI, ScreenLayout};
