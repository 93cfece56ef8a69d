//! On-screen keypad for the terminal calculator
//!
//! The keypad can be clicked with the mouse and highlights the button
//! matching the last input. Its layout depends on the [`Mode`]:
//!
//! ```text
//! [MC ] [MR ] [M+ ] [M− ]   advanced only
//! [ √ ] [x² ] [1/x]         advanced only
//! [ C ] [ ⌫ ] [ % ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ − ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [ ± ] [ 0 ] [ . ] [ = ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{Action, OperatorKind};
use crate::keymap::Mode;

/// Buttons per row
const COLS: usize = 4;

static MEMORY_ROW: [Action; 4] = [
    Action::MemoryClear,
    Action::MemoryRecall,
    Action::MemoryAdd,
    Action::MemorySubtract,
];

static FUNCTION_ROW: [Action; 3] = [Action::Sqrt, Action::Square, Action::Reciprocal];

static BASIC_ROWS: [[Action; 4]; 5] = [
    [
        Action::Clear,
        Action::Backspace,
        Action::Percent,
        Action::Operator(OperatorKind::Div),
    ],
    [
        Action::Digit(7),
        Action::Digit(8),
        Action::Digit(9),
        Action::Operator(OperatorKind::Mul),
    ],
    [
        Action::Digit(4),
        Action::Digit(5),
        Action::Digit(6),
        Action::Operator(OperatorKind::Sub),
    ],
    [
        Action::Digit(1),
        Action::Digit(2),
        Action::Digit(3),
        Action::Operator(OperatorKind::Add),
    ],
    [
        Action::Negate,
        Action::Digit(0),
        Action::Decimal,
        Action::Evaluate,
    ],
];

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: Action,
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates a released button at the given cell
    #[must_use]
    pub const fn new(action: Action, row: usize, col: usize) -> Self {
        Self {
            action,
            row,
            col,
            pressed: false,
        }
    }

    /// Text printed on the button
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    fn style(&self) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        let color = match self.action {
            Action::Digit(_) | Action::Decimal => Color::White,
            Action::Operator(_) => Color::Yellow,
            Action::Evaluate => Color::Green,
            Action::Clear | Action::Backspace => Color::Red,
            Action::MemoryClear
            | Action::MemoryRecall
            | Action::MemoryAdd
            | Action::MemorySubtract => Color::Magenta,
            _ => Color::Cyan,
        };
        Style::default().fg(color)
    }
}

/// The keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    mode: Mode,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(Mode::Basic)
    }
}

impl Keypad {
    /// Creates the keypad for a mode
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        let mut rows: Vec<&[Action]> = Vec::new();
        if mode == Mode::Advanced {
            rows.push(&MEMORY_ROW);
            rows.push(&FUNCTION_ROW);
        }
        rows.extend(BASIC_ROWS.iter().map(|r| r.as_slice()));

        let buttons = rows
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButton::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            rows: rows.len(),
            mode,
        }
    }

    /// Rebuilds the layout for another mode
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            *self = Self::new(mode);
        }
    }

    /// Mode this layout was built for
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, COLS)
    }

    /// Gets a button by row and column; empty cells return `None`
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds the button that performs `action`
    #[must_use]
    pub fn find_button(&self, action: Action) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for `action`, releasing the others
    pub fn highlight(&mut self, action: Action) {
        for btn in &mut self.buttons {
            btn.set_pressed(btn.action == action);
        }
    }

    /// Returns the highlighted button, if any
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Converts a click position inside `area` to the action under it
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<Action> {
        let (btn_width, btn_height) = self.cell_size(area)?;
        let inner = inner_area(area);
        if x < inner.x || y < inner.y || x >= inner.right() || y >= inner.bottom() {
            return None;
        }

        let col = usize::from((x - inner.x) / btn_width);
        let row = usize::from((y - inner.y) / btn_height);
        self.button_at(row, col).map(|b| b.action)
    }

    fn cell_size(&self, area: Rect) -> Option<(u16, u16)> {
        let inner = inner_area(area);
        let btn_width = inner.width / COLS as u16;
        let btn_height = inner.height / self.rows as u16;
        (btn_width > 0 && btn_height > 0).then_some((btn_width, btn_height))
    }
}

/// Area inside the one-cell border
fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let Some((btn_width, btn_height)) = self.keypad.cell_size(area) else {
            return;
        };
        if btn_width < 3 {
            return;
        }
        let inner = inner_area(area);

        for btn in self.keypad.buttons() {
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height + btn_height / 2;

            let span = Span::styled(format!("[{}]", btn.label()), btn.style());
            let label_x = x + btn_width.saturating_sub(span.width() as u16) / 2;
            if y < inner.bottom() && label_x < inner.right() {
                buf.set_span(label_x, y, &span, btn_width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    // ===== KeypadButton =====

    #[test]
    fn test_button_new_is_released() {
        let btn = KeypadButton::new(Action::Digit(5), 2, 1);
        assert!(!btn.pressed);
        assert_eq!(btn.label(), "5");
        assert_eq!((btn.row, btn.col), (2, 1));
    }

    #[test]
    fn test_button_pressed_state() {
        let mut btn = KeypadButton::new(Action::Evaluate, 0, 0);
        btn.set_pressed(true);
        assert!(btn.pressed);
        btn.set_pressed(false);
        assert!(!btn.pressed);
    }

    // ===== Layout =====

    #[test]
    fn test_basic_dimensions() {
        let keypad = Keypad::new(Mode::Basic);
        assert_eq!(keypad.dimensions(), (5, 4));
        assert_eq!(keypad.button_count(), 20);
    }

    #[test]
    fn test_advanced_dimensions() {
        let keypad = Keypad::new(Mode::Advanced);
        assert_eq!(keypad.dimensions(), (7, 4));
        assert_eq!(keypad.button_count(), 27);
    }

    #[test]
    fn test_basic_rows() {
        let keypad = Keypad::new(Mode::Basic);
        let labels = |row| {
            (0..4)
                .map(|col| keypad.button_at(row, col).unwrap().label())
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(0), ["C", "⌫", "%", "÷"]);
        assert_eq!(labels(1), ["7", "8", "9", "×"]);
        assert_eq!(labels(4), ["±", "0", ".", "="]);
    }

    #[test]
    fn test_advanced_rows() {
        let keypad = Keypad::new(Mode::Advanced);
        assert_eq!(keypad.button_at(0, 0).unwrap().label(), "MC");
        assert_eq!(keypad.button_at(0, 3).unwrap().label(), "M−");
        assert_eq!(keypad.button_at(1, 2).unwrap().label(), "1/x");
        assert!(keypad.button_at(1, 3).is_none());
        assert_eq!(keypad.button_at(2, 0).unwrap().label(), "C");
    }

    #[test]
    fn test_basic_has_no_advanced_buttons() {
        let keypad = Keypad::new(Mode::Basic);
        assert!(keypad.buttons().all(|b| !b.action.is_advanced()));
    }

    #[test]
    fn test_every_digit_and_operator_present() {
        let keypad = Keypad::new(Mode::Basic);
        for d in 0..=9 {
            assert!(keypad.find_button(Action::Digit(d)).is_some(), "digit {d}");
        }
        for op in OperatorKind::ALL {
            assert!(keypad.find_button(Action::Operator(op)).is_some());
        }
    }

    #[test]
    fn test_set_mode_rebuilds() {
        let mut keypad = Keypad::new(Mode::Basic);
        keypad.set_mode(Mode::Advanced);
        assert_eq!(keypad.mode(), Mode::Advanced);
        assert!(keypad.find_button(Action::Sqrt).is_some());
        keypad.set_mode(Mode::Basic);
        assert!(keypad.find_button(Action::Sqrt).is_none());
    }

    // ===== Highlight =====

    #[test]
    fn test_highlight_releases_others() {
        let mut keypad = Keypad::new(Mode::Basic);
        keypad.highlight(Action::Digit(1));
        keypad.highlight(Action::Digit(2));
        let pressed: Vec<_> = keypad.buttons().filter(|b| b.pressed).collect();
        assert_eq!(pressed.len(), 1);
        assert_eq!(pressed[0].action, Action::Digit(2));
    }

    #[test]
    fn test_release_all() {
        let mut keypad = Keypad::new(Mode::Basic);
        keypad.highlight(Action::Evaluate);
        keypad.release_all();
        assert!(keypad.pressed().is_none());
    }

    // ===== Hit testing =====

    #[test]
    fn test_hit_test_cells() {
        let keypad = Keypad::new(Mode::Basic);
        // 4 cols x 6 wide, 5 rows x 2 high inside the border
        let area = Rect::new(0, 0, 26, 12);
        assert_eq!(keypad.hit_test(area, 1, 1), Some(Action::Clear));
        assert_eq!(keypad.hit_test(area, 7, 3), Some(Action::Digit(8)));
        assert_eq!(keypad.hit_test(area, 24, 10), Some(Action::Evaluate));
    }

    #[test]
    fn test_hit_test_border_and_outside() {
        let keypad = Keypad::new(Mode::Basic);
        let area = Rect::new(10, 10, 26, 12);
        assert_eq!(keypad.hit_test(area, 10, 10), None);
        assert_eq!(keypad.hit_test(area, 0, 0), None);
        assert_eq!(keypad.hit_test(area, 100, 100), None);
    }

    #[test]
    fn test_hit_test_empty_cell() {
        let keypad = Keypad::new(Mode::Advanced);
        // 7 rows x 2 high; row 1 col 3 is empty
        let area = Rect::new(0, 0, 26, 16);
        assert_eq!(keypad.hit_test(area, 20, 3), None);
        assert_eq!(keypad.hit_test(area, 1, 3), Some(Action::Sqrt));
    }

    #[test]
    fn test_hit_test_tiny_area() {
        let keypad = Keypad::new(Mode::Basic);
        assert_eq!(keypad.hit_test(Rect::new(0, 0, 3, 3), 1, 1), None);
    }

    // ===== Widget =====

    #[test]
    fn test_widget_render() {
        let keypad = Keypad::new(Mode::Basic);
        let area = Rect::new(0, 0, 26, 12);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("Keypad"));
        assert!(content.contains("[7]"));
        assert!(content.contains("[=]"));
    }

    #[test]
    fn test_widget_render_advanced_labels() {
        let keypad = Keypad::new(Mode::Advanced);
        let area = Rect::new(0, 0, 30, 16);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("[MC]"));
        assert!(content.contains("[1/x]"));
    }

    #[test]
    fn test_widget_render_small() {
        let keypad = Keypad::new(Mode::Basic);
        let area = Rect::new(0, 0, 5, 5);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad).render(area, &mut buf);
    }

    #[test]
    fn test_widget_render_pressed_style() {
        let mut keypad = Keypad::new(Mode::Basic);
        keypad.highlight(Action::Digit(7));
        let area = Rect::new(0, 0, 26, 12);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad).render(area, &mut buf);

        let highlighted = buf
            .content()
            .iter()
            .filter(|c| c.bg == Color::Yellow)
            .count();
        assert_eq!(highlighted, 3);
    }
}
