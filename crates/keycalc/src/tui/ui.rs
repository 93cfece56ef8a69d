//! TUI rendering
//!
//! Paints a [`CalculatorApp`] snapshot: display panel, status line, keypad
//! and a help sidebar.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::keymap::Mode;

/// Title on the outer border
pub const TITLE: &str = " keycalc ";

/// Width of the keypad column
const KEYPAD_WIDTH: u16 = 26;

/// Width of the help column
const HELP_WIDTH: u16 = 22;

/// Key bindings available in every mode
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+ - * /", "Operators"),
    ("Enter =", "Evaluate"),
    ("Esc c", "Clear"),
    ("Bksp", "Erase"),
    ("%", "Percent"),
    ("n", "Negate"),
    ("Tab", "Mode"),
    ("Ctrl+C", "Quit"),
];

/// Key bindings added in advanced mode
pub const HELP_ADVANCED: &[(&str, &str)] = &[("q s i", "√ x² 1/x"), ("x r a d", "MC MR M+ M−")];

/// Screen regions for a given frame size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// History and display panel
    pub display: Rect,
    /// Memory indicator and mode
    pub status: Rect,
    /// Keypad, when shown
    pub keypad: Option<Rect>,
    /// Help sidebar
    pub help: Rect,
}

/// Splits the frame into its regions
#[must_use]
pub fn screen_layout(area: Rect, show_keypad: bool) -> ScreenLayout {
    let mut constraints = vec![Constraint::Min(28)];
    if show_keypad {
        constraints.push(Constraint::Length(KEYPAD_WIDTH));
    }
    constraints.push(Constraint::Length(HELP_WIDTH));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints(constraints)
        .split(area);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // History + display
            Constraint::Length(3), // Status
            Constraint::Min(0),
        ])
        .split(columns[0]);

    ScreenLayout {
        display: main[0],
        status: main[1],
        keypad: show_keypad.then(|| columns[1]),
        help: columns[columns.len() - 1],
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.app.snapshot();

        let value_style = if snapshot.is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                snapshot.history_text.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(snapshot.display_text.as_str(), value_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.app.snapshot();
        let memory = if snapshot.memory_text.is_empty() {
            Span::raw("")
        } else {
            Span::styled(
                snapshot.memory_text.as_str(),
                Style::default().fg(Color::Magenta),
            )
        };

        let line = Line::from(vec![
            Span::styled(
                format!("[{}] ", self.app.mode().label()),
                Style::default().fg(Color::Cyan),
            ),
            memory,
        ]);

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let mut entries: Vec<&(&str, &str)> = HELP_SHORTCUTS.iter().collect();
        if self.app.mode() == Mode::Advanced {
            entries.extend(HELP_ADVANCED.iter());
        }

        let items: Vec<ListItem> = entries
            .into_iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let layout = screen_layout(area, self.app.show_keypad());
        self.render_display(layout.display, buf);
        self.render_status(layout.status, buf);
        if let Some(keypad_area) = layout.keypad {
            KeypadWidget::new(self.app.keypad()).render(keypad_area, buf);
        }
        self.render_help(layout.help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalcConfig;
    use crate::core::OperatorKind;
    use crate::core::Action;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn draw(app: &CalculatorApp) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press_all(app: &mut CalculatorApp, actions: &[Action]) {
        let now = Instant::now();
        for action in actions {
            let _ = app.press(*action, now);
        }
    }

    // ===== Layout =====

    #[test]
    fn test_layout_with_keypad() {
        let layout = screen_layout(Rect::new(0, 0, 80, 24), true);
        let keypad = layout.keypad.unwrap();
        assert_eq!(keypad.width, KEYPAD_WIDTH);
        assert_eq!(layout.help.width, HELP_WIDTH);
        assert_eq!(layout.display.height, 4);
        assert_eq!(layout.status.height, 3);
        assert!(layout.display.right() <= keypad.x);
        assert!(keypad.right() <= layout.help.x);
    }

    #[test]
    fn test_layout_without_keypad() {
        let layout = screen_layout(Rect::new(0, 0, 80, 24), false);
        assert!(layout.keypad.is_none());
        assert_eq!(layout.help.width, HELP_WIDTH);
        assert!(layout.display.width > 40);
    }

    // ===== Rendering =====

    #[test]
    fn test_render_default() {
        let app = CalculatorApp::default();
        let content = draw(&app);
        assert!(content.contains("keycalc"));
        assert!(content.contains("Display"));
        assert!(content.contains("[Basic]"));
        assert!(content.contains("Keypad"));
        assert!(content.contains("Help"));
    }

    #[test]
    fn test_render_result_and_history() {
        let mut app = CalculatorApp::default();
        press_all(
            &mut app,
            &[
                Action::Digit(6),
                Action::Operator(OperatorKind::Mul),
                Action::Digit(7),
                Action::Evaluate,
            ],
        );
        let content = draw(&app);
        assert!(content.contains("42"));
        assert!(content.contains("6 × 7 ="));
    }

    #[test]
    fn test_render_error_in_red() {
        let mut app = CalculatorApp::default();
        press_all(
            &mut app,
            &[
                Action::Digit(1),
                Action::Operator(OperatorKind::Div),
                Action::Digit(0),
                Action::Evaluate,
            ],
        );

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let buffer = terminal.backend().buffer();

        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Cannot divide by zero"));

        let layout = screen_layout(Rect::new(0, 0, 80, 24), true);
        let row = layout.display.y + 2;
        let red = (layout.display.x..layout.display.right())
            .filter(|&x| buffer[(x, row)].fg == Color::Red)
            .count();
        assert!(red > 0);
    }

    #[test]
    fn test_render_memory_indicator() {
        let config = CalcConfig::new().with_start_mode(Mode::Advanced);
        let mut app = CalculatorApp::new(&config);
        press_all(&mut app, &[Action::Digit(5), Action::MemoryAdd]);
        let content = draw(&app);
        assert!(content.contains("M: 5"));
        assert!(content.contains("[Advanced]"));
    }

    #[test]
    fn test_render_advanced_help() {
        let config = CalcConfig::new().with_start_mode(Mode::Advanced);
        let app = CalculatorApp::new(&config);
        let content = draw(&app);
        assert!(content.contains("MC MR M+ M−"));
        assert!(content.contains("[MC]"));
    }

    #[test]
    fn test_render_basic_hides_advanced_help() {
        let app = CalculatorApp::default();
        let content = draw(&app);
        assert!(!content.contains("MC MR"));
    }

    #[test]
    fn test_render_without_keypad() {
        let config = CalcConfig::new().with_show_keypad(false);
        let app = CalculatorApp::new(&config);
        let content = draw(&app);
        assert!(!content.contains("Keypad"));
        assert!(content.contains("Help"));
    }

    #[test]
    fn test_render_small_terminal() {
        let app = CalculatorApp::default();
        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
