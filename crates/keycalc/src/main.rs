//! keycalc binary
//!
//! Opens the terminal UI, or with `--keys` replays keystrokes and prints the
//! display.

use std::io::{self, Stdout, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::cli::Cli;
use keycalc::config::CalcConfig;
use keycalc::error::{AppError, AppResult};
use keycalc::logging;
use keycalc::script::run_keys;
use keycalc::tui::{render, CalculatorApp};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

/// Longest wait for input when no error is counting down
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config()?;

    if let Some(path) = &cli.log_file {
        logging::init_file(path, &config.log_filter)?;
    }

    match &cli.keys {
        Some(keys) => run_script(keys, &config, cli.json),
        None => {
            run_interactive(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_script(keys: &str, config: &CalcConfig, json: bool) -> AppResult<ExitCode> {
    let snapshot = run_keys(keys, config.start_mode);

    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        println!("{}", snapshot.display_text);
    }

    Ok(if snapshot.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_interactive(config: &CalcConfig) -> AppResult<()> {
    info!(mode = ?config.start_mode, "starting keycalc");

    enable_raw_mode()?;
    let result = with_restore(
        || {
            let mut stdout = io::stdout();
            enter_screen(&mut stdout)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            run_app(&mut terminal, config)
        },
        || restore_terminal(&mut io::stdout()),
    );

    info!("keycalc exited");
    result
}

/// Runs `body`, then `restore` whatever happened. The body's error wins.
fn with_restore<T>(
    body: impl FnOnce() -> AppResult<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> AppResult<T> {
    let result = body();
    let restored = restore().map_err(AppError::from);
    result.and_then(|value| restored.map(|()| value))
}

fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
}

/// Leaves raw mode and the alternate screen; safe even if setup stopped halfway
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &CalcConfig,
) -> AppResult<()> {
    let mut app = CalculatorApp::new(config);

    while !app.should_quit() {
        let completed = terminal.draw(|f| render(&app, f))?;
        let frame = completed.area;

        if event::poll(app.poll_timeout(Instant::now(), IDLE_POLL))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.click(frame, mouse.column, mouse.row, Instant::now());
                }
                _ => {}
            }
        }

        app.tick(Instant::now());
    }

    Ok(())
}
