//! Interactive clock/timer application.
//!
//! A full-screen terminal application with two modes:
//! - Clock: live date and time, refreshed every second
//! - Pomodoro: configurable work/break cycles with history and stats
//!
//! Structure:
//! - `state`: the application state machine and its command vocabulary
//! - `ui`: per-frame rendering
//! - [`run`]: terminal setup, event loop, teardown

mod state;
mod ui;

pub use state::{App, Command, Field, Mode};

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::alert::SystemAlert;

/// Display refresh and timer granularity.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Runs the interactive application until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into raw mode or a
/// draw/input operation fails.
pub fn run() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(SystemAlert::new()));
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    // Populate the clock before the first frame
    app.on_tick();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = map_key(key.code) {
                        debug!(?command, "Applying key command");
                        app.apply(command);
                    }
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Maps a key press to an application command.
fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') => Some(Command::SwitchMode(Mode::Clock)),
        KeyCode::Char('p') => Some(Command::SwitchMode(Mode::Pomodoro)),
        KeyCode::Char('s') => Some(Command::Start),
        KeyCode::Char('x') => Some(Command::Stop),
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Command::Input(c)),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
