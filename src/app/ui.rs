//! Rendering for the interactive clock/timer.
//!
//! Fixed layout, redrawn once per second and on every input event:
//! date/time header, large timer display, mode selector, and (in Pomodoro
//! mode) the settings fields, stats line and session history.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::state::{App, Field, Mode};

/// Draws one full frame.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.mode {
        Mode::Clock => draw_clock(frame, app),
        Mode::Pomodoro => draw_pomodoro(frame, app),
    }
}

fn draw_clock(frame: &mut Frame, app: &App) {
    let [date, timer, _, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(app.date_line.as_str()).alignment(Alignment::Center),
        date,
    );
    frame.render_widget(timer_widget(&app.timer_text), timer);
    frame.render_widget(help_widget(app.mode), help);
}

fn draw_pomodoro(frame: &mut Frame, app: &App) {
    let [phase, timer, settings, error, stats, history, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(app.phase_line.as_str()).alignment(Alignment::Center),
        phase,
    );
    frame.render_widget(timer_widget(&app.timer_text), timer);
    frame.render_widget(
        Paragraph::new(settings_line(app)).alignment(Alignment::Center),
        settings,
    );

    if let Some(message) = &app.error {
        frame.render_widget(
            Paragraph::new(message.as_str())
                .style(Style::new().fg(Color::Red))
                .alignment(Alignment::Center),
            error,
        );
    }

    frame.render_widget(Paragraph::new(app.stats.summary_line()), stats);
    frame.render_widget(history_widget(app, history.height), history);
    frame.render_widget(help_widget(app.mode), help);
}

/// The large central timer/clock display.
fn timer_widget(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::new().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Builds the settings line with the focused field highlighted.
fn settings_line(app: &App) -> Line<'_> {
    let field = |label: &'static str, value: &str, focused: bool| {
        let style = if focused {
            Style::new().add_modifier(Modifier::REVERSED)
        } else {
            Style::new()
        };
        vec![
            Span::raw(label),
            Span::styled(format!("[{:>3}]", value), style),
            Span::raw("  "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(field(
        "Work (min): ",
        &app.work_input,
        app.focused == Field::Work,
    ));
    spans.extend(field(
        "Break (min): ",
        &app.break_input,
        app.focused == Field::Break,
    ));
    spans.extend(field(
        "Cycles: ",
        &app.cycles_input,
        app.focused == Field::Cycles,
    ));
    Line::from(spans)
}

/// The scrolling history log, pinned to the newest entries.
fn history_widget(app: &App, height: u16) -> List<'_> {
    // Reserve two rows for the block borders
    let visible = height.saturating_sub(2) as usize;
    let skip = app.history.len().saturating_sub(visible);

    let items: Vec<ListItem> = app
        .history
        .iter()
        .skip(skip)
        .map(|entry| ListItem::new(entry.to_line()))
        .collect();

    List::new(items).block(Block::default().borders(Borders::ALL).title("History"))
}

fn help_widget(mode: Mode) -> Paragraph<'static> {
    let text = match mode {
        Mode::Clock => "q: quit | p: Pomodoro mode",
        Mode::Pomodoro => "s: Start | x: Stop | Tab: field | 0-9: edit | c: Clock mode | q: quit",
    };
    Paragraph::new(text).style(Style::new().fg(Color::DarkGray))
}

// ============================================================================
// Tests
// ============================================================================
