//! Application state for the interactive clock/timer.
//!
//! The controller is a single state machine driven by discrete commands
//! (start, stop, switch mode, edit fields). There are no cooperative
//! flags polled inside loops: the event loop delivers one command or one
//! tick at a time and the state reacts.

use std::sync::Arc;

use chrono::Local;
use tracing::warn;

use crate::alert::AlertSink;
use crate::cli::parse_count;
use crate::engine::{CycleEngine, TimerEvent};
use crate::types::{format_clock, CyclePlan, HistoryEntry, SessionKind, Stats};

// ============================================================================
// Mode
// ============================================================================

/// The two mutually exclusive display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Live date/time display
    #[default]
    Clock,
    /// Pomodoro timer with settings, history and stats
    Pomodoro,
}

// ============================================================================
// Field
// ============================================================================

/// The editable numeric fields in Pomodoro mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// Work minutes field
    #[default]
    Work,
    /// Break minutes field
    Break,
    /// Cycle count field
    Cycles,
}

impl Field {
    /// Returns the next field in tab order.
    pub fn next(self) -> Self {
        match self {
            Field::Work => Field::Break,
            Field::Break => Field::Cycles,
            Field::Cycles => Field::Work,
        }
    }
}

// ============================================================================
// Command
// ============================================================================

/// Discrete user commands delivered by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch to the given mode
    SwitchMode(Mode),
    /// Start a Pomodoro run from the current field values
    Start,
    /// Stop the active run
    Stop,
    /// Move focus to the next settings field
    FocusNext,
    /// Append a digit to the focused field
    Input(char),
    /// Delete the last digit of the focused field
    Backspace,
    /// Quit the application
    Quit,
}

// ============================================================================
// ActiveRun
// ============================================================================

/// An in-progress Pomodoro run: the engine plus its event stream.
struct ActiveRun {
    engine: CycleEngine,
    events: tokio::sync::mpsc::UnboundedReceiver<TimerEvent>,
    plan: CyclePlan,
}

// ============================================================================
// App
// ============================================================================

/// Maximum digits accepted per settings field.
const FIELD_MAX_LEN: usize = 3;

/// The interactive application state.
pub struct App {
    /// Current display mode
    pub mode: Mode,
    /// Work minutes field text
    pub work_input: String,
    /// Break minutes field text
    pub break_input: String,
    /// Cycle count field text
    pub cycles_input: String,
    /// Which settings field has focus
    pub focused: Field,
    /// Current date/time line (Clock mode)
    pub date_line: String,
    /// Main timer/clock display text
    pub timer_text: String,
    /// Phase header, e.g. "Work Session 1/4"
    pub phase_line: String,
    /// Validation or status error shown to the user
    pub error: Option<String>,
    /// Completed sessions, append-only
    pub history: Vec<HistoryEntry>,
    /// Aggregate stats, monotonically non-decreasing
    pub stats: Stats,
    /// Set when the user asks to quit
    pub should_quit: bool,

    run: Option<ActiveRun>,
    alert: Arc<dyn AlertSink>,
}

impl App {
    /// Creates the app in Clock mode with default field values.
    pub fn new(alert: Arc<dyn AlertSink>) -> Self {
        Self {
            mode: Mode::Clock,
            work_input: "25".to_string(),
            break_input: "5".to_string(),
            cycles_input: "4".to_string(),
            focused: Field::Work,
            date_line: String::new(),
            timer_text: String::new(),
            phase_line: String::new(),
            error: None,
            history: Vec::new(),
            stats: Stats::default(),
            should_quit: false,
            run: None,
            alert,
        }
    }

    /// Returns true if a Pomodoro run is active.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.engine.is_running())
    }

    /// Applies one user command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SwitchMode(mode) => self.switch_mode(mode),
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::FocusNext => self.focused = self.focused.next(),
            Command::Input(c) => self.edit_field(|s| {
                if s.len() < FIELD_MAX_LEN && c.is_ascii_digit() {
                    s.push(c);
                }
            }),
            Command::Backspace => self.edit_field(|s| {
                s.pop();
            }),
            Command::Quit => self.should_quit = true,
        }
    }

    /// Advances the app by one second.
    ///
    /// In Clock mode this refreshes the date/time display; in Pomodoro mode
    /// it ticks the engine (if running) and applies the resulting events.
    pub fn on_tick(&mut self) {
        match self.mode {
            Mode::Clock => {
                let now = Local::now();
                self.date_line = now.format("%A, %B %d, %Y - %H:%M:%S").to_string();
                self.timer_text = now.format("%H:%M:%S").to_string();
            }
            Mode::Pomodoro => {
                if let Some(run) = &mut self.run {
                    if let Err(e) = run.engine.tick() {
                        warn!("Engine tick failed: {}", e);
                    }
                }
                self.apply_engine_events();
            }
        }
    }

    /// Switches display mode.
    ///
    /// Switching away from Pomodoro stops an active run first, so a hidden
    /// countdown can never keep running behind the clock.
    fn switch_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        if self.is_running() {
            self.stop();
        }

        self.mode = mode;
        self.error = None;
        match mode {
            Mode::Clock => {
                self.phase_line.clear();
                self.timer_text.clear();
            }
            Mode::Pomodoro => {
                self.date_line.clear();
                self.timer_text = "00:00".to_string();
            }
        }
        self.on_tick_display_only();
    }

    /// Starts a run from the current field values.
    ///
    /// Non-numeric input surfaces a validation error and mutates nothing.
    fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.error = None;

        let parsed = parse_count(&self.work_input)
            .and_then(|w| parse_count(&self.break_input).map(|b| (w, b)))
            .and_then(|(w, b)| parse_count(&self.cycles_input).map(|c| (w, b, c)));

        let (work, brk, cycles) = match parsed {
            Ok(values) => values,
            Err(message) => {
                self.error = Some(message);
                return;
            }
        };

        let plan = match CyclePlan::new(work, brk, cycles) {
            Ok(plan) => plan,
            Err(message) => {
                self.error = Some(message);
                return;
            }
        };

        let (mut engine, events) = CycleEngine::with_channel(plan.clone());
        if let Err(e) = engine.start() {
            self.error = Some(e.to_string());
            return;
        }

        self.run = Some(ActiveRun {
            engine,
            events,
            plan,
        });
        self.apply_engine_events();
    }

    /// Stops the active run.
    ///
    /// The aborted session gets no history entry and no alert; stats keep
    /// their current values and the timer display resets to zero.
    fn stop(&mut self) {
        let Some(run) = &mut self.run else {
            return;
        };
        if run.engine.is_running() {
            if let Err(e) = run.engine.stop() {
                warn!("Engine stop failed: {}", e);
            }
        }
        // The display reset arrives as a Stopped event
        self.apply_engine_events();
        self.run = None;
    }

    /// Applies pending engine events to the display, history and stats.
    fn apply_engine_events(&mut self) {
        let Some(run) = &mut self.run else {
            return;
        };

        let plan = run.plan.clone();
        let mut finished = false;

        while let Ok(event) = run.events.try_recv() {
            match event {
                TimerEvent::WorkStarted { cycle, cycle_count } => {
                    self.phase_line = format!("Work Session {}/{}", cycle, cycle_count);
                    self.timer_text = format_clock(plan.work_seconds());
                }
                TimerEvent::BreakStarted { cycle, cycle_count } => {
                    self.phase_line = format!("Break {}/{}", cycle, cycle_count);
                    self.timer_text = format_clock(plan.break_seconds());
                }
                TimerEvent::Tick {
                    remaining_seconds, ..
                } => {
                    self.timer_text = format_clock(remaining_seconds);
                }
                TimerEvent::SessionCompleted { kind, .. } => {
                    self.history.push(HistoryEntry::now(kind));
                    let minutes = match kind {
                        SessionKind::Work => plan.work_minutes,
                        SessionKind::Break => plan.break_minutes,
                    };
                    self.stats.record_session(kind, minutes);
                    // A completed break closes its cycle
                    if kind == SessionKind::Break {
                        self.stats.record_cycle();
                    }
                    self.alert.alert();
                }
                TimerEvent::AllCyclesCompleted => {
                    // The final work session has no trailing break; it
                    // closes the last cycle here.
                    self.stats.record_cycle();
                    self.phase_line = "All cycles completed!".to_string();
                    self.timer_text = "00:00".to_string();
                    self.alert.alert();
                    finished = true;
                }
                TimerEvent::Stopped => {
                    self.phase_line.clear();
                    self.timer_text = "00:00".to_string();
                }
            }
        }

        if finished {
            self.run = None;
        }
    }

    /// Refreshes the clock display without ticking the engine.
    fn on_tick_display_only(&mut self) {
        if self.mode == Mode::Clock {
            let now = Local::now();
            self.date_line = now.format("%A, %B %d, %Y - %H:%M:%S").to_string();
            self.timer_text = now.format("%H:%M:%S").to_string();
        }
    }

    fn edit_field(&mut self, edit: impl FnOnce(&mut String)) {
        if self.mode != Mode::Pomodoro {
            return;
        }
        let field = match self.focused {
            Field::Work => &mut self.work_input,
            Field::Break => &mut self.break_input,
            Field::Cycles => &mut self.cycles_input,
        };
        edit(field);
    }
}

// ============================================================================
// Tests
// ============================================================================
