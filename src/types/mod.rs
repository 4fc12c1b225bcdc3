//! Core data types for Pomoclock.
//!
//! This module defines the data structures used for:
//! - Session and cycle plan modeling
//! - Timer state management (explicit state machine, no ad-hoc flags)
//! - Session history and aggregate stats

use std::fmt;

use chrono::{DateTime, Local};

// ============================================================================
// SessionKind
// ============================================================================

/// The kind of a countdown session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// A focused work session
    Work,
    /// A break between work sessions
    Break,
}

impl SessionKind {
    /// Returns the display label for this session kind.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "Work",
            SessionKind::Break => "Break",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// CyclePlan
// ============================================================================

/// Upper bound on work and break durations, in minutes.
///
/// Matches the three-digit input fields and keeps the seconds conversion
/// far away from `u32` overflow.
pub const MAX_MINUTES: u32 = 999;

/// Upper bound on the number of cycles in a plan.
pub const MAX_CYCLES: u32 = 999;

/// A plan for a full Pomodoro run: N alternating work/break sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePlan {
    /// Work duration in minutes (1..=MAX_MINUTES)
    pub work_minutes: u32,
    /// Break duration in minutes (0..=MAX_MINUTES)
    pub break_minutes: u32,
    /// Number of work sessions (1..=MAX_CYCLES)
    pub cycle_count: u32,
}

impl Default for CyclePlan {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            cycle_count: 4,
        }
    }
}

impl CyclePlan {
    /// Creates a new plan.
    ///
    /// # Errors
    ///
    /// Returns an error message if the values are out of range.
    pub fn new(work_minutes: u32, break_minutes: u32, cycle_count: u32) -> Result<Self, String> {
        let plan = Self {
            work_minutes,
            break_minutes,
            cycle_count,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Validates the plan.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_minutes == 0 {
            return Err("Work duration must be at least 1 minute".to_string());
        }
        if self.work_minutes > MAX_MINUTES {
            return Err(format!(
                "Work duration must be at most {} minutes",
                MAX_MINUTES
            ));
        }
        if self.break_minutes > MAX_MINUTES {
            return Err(format!(
                "Break duration must be at most {} minutes",
                MAX_MINUTES
            ));
        }
        if self.cycle_count == 0 {
            return Err("Cycle count must be at least 1".to_string());
        }
        if self.cycle_count > MAX_CYCLES {
            return Err(format!("Cycle count must be at most {}", MAX_CYCLES));
        }
        Ok(())
    }

    /// Returns the work session duration in seconds.
    ///
    /// Saturates instead of wrapping for plans built without [`validate`],
    /// e.g. from struct literals.
    ///
    /// [`validate`]: CyclePlan::validate
    pub fn work_seconds(&self) -> u32 {
        self.work_minutes.saturating_mul(60)
    }

    /// Returns the break session duration in seconds.
    pub fn break_seconds(&self) -> u32 {
        self.break_minutes.saturating_mul(60)
    }
}

// ============================================================================
// Phase
// ============================================================================

/// The current phase of the timer state machine.
///
/// Replaces boolean `running` flags with an explicit state enum.
/// Transitions are driven by discrete commands (start, stop) and by
/// session-completion events, never by polling inside nested loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No countdown is active
    #[default]
    Idle,
    /// Counting down a work session
    Working,
    /// Counting down a break session
    Breaking,
}

impl Phase {
    /// Returns true if a countdown is actively running.
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Working | Phase::Breaking)
    }

    /// Returns the kind of the active session, if any.
    pub fn session_kind(&self) -> Option<SessionKind> {
        match self {
            Phase::Working => Some(SessionKind::Work),
            Phase::Breaking => Some(SessionKind::Break),
            Phase::Idle => None,
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The state of a Pomodoro run.
///
/// Owns the cycle plan and the active session. The cycle index is advanced
/// by completion events; there is no recursive self-invocation, so large
/// cycle counts cost nothing in call depth.
#[derive(Debug, Clone)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Remaining seconds in the active session
    pub remaining_seconds: u32,
    /// Current cycle index, in [1, cycle_count] while active
    pub current_cycle: u32,
    /// The cycle plan
    pub plan: CyclePlan,
}

impl TimerState {
    /// Creates a new idle state for the given plan.
    pub fn new(plan: CyclePlan) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: 0,
            current_cycle: 1,
            plan,
        }
    }

    /// Starts the run at cycle 1 with a work session.
    pub fn start(&mut self) {
        self.phase = Phase::Working;
        self.remaining_seconds = self.plan.work_seconds();
        self.current_cycle = 1;
    }

    /// Begins the break session for the current cycle.
    pub fn start_break(&mut self) {
        self.phase = Phase::Breaking;
        self.remaining_seconds = self.plan.break_seconds();
    }

    /// Advances to the next cycle and begins its work session.
    pub fn start_next_cycle(&mut self) {
        self.current_cycle += 1;
        self.phase = Phase::Working;
        self.remaining_seconds = self.plan.work_seconds();
    }

    /// Stops the run and returns to idle.
    ///
    /// The cycle index is left where it was; an aborted session is not
    /// completed and triggers no side effects.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.remaining_seconds = 0;
    }

    /// Decrements the active session by one second.
    ///
    /// Returns true if the session has completed (reached 0). Remaining
    /// seconds never go negative.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Returns true if a countdown is actively running.
    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }

    /// Returns true if the current work session is the final one in the plan.
    pub fn is_final_cycle(&self) -> bool {
        self.current_cycle >= self.plan.cycle_count
    }
}

// ============================================================================
// HistoryEntry
// ============================================================================

/// A completed session, recorded for the lifetime of one app instance.
///
/// Entries are append-only; aborted sessions are never recorded.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// What kind of session completed
    pub kind: SessionKind,
    /// When it completed
    pub completed_at: DateTime<Local>,
}

impl HistoryEntry {
    /// Records a session completion at the current wall-clock time.
    pub fn now(kind: SessionKind) -> Self {
        Self {
            kind,
            completed_at: Local::now(),
        }
    }

    /// Formats the entry as a single log line.
    pub fn to_line(&self) -> String {
        format!(
            "{} session completed at {}",
            self.kind,
            self.completed_at.format("%H:%M:%S")
        )
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Aggregate stats for one app instance.
///
/// All counters are monotonically non-decreasing and reset only when the
/// application restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of fully completed cycles
    pub completed_cycles: u32,
    /// Total completed work time in minutes
    pub total_work_minutes: u32,
    /// Total completed break time in minutes
    pub total_break_minutes: u32,
}

impl Stats {
    /// Records a completed session of the given kind and duration.
    pub fn record_session(&mut self, kind: SessionKind, minutes: u32) {
        match kind {
            SessionKind::Work => self.total_work_minutes += minutes,
            SessionKind::Break => self.total_break_minutes += minutes,
        }
    }

    /// Records a fully completed cycle.
    pub fn record_cycle(&mut self) {
        self.completed_cycles += 1;
    }

    /// Formats the stats summary line.
    pub fn summary_line(&self) -> String {
        format!(
            "Stats: Completed Cycles: {} | Total Work: {} min | Total Break: {} min",
            self.completed_cycles, self.total_work_minutes, self.total_break_minutes
        )
    }
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Formats remaining seconds as `MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================
