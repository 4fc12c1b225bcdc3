//! Cycle engine for Pomoclock.
//!
//! This module provides the core countdown functionality:
//! - One-second ticks decrementing the active session
//! - State transitions (Working → Breaking → Working → ... → Idle)
//! - Event firing for rendering, alerts and history logging
//!
//! The engine is synchronous: front-ends own the one-second cadence (a
//! tokio interval or a UI tick callback) and call [`CycleEngine::tick`]
//! from it. Cancellation is a discrete command, observed at the next tick
//! boundary, so cancellation latency is at most one second.

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::types::{CyclePlan, Phase, SessionKind, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events consumed by the front-ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A work session started
    WorkStarted {
        /// Cycle index of the session
        cycle: u32,
        /// Total number of cycles in the plan
        cycle_count: u32,
    },
    /// A break session started
    BreakStarted {
        /// Cycle index of the session
        cycle: u32,
        /// Total number of cycles in the plan
        cycle_count: u32,
    },
    /// One second elapsed in the active session
    Tick {
        /// Kind of the active session
        kind: SessionKind,
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// A session ran to completion (never fired for aborted sessions)
    SessionCompleted {
        /// Kind of the completed session
        kind: SessionKind,
        /// Cycle index of the completed session
        cycle: u32,
    },
    /// All cycles in the plan completed
    AllCyclesCompleted,
    /// The run was stopped before completion
    Stopped,
}

// ============================================================================
// CycleEngine
// ============================================================================

/// Drives a Pomodoro run through its work/break sessions.
///
/// For a plan with N cycles the engine performs exactly N work sessions
/// and N-1 break sessions, in strict alternation starting and ending with
/// work. Each session completes exactly once; the cycle index advances on
/// completion events rather than by recursion.
pub struct CycleEngine {
    /// Current timer state
    state: TimerState,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl CycleEngine {
    /// Creates a new engine for the given plan and event channel.
    pub fn new(plan: CyclePlan, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(plan),
            event_tx,
        }
    }

    /// Creates an engine together with its event receiver.
    pub fn with_channel(plan: CyclePlan) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(plan, tx), rx)
    }

    /// Starts the run at cycle 1.
    ///
    /// # Errors
    ///
    /// Returns an error if a run is already active.
    pub fn start(&mut self) -> Result<()> {
        if self.state.is_running() {
            anyhow::bail!("A Pomodoro run is already in progress");
        }

        self.state.start();
        self.send(TimerEvent::WorkStarted {
            cycle: self.state.current_cycle,
            cycle_count: self.state.plan.cycle_count,
        })?;

        Ok(())
    }

    /// Advances the active session by one second.
    ///
    /// Emits a `Tick` for every decrement; when the session reaches zero it
    /// emits `SessionCompleted` exactly once and performs at most one phase
    /// transition. A no-op when the engine is idle.
    pub fn tick(&mut self) -> Result<()> {
        if !self.state.is_running() {
            return Ok(());
        }

        // A session may start at zero seconds (e.g. a zero-minute break);
        // it then completes without emitting a display tick.
        if self.state.remaining_seconds > 0 {
            let kind = self
                .state
                .phase
                .session_kind()
                .context("active phase must carry a session kind")?;

            self.state.tick();
            self.send(TimerEvent::Tick {
                kind,
                remaining_seconds: self.state.remaining_seconds,
            })?;
        }

        if self.state.remaining_seconds == 0 {
            self.handle_session_complete()?;
        }

        Ok(())
    }

    /// Handles session completion and the resulting phase transition.
    fn handle_session_complete(&mut self) -> Result<()> {
        match self.state.phase {
            Phase::Working => {
                self.send(TimerEvent::SessionCompleted {
                    kind: SessionKind::Work,
                    cycle: self.state.current_cycle,
                })?;

                if self.state.is_final_cycle() {
                    self.state.stop();
                    self.send(TimerEvent::AllCyclesCompleted)?;
                } else {
                    self.state.start_break();
                    self.send(TimerEvent::BreakStarted {
                        cycle: self.state.current_cycle,
                        cycle_count: self.state.plan.cycle_count,
                    })?;
                }
            }
            Phase::Breaking => {
                self.send(TimerEvent::SessionCompleted {
                    kind: SessionKind::Break,
                    cycle: self.state.current_cycle,
                })?;

                self.state.start_next_cycle();
                self.send(TimerEvent::WorkStarted {
                    cycle: self.state.current_cycle,
                    cycle_count: self.state.plan.cycle_count,
                })?;
            }
            Phase::Idle => {}
        }

        Ok(())
    }

    /// Stops the run.
    ///
    /// The aborted session emits no completion event, so it produces no
    /// alert and no history entry.
    ///
    /// # Errors
    ///
    /// Returns an error if no run is active.
    pub fn stop(&mut self) -> Result<()> {
        if !self.state.is_running() {
            anyhow::bail!("No Pomodoro run is in progress");
        }

        self.state.stop();
        self.send(TimerEvent::Stopped)?;

        Ok(())
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns true if a run is active.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    fn send(&self, event: TimerEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send timer event")
    }
}

// ============================================================================
// Tests
// ============================================================================
