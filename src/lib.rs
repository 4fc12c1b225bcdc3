//! Pomoclock - Pomodoro timer and clock for the terminal
//!
//! This library provides the building blocks for the `pomoclock` binary:
//! - Countdown engine driving work/break cycles
//! - Terminal countdown front-end
//! - Interactive full-screen clock/timer application
//! - Audible alert sinks (tone, speech, terminal bell)
//! - CLI command parsing and stdin prompts
//! - Core timer types, history and statistics

pub mod alert;
pub mod app;
pub mod cli;
pub mod engine;
pub mod term;
pub mod types;

// Re-export commonly used types for convenience
pub use alert::{AlertSink, MockAlert, SystemAlert};
pub use engine::{CycleEngine, TimerEvent};
pub use types::{CyclePlan, HistoryEntry, Phase, SessionKind, Stats, TimerState};
