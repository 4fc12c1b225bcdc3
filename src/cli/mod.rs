//! CLI layer for Pomoclock.
//!
//! This module contains:
//! - Command definitions (clap)
//! - Interactive stdin prompts for the terminal front-end

mod commands;
mod prompt;

pub use commands::{Cli, Commands};
pub use prompt::{parse_count, read_plan};
