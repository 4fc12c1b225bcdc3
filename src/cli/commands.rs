//! Command definitions for the Pomoclock CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomoclock - a Pomodoro timer and clock for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomoclock",
    version,
    about = "Pomodoro timer and clock for the terminal",
    long_about = "A personal productivity timer using the Pomodoro technique.\n\
                  Run `pomoclock term` for a plain countdown in the terminal,\n\
                  or `pomoclock app` for the interactive clock/timer application.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the terminal countdown (prompts for durations on stdin)
    Term,

    /// Run the interactive clock/timer application
    App,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================
