//! Audible alerts for session and run completion.
//!
//! This module provides the end-of-session notification, including:
//!
//! - A synthesized chime (440 Hz for 500 ms) where an audio device exists
//! - A spoken notification on macOS via `/usr/bin/say`
//! - A terminal-bell fallback when neither is available
//!
//! Alerts are fire-and-forget: every failure path is logged and swallowed.
//! A missing audio backend must never abort a countdown or a cycle.

mod chime;
mod error;

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

pub use chime::{try_create_chime, ChimePlayer, TONE_DURATION_MS, TONE_FREQUENCY_HZ};
pub use error::AlertError;

// ============================================================================
// AlertSink
// ============================================================================

/// Trait for alert implementations.
///
/// Alerting is infallible by contract: implementations handle their own
/// fallbacks and degrade silently.
pub trait AlertSink {
    /// Fires one audible notification.
    fn alert(&self);
}

// ============================================================================
// SystemAlert
// ============================================================================

/// The production alert sink.
///
/// Picks whichever mechanism the platform offers, in order: spoken
/// notification (macOS), synthesized chime, terminal bell.
pub struct SystemAlert {
    /// Chime player, if an audio device was found at startup.
    chime: Option<ChimePlayer>,
}

impl SystemAlert {
    /// Creates the alert sink, probing for an audio device once.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chime: try_create_chime(),
        }
    }
}

impl Default for SystemAlert {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for SystemAlert {
    fn alert(&self) {
        #[cfg(target_os = "macos")]
        {
            match speak_notice() {
                Ok(()) => return,
                Err(e) => warn!("Spoken notification failed: {}", e),
            }
        }

        if let Some(chime) = &self.chime {
            match chime.play_tone() {
                Ok(()) => return,
                Err(e) => warn!("Chime playback failed: {}", e),
            }
        }

        terminal_bell();
    }
}

impl std::fmt::Debug for SystemAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemAlert")
            .field("has_chime", &self.chime.is_some())
            .finish()
    }
}

// ============================================================================
// MockAlert
// ============================================================================

/// Mock alert sink for testing.
#[derive(Debug, Default)]
pub struct MockAlert {
    alert_count: AtomicUsize,
}

impl MockAlert {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times `alert` was called.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alert_count.load(Ordering::SeqCst)
    }
}

impl AlertSink for MockAlert {
    fn alert(&self) {
        self.alert_count.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Platform helpers
// ============================================================================

/// Speaks the session-over notice via Shortcuts-style system tooling.
#[cfg(target_os = "macos")]
fn speak_notice() -> Result<(), AlertError> {
    use std::process::Command;

    Command::new("/usr/bin/say")
        .arg("Session over")
        .spawn()
        .map(|_| ())
        .map_err(|e| AlertError::SpeechFailed(e.to_string()))
}

/// Writes an ASCII BEL so the terminal emits its notification sound.
fn terminal_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

// ============================================================================
// Tests
// ============================================================================
