//! Tone playback using rodio.
//!
//! Synthesizes the notification chime instead of shipping a sound file:
//! a short sine tone at a fixed pitch, played on a detached sink so the
//! caller never blocks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::AlertError;

/// Chime pitch in hertz.
pub const TONE_FREQUENCY_HZ: f32 = 440.0;

/// Chime duration in milliseconds.
pub const TONE_DURATION_MS: u64 = 500;

/// A chime player backed by a rodio output stream.
///
/// The output stream is opened once at construction; if no audio device
/// exists, construction fails and callers fall back to the terminal bell.
pub struct ChimePlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Set after a playback failure so later alerts skip straight to the
    /// fallback instead of retrying a dead device.
    degraded: AtomicBool,
}

impl ChimePlayer {
    /// Creates a new chime player.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, AlertError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AlertError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            degraded: AtomicBool::new(false),
        })
    }

    /// Plays the notification tone.
    ///
    /// Non-blocking; the tone keeps playing after this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio sink cannot be created.
    pub fn play_tone(&self) -> Result<(), AlertError> {
        if self.degraded.load(Ordering::Relaxed) {
            return Err(AlertError::StreamError("audio output degraded".to_string()));
        }

        let sink = Sink::try_new(&self.stream_handle).map_err(|e| {
            self.degraded.store(true, Ordering::Relaxed);
            AlertError::StreamError(e.to_string())
        })?;

        let tone = SineWave::new(TONE_FREQUENCY_HZ)
            .take_duration(Duration::from_millis(TONE_DURATION_MS))
            .amplify(0.20);

        sink.append(tone);
        sink.detach(); // Non-blocking: tone continues after function returns

        debug!("Chime playback started (detached)");
        Ok(())
    }
}

impl std::fmt::Debug for ChimePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChimePlayer")
            .field("degraded", &self.degraded.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a chime player, returning None if audio is unavailable.
///
/// If audio initialization fails a warning is logged and None is returned;
/// alerts then degrade to the terminal bell.
#[must_use]
pub fn try_create_chime() -> Option<ChimePlayer> {
    match ChimePlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, falling back to terminal bell: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests may run in environments without audio hardware
    // (e.g. CI containers) and are written to tolerate that.

    #[test]
    fn test_try_create_chime_no_panic() {
        let _ = try_create_chime();
    }

    #[test]
    fn test_play_tone_best_effort() {
        let player = match ChimePlayer::new() {
            Ok(p) => p,
            Err(_) => return, // No audio device; nothing to test
        };

        let _ = player.play_tone();
    }

    #[test]
    fn test_debug_impl() {
        let player = match ChimePlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("ChimePlayer"));
    }

    #[test]
    fn test_tone_constants() {
        assert_eq!(TONE_FREQUENCY_HZ, 440.0);
        assert_eq!(TONE_DURATION_MS, 500);
    }
}
