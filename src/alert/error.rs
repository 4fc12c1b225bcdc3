//! Alert system error types.
//!
//! Errors here are advisory: a failed alert is logged and swallowed by the
//! caller, which then falls through to the next mechanism.

use thiserror::Error;

/// Errors that can occur while producing an audible alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// No audio output device is available.
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to create the audio output sink.
    #[error("failed to create audio sink: {0}")]
    StreamError(String),

    /// The spoken notification command could not be run.
    #[error("speech command failed: {0}")]
    SpeechFailed(String),
}
