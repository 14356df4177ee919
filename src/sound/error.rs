//! Sound system error types.
//!
//! None of these errors stop a session: the controller shows a diagnostic
//! and carries on with the next interval.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The install location of the program could not be determined.
    #[error("cannot locate sound resource: {0}")]
    ResourceUnresolved(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::DecodeError(_) | Self::ResourceUnresolved(_)
        )
    }

    /// Short description of the failure kind, without details.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "no audio device",
            Self::FileNotFound(_) => "file not found",
            Self::DecodeError(_) => "unsupported audio format",
            Self::StreamError(_) => "audio stream failed",
            Self::ResourceUnresolved(_) => "install location unknown",
        }
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "Connect an audio output device",
            Self::FileNotFound(_) | Self::ResourceUnresolved(_) => {
                "Place sound.mp3 next to the focus-timer binary or pass --sound"
            }
            Self::DecodeError(_) => "The sound file may be corrupted",
            Self::StreamError(_) => "Check the system audio settings",
        }
    }
}
