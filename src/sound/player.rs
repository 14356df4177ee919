//! Notifier implementation using rodio.
//!
//! Playback is fire-and-forget: the sink is detached so the controller
//! never waits for the sound to finish.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::Notifier;

/// A notifier that plays sound files through the default audio device.
pub struct RodioNotifier {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: bool,
}

impl RodioNotifier {
    /// Opens the default audio device.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback will be silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled,
        })
    }

    /// Decodes `path` and starts playing it in the background.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(decoder);
        sink.detach();

        debug!("Sound playback started (detached)");
        Ok(())
    }
}

impl Notifier for RodioNotifier {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        if self.disabled {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }
        debug!("Playing sound: {}", path.display());
        self.play_file(path)
    }
}

impl std::fmt::Debug for RodioNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioNotifier")
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Stand-in used when no audio device could be opened.
///
/// Every `play` reports the original device error so each completed
/// interval still shows a diagnostic.
#[derive(Debug)]
pub struct UnavailableNotifier {
    reason: String,
    disabled: bool,
}

impl UnavailableNotifier {
    #[must_use]
    pub fn new(reason: impl Into<String>, disabled: bool) -> Self {
        Self {
            reason: reason.into(),
            disabled,
        }
    }
}

impl Notifier for UnavailableNotifier {
    fn play(&self, _path: &Path) -> Result<(), SoundError> {
        if self.disabled {
            return Ok(());
        }
        Err(SoundError::DeviceNotAvailable(self.reason.clone()))
    }
}

/// Opens the audio device, falling back to `UnavailableNotifier`.
#[must_use]
pub fn create_notifier(disabled: bool) -> Box<dyn Notifier> {
    match RodioNotifier::new(disabled) {
        Ok(notifier) => Box::new(notifier),
        Err(e) => {
            warn!("Audio not available: {}", e);
            Box::new(UnavailableNotifier::new(e.to_string(), disabled))
        }
    }
}
