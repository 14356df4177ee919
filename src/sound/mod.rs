//! End-of-interval sound notification.
//!
//! The controller only sees the `Notifier` trait. Playback failures are
//! reported as `SoundError`s and never end a session.
//!
//! - `RodioNotifier`: plays a sound file through the default audio device
//! - `UnavailableNotifier`: used when no audio device could be opened
//! - `MockNotifier`: records calls for tests

mod error;
mod player;

pub use error::SoundError;
pub use player::{create_notifier, RodioNotifier, UnavailableNotifier};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::types::DEFAULT_SOUND_FILE;

/// Capability to play the notification sound.
pub trait Notifier {
    /// Starts playing the sound at `path` without waiting for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the sound cannot be opened, decoded or played.
    fn play(&self, path: &Path) -> Result<(), SoundError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        (**self).play(path)
    }
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    play_calls: Mutex<Vec<PathBuf>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of `play` calls, failed ones included.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<PathBuf> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        self.play_calls.lock().unwrap().push(path.to_path_buf());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        Ok(())
    }
}

/// One-line description of a playback failure for the status line.
///
/// Only the file name is shown; the full path and the underlying error go
/// to the log.
#[must_use]
pub fn failure_status(path: &Path, error: &SoundError) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    format!("Could not play {} ({})", name, error.summary())
}

/// Returns the path of `file_name` in the directory holding `exe`.
#[must_use]
pub fn sound_path_beside(exe: &Path, file_name: &str) -> PathBuf {
    exe.parent()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Resolves the notification sound.
///
/// An explicit path wins; otherwise the default sound next to the running
/// executable is used.
///
/// # Errors
///
/// Returns `SoundError::ResourceUnresolved` if the executable path is
/// unknown.
pub fn resolve_sound_path(explicit: Option<&Path>) -> Result<PathBuf, SoundError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let exe = std::env::current_exe().map_err(|e| SoundError::ResourceUnresolved(e.to_string()))?;
    Ok(sound_path_beside(&exe, DEFAULT_SOUND_FILE))
}
