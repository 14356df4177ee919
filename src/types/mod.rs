//! Core data types for the focus timer.
//!
//! This module defines the data structures used for:
//! - Interval kinds (work / break)
//! - Raw keys and the normalized command alphabet
//! - Timer and event-loop configuration with validation

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

/// Default work interval length in minutes.
pub const DEFAULT_WORK_MINUTES: f64 = 25.0;

/// Default break interval length in minutes.
pub const DEFAULT_BREAK_MINUTES: f64 = 5.0;

/// Upper bound accepted for a single interval, in minutes (one day).
pub const MAX_MINUTES: f64 = 24.0 * 60.0;

/// File name of the notification sound shipped next to the binary.
pub const DEFAULT_SOUND_FILE: &str = "sound.mp3";

// ============================================================================
// IntervalKind
// ============================================================================

/// Whether an interval is focused work or a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntervalKind {
    /// Focused work
    #[default]
    Work,
    /// Break between two work intervals
    Break,
}

impl IntervalKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Work => "work",
            IntervalKind::Break => "break",
        }
    }

    /// Returns the title shown above the countdown.
    pub fn title(&self) -> &'static str {
        match self {
            IntervalKind::Work => "Focus Time",
            IntervalKind::Break => "Break Time",
        }
    }

    /// Returns the other kind.
    pub fn flipped(&self) -> Self {
        match self {
            IntervalKind::Work => IntervalKind::Break,
            IntervalKind::Break => IntervalKind::Work,
        }
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Key / Command
// ============================================================================

/// A raw key read from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Ctrl-C (raw mode swallows SIGINT)
    Interrupt,
    /// The terminal was resized
    Resize,
    /// Any other key
    Other,
}

/// Normalized command alphabet understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Tear down and exit successfully
    Quit,
    /// Pause the running interval or continue a paused one
    ToggleRun,
    /// Restart the whole session from the first work interval
    Reset,
    /// Rebuild the display surface
    RefreshDisplay,
    /// Nothing to do this tick
    #[default]
    None,
}

impl Command {
    /// Maps a raw key to a command. Letters are matched case-insensitively.
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::Char(c) => match c.to_ascii_uppercase() {
                'Q' => Command::Quit,
                'P' | 'C' => Command::ToggleRun,
                'R' => Command::Reset,
                'U' => Command::RefreshDisplay,
                _ => Command::None,
            },
            Key::Interrupt => Command::Quit,
            Key::Resize => Command::RefreshDisplay,
            Key::Other => Command::None,
        }
    }
}

impl From<Option<Key>> for Command {
    fn from(key: Option<Key>) -> Self {
        key.map(Command::from_key).unwrap_or_default()
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration of a session: how many work intervals and how long each
/// work and break interval lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Number of work intervals
    pub intervals: NonZeroU32,
    /// Length of one work interval
    pub work: Duration,
    /// Length of one break interval
    pub rest: Duration,
}

impl TimerConfig {
    /// Creates a configuration from durations.
    pub fn new(intervals: NonZeroU32, work: Duration, rest: Duration) -> Self {
        Self {
            intervals,
            work,
            rest,
        }
    }

    /// Creates a configuration from fractional minutes.
    ///
    /// Returns an error message if either length is out of range.
    pub fn from_minutes(
        intervals: NonZeroU32,
        work_minutes: f64,
        break_minutes: f64,
    ) -> Result<Self, String> {
        Ok(Self::new(
            intervals,
            minutes_to_duration(work_minutes)?,
            minutes_to_duration(break_minutes)?,
        ))
    }

    /// Returns the duration configured for the given kind.
    pub fn duration_of(&self, kind: IntervalKind) -> Duration {
        match kind {
            IntervalKind::Work => self.work,
            IntervalKind::Break => self.rest,
        }
    }
}

/// Checks that a minute value is finite and within `0..=MAX_MINUTES`.
pub fn validate_minutes(minutes: f64) -> Result<f64, String> {
    if !minutes.is_finite() {
        return Err("minutes must be a finite number".to_string());
    }
    if !(0.0..=MAX_MINUTES).contains(&minutes) {
        return Err(format!("minutes must be between 0 and {MAX_MINUTES}"));
    }
    Ok(minutes)
}

/// Converts fractional minutes to a `Duration`.
pub fn minutes_to_duration(minutes: f64) -> Result<Duration, String> {
    let minutes = validate_minutes(minutes)?;
    Ok(Duration::from_secs_f64(minutes * 60.0))
}

// ============================================================================
// LoopConfig
// ============================================================================

/// Cadence and side-effect settings for the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Sleep between two ticks; bounds display latency
    pub poll_interval: Duration,
    /// UI pause after a reset or an interval completion
    pub hold_delay: Duration,
    /// Sound played when an interval completes
    pub sound_path: PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            hold_delay: Duration::from_secs(3),
            sound_path: PathBuf::from(DEFAULT_SOUND_FILE),
        }
    }
}

impl LoopConfig {
    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the hold delay.
    pub fn with_hold_delay(mut self, hold_delay: Duration) -> Self {
        self.hold_delay = hold_delay;
        self
    }

    /// Sets the sound path.
    pub fn with_sound_path(mut self, sound_path: impl Into<PathBuf>) -> Self {
        self.sound_path = sound_path.into();
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
