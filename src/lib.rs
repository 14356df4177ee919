//! Focus Timer Library
//!
//! This library provides the core functionality for the focus timer CLI.
//! It includes:
//! - Drift-free countdown clocks and the work/break session plan
//! - The event loop reconciling time, keyboard input and rendering
//! - An abstract display surface with a crossterm implementation
//! - Non-blocking key input normalized to a small command alphabet
//! - Sound notification at the end of each interval
//! - CLI argument parsing and user-facing messages

pub mod cli;
pub mod controller;
pub mod display;
pub mod input;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{Command, IntervalKind, Key, LoopConfig, TimerConfig};

pub use controller::{Controller, LoopState, RunOutcome, TimerEvent};

pub use timer::{Clock, IntervalTimer, ManualTime, MonotonicTime, SessionPlan, TimeSource};

pub use display::{
    DisplayCall, DisplayError, DisplaySurface, Dimensions, RecordingDisplay, Region, Style,
    TerminalDisplay,
};

pub use input::{InputSource, ScriptedInput, TerminalInput};

pub use sound::{
    create_notifier, failure_status, resolve_sound_path, MockNotifier, Notifier, RodioNotifier,
    SoundError, UnavailableNotifier,
};
