//! Events emitted by the controller for logging and tests.

use std::time::Duration;

use crate::display::Dimensions;
use crate::types::IntervalKind;

/// Observable controller events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// An interval was laid out and is about to start counting down
    IntervalStarted {
        /// Work or break
        kind: IntervalKind,
        /// 1-based work interval index
        index: u32,
        /// Time left when the interval starts (its full length)
        remaining: Duration,
    },
    /// The active timer was stopped
    Paused {
        /// Frozen remaining time
        remaining: Duration,
    },
    /// The active timer was started again
    Resumed {
        /// Remaining time when counting resumed
        remaining: Duration,
    },
    /// The active timer ran out
    IntervalCompleted {
        /// Work or break
        kind: IntervalKind,
        /// 1-based work interval index
        index: u32,
    },
    /// The notification sound could not be played
    NotifyFailed {
        /// Diagnostic shown to the user
        message: String,
    },
    /// Both timers were reset and the session restarts from the top
    Reset,
    /// The display surface was rebuilt
    DisplayRebuilt {
        /// Size the surface was laid out for
        dimensions: Dimensions,
    },
    /// Every interval of the plan has run
    SessionCompleted,
    /// The user quit
    Quit,
}
