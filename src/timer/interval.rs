//! A clock tagged with its interval kind.

use std::sync::Arc;
use std::time::Duration;

use super::{Clock, TimeSource};
use crate::display::format_countdown;
use crate::types::IntervalKind;

/// One work or break timer. Both kinds behave identically; they differ
/// only in duration and label.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    kind: IntervalKind,
    clock: Clock,
}

impl IntervalTimer {
    /// Creates a stopped timer at full duration.
    pub fn new(kind: IntervalKind, duration: Duration, source: Arc<dyn TimeSource>) -> Self {
        Self {
            kind,
            clock: Clock::new(duration, source),
        }
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    pub fn remaining(&self) -> Duration {
        self.clock.remaining()
    }

    pub fn is_expired(&self) -> bool {
        self.clock.is_expired()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn duration(&self) -> Duration {
        self.clock.total()
    }
}

impl std::fmt::Display for IntervalTimer {
    /// Formats the remaining time as `MM:SS`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_countdown(self.remaining()))
    }
}
