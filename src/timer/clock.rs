//! Remaining-time bookkeeping across start/stop cycles.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::TimeSource;

/// Countdown clock.
///
/// While running, the remaining time is derived from the anchor instant of
/// the current segment; stopping folds the segment into `remaining`. Only
/// `Duration` arithmetic is used, so repeated pauses do not accumulate
/// floating-point drift.
#[derive(Debug, Clone)]
pub struct Clock {
    total: Duration,
    remaining: Duration,
    /// Instant the current running segment began; `None` while stopped
    anchor: Option<Instant>,
    source: Arc<dyn TimeSource>,
}

impl Clock {
    /// Creates a stopped clock with `remaining == total`.
    pub fn new(total: Duration, source: Arc<dyn TimeSource>) -> Self {
        Self {
            total,
            remaining: total,
            anchor: None,
            source,
        }
    }

    /// Starts the clock. No-op if already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.source.now());
        }
    }

    /// Stops the clock and freezes the remaining time. No-op if stopped.
    pub fn stop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            let elapsed = self.source.now().saturating_duration_since(anchor);
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
    }

    /// Stops the clock and restores the full duration.
    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.anchor = None;
    }

    /// Replaces the total duration and resets.
    pub fn reset_to(&mut self, total: Duration) {
        self.total = total;
        self.reset();
    }

    /// Returns the time left, never below zero.
    pub fn remaining(&self) -> Duration {
        match self.anchor {
            Some(anchor) => {
                let elapsed = self.source.now().saturating_duration_since(anchor);
                self.remaining.saturating_sub(elapsed)
            }
            None => self.remaining,
        }
    }

    /// Returns the time consumed so far.
    pub fn elapsed(&self) -> Duration {
        self.total.saturating_sub(self.remaining())
    }

    /// Returns true once no time is left.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Returns true while a segment is being timed.
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns the configured full duration.
    pub fn total(&self) -> Duration {
        self.total
    }
}
