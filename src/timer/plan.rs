//! Sequencing of work and break intervals.

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::debug;

use super::{IntervalTimer, TimeSource};
use crate::types::{IntervalKind, TimerConfig};

/// The ordered Work, Break, Work, ..., Work sequence of a session.
///
/// A plan with `N` work intervals runs `2N - 1` intervals and never ends
/// on a break. `current_index` is 1-based and counts work intervals.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    interval_count: NonZeroU32,
    current_index: u32,
    current_kind: IntervalKind,
    completed_steps: u32,
    work_timer: IntervalTimer,
    break_timer: IntervalTimer,
}

impl SessionPlan {
    /// Creates a plan positioned on the first work interval.
    pub fn new(config: &TimerConfig, source: Arc<dyn TimeSource>) -> Self {
        Self {
            interval_count: config.intervals,
            current_index: 1,
            current_kind: IntervalKind::Work,
            completed_steps: 0,
            work_timer: IntervalTimer::new(
                IntervalKind::Work,
                config.duration_of(IntervalKind::Work),
                source.clone(),
            ),
            break_timer: IntervalTimer::new(
                IntervalKind::Break,
                config.duration_of(IntervalKind::Break),
                source,
            ),
        }
    }

    /// Number of intervals the plan runs: `2N - 1`.
    pub fn total_steps(&self) -> u32 {
        self.interval_count.get().saturating_mul(2) - 1
    }

    pub fn interval_count(&self) -> u32 {
        self.interval_count.get()
    }

    /// 1-based index of the current work interval.
    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    pub fn current_kind(&self) -> IntervalKind {
        self.current_kind
    }

    /// Number of intervals fully processed so far.
    pub fn completed_steps(&self) -> u32 {
        self.completed_steps
    }

    /// Returns the timer matching the current kind.
    pub fn active_timer(&self) -> &IntervalTimer {
        self.timer(self.current_kind)
    }

    /// Returns the timer matching the current kind, mutably.
    pub fn active_timer_mut(&mut self) -> &mut IntervalTimer {
        match self.current_kind {
            IntervalKind::Work => &mut self.work_timer,
            IntervalKind::Break => &mut self.break_timer,
        }
    }

    /// Returns the timer of the given kind.
    pub fn timer(&self, kind: IntervalKind) -> &IntervalTimer {
        match kind {
            IntervalKind::Work => &self.work_timer,
            IntervalKind::Break => &self.break_timer,
        }
    }

    /// Records completion of the active interval and moves to the next one.
    ///
    /// Returns the kind of the next interval, or `None` once the plan is
    /// complete. Calling it on a complete plan changes nothing.
    pub fn advance(&mut self) -> Option<IntervalKind> {
        if self.is_complete() {
            return None;
        }

        self.completed_steps += 1;
        if self.is_complete() {
            debug!(steps = self.completed_steps, "Session plan complete");
            return None;
        }

        self.current_kind = self.current_kind.flipped();
        if self.current_kind == IntervalKind::Work {
            self.current_index += 1;
        }

        debug!(
            kind = %self.current_kind,
            index = self.current_index,
            "Advanced session plan"
        );
        Some(self.current_kind)
    }

    /// Stops both timers, restores their full durations and rewinds to
    /// the first work interval.
    pub fn reset_all(&mut self) {
        self.work_timer.reset();
        self.break_timer.reset();
        self.current_index = 1;
        self.current_kind = IntervalKind::Work;
        self.completed_steps = 0;
    }

    /// Returns true once every interval has been processed.
    pub fn is_complete(&self) -> bool {
        self.completed_steps >= self.total_steps()
    }
}
