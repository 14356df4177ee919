//! Timer core for the focus timer.
//!
//! This module provides the time accounting the event loop relies on:
//! - `TimeSource`: monotonic instants, swappable for tests
//! - `Clock`: remaining-time bookkeeping across start/stop cycles
//! - `IntervalTimer`: a clock tagged with its interval kind
//! - `SessionPlan`: the Work, Break, ..., Work sequence
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SessionPlan    │ ← decides which timer is active
//! └────────┬─────────┘
//!          │ owns two
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │  IntervalTimer   │────▶│      Clock       │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │    TimeSource    │
//!                          └──────────────────┘
//! ```

mod clock;
mod interval;
mod plan;

pub use clock::Clock;
pub use interval::IntervalTimer;
pub use plan::SessionPlan;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic instants.
///
/// Only monotonic readings are used so that system clock adjustments
/// never shift remaining time.
pub trait TimeSource: std::fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The process monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicTime;

impl TimeSource for MonotonicTime {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Returns a shared handle to the monotonic clock.
#[must_use]
pub fn monotonic() -> Arc<dyn TimeSource> {
    Arc::new(MonotonicTime)
}

/// Manually advanced time source for testing.
///
/// Clones share the same offset, so a test can keep one handle and move
/// time forward while a `Clock` reads from another.
#[derive(Debug, Clone)]
pub struct ManualTime {
    base: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.offset_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Returns a shared handle usable by `Clock`.
    #[must_use]
    pub fn shared(&self) -> Arc<dyn TimeSource> {
        Arc::new(self.clone())
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.base + Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}
