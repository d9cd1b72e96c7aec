//! Monotonic time source for decay calculations
//!
//! Decay priorities depend on elapsed wall time, so the clock is injectable:
//! production uses a monotonic [`Instant`]-backed clock, tests drive a
//! [`ManualClock`] to simulate arbitrary timelines without sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic clock reporting seconds since an arbitrary fixed origin.
///
/// Only differences between readings matter; the origin is never exposed.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the clock's origin.
    fn now(&self) -> f64;
}

/// Default clock backed by [`Instant`].
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Cloning shares the underlying time, so a copy handed to a sample can be
/// advanced from the test body. Resolution is one microsecond.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by the given number of seconds.
    pub fn advance_secs(&self, secs: f64) {
        let micros = (secs * 1_000_000.0) as u64;
        self.micros.fetch_add(micros, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.micros.load(Ordering::SeqCst) as f64 / 1_000_000.0
    }
}
