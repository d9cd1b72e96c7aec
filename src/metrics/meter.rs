//! Event-rate meter

use parking_lot::Mutex;

use crate::clock::{Clock, MonotonicClock};
use crate::metrics::ewma::{Ewma, TICK_SECS};

struct Inner {
    count: u64,
    start: f64,
    last_tick: f64,
}

/// Tracks the rate of events: 1/5/15-minute moving averages plus the
/// lifetime mean rate, all in events per second.
///
/// Ticking is lazy: whenever the meter is marked or read, any whole
/// 5-second intervals elapsed since the last tick are applied first, so no
/// background thread is needed.
///
/// # Example
///
/// ```
/// use decaystats::metrics::Meter;
///
/// let requests = Meter::new();
/// requests.mark(3);
/// assert_eq!(requests.count(), 3);
/// ```
pub struct Meter {
    a1: Ewma,
    a5: Ewma,
    a15: Ewma,
    clock: Box<dyn Clock>,
    inner: Mutex<Inner>,
}

impl Meter {
    pub fn new() -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()))
    }

    /// Meter driven by an explicit clock, for deterministic tests.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            a1: Ewma::one_minute(),
            a5: Ewma::five_minutes(),
            a15: Ewma::fifteen_minutes(),
            clock,
            inner: Mutex::new(Inner {
                count: 0,
                start: now,
                last_tick: now,
            }),
        }
    }

    /// Record `n` events.
    pub fn mark(&self, n: u64) {
        let mut inner = self.inner.lock();
        self.tick_if_due(&mut inner);
        inner.count += n;
        self.a1.update(n);
        self.a5.update(n);
        self.a15.update(n);
    }

    /// Total events recorded.
    pub fn count(&self) -> u64 {
        let mut inner = self.inner.lock();
        self.tick_if_due(&mut inner);
        inner.count
    }

    /// One-minute moving average rate, events per second.
    pub fn rate1(&self) -> f64 {
        let mut inner = self.inner.lock();
        self.tick_if_due(&mut inner);
        self.a1.rate()
    }

    /// Five-minute moving average rate, events per second.
    pub fn rate5(&self) -> f64 {
        let mut inner = self.inner.lock();
        self.tick_if_due(&mut inner);
        self.a5.rate()
    }

    /// Fifteen-minute moving average rate, events per second.
    pub fn rate15(&self) -> f64 {
        let mut inner = self.inner.lock();
        self.tick_if_due(&mut inner);
        self.a15.rate()
    }

    /// Lifetime mean rate, events per second.
    pub fn rate_mean(&self) -> f64 {
        let mut inner = self.inner.lock();
        self.tick_if_due(&mut inner);
        let elapsed = self.clock.now() - inner.start;
        if elapsed <= 0.0 {
            0.0
        } else {
            inner.count as f64 / elapsed
        }
    }

    /// Apply every whole tick interval elapsed since the last tick.
    fn tick_if_due(&self, inner: &mut Inner) {
        let now = self.clock.now();
        let elapsed = now - inner.last_tick;
        let ticks = (elapsed / TICK_SECS) as u64;
        for _ in 0..ticks {
            self.a1.tick();
            self.a5.tick();
            self.a15.tick();
        }
        inner.last_tick += ticks as f64 * TICK_SECS;
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::new()
    }
}
