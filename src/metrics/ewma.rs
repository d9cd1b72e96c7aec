//! Exponentially weighted moving average of an event rate
//!
//! The building block behind [`Meter`](crate::metrics::Meter): events
//! accumulate between ticks, and each 5-second tick folds the interval's
//! instantaneous rate into the running average with smoothing constant
//! `1 - exp(-5 / 60 / minutes)`, the classic 1/5/15-minute load-average
//! formulation.

use parking_lot::Mutex;

/// Seconds covered by one tick.
pub(crate) const TICK_SECS: f64 = 5.0;

struct Inner {
    uncounted: u64,
    rate: f64,
    initialized: bool,
}

/// Exponentially weighted moving average over a configurable window.
pub struct Ewma {
    alpha: f64,
    inner: Mutex<Inner>,
}

impl Ewma {
    /// EWMA averaging over the given window in minutes.
    pub fn over_minutes(minutes: f64) -> Self {
        Self {
            alpha: 1.0 - (-TICK_SECS / 60.0 / minutes).exp(),
            inner: Mutex::new(Inner {
                uncounted: 0,
                rate: 0.0,
                initialized: false,
            }),
        }
    }

    /// One-minute window.
    pub fn one_minute() -> Self {
        Self::over_minutes(1.0)
    }

    /// Five-minute window.
    pub fn five_minutes() -> Self {
        Self::over_minutes(5.0)
    }

    /// Fifteen-minute window.
    pub fn fifteen_minutes() -> Self {
        Self::over_minutes(15.0)
    }

    /// Record `n` events for the current tick interval.
    pub fn update(&self, n: u64) {
        self.inner.lock().uncounted += n;
    }

    /// Fold the pending interval into the average. Call once per
    /// [`TICK_SECS`] elapsed.
    pub fn tick(&self) {
        let mut inner = self.inner.lock();
        let instant_rate = inner.uncounted as f64 / TICK_SECS;
        inner.uncounted = 0;
        if inner.initialized {
            inner.rate += self.alpha * (instant_rate - inner.rate);
        } else {
            inner.rate = instant_rate;
            inner.initialized = true;
        }
    }

    /// Current rate in events per second.
    pub fn rate(&self) -> f64 {
        self.inner.lock().rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_sets_rate() {
        let ewma = Ewma::one_minute();
        ewma.update(50);
        ewma.tick();

        // 50 events over 5 seconds
        assert!((ewma.rate() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_toward_zero() {
        let ewma = Ewma::one_minute();
        ewma.update(50);
        ewma.tick();

        let mut previous = ewma.rate();
        for _ in 0..12 {
            ewma.tick();
            let current = ewma.rate();
            assert!(current < previous);
            previous = current;
        }

        // After a full minute of silence the one-minute rate should have
        // decayed to roughly 1/e of its initial value.
        assert!((ewma.rate() - 10.0 / std::f64::consts::E).abs() < 0.1);
    }

    #[test]
    fn test_longer_windows_decay_slower() {
        let fast = Ewma::one_minute();
        let slow = Ewma::fifteen_minutes();
        for ewma in [&fast, &slow] {
            ewma.update(50);
            ewma.tick();
            ewma.tick();
        }

        assert!(slow.rate() > fast.rate());
    }
}
