//! Monotonic-ish event counter

use std::sync::atomic::{AtomicI64, Ordering};

/// Lock-free signed counter.
///
/// # Example
///
/// ```
/// use decaystats::metrics::Counter;
///
/// let requests = Counter::new();
/// requests.inc(1);
/// requests.inc(4);
/// requests.dec(2);
/// assert_eq!(requests.count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by `n`.
    pub fn inc(&self, n: i64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Decrement by `n`.
    pub fn dec(&self, n: i64) {
        self.value.fetch_sub(n, Ordering::Relaxed);
    }

    /// Current value.
    pub fn count(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset to zero.
    pub fn clear(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_dec_clear() {
        let counter = Counter::new();
        counter.inc(10);
        counter.dec(3);
        assert_eq!(counter.count(), 7);

        counter.clear();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_concurrent_increments() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(Counter::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        counter.inc(1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(counter.count(), 40_000);
    }
}
