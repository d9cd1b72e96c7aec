//! Point-in-time gauge

use std::sync::atomic::{AtomicI64, Ordering};

/// Lock-free gauge holding the most recently recorded value.
///
/// # Example
///
/// ```
/// use decaystats::metrics::Gauge;
///
/// let heap_bytes = Gauge::new();
/// heap_bytes.update(8_388_608);
/// assert_eq!(heap_bytes.value(), 8_388_608);
/// ```
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new value, replacing the previous one.
    pub fn update(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Most recently recorded value, or 0 if never updated.
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}
