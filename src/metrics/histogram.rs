//! Distribution histogram backed by a sample

use std::sync::Arc;

use crate::sampling::{ExpDecaySample, SampleSnapshot, UniformSample};
use crate::traits::{Sample, StatsError};

/// Histogram of `i64` observations backed by a reservoir [`Sample`].
///
/// The histogram itself is thin: recording delegates to the sample, and
/// distribution summaries are computed on demand from a consistent
/// [`SampleSnapshot`]. Which reservoir backs it decides the bias: an
/// exponentially decaying sample favors recent data, a uniform sample
/// weighs the whole stream equally.
///
/// # Example
///
/// ```
/// use decaystats::metrics::Histogram;
///
/// let latencies = Histogram::exp_decay(1028, 0.015).unwrap();
/// for v in [12, 45, 9, 310, 44] {
///     latencies.update(v);
/// }
///
/// let snapshot = latencies.snapshot();
/// assert_eq!(snapshot.count(), 5);
/// assert_eq!(snapshot.max(), 310);
/// ```
pub struct Histogram {
    sample: Arc<dyn Sample>,
}

impl Histogram {
    /// Build a histogram over an existing sample.
    pub fn new(sample: Arc<dyn Sample>) -> Self {
        Self { sample }
    }

    /// Histogram over a fresh exponentially decaying sample.
    pub fn exp_decay(capacity: usize, alpha: f64) -> Result<Self, StatsError> {
        Ok(Self::new(Arc::new(ExpDecaySample::new(capacity, alpha)?)))
    }

    /// Histogram over a fresh uniform sample.
    pub fn uniform(capacity: usize) -> Result<Self, StatsError> {
        Ok(Self::new(Arc::new(UniformSample::new(capacity)?)))
    }

    /// Record one observation.
    pub fn update(&self, value: i64) {
        self.sample.update(value);
    }

    /// Reset the underlying sample.
    pub fn clear(&self) {
        self.sample.clear();
    }

    /// Total observations recorded (not the retained subset size).
    pub fn count(&self) -> u64 {
        self.sample.count()
    }

    /// Point-in-time distribution summary.
    pub fn snapshot(&self) -> SampleSnapshot {
        self.sample.snapshot()
    }

    /// Smallest retained value, or 0 when empty.
    pub fn min(&self) -> i64 {
        self.snapshot().min()
    }

    /// Largest retained value, or 0 when empty.
    pub fn max(&self) -> i64 {
        self.snapshot().max()
    }

    /// Mean of the retained values.
    pub fn mean(&self) -> f64 {
        self.snapshot().mean()
    }

    /// Standard deviation of the retained values.
    pub fn stddev(&self) -> f64 {
        self.snapshot().stddev()
    }

    /// Percentile over the retained values; `q` must be in `[0, 1]`.
    ///
    /// Prefer taking one [`snapshot`](Self::snapshot) when querying several
    /// ranks, so they all describe the same instant.
    pub fn percentile(&self, q: f64) -> Result<f64, StatsError> {
        self.snapshot().percentile(q)
    }
}
