//! Uniform reservoir sample (Vitter's Algorithm R)
//!
//! Keeps a fixed-size uniform random sample of a stream of unknown length:
//! every observation ends up retained with equal probability k/n. Useful
//! when the full history matters as much as recent behavior; for
//! recency-biased sampling see
//! [`ExpDecaySample`](crate::sampling::ExpDecaySample).

use parking_lot::Mutex;

use crate::random::Pcg64Source;
use crate::sampling::SampleSnapshot;
use crate::traits::{Sample, StatsError};

struct Inner {
    values: Vec<i64>,
    count: u64,
    rng: Pcg64Source,
}

/// Uniform reservoir sample over `i64` observations.
///
/// Algorithm R (Vitter, 1985): the first k observations fill the reservoir;
/// observation n > k replaces a random slot with probability k/n.
///
/// Thread-safe under the same model as the rest of the crate: `&self`
/// methods, internal mutex.
///
/// # Example
///
/// ```
/// use decaystats::sampling::UniformSample;
/// use decaystats::traits::Sample;
///
/// let sample = UniformSample::new(10).unwrap();
/// for v in 0..1_000 {
///     sample.update(v);
/// }
///
/// assert_eq!(sample.len(), 10);
/// assert_eq!(sample.count(), 1_000);
/// ```
pub struct UniformSample {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl UniformSample {
    /// Create a reservoir with the given capacity, seeded from OS entropy.
    pub fn new(capacity: usize) -> Result<Self, StatsError> {
        Self::build(capacity, Pcg64Source::from_entropy())
    }

    /// Create a reservoir with a seeded random source, for reproducibility.
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self, StatsError> {
        Self::build(capacity, Pcg64Source::seeded(seed))
    }

    fn build(capacity: usize, rng: Pcg64Source) -> Result<Self, StatsError> {
        if capacity == 0 {
            return Err(StatsError::InvalidCapacity);
        }
        Ok(Self {
            capacity,
            inner: Mutex::new(Inner {
                values: Vec::with_capacity(capacity),
                count: 0,
                rng,
            }),
        })
    }
}

impl Sample for UniformSample {
    fn update(&self, value: i64) {
        let mut inner = self.inner.lock();
        inner.count += 1;

        if inner.values.len() < self.capacity {
            inner.values.push(value);
        } else {
            let n = inner.count;
            let j = inner.rng.gen_index(n as usize);
            if j < self.capacity {
                inner.values[j] = value;
            }
        }
    }

    fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.values.clear();
        inner.count = 0;
    }

    fn count(&self) -> u64 {
        self.inner.lock().count
    }

    fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn snapshot(&self) -> SampleSnapshot {
        let inner = self.inner.lock();
        SampleSnapshot::new(inner.values.clone(), inner.count)
    }
}
