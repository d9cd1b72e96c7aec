//! Exponentially decaying reservoir sample
//!
//! A fixed-capacity reservoir biased toward recent observations. Each
//! observation competes for a slot with a randomized priority that grows
//! exponentially with its arrival time, so older entries are exponentially
//! more likely to lose the slot to a newcomer while every entry keeps a
//! nonzero chance of survival. Quantile queries over the retained subset
//! then approximate the recent distribution of the full stream.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use parking_lot::Mutex;

use crate::clock::{Clock, MonotonicClock};
use crate::random::{Pcg64Source, RandomSource};
use crate::sampling::SampleSnapshot;
use crate::traits::{Sample, StatsError};

/// Number of updates between priority rescales.
///
/// Priorities grow as `exp(alpha * t)`; rescaling multiplies every retained
/// priority by `exp(-alpha * dt)` and re-anchors the epoch, keeping them in
/// floating-point range over long-running processes. The transform is
/// monotonic, so relative order among retained entries is unchanged.
const RESCALE_INTERVAL: u64 = 1000;

/// Elapsed-time rescale trigger for sparse streams.
///
/// A slow stream can take arbitrarily long to hit [`RESCALE_INTERVAL`]
/// updates, and `exp(alpha * t)` overflows f64 once `alpha * t` passes
/// ~709. One hour at the conventional alpha of 0.015 keeps exponents near
/// 54, far inside range.
const RESCALE_THRESHOLD_SECS: f64 = 3600.0;

/// One retained observation with its eviction-ranking priority.
///
/// Ordering is by priority (value is only a tiebreaker so `Ord` is total).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    priority: OrderedFloat<f64>,
    value: i64,
}

/// State guarded by the sample's lock.
struct Inner {
    /// Min-heap on priority: the next eviction candidate is at the top.
    heap: BinaryHeap<Reverse<Entry>>,
    /// Total updates since creation or the last clear.
    count: u64,
    /// Clock reading the current priorities are anchored to.
    epoch: f64,
    /// Updates since the last rescale.
    since_rescale: u64,
    rng: Box<dyn RandomSource>,
}

/// Exponentially decaying reservoir sample over `i64` observations.
///
/// Semantics follow the priority-sampling scheme of Cormode et al.
/// ("Forward decay: a practical time decay model for streaming systems"):
/// an observation arriving at elapsed time `t` gets priority
/// `exp(alpha * t) / r` with `r` uniform in `(0, 1]`, and once the
/// reservoir is full the minimum-priority entry is evicted whenever a new
/// observation outranks it.
///
/// All methods take `&self`; mutation is guarded by an internal mutex, so a
/// single instance can be shared across threads recording concurrently.
///
/// # Example
///
/// ```
/// use decaystats::sampling::ExpDecaySample;
/// use decaystats::traits::Sample;
///
/// let sample = ExpDecaySample::new(1028, 0.015).unwrap();
///
/// for latency_us in [120, 340, 95, 4100] {
///     sample.update(latency_us);
/// }
///
/// let snapshot = sample.snapshot();
/// assert_eq!(snapshot.count(), 4);
/// assert_eq!(snapshot.max(), 4100);
/// ```
pub struct ExpDecaySample {
    capacity: usize,
    alpha: f64,
    clock: Box<dyn Clock>,
    inner: Mutex<Inner>,
}

impl ExpDecaySample {
    /// Create a sample with the given capacity and decay constant.
    ///
    /// Typical parameters from metrics practice: capacity 1028, alpha 0.015,
    /// which heavily favors the last five minutes of data.
    pub fn new(capacity: usize, alpha: f64) -> Result<Self, StatsError> {
        Self::with_sources(
            capacity,
            alpha,
            Box::new(Pcg64Source::from_entropy()),
            Box::new(MonotonicClock::new()),
        )
    }

    /// Create a sample whose random source is seeded, for reproducible runs.
    pub fn with_seed(capacity: usize, alpha: f64, seed: u64) -> Result<Self, StatsError> {
        Self::with_sources(
            capacity,
            alpha,
            Box::new(Pcg64Source::seeded(seed)),
            Box::new(MonotonicClock::new()),
        )
    }

    /// Create a sample with explicit random and clock sources.
    ///
    /// This is the seam deterministic tests use: inject a
    /// [`FixedSource`](crate::random::FixedSource) and a
    /// [`ManualClock`](crate::clock::ManualClock) to script the timeline.
    pub fn with_sources(
        capacity: usize,
        alpha: f64,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StatsError> {
        if capacity == 0 {
            return Err(StatsError::InvalidCapacity);
        }
        if !(alpha > 0.0) {
            return Err(StatsError::InvalidDecay);
        }

        let epoch = clock.now();
        Ok(Self {
            capacity,
            alpha,
            clock,
            inner: Mutex::new(Inner {
                heap: BinaryHeap::with_capacity(capacity),
                count: 0,
                epoch,
                since_rescale: 0,
                rng,
            }),
        })
    }

    /// The configured decay constant.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Multiply every retained priority by `exp(-alpha * dt)` and re-anchor
    /// the epoch to `now`. Runs under the caller's lock.
    fn rescale(&self, inner: &mut Inner, now: f64) {
        let factor = (-self.alpha * (now - inner.epoch)).exp();
        let entries = std::mem::take(&mut inner.heap).into_vec();
        inner.heap = entries
            .into_iter()
            .map(|Reverse(e)| {
                Reverse(Entry {
                    priority: OrderedFloat(e.priority.into_inner() * factor),
                    value: e.value,
                })
            })
            .collect();
        inner.epoch = now;
        inner.since_rescale = 0;
    }
}

impl Sample for ExpDecaySample {
    fn update(&self, value: i64) {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        inner.count += 1;
        inner.since_rescale += 1;

        if inner.since_rescale >= RESCALE_INTERVAL || now - inner.epoch >= RESCALE_THRESHOLD_SECS {
            self.rescale(&mut inner, now);
        }

        let t = now - inner.epoch;
        let r = inner.rng.next_unit();
        let priority = (self.alpha * t).exp() / r;
        let entry = Entry {
            priority: OrderedFloat(priority),
            value,
        };

        if inner.heap.len() < self.capacity {
            inner.heap.push(Reverse(entry));
        } else {
            // Reservoir competition: the newcomer only enters by beating
            // the current minimum priority.
            let wins = inner
                .heap
                .peek()
                .is_some_and(|Reverse(min)| entry.priority > min.priority);
            if wins {
                inner.heap.pop();
                inner.heap.push(Reverse(entry));
            }
        }
    }

    fn clear(&self) {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        inner.heap.clear();
        inner.count = 0;
        inner.since_rescale = 0;
        inner.epoch = now;
    }

    fn count(&self) -> u64 {
        self.inner.lock().count
    }

    fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn snapshot(&self) -> SampleSnapshot {
        let inner = self.inner.lock();
        let values: Vec<i64> = inner.heap.iter().map(|Reverse(e)| e.value).collect();
        SampleSnapshot::new(values, inner.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::random::FixedSource;

    fn deterministic(capacity: usize, alpha: f64) -> (ExpDecaySample, ManualClock) {
        let clock = ManualClock::new();
        let sample = ExpDecaySample::with_sources(
            capacity,
            alpha,
            Box::new(FixedSource::new(1.0)),
            Box::new(clock.clone()),
        )
        .unwrap();
        (sample, clock)
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            ExpDecaySample::new(0, 0.015).err(),
            Some(StatsError::InvalidCapacity)
        );
        assert_eq!(
            ExpDecaySample::new(100, 0.0).err(),
            Some(StatsError::InvalidDecay)
        );
        assert_eq!(
            ExpDecaySample::new(100, -1.0).err(),
            Some(StatsError::InvalidDecay)
        );
    }

    #[test]
    fn test_below_capacity_retains_everything() {
        let sample = ExpDecaySample::with_seed(100, 0.015, 42).unwrap();

        for v in 1..=50 {
            sample.update(v);
        }

        assert_eq!(sample.count(), 50);
        assert_eq!(sample.len(), 50);
        let snapshot = sample.snapshot();
        assert_eq!(snapshot.values(), (1..=50).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_at_capacity_stays_bounded() {
        let sample = ExpDecaySample::with_seed(100, 0.015, 42).unwrap();

        for v in 0..10_000 {
            sample.update(v);
            assert!(sample.len() <= 100);
        }

        assert_eq!(sample.len(), 100);
        assert_eq!(sample.count(), 10_000);
        assert_eq!(sample.snapshot().len(), 100);
    }

    #[test]
    fn test_newest_dominate_under_fixed_random() {
        // With r pinned to 1.0 the priority is exp(alpha * t), strictly
        // increasing with arrival time, so the reservoir degenerates to
        // "keep the newest N".
        let (sample, clock) = deterministic(1000, 0.015);

        for v in 1..=2000 {
            clock.advance_secs(1.0);
            sample.update(v);
        }

        assert_eq!(sample.count(), 2000);
        assert_eq!(sample.len(), 1000);
        let snapshot = sample.snapshot();
        assert_eq!(
            snapshot.values(),
            (1001..=2000).collect::<Vec<_>>().as_slice()
        );
    }

    #[test]
    fn test_rescale_preserves_order() {
        // 2000 one-second steps cross the rescale interval twice; eviction
        // order must stay newest-wins throughout.
        let (sample, clock) = deterministic(10, 0.015);

        for v in 1..=2500 {
            clock.advance_secs(1.0);
            sample.update(v);
        }

        let snapshot = sample.snapshot();
        assert_eq!(
            snapshot.values(),
            (2491..=2500).collect::<Vec<_>>().as_slice()
        );
    }

    #[test]
    fn test_long_timeline_priorities_stay_finite() {
        // Without rescaling, exp(0.015 * t) overflows f64 past t ~ 47000s.
        // Drive the clock far beyond that and verify updates still order
        // correctly.
        let (sample, clock) = deterministic(5, 0.015);

        for v in 1..=5000 {
            clock.advance_secs(60.0);
            sample.update(v);
        }

        let snapshot = sample.snapshot();
        assert_eq!(
            snapshot.values(),
            (4996..=5000).collect::<Vec<_>>().as_slice()
        );
    }

    #[test]
    fn test_clear_resets_and_is_idempotent() {
        let (sample, clock) = deterministic(100, 0.015);

        for v in 0..500 {
            clock.advance_secs(0.5);
            sample.update(v);
        }
        sample.clear();

        assert_eq!(sample.count(), 0);
        assert_eq!(sample.len(), 0);
        assert!(sample.is_empty());

        sample.clear();
        assert_eq!(sample.count(), 0);

        // Still usable after a clear, with a fresh epoch.
        clock.advance_secs(1.0);
        sample.update(7);
        assert_eq!(sample.count(), 1);
        assert_eq!(sample.snapshot().values(), &[7]);
    }

    #[test]
    fn test_reproducibility_with_seed() {
        let a = ExpDecaySample::with_sources(
            50,
            0.015,
            Box::new(Pcg64Source::seeded(9)),
            Box::new(ManualClock::new()),
        )
        .unwrap();
        let b = ExpDecaySample::with_sources(
            50,
            0.015,
            Box::new(Pcg64Source::seeded(9)),
            Box::new(ManualClock::new()),
        )
        .unwrap();

        for v in 0..1000 {
            a.update(v);
            b.update(v);
        }

        assert_eq!(a.snapshot().values(), b.snapshot().values());
    }

    #[test]
    fn test_concurrent_updates() {
        use std::sync::Arc;
        use std::thread;

        let sample = Arc::new(ExpDecaySample::new(500, 0.015).unwrap());
        let threads = 8;
        let per_thread = 2_000u64;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let sample = Arc::clone(&sample);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        sample.update((t * 100_000 + i) as i64);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(sample.count(), threads as u64 * per_thread);
        assert_eq!(sample.len(), 500);
    }
}
