//! Core trait and error types shared across the crate
//!
//! Both reservoir implementations expose the same object-safe [`Sample`]
//! trait so metric types can be wired to either one at construction time.

use crate::sampling::SampleSnapshot;
use thiserror::Error;

/// Errors produced by sample construction and snapshot queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Reservoir capacity must be at least 1
    #[error("capacity must be positive")]
    InvalidCapacity,
    /// Decay constant must be strictly positive
    #[error("decay constant must be positive")]
    InvalidDecay,
    /// Percentile rank outside the closed unit interval
    #[error("percentile must be in [0, 1], got {q}")]
    InvalidQuantile { q: f64 },
}

/// A bounded, thread-safe sample of a stream of `i64` observations.
///
/// Implementations retain at most `capacity()` values and are safe to share
/// across threads: every method takes `&self` and mutation is guarded
/// internally, so callers never need an external lock.
///
/// # Count semantics
///
/// `count()` reports the total number of updates ever issued since creation
/// or the last `clear()`, **not** the retained subset size. A sample that has
/// seen a million values through a reservoir of 1028 still reports a count of
/// one million. Use `len()` for the retained size.
pub trait Sample: Send + Sync {
    /// Record one observation.
    fn update(&self, value: i64);

    /// Reset to empty, re-anchoring any internal clock.
    fn clear(&self);

    /// Total number of observations ever recorded (see trait docs).
    fn count(&self) -> u64;

    /// Number of values currently retained.
    fn len(&self) -> usize;

    /// Check whether nothing has been recorded.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Maximum number of values the sample retains.
    fn capacity(&self) -> usize;

    /// Consistent point-in-time copy of the retained values.
    ///
    /// Safe to call concurrently with `update`; the snapshot never observes
    /// a partially evicted state.
    fn snapshot(&self) -> SampleSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StatsError::InvalidQuantile { q: 1.5 }.to_string(),
            "percentile must be in [0, 1], got 1.5"
        );
        assert_eq!(
            StatsError::InvalidCapacity.to_string(),
            "capacity must be positive"
        );
    }
}
