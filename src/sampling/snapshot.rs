//! Point-in-time distribution summary over a sample's retained values

use crate::traits::StatsError;

/// Immutable copy of a sample's retained values with distribution queries.
///
/// Values are sorted ascending at construction so repeated percentile
/// queries are cheap. The snapshot carries the sample's *total* logical
/// count, which exceeds `len()` once the reservoir has evicted anything.
///
/// # Example
///
/// ```
/// use decaystats::sampling::SampleSnapshot;
///
/// let snapshot = SampleSnapshot::new(vec![5, 1, 9, 3], 4);
///
/// assert_eq!(snapshot.min(), 1);
/// assert_eq!(snapshot.max(), 9);
/// assert!((snapshot.mean() - 4.5).abs() < 1e-9);
/// assert_eq!(snapshot.percentile(0.5).unwrap(), 4.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSnapshot {
    values: Vec<i64>,
    count: u64,
}

impl SampleSnapshot {
    /// Build a snapshot from retained values and the total update count.
    ///
    /// The input order does not matter; values are sorted here.
    pub fn new(mut values: Vec<i64>, count: u64) -> Self {
        values.sort_unstable();
        Self { values, count }
    }

    /// Total number of updates the sample has seen, not the retained size.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of retained values in this snapshot.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the snapshot holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Retained values in ascending order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Smallest retained value, or 0 when empty.
    pub fn min(&self) -> i64 {
        self.values.first().copied().unwrap_or(0)
    }

    /// Largest retained value, or 0 when empty.
    pub fn max(&self) -> i64 {
        self.values.last().copied().unwrap_or(0)
    }

    /// Sum of the retained values.
    pub fn sum(&self) -> i64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean of the retained values, or 0.0 when empty.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.values.len() as f64
        }
    }

    /// Population variance of the retained values, or 0.0 when empty.
    pub fn variance(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq: f64 = self
            .values
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum();
        sum_sq / self.values.len() as f64
    }

    /// Population standard deviation of the retained values.
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Value at the given rank `q` in `[0, 1]`, linearly interpolated.
    ///
    /// Returns 0.0 for an empty snapshot and
    /// [`StatsError::InvalidQuantile`] when `q` is outside `[0, 1]`.
    pub fn percentile(&self, q: f64) -> Result<f64, StatsError> {
        if !(0.0..=1.0).contains(&q) {
            return Err(StatsError::InvalidQuantile { q });
        }
        if self.values.is_empty() {
            return Ok(0.0);
        }

        // Rank position over n+1 slots with linear interpolation between
        // neighbors, clamped to min/max at the extremes.
        let n = self.values.len();
        let pos = q * (n + 1) as f64;
        let value = if pos < 1.0 {
            self.values[0] as f64
        } else if pos >= n as f64 {
            self.values[n - 1] as f64
        } else {
            let lower = self.values[pos as usize - 1] as f64;
            let upper = self.values[pos as usize] as f64;
            lower + (pos - pos.floor()) * (upper - lower)
        };
        Ok(value)
    }

    /// Evaluate several percentile ranks in one pass.
    pub fn percentiles(&self, qs: &[f64]) -> Result<Vec<f64>, StatsError> {
        qs.iter().map(|&q| self.percentile(q)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinels() {
        let snapshot = SampleSnapshot::new(vec![], 0);

        assert_eq!(snapshot.count(), 0);
        assert_eq!(snapshot.min(), 0);
        assert_eq!(snapshot.max(), 0);
        assert_eq!(snapshot.mean(), 0.0);
        assert_eq!(snapshot.stddev(), 0.0);
        assert_eq!(snapshot.percentile(0.5).unwrap(), 0.0);
    }

    #[test]
    fn test_single_value() {
        let snapshot = SampleSnapshot::new(vec![42], 1);

        assert_eq!(snapshot.min(), 42);
        assert_eq!(snapshot.max(), 42);
        assert_eq!(snapshot.mean(), 42.0);
        assert_eq!(snapshot.stddev(), 0.0);
        assert_eq!(snapshot.percentile(0.0).unwrap(), 42.0);
        assert_eq!(snapshot.percentile(0.5).unwrap(), 42.0);
        assert_eq!(snapshot.percentile(1.0).unwrap(), 42.0);
    }

    #[test]
    fn test_basic_statistics() {
        let snapshot = SampleSnapshot::new(vec![2, 4, 4, 4, 5, 5, 7, 9], 8);

        assert_eq!(snapshot.min(), 2);
        assert_eq!(snapshot.max(), 9);
        assert_eq!(snapshot.sum(), 40);
        assert!((snapshot.mean() - 5.0).abs() < 1e-9);
        assert!((snapshot.variance() - 4.0).abs() < 1e-9);
        assert!((snapshot.stddev() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_interpolation() {
        let snapshot = SampleSnapshot::new((1..=100).collect(), 100);

        let median = snapshot.percentile(0.5).unwrap();
        assert!((median - 50.5).abs() < 1.0);

        let p99 = snapshot.percentile(0.99).unwrap();
        assert!(p99 >= 99.0);
    }

    #[test]
    fn test_invalid_quantile() {
        let snapshot = SampleSnapshot::new(vec![1, 2, 3], 3);

        assert_eq!(
            snapshot.percentile(1.5),
            Err(StatsError::InvalidQuantile { q: 1.5 })
        );
        assert_eq!(
            snapshot.percentile(-0.1),
            Err(StatsError::InvalidQuantile { q: -0.1 })
        );
    }

    #[test]
    fn test_sorts_input() {
        let snapshot = SampleSnapshot::new(vec![9, 1, 5], 3);
        assert_eq!(snapshot.values(), &[1, 5, 9]);
    }

    #[test]
    fn test_count_independent_of_len() {
        let snapshot = SampleSnapshot::new(vec![1, 2, 3], 1_000);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.count(), 1_000);
    }
}
