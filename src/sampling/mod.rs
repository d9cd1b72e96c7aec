//! Stream sampling for metrics
//!
//! Reservoirs that retain a bounded, statistically representative subset of
//! an unbounded stream of observations, so distribution queries (min, max,
//! mean, percentiles) stay cheap no matter how much data has flowed through.
//!
//! Two flavors:
//!
//! - [`ExpDecaySample`]: exponentially biased toward recent observations,
//!   the usual choice for latency histograms
//! - [`UniformSample`]: every observation equally likely to be retained
//!
//! Both implement the [`Sample`](crate::traits::Sample) trait and are safe
//! to share across threads without external locking.
//!
//! # Example
//!
//! ```
//! use decaystats::sampling::ExpDecaySample;
//! use decaystats::traits::Sample;
//!
//! let sample = ExpDecaySample::new(1028, 0.015).unwrap();
//! for v in 1..=100 {
//!     sample.update(v);
//! }
//!
//! let snapshot = sample.snapshot();
//! assert_eq!(snapshot.count(), 100);
//! assert!(snapshot.percentile(0.99).unwrap() >= 99.0);
//! ```

mod expdecay;
mod snapshot;
mod uniform;

pub use expdecay::ExpDecaySample;
pub use snapshot::SampleSnapshot;
pub use uniform::UniformSample;
