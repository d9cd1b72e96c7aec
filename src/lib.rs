//! # Decaystats
//!
//! Thread-safe streaming samples and the metric types built on them.
//!
//! The centerpiece is the exponentially decaying reservoir sample: a
//! fixed-capacity, recency-biased sample of an unbounded stream that makes
//! percentile queries cheap without storing the full history. Around it sit
//! a uniform reservoir, distribution snapshots, and the classic metric
//! kinds (counter, gauge, histogram, meter) with a small named registry.
//!
//! ## Quick Start
//!
//! ```rust
//! use decaystats::prelude::*;
//!
//! // Latency histogram biased toward the last few minutes
//! let latencies = Histogram::exp_decay(1028, 0.015).unwrap();
//! for micros in [210, 340, 95, 1200, 88, 430] {
//!     latencies.update(micros);
//! }
//!
//! let snapshot = latencies.snapshot();
//! println!(
//!     "p50={} p99={} max={}",
//!     snapshot.percentile(0.50).unwrap(),
//!     snapshot.percentile(0.99).unwrap(),
//!     snapshot.max(),
//! );
//! ```
//!
//! ## Concurrency
//!
//! Samples and metrics take `&self` everywhere and guard mutation
//! internally, so one instance behind an [`Arc`](std::sync::Arc) can be
//! updated from any number of threads:
//!
//! ```rust
//! use std::sync::Arc;
//! use decaystats::sampling::ExpDecaySample;
//! use decaystats::traits::Sample;
//!
//! let sample = Arc::new(ExpDecaySample::new(1028, 0.015).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let sample = Arc::clone(&sample);
//!         std::thread::spawn(move || {
//!             for v in 0..1_000 {
//!                 sample.update(v);
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(sample.count(), 4_000);
//! ```
//!
//! ## Determinism
//!
//! Both the random source and the clock behind the decaying sample are
//! injectable seams ([`random::RandomSource`], [`clock::Clock`]), so tests
//! can script the exact timeline and eviction decisions.

pub mod clock;
pub mod metrics;
pub mod random;
pub mod sampling;
pub mod traits;

pub mod prelude {
    pub use crate::metrics::{Counter, Gauge, Histogram, Meter, Metric, Registry};
    pub use crate::sampling::{ExpDecaySample, SampleSnapshot, UniformSample};
    pub use crate::traits::{Sample, StatsError};
}

pub use sampling::{ExpDecaySample, SampleSnapshot, UniformSample};
pub use traits::{Sample, StatsError};
