//! Metric types built on the sampling layer
//!
//! The four metric kinds a registry deals in:
//!
//! - [`Counter`]: signed running total
//! - [`Gauge`]: last recorded value
//! - [`Histogram`]: value distribution backed by a reservoir sample
//! - [`Meter`]: event rates over 1/5/15-minute windows
//!
//! plus the [`Registry`] that names them. All types are shareable across
//! threads behind an `Arc` with no external locking.

mod counter;
mod ewma;
mod gauge;
mod histogram;
mod meter;
mod registry;

pub use counter::Counter;
pub use ewma::Ewma;
pub use gauge::Gauge;
pub use histogram::Histogram;
pub use meter::Meter;
pub use registry::{Metric, Registry, RegistryError};
