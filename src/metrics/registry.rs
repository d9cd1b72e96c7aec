//! Named metric registry

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::metrics::{Counter, Gauge, Histogram, Meter};

/// Error returned when registering under a name already in use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("metric {0:?} is already registered")]
    AlreadyRegistered(String),
}

/// A metric stored in a [`Registry`].
///
/// Clones share the underlying metric, so a handle kept by the producer and
/// the one fetched from the registry observe the same state.
#[derive(Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Gauge(Arc<Gauge>),
    Histogram(Arc<Histogram>),
    Meter(Arc<Meter>),
}

impl Metric {
    /// The counter inside, if this is a counter.
    pub fn as_counter(&self) -> Option<&Arc<Counter>> {
        match self {
            Metric::Counter(c) => Some(c),
            _ => None,
        }
    }

    /// The gauge inside, if this is a gauge.
    pub fn as_gauge(&self) -> Option<&Arc<Gauge>> {
        match self {
            Metric::Gauge(g) => Some(g),
            _ => None,
        }
    }

    /// The histogram inside, if this is a histogram.
    pub fn as_histogram(&self) -> Option<&Arc<Histogram>> {
        match self {
            Metric::Histogram(h) => Some(h),
            _ => None,
        }
    }

    /// The meter inside, if this is a meter.
    pub fn as_meter(&self) -> Option<&Arc<Meter>> {
        match self {
            Metric::Meter(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Counter> for Metric {
    fn from(c: Counter) -> Self {
        Metric::Counter(Arc::new(c))
    }
}

impl From<Gauge> for Metric {
    fn from(g: Gauge) -> Self {
        Metric::Gauge(Arc::new(g))
    }
}

impl From<Histogram> for Metric {
    fn from(h: Histogram) -> Self {
        Metric::Histogram(Arc::new(h))
    }
}

impl From<Meter> for Metric {
    fn from(m: Meter) -> Self {
        Metric::Meter(Arc::new(m))
    }
}

/// Thread-safe map from metric name to metric.
///
/// This is the collaborator surface producers wire metrics into; naming
/// conventions and any periodic capture scheduling are the caller's
/// business.
///
/// # Example
///
/// ```
/// use decaystats::metrics::{Gauge, Histogram, Metric, Registry};
///
/// let registry = Registry::new();
/// registry.register("heap.alloc", Gauge::new()).unwrap();
/// registry
///     .register("gc.pause_ns", Histogram::exp_decay(1028, 0.015).unwrap())
///     .unwrap();
///
/// let pause = registry.get("gc.pause_ns").unwrap();
/// pause.as_histogram().unwrap().update(125_000);
/// ```
#[derive(Default)]
pub struct Registry {
    metrics: RwLock<HashMap<String, Metric>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric under `name`. Fails if the name is taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        metric: impl Into<Metric>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut metrics = self.metrics.write();
        if metrics.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        metrics.insert(name, metric.into());
        Ok(())
    }

    /// Fetch a handle to the metric registered under `name`.
    pub fn get(&self, name: &str) -> Option<Metric> {
        self.metrics.read().get(name).cloned()
    }

    /// Remove the metric registered under `name`, returning it.
    pub fn unregister(&self, name: &str) -> Option<Metric> {
        self.metrics.write().remove(name)
    }

    /// Visit every registered metric. Iteration order is unspecified.
    pub fn each(&self, mut f: impl FnMut(&str, &Metric)) {
        for (name, metric) in self.metrics.read().iter() {
            f(name, metric);
        }
    }

    /// Number of registered metrics.
    pub fn len(&self) -> usize {
        self.metrics.read().len()
    }

    /// Check whether no metrics are registered.
    pub fn is_empty(&self) -> bool {
        self.metrics.read().is_empty()
    }
}
