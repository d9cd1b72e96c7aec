//! Uniform random source behind the decaying sample's priority draw
//!
//! The priority formula divides by a uniform random in `(0, 1]`, so the
//! source is a seam rather than a hard-wired global generator: tests inject
//! a fixed source to make eviction decisions deterministic.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Source of uniform random values in the half-open interval `(0, 1]`.
///
/// Called once per `update` while the sample's internal lock is held, so
/// implementations only need `Send`, not `Sync`.
pub trait RandomSource: Send {
    /// Draw the next uniform value in `(0, 1]`. Never returns 0.
    fn next_unit(&mut self) -> f64;
}

/// Default source: a seeded PCG-64 generator.
#[derive(Clone, Debug)]
pub struct Pcg64Source {
    rng: Pcg64,
}

impl Pcg64Source {
    /// Create a source seeded from the given value, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64::from_entropy(),
        }
    }

    /// Uniform index in `[0, bound)`. Used by the uniform reservoir's
    /// replacement draw; rand's range sampling avoids modulo bias.
    pub fn gen_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

impl RandomSource for Pcg64Source {
    fn next_unit(&mut self) -> f64 {
        // gen() yields [0, 1); redraw the measure-zero 0 case so the
        // priority division never produces infinity.
        let mut r: f64 = self.rng.gen();
        while r == 0.0 {
            r = self.rng.gen();
        }
        r
    }
}

/// Degenerate source returning a constant, making priority draws a pure
/// function of elapsed time. Useful for deterministic tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedSource {
    value: f64,
}

impl FixedSource {
    /// Create a source that always returns `value`, which must be in `(0, 1]`.
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0 && value <= 1.0, "value must be in (0, 1]");
        Self { value }
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval() {
        let mut source = Pcg64Source::seeded(42);
        for _ in 0..10_000 {
            let r = source.next_unit();
            assert!(r > 0.0 && r <= 1.0);
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut a = Pcg64Source::seeded(7);
        let mut b = Pcg64Source::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }
}
