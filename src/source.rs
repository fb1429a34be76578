//! Injectable randomness.
//!
//! The simulation draws from exactly two distributions: a uniform on `[0, 1)`
//! for Bernoulli outcomes, and a Beta for posterior samples. Both go through
//! [`RandomSource`] so a run can be made reproducible (seeded) or fully
//! scripted (constant) in tests.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::{Beta, Distribution};

/// Source of the two random draws the simulation needs.
pub trait RandomSource {
    /// A draw from the uniform distribution on `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// A draw from `Beta(alpha, beta)`. Callers pass `alpha, beta >= 1`.
    fn beta(&mut self, alpha: f64, beta: f64) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn beta(&mut self, alpha: f64, beta: f64) -> f64 {
        (**self).beta(alpha, beta)
    }
}

/// Seedable source backed by `StdRng`.
///
/// Same seed, same sequence of draws.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the operating system. Runs are not reproducible.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for SeededSource {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        self.rng.random()
    }

    fn beta(&mut self, alpha: f64, beta: f64) -> f64 {
        if !(alpha.is_finite() && beta.is_finite()) || alpha <= 0.0 || beta <= 0.0 {
            return 0.5;
        }
        match Beta::new(alpha, beta) {
            Ok(dist) => dist.sample(&mut self.rng),
            // Unreachable for finite positive parameters; fall back to the mean.
            Err(_) => alpha / (alpha + beta),
        }
    }
}

/// Source that always returns the same values.
///
/// Useful for forcing exact posterior ties or a fixed Bernoulli outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource {
    /// Returned by every [`RandomSource::uniform`] call.
    pub uniform: f64,
    /// Returned by every [`RandomSource::beta`] call, regardless of parameters.
    pub beta: f64,
}

impl RandomSource for ConstantSource {
    fn uniform(&mut self) -> f64 {
        self.uniform
    }

    fn beta(&mut self, _alpha: f64, _beta: f64) -> f64 {
        self.beta
    }
}
