//! Per-terminal Beta-Bernoulli state over a sliding window of steps.
//!
//! A terminal keeps one success counter and one failure counter per step.
//! The posterior used for routing at step `n` only looks at the trailing
//! `window` steps ending at `n`, so an old run of successes stops counting
//! once the terminal's true probability has moved on.

use crate::error::Error;
use crate::schedule::{ChangePoint, Schedule};
use crate::source::RandomSource;

/// Beta posterior parameters for a window of observations.
///
/// Both parameters include the uniform `Beta(1, 1)` prior, so they are never
/// below 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaPosterior {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaPosterior {
    /// The prior alone: `Beta(1, 1)`, uniform on `[0, 1]`.
    pub const UNIFORM: Self = Self {
        alpha: 1.0,
        beta: 1.0,
    };

    /// Posterior from observed counts under the uniform prior.
    pub fn from_counts(successes: u64, failures: u64) -> Self {
        Self {
            alpha: successes as f64 + 1.0,
            beta: failures as f64 + 1.0,
        }
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Draw one sample from this posterior.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.beta(self.alpha, self.beta)
    }
}

/// One competing terminal: its true success schedule and observed counts.
#[derive(Debug, Clone)]
pub struct TerminalState {
    probabilities: Schedule<f64>,
    successes: Vec<u64>,
    failures: Vec<u64>,
}

impl TerminalState {
    /// Create a terminal covering `duration` steps.
    ///
    /// Probabilities are taken as given; see [`TerminalState::try_new`] for a
    /// checked constructor.
    pub fn new(duration: usize, probabilities: &[ChangePoint<f64>]) -> Self {
        Self {
            probabilities: Schedule::from_change_points(duration, probabilities),
            successes: vec![0; duration],
            failures: vec![0; duration],
        }
    }

    /// Like [`TerminalState::new`], but rejects a zero duration and
    /// probabilities outside `[0, 1]`.
    pub fn try_new(duration: usize, probabilities: &[ChangePoint<f64>]) -> Result<Self, Error> {
        if duration == 0 {
            return Err(Error::ZeroDuration);
        }
        check_probabilities(probabilities)?;
        Ok(Self::new(duration, probabilities))
    }

    /// Number of steps covered.
    pub fn duration(&self) -> usize {
        self.successes.len()
    }

    /// True success probability at every step.
    pub fn probabilities(&self) -> &[f64] {
        self.probabilities.as_slice()
    }

    /// True success probability at `step`.
    pub fn probability(&self, step: usize) -> f64 {
        self.probabilities.get(step)
    }

    /// Successes recorded per step.
    pub fn successes(&self) -> &[u64] {
        &self.successes
    }

    /// Failures recorded per step.
    pub fn failures(&self) -> &[u64] {
        &self.failures
    }

    /// Trials routed to this terminal at `step`.
    pub fn trials(&self, step: usize) -> u64 {
        self.successes[step] + self.failures[step]
    }

    /// Trials routed to this terminal over the whole run.
    pub fn total_trials(&self) -> u64 {
        self.successes.iter().sum::<u64>() + self.failures.iter().sum::<u64>()
    }

    /// Posterior over the `window` steps ending at `step` (inclusive).
    ///
    /// The window is clipped at step 0. Panics if `step` is out of range.
    pub fn window_posterior(&self, step: usize, window: usize) -> BetaPosterior {
        debug_assert!(window > 0, "window must be positive");
        let end = step + 1;
        let start = end.saturating_sub(window);
        let s: u64 = self.successes[start..end].iter().sum();
        let f: u64 = self.failures[start..end].iter().sum();
        BetaPosterior::from_counts(s, f)
    }

    /// Thompson draw: one sample from the windowed posterior.
    pub fn posterior_sample<R: RandomSource + ?Sized>(
        &self,
        step: usize,
        window: usize,
        rng: &mut R,
    ) -> f64 {
        self.window_posterior(step, window).sample(rng)
    }

    /// Simulate one request at `step` against the true probability and record it.
    ///
    /// Returns whether the trial succeeded.
    pub fn record_trial<R: RandomSource + ?Sized>(&mut self, step: usize, rng: &mut R) -> bool {
        let ok = rng.uniform() < self.probabilities.get(step);
        if ok {
            self.successes[step] += 1;
        } else {
            self.failures[step] += 1;
        }
        ok
    }

    /// Owned copy of the schedule and counters.
    pub fn snapshot(&self) -> TerminalSnapshot {
        TerminalSnapshot {
            probabilities: self.probabilities.to_vec(),
            successes: self.successes.clone(),
            failures: self.failures.clone(),
        }
    }
}

pub(crate) fn check_probabilities(points: &[ChangePoint<f64>]) -> Result<(), Error> {
    for p in points {
        if !(p.value.is_finite() && (0.0..=1.0).contains(&p.value)) {
            return Err(Error::ProbabilityOutOfRange {
                step: p.step,
                value: p.value,
            });
        }
    }
    Ok(())
}

/// Detached copy of a terminal's per-step data.
///
/// Reports are built from snapshots rather than live counters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalSnapshot {
    pub probabilities: Vec<f64>,
    pub successes: Vec<u64>,
    pub failures: Vec<u64>,
}

impl TerminalSnapshot {
    pub fn trials(&self, step: usize) -> u64 {
        self.successes[step] + self.failures[step]
    }
}
