//! The routing loop: Thompson sampling between two terminals, step by step.

use tracing::info_span;

use crate::error::Error;
use crate::report::SimulationReport;
use crate::schedule::{ChangePoint, Schedule};
use crate::source::RandomSource;
use crate::terminal::{check_probabilities, TerminalState};

/// Experiment parameters for one simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Number of steps simulated.
    pub duration: usize,
    /// Trailing steps (ending at the current one) each posterior looks at.
    pub window: usize,
    /// Requests per step, from each change-point on.
    pub traffic: Vec<ChangePoint<u64>>,
    /// True success probability of terminal A, from each change-point on.
    pub terminal_a: Vec<ChangePoint<f64>>,
    /// True success probability of terminal B, from each change-point on.
    pub terminal_b: Vec<ChangePoint<f64>>,
}

impl Default for SimulationConfig {
    /// 60 steps at 100 requests per step; A degrades from 0.9 to 0.5 during
    /// steps 20..40 while B holds at 0.8.
    fn default() -> Self {
        Self {
            duration: 60,
            window: 10,
            traffic: vec![ChangePoint::new(0, 100)],
            terminal_a: vec![
                ChangePoint::new(0, 0.9),
                ChangePoint::new(20, 0.5),
                ChangePoint::new(40, 0.9),
            ],
            terminal_b: vec![ChangePoint::new(0, 0.8)],
        }
    }
}

impl SimulationConfig {
    /// Check the parameters without building anything.
    pub fn validate(&self) -> Result<(), Error> {
        if self.duration == 0 {
            return Err(Error::ZeroDuration);
        }
        if self.window == 0 {
            return Err(Error::ZeroWindow);
        }
        check_probabilities(&self.terminal_a)?;
        check_probabilities(&self.terminal_b)?;
        Ok(())
    }
}

/// Which terminal a trial was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

/// Two terminals, a traffic schedule, and the randomness to drive them.
#[derive(Debug, Clone)]
pub struct BanditSimulator<R> {
    window: usize,
    traffic: Schedule<u64>,
    terminal_a: TerminalState,
    terminal_b: TerminalState,
    rng: R,
    completed: bool,
}

impl<R: RandomSource> BanditSimulator<R> {
    /// Materialize all schedules and zero the counters.
    pub fn new(cfg: &SimulationConfig, rng: R) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self {
            window: cfg.window,
            traffic: Schedule::from_change_points(cfg.duration, &cfg.traffic),
            terminal_a: TerminalState::new(cfg.duration, &cfg.terminal_a),
            terminal_b: TerminalState::new(cfg.duration, &cfg.terminal_b),
            rng,
            completed: false,
        })
    }

    /// Route one trial at `step`: sample both posteriors, send the request to
    /// the higher draw, record its outcome.
    ///
    /// A must win strictly; exact ties go to B.
    fn route(&mut self, step: usize) -> Side {
        let score_a = self
            .terminal_a
            .posterior_sample(step, self.window, &mut self.rng);
        let score_b = self
            .terminal_b
            .posterior_sample(step, self.window, &mut self.rng);
        if score_a > score_b {
            self.terminal_a.record_trial(step, &mut self.rng);
            Side::A
        } else {
            self.terminal_b.record_trial(step, &mut self.rng);
            Side::B
        }
    }

    /// Run every step in order. Later calls do nothing.
    ///
    /// Trials within a step are processed one at a time, and each re-samples
    /// both posteriors, so later trials see the outcomes of earlier ones.
    pub fn run(&mut self) {
        if self.completed {
            return;
        }
        let _span = info_span!(
            "simulation.run",
            duration = self.duration(),
            window = self.window
        )
        .entered();

        for step in 0..self.traffic.len() {
            let traffic = self.traffic.get(step);
            if traffic == 0 {
                tracing::trace!(step, "no traffic");
                continue;
            }
            let mut routed_a = 0u64;
            for _ in 0..traffic {
                if self.route(step) == Side::A {
                    routed_a += 1;
                }
            }
            tracing::debug!(
                step,
                traffic,
                routed_a,
                routed_b = traffic - routed_a,
                "step routed"
            );
        }
        self.completed = true;

        tracing::info!(
            trials = self.traffic.iter().sum::<u64>(),
            trials_a = self.terminal_a.total_trials(),
            trials_b = self.terminal_b.total_trials(),
            "simulation finished"
        );
    }

    /// Snapshot both terminals and the traffic schedule into a table.
    pub fn report(&self) -> SimulationReport {
        SimulationReport::new(
            self.traffic.as_slice(),
            &self.terminal_a.snapshot(),
            &self.terminal_b.snapshot(),
        )
    }
}

impl<R> BanditSimulator<R> {
    pub fn duration(&self) -> usize {
        self.traffic.len()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Requests per step.
    pub fn traffic(&self) -> &[u64] {
        self.traffic.as_slice()
    }

    pub fn terminal(&self, side: Side) -> &TerminalState {
        match side {
            Side::A => &self.terminal_a,
            Side::B => &self.terminal_b,
        }
    }

    pub fn terminal_a(&self) -> &TerminalState {
        &self.terminal_a
    }

    pub fn terminal_b(&self) -> &TerminalState {
        &self.terminal_b
    }

    /// Whether [`BanditSimulator::run`] has completed.
    pub fn has_run(&self) -> bool {
        self.completed
    }

    /// Give up the simulator, keeping both terminals as `(a, b)`.
    pub fn into_terminals(self) -> (TerminalState, TerminalState) {
        (self.terminal_a, self.terminal_b)
    }
}
