//! `thompson-split`: Thompson-sampling traffic split between two terminals.
//!
//! Two terminals ("A" and "B") compete for requests. Each has a true success
//! probability that may change over time, and the number of requests per step
//! may change too. For every request the router draws one sample from each
//! terminal's Beta posterior and sends the request to the higher draw; the
//! request then succeeds or fails against the chosen terminal's *true*
//! probability and the outcome is recorded.
//!
//! **Pieces:**
//! - [`materialize`] / [`Schedule`]: expand sparse `(step, value)` change-points
//!   into one value per step.
//! - [`TerminalState`]: per-step success/failure counters plus the windowed
//!   posterior ([`TerminalState::posterior_sample`]).
//! - [`BanditSimulator`]: the step loop.
//! - [`SimulationReport`]: the step-indexed results table.
//! - [`RandomSource`]: injectable randomness ([`SeededSource`], [`ConstantSource`]).
//!
//! **Goals:**
//! - **Reproducible on request**: a seeded source gives the same run every time.
//! - **Non-stationarity friendly**: the posterior only sees the trailing
//!   `window` steps, so a terminal that recovers is picked up again.
//! - **Sequential within a step**: each request re-samples both posteriors and
//!   sees the outcomes of earlier requests in the same step.
//!
//! **Non-goals:**
//! - No persistence, no CLI, no config files, no parallel execution.
//! - One run at a time; averaging over many runs is the caller's business.
//! - No plotting. [`SimulationReport::to_tsv`] is as far as presentation goes.
//!
//! # Posterior
//!
//! At step `n` with window `w`, terminal `k` samples from
//!
//! ```text
//!   Beta(1 + S_k[n-w+1 ..= n], 1 + F_k[n-w+1 ..= n])
//! ```
//!
//! where `S_k`/`F_k` are per-step success/failure counts and the range is
//! clipped at step 0. The `+1` prior keeps both parameters positive, so the
//! very first draw is uniform on `[0, 1]`.
//!
//! Ties (`score_a == score_b`) go to B.
//!
//! # Example
//!
//! ```rust
//! use thompson_split::{BanditSimulator, SeededSource, SimulationConfig};
//!
//! let cfg = SimulationConfig::default();
//! let mut sim = BanditSimulator::new(&cfg, SeededSource::new(7)).unwrap();
//! sim.run();
//!
//! let report = sim.report();
//! for row in report.rows() {
//!     assert_eq!(row.trials_a + row.trials_b, row.traffic);
//! }
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod schedule;
pub use schedule::*;

mod source;
pub use source::*;

mod terminal;
pub use terminal::*;

mod simulator;
pub use simulator::*;

mod report;
pub use report::*;

mod utils;
pub use utils::*;

pub const THOMPSON_SPLIT_VERSION: &str = env!("CARGO_PKG_VERSION");
