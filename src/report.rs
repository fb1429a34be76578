//! Step-indexed results table.
//!
//! Built from [`TerminalSnapshot`]s after a run, never from live counters.
//! Plotting is left to the caller; [`SimulationReport::to_tsv`] gives a plain
//! text table for quick inspection.

use std::fmt::Write as _;

use crate::terminal::TerminalSnapshot;

/// One row of the results table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRow {
    pub step: usize,
    /// Requests routed at this step (both terminals).
    pub traffic: u64,
    /// Requests routed to terminal A.
    pub trials_a: u64,
    /// Requests routed to terminal B.
    pub trials_b: u64,
    /// Terminal A's true success probability.
    pub p_a: f64,
    /// Terminal B's true success probability.
    pub p_b: f64,
    /// Successes at this step (both terminals).
    pub successes: u64,
    /// `successes / traffic`, or `NaN` when there was no traffic.
    pub success_rate: f64,
}

impl StepRow {
    /// Success rate the routing would get on average, given where trials went.
    ///
    /// `NaN` when there was no traffic.
    pub fn expected_success_rate(&self) -> f64 {
        if self.traffic == 0 {
            return f64::NAN;
        }
        (self.trials_a as f64 * self.p_a + self.trials_b as f64 * self.p_b) / self.traffic as f64
    }

    /// Best success rate available at this step had every request gone to
    /// the better terminal.
    pub fn best_probability(&self) -> f64 {
        self.p_a.max(self.p_b)
    }
}

/// Whole-run totals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportTotals {
    pub traffic: u64,
    pub trials_a: u64,
    pub trials_b: u64,
    pub successes: u64,
    /// `successes / traffic`, or `NaN` for a run with no traffic.
    pub success_rate: f64,
    /// Expected successes lost against always picking the better terminal.
    pub regret: f64,
}

/// Results table keyed by step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    rows: Vec<StepRow>,
}

impl SimulationReport {
    /// Zip the traffic schedule with both terminals' counts.
    ///
    /// Panics if the three inputs cover different numbers of steps.
    pub fn new(traffic: &[u64], a: &TerminalSnapshot, b: &TerminalSnapshot) -> Self {
        assert_eq!(traffic.len(), a.successes.len(), "terminal A length");
        assert_eq!(traffic.len(), b.successes.len(), "terminal B length");

        let rows = traffic
            .iter()
            .enumerate()
            .map(|(step, &traffic)| {
                let successes = a.successes[step] + b.successes[step];
                let success_rate = if traffic == 0 {
                    f64::NAN
                } else {
                    successes as f64 / traffic as f64
                };
                StepRow {
                    step,
                    traffic,
                    trials_a: a.trials(step),
                    trials_b: b.trials(step),
                    p_a: a.probabilities[step],
                    p_b: b.probabilities[step],
                    successes,
                    success_rate,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[StepRow] {
        &self.rows
    }

    pub fn row(&self, step: usize) -> Option<&StepRow> {
        self.rows.get(step)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn totals(&self) -> ReportTotals {
        let mut t = ReportTotals {
            traffic: 0,
            trials_a: 0,
            trials_b: 0,
            successes: 0,
            success_rate: f64::NAN,
            regret: 0.0,
        };
        for r in &self.rows {
            t.traffic += r.traffic;
            t.trials_a += r.trials_a;
            t.trials_b += r.trials_b;
            t.successes += r.successes;
            let best = r.best_probability();
            t.regret += r.trials_a as f64 * (best - r.p_a) + r.trials_b as f64 * (best - r.p_b);
        }
        if t.traffic > 0 {
            t.success_rate = t.successes as f64 / t.traffic as f64;
        }
        t
    }

    /// Tab-separated table with a header row. `NaN` rates print as `NaN`.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("t\trps\trps_a\trps_b\tp_a\tp_b\tp_success\n");
        for r in &self.rows {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{:.3}\t{:.3}\t{:.4}",
                r.step, r.traffic, r.trials_a, r.trials_b, r.p_a, r.p_b, r.success_rate
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(p: f64, successes: Vec<u64>, failures: Vec<u64>) -> TerminalSnapshot {
        TerminalSnapshot {
            probabilities: vec![p; successes.len()],
            successes,
            failures,
        }
    }

    #[test]
    fn rows_zip_traffic_and_counts() {
        let a = snap(0.9, vec![3, 0, 1], vec![1, 0, 0]);
        let b = snap(0.8, vec![4, 0, 2], vec![2, 0, 1]);
        let r = SimulationReport::new(&[10, 0, 4], &a, &b);
        assert_eq!(r.len(), 3);

        let row0 = r.row(0).unwrap();
        assert_eq!(row0.trials_a, 4);
        assert_eq!(row0.trials_b, 6);
        assert_eq!(row0.successes, 7);
        assert!((row0.success_rate - 0.7).abs() < 1e-12);
        assert_eq!(row0.p_a, 0.9);
        assert_eq!(row0.p_b, 0.8);

        assert!(r.row(1).unwrap().success_rate.is_nan());
        assert!(r.row(1).unwrap().expected_success_rate().is_nan());
        assert!((r.row(2).unwrap().success_rate - 0.75).abs() < 1e-12);
        assert!(r.row(3).is_none());
    }

    #[test]
    fn totals_skip_nan_steps() {
        let a = snap(0.9, vec![1, 0], vec![0, 0]);
        let b = snap(0.5, vec![0, 0], vec![1, 0]);
        let t = SimulationReport::new(&[2, 0], &a, &b).totals();
        assert_eq!(t.traffic, 2);
        assert_eq!(t.successes, 1);
        assert!((t.success_rate - 0.5).abs() < 1e-12);
        // One trial on B at 0.5 when A offered 0.9.
        assert!((t.regret - 0.4).abs() < 1e-12);
    }

    #[test]
    fn all_zero_traffic_totals_are_nan() {
        let a = snap(0.5, vec![0], vec![0]);
        let t = SimulationReport::new(&[0], &a, &a).totals();
        assert!(t.success_rate.is_nan());
        assert_eq!(t.regret, 0.0);
    }

    #[test]
    fn expected_success_rate_weights_by_routing() {
        let a = snap(0.9, vec![0], vec![3]);
        let b = snap(0.5, vec![0], vec![1]);
        let r = SimulationReport::new(&[4], &a, &b);
        let row = r.row(0).unwrap();
        assert!((row.expected_success_rate() - 0.8).abs() < 1e-12);
        assert_eq!(row.best_probability(), 0.9);
    }

    #[test]
    fn tsv_has_header_and_one_line_per_step() {
        let a = snap(0.9, vec![1, 0], vec![0, 0]);
        let b = snap(0.8, vec![0, 0], vec![0, 0]);
        let tsv = SimulationReport::new(&[1, 0], &a, &b).to_tsv();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("t\trps"));
        assert_eq!(lines[1], "0\t1\t1\t0\t0.900\t0.800\t1.0000");
        assert!(lines[2].ends_with("NaN"));
    }
}
