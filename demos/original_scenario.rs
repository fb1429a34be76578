//! Terminal A dips from 0.9 to 0.5 for steps 20..40 while B holds at 0.8.
//!
//! Prints the per-step table (tab-separated) and whole-run totals.
//!
//! Run:
//! `RUST_LOG=debug cargo run --example original_scenario -- 7`

use thompson_split::{suggested_window, BanditSimulator, SeededSource, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Optional first argument: seed. Without it, seed from the OS.
    let source = match std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_os_rng(),
    };

    let cfg = SimulationConfig::default();
    eprintln!(
        "window={} (suggested for this schedule: {})",
        cfg.window,
        suggested_window(cfg.duration, &[cfg.terminal_a.as_slice(), cfg.terminal_b.as_slice()])
    );

    let mut sim = match BanditSimulator::new(&cfg, source) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("invalid config: {e}");
            std::process::exit(2);
        }
    };
    eprintln!("running {} steps, window={}", sim.duration(), sim.window());
    sim.run();

    let report = sim.report();
    print!("{}", report.to_tsv());

    let t = report.totals();
    eprintln!(
        "traffic={} a={} b={} success_rate={:.4} regret={:.1}",
        t.traffic, t.trials_a, t.trials_b, t.success_rate, t.regret
    );
}
