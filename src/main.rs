use std::time::Instant;

use murmuration::config::FlockingConfig;
use murmuration::constants::{DEFAULT_TICK_COUNT, FIXED_TIMESTEP, REPORT_INTERVAL_SECS};
use murmuration::simulation::SimulationState;

// Headless driver: runs the tick pipeline for a bounded number of steps and
// reports throughput and sampled state at a fixed interval. Rendering is
// left to an external front end consuming `SimulationState::units`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let tick_budget = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => DEFAULT_TICK_COUNT,
    };

    let mut state = SimulationState::new(FlockingConfig::default())?;

    let started = Instant::now();
    let mut last_report = Instant::now();
    let mut ticks_since_report = 0u64;
    for _ in 0..tick_budget {
        state.step(FIXED_TIMESTEP);
        ticks_since_report += 1;

        let elapsed = last_report.elapsed().as_secs_f64();
        if elapsed >= REPORT_INTERVAL_SECS {
            let diagnostics = state.diagnostics();
            log::info!(
                "tick {}: {} units, {:.0} ticks/s, {} dropped cell insertions",
                diagnostics.tick,
                diagnostics.unit_count,
                ticks_since_report as f64 / elapsed,
                diagnostics.dropped_insertions,
            );
            if let Some(unit) = diagnostics.sample {
                log::debug!(
                    "unit 0: pos=({:.1},{:.1}) vel=({:.2},{:.2})",
                    unit.position.x,
                    unit.position.y,
                    unit.velocity.x,
                    unit.velocity.y,
                );
            }
            last_report = Instant::now();
            ticks_since_report = 0;
        }
    }

    let total_secs = started.elapsed().as_secs_f64();
    log::info!(
        "finished {} ticks in {:.2}s ({:.0} ticks/s)",
        tick_budget,
        total_secs,
        tick_budget as f64 / total_secs.max(f64::EPSILON),
    );
    Ok(())
}
