// --- File: simulation.rs ---
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::mem;

use crate::config::{ConfigError, FlockingConfig};
use crate::constants::COMPUTE_GRAIN;
use crate::flocking;
use crate::grid::SpatialGrid;
use crate::unit::{Unit, UnitInstance, spawn_units};

pub type SimRng = StdRng;

/// Point-in-time counters for external logging. Producing one of these is
/// cheap relative to a tick, but callers are expected to sample at their
/// own rate rather than every tick.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    pub tick: u64,
    pub unit_count: usize,
    pub grid_width: i32,
    pub grid_height: i32,
    /// Insertions dropped by full grid cells during the last build.
    pub dropped_insertions: u32,
    /// State of unit 0, as a representative probe.
    pub sample: Option<Unit>,
}

/// Owns the unit buffers, the spatial grid, and the parameter set, and runs
/// the three-phase tick pipeline over them.
///
/// Each phase is one rayon parallel-for; returning from it is the full
/// barrier the next phase relies on. The compute phase reads the current
/// unit buffer and writes each unit's next state into that unit's own slot
/// of a scratch buffer, so no work item ever writes another unit's state
/// and no locking is needed; the buffers swap once the phase joins.
pub struct SimulationState {
    units: Vec<Unit>,
    scratch: Vec<Unit>,
    grid: SpatialGrid,
    config: FlockingConfig,
    rng: SimRng,
    tick: u64,
}

impl SimulationState {
    /// Validate the configuration and spawn the initial population.
    /// Invalid parameters fail here, before anything is allocated; a
    /// running simulation has no fallible operations.
    pub fn new(config: FlockingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = SpatialGrid::new(config.bounds_size, config.cell_size)?;
        let mut rng = match config.seed {
            Some(seed) => SimRng::seed_from_u64(seed),
            None => SimRng::from_entropy(),
        };
        let units = spawn_units(&mut rng, &config);
        let scratch = units.clone();
        log::info!(
            "initialized {} units, grid {}x{} ({} cells)",
            units.len(),
            grid.width(),
            grid.height(),
            grid.total_cells(),
        );
        Ok(Self {
            units,
            scratch,
            grid,
            config,
            rng,
            tick: 0,
        })
    }

    /// Advance the simulation by one tick: grid clear, grid build, then
    /// neighbor-bounded force computation, in that order, each phase
    /// finishing before the next starts.
    pub fn step(&mut self, delta_time: f32) {
        self.grid.clear();
        self.grid.build(&self.units);

        let units = &self.units;
        let grid = &self.grid;
        let config = &self.config;
        self.scratch
            .par_iter_mut()
            .with_min_len(COMPUTE_GRAIN)
            .enumerate()
            .for_each(|(index, next)| {
                *next = flocking::step_unit(index, units, grid, config, delta_time);
            });

        mem::swap(&mut self.units, &mut self.scratch);
        self.tick += 1;
    }

    /// Read-only view of the population for the rendering collaborator.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn config(&self) -> &FlockingConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Pack the population into the instanced-rendering wire format,
    /// reusing the caller's buffer.
    pub fn fill_instance_data(&self, out: &mut Vec<UnitInstance>) {
        out.clear();
        out.extend(self.units.iter().map(UnitInstance::from));
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            tick: self.tick,
            unit_count: self.units.len(),
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            dropped_insertions: self.grid.overflow(),
            sample: self.units.first().copied(),
        }
    }

    /// Throw away the current population and respawn from a fresh entropy
    /// seed. Grid dimensions are unchanged.
    pub fn restart(&mut self) {
        log::info!("restarting simulation with new seed");
        self.rng = SimRng::from_entropy();
        self.units = spawn_units(&mut self.rng, &self.config);
        self.scratch.clone_from(&self.units);
        self.tick = 0;
    }
}
