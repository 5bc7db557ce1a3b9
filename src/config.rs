// --- File: config.rs ---
use thiserror::Error;

use crate::constants::DEFAULT_UNIT_COUNT;

/// Errors detected while validating a [`FlockingConfig`] at startup.
///
/// These are fatal: the simulation refuses to start rather than run with a
/// degenerate world or grid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Parameter set for one simulation run.
///
/// Read-only once the simulation is constructed; the per-tick delta time is
/// passed to `step` instead of living here. The world is the square
/// `[-bounds_size, bounds_size]` on both axes.
#[derive(Debug, Clone)]
pub struct FlockingConfig {
    pub unit_count: usize,
    /// Half-extent of the square world.
    pub bounds_size: f32,
    /// Edge length of one spatial grid cell.
    pub cell_size: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub max_speed: f32,
    pub max_force: f32,
    /// Fixed rng seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FlockingConfig {
    fn default() -> Self {
        Self {
            unit_count: DEFAULT_UNIT_COUNT,
            bounds_size: 50.0,
            cell_size: 5.0,
            separation_radius: 1.0,
            alignment_radius: 3.0,
            cohesion_radius: 3.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            max_speed: 5.0,
            max_force: 3.0,
            seed: None,
        }
    }
}

impl FlockingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_count == 0 {
            return Err(ConfigError::InvalidConfig("unit_count must be non-zero"));
        }
        if self.bounds_size <= 0.0 {
            return Err(ConfigError::InvalidConfig("bounds_size must be positive"));
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidConfig("cell_size must be positive"));
        }
        if self.separation_radius <= 0.0 {
            return Err(ConfigError::InvalidConfig(
                "separation_radius must be positive",
            ));
        }
        if self.alignment_radius <= 0.0 {
            return Err(ConfigError::InvalidConfig(
                "alignment_radius must be positive",
            ));
        }
        if self.cohesion_radius <= 0.0 {
            return Err(ConfigError::InvalidConfig(
                "cohesion_radius must be positive",
            ));
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::InvalidConfig("max_speed must be positive"));
        }
        if self.max_force <= 0.0 {
            return Err(ConfigError::InvalidConfig("max_force must be positive"));
        }
        Ok(())
    }
}
