// --- Global Simulation Constants ---

/// Member slots per grid cell. Insertions past this are dropped from
/// neighbor search for the rest of the tick.
pub const CELL_CAPACITY: usize = 32;

pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const DEFAULT_UNIT_COUNT: usize = 10_000;
pub const DEFAULT_TICK_COUNT: u64 = 600;

// Units spawn inside this fraction of the world half-extent.
pub const SPAWN_MARGIN_FACTOR: f32 = 0.8;
// Fraction of max_speed given to the randomized initial velocity.
pub const INITIAL_SPEED_FRACTION: f32 = 0.5;

// Minimum work items per rayon task in each parallel phase.
pub const CLEAR_GRAIN: usize = 256;
pub const BUILD_GRAIN: usize = 64;
pub const COMPUTE_GRAIN: usize = 64;

/// How often the driver loop samples and logs diagnostics.
pub const REPORT_INTERVAL_SECS: f64 = 2.0;
