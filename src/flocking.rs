// --- File: flocking.rs ---
use glam::Vec2;

use crate::config::FlockingConfig;
use crate::grid::SpatialGrid;
use crate::unit::Unit;

/// Raw per-behavior accumulators for one unit, before weighting. Kept
/// separate so each contribution can be inspected on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct Steering {
    /// Sum of unit vectors away from near neighbors, inverse-distance
    /// weighted.
    pub separation: Vec2,
    /// Average velocity of neighbors inside the alignment radius.
    pub alignment: Vec2,
    /// Vector from the unit toward the centroid of cohesion neighbors.
    pub cohesion: Vec2,
}

/// Gather neighbor contributions for `units[index]` from its cell and the
/// eight adjacent cells. Cells past the grid edge are skipped, not wrapped.
/// Every qualifying neighbor is summed; there is no nearest-k selection, so
/// ties among equidistant neighbors cannot matter.
pub fn accumulate(
    index: usize,
    units: &[Unit],
    grid: &SpatialGrid,
    config: &FlockingConfig,
) -> Steering {
    let position = units[index].position;
    let (cell_x, cell_y) = grid.cell_coords(position);

    let separation_radius_sq = config.separation_radius * config.separation_radius;
    let alignment_radius_sq = config.alignment_radius * config.alignment_radius;
    let cohesion_radius_sq = config.cohesion_radius * config.cohesion_radius;

    let mut separation = Vec2::ZERO;
    let mut velocity_sum = Vec2::ZERO;
    let mut alignment_count = 0u32;
    let mut centroid_sum = Vec2::ZERO;
    let mut cohesion_count = 0u32;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let check_x = cell_x + dx;
            let check_y = cell_y + dy;
            if check_x < 0 || check_x >= grid.width() || check_y < 0 || check_y >= grid.height() {
                continue;
            }
            for neighbor in grid.members(grid.cell_index(check_x, check_y)) {
                if neighbor == index {
                    continue;
                }
                let other = &units[neighbor];
                let away = position - other.position;
                let dist_sq = away.length_squared();

                // Coincident units produce no usable direction; skip them
                // for separation only.
                if dist_sq < separation_radius_sq && dist_sq > 1e-6 {
                    let dist = dist_sq.sqrt();
                    separation += away / (dist * dist);
                }
                if dist_sq < alignment_radius_sq {
                    velocity_sum += other.velocity;
                    alignment_count += 1;
                }
                if dist_sq < cohesion_radius_sq {
                    centroid_sum += other.position;
                    cohesion_count += 1;
                }
            }
        }
    }

    let alignment = if alignment_count > 0 {
        velocity_sum / alignment_count as f32
    } else {
        Vec2::ZERO
    };
    let cohesion = if cohesion_count > 0 {
        centroid_sum / cohesion_count as f32 - position
    } else {
        Vec2::ZERO
    };

    Steering {
        separation,
        alignment,
        cohesion,
    }
}

/// Blend the three contributions into one force, capped at `max_force`.
#[inline]
pub fn steering_force(steering: &Steering, config: &FlockingConfig) -> Vec2 {
    (steering.separation * config.separation_weight
        + steering.alignment * config.alignment_weight
        + steering.cohesion * config.cohesion_weight)
        .clamp_length_max(config.max_force)
}

/// Compute the next state of `units[index]`: accumulate, apply the force to
/// velocity, clamp speed, integrate position, and resolve world-edge
/// contact by clamping position and zeroing the outward velocity component.
pub fn step_unit(
    index: usize,
    units: &[Unit],
    grid: &SpatialGrid,
    config: &FlockingConfig,
    delta_time: f32,
) -> Unit {
    let steering = accumulate(index, units, grid, config);
    let force = steering_force(&steering, config);

    let unit = &units[index];
    let mut velocity = (unit.velocity + force * delta_time).clamp_length_max(config.max_speed);
    let mut position = unit.position + velocity * delta_time;

    let bounds = config.bounds_size;
    if position.x < -bounds {
        position.x = -bounds;
        velocity.x = velocity.x.max(0.0);
    } else if position.x > bounds {
        position.x = bounds;
        velocity.x = velocity.x.min(0.0);
    }
    if position.y < -bounds {
        position.y = -bounds;
        velocity.y = velocity.y.max(0.0);
    } else if position.y > bounds {
        position.y = bounds;
        velocity.y = velocity.y.min(0.0);
    }

    Unit { position, velocity }
}
