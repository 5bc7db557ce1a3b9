// --- File: grid.rs ---
use glam::Vec2;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::ConfigError;
use crate::constants::{BUILD_GRAIN, CELL_CAPACITY, CLEAR_GRAIN};
use crate::unit::Unit;

/// Uniform spatial grid over the square world `[-bounds_size, bounds_size]`.
///
/// The grid is wholly rebuilt every tick: `clear` resets all cell counts,
/// `build` hashes every unit into its cell. Both are data-parallel passes;
/// the caller must let each pass finish (the rayon join is the barrier)
/// before starting the next. Cell membership is the one structure mutated
/// concurrently, so appends go through an atomic increment-and-place:
/// `fetch_add` reserves a unique slot, the store fills it. Relaxed ordering
/// is enough because readers only run after the build phase has joined.
///
/// Each cell records at most [`CELL_CAPACITY`] member indices. Units hashed
/// into a full cell are left out of neighbor search for the tick; the raw
/// count keeps growing so the loss stays visible through [`overflow`].
///
/// [`overflow`]: SpatialGrid::overflow
pub struct SpatialGrid {
    width: i32,
    height: i32,
    cell_size: f32,
    bounds_min: Vec2,
    /// Units hashed per cell this tick, not capped at capacity.
    counts: Vec<AtomicU32>,
    /// Flat `total_cells * CELL_CAPACITY` member-slot array.
    members: Vec<AtomicU32>,
}

impl SpatialGrid {
    pub fn new(bounds_size: f32, cell_size: f32) -> Result<Self, ConfigError> {
        if bounds_size <= 0.0 {
            return Err(ConfigError::InvalidConfig("bounds_size must be positive"));
        }
        if cell_size <= 0.0 {
            return Err(ConfigError::InvalidConfig("cell_size must be positive"));
        }
        let span = bounds_size * 2.0;
        let width = (span / cell_size).ceil() as i32;
        let height = (span / cell_size).ceil() as i32;
        let total = (width * height) as usize;
        Ok(Self {
            width,
            height,
            cell_size,
            bounds_min: Vec2::new(-bounds_size, -bounds_size),
            counts: (0..total).map(|_| AtomicU32::new(0)).collect(),
            members: (0..total * CELL_CAPACITY)
                .map(|_| AtomicU32::new(0))
                .collect(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn total_cells(&self) -> usize {
        self.counts.len()
    }

    /// Cell coordinate for a world position. Positions outside the world
    /// clamp to the nearest edge cell; units are free to leave the nominal
    /// bounds, only the addressing clamps.
    #[inline]
    pub fn cell_coords(&self, position: Vec2) -> (i32, i32) {
        let cell_x = ((position.x - self.bounds_min.x) / self.cell_size).floor() as i32;
        let cell_y = ((position.y - self.bounds_min.y) / self.cell_size).floor() as i32;
        (
            cell_x.clamp(0, self.width - 1),
            cell_y.clamp(0, self.height - 1),
        )
    }

    #[inline]
    pub fn cell_index(&self, cell_x: i32, cell_y: i32) -> usize {
        (cell_y * self.width + cell_x) as usize
    }

    /// Phase 1: reset every cell count. Parallel over cells.
    pub fn clear(&self) {
        self.counts
            .par_iter()
            .with_min_len(CLEAR_GRAIN)
            .for_each(|count| count.store(0, Ordering::Relaxed));
    }

    /// Phase 2: hash every unit into its cell. Parallel over units; must
    /// only run once `clear` has returned.
    pub fn build(&self, units: &[Unit]) {
        units
            .par_iter()
            .enumerate()
            .with_min_len(BUILD_GRAIN)
            .for_each(|(index, unit)| self.insert(index as u32, unit.position));
    }

    #[inline]
    fn insert(&self, index: u32, position: Vec2) {
        let (cell_x, cell_y) = self.cell_coords(position);
        let cell = self.cell_index(cell_x, cell_y);
        let slot = self.counts[cell].fetch_add(1, Ordering::Relaxed);
        if (slot as usize) < CELL_CAPACITY {
            self.members[cell * CELL_CAPACITY + slot as usize].store(index, Ordering::Relaxed);
        }
    }

    /// Recorded members in a cell, capped at capacity.
    #[inline]
    pub fn cell_count(&self, cell: usize) -> usize {
        (self.counts[cell].load(Ordering::Relaxed) as usize).min(CELL_CAPACITY)
    }

    /// Unit indices recorded in a cell this tick.
    pub fn members(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let base = cell * CELL_CAPACITY;
        self.members[base..base + self.cell_count(cell)]
            .iter()
            .map(|member| member.load(Ordering::Relaxed) as usize)
    }

    /// Insertions dropped by full cells in the most recent build, for
    /// diagnostics. Overflow is bounded degradation, not an error.
    pub fn overflow(&self) -> u32 {
        self.counts
            .iter()
            .map(|count| {
                count
                    .load(Ordering::Relaxed)
                    .saturating_sub(CELL_CAPACITY as u32)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32) -> Unit {
        Unit {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
        }
    }

    #[test]
    fn dimensions_follow_bounds_and_cell_size() {
        let grid = SpatialGrid::new(10.0, 5.0).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.total_cells(), 16);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(SpatialGrid::new(0.0, 5.0).is_err());
        assert!(SpatialGrid::new(10.0, 0.0).is_err());
        assert!(SpatialGrid::new(10.0, -1.0).is_err());
    }

    #[test]
    fn single_unit_occupies_exactly_one_cell() {
        let grid = SpatialGrid::new(10.0, 5.0).unwrap();
        let units = [unit_at(1.0, 1.0)];
        grid.clear();
        grid.build(&units);

        let occupied: Vec<usize> = (0..grid.total_cells())
            .filter(|&cell| grid.cell_count(cell) > 0)
            .collect();
        assert_eq!(occupied, vec![grid.cell_index(2, 2)]);
        assert_eq!(grid.members(occupied[0]).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn recorded_cell_matches_position_formula() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let grid = SpatialGrid::new(10.0, 5.0).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        // Spawn past the bounds on purpose so clamping is exercised too;
        // population kept small enough that no cell can fill up.
        let units: Vec<Unit> = (0..60)
            .map(|_| unit_at(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0)))
            .collect();
        grid.clear();
        grid.build(&units);

        let mut recorded_cell = vec![None; units.len()];
        for cell in 0..grid.total_cells() {
            for member in grid.members(cell) {
                assert!(recorded_cell[member].is_none(), "unit recorded twice");
                recorded_cell[member] = Some(cell);
            }
        }
        for (index, unit) in units.iter().enumerate() {
            let (cell_x, cell_y) = grid.cell_coords(unit.position);
            assert_eq!(recorded_cell[index], Some(grid.cell_index(cell_x, cell_y)));
        }
    }

    #[test]
    fn out_of_bounds_positions_clamp_to_edge_cells() {
        let grid = SpatialGrid::new(10.0, 5.0).unwrap();
        assert_eq!(grid.cell_coords(Vec2::new(-100.0, 100.0)), (0, 3));
        assert_eq!(grid.cell_coords(Vec2::new(100.0, -100.0)), (3, 0));

        let units = [unit_at(-100.0, 100.0)];
        grid.clear();
        grid.build(&units);
        assert_eq!(grid.cell_count(grid.cell_index(0, 3)), 1);
    }

    #[test]
    fn cell_count_is_capped_and_overflow_reported() {
        let grid = SpatialGrid::new(10.0, 5.0).unwrap();
        let units: Vec<Unit> = (0..CELL_CAPACITY + 8).map(|_| unit_at(1.0, 1.0)).collect();
        grid.clear();
        grid.build(&units);

        let cell = grid.cell_index(2, 2);
        assert_eq!(grid.cell_count(cell), CELL_CAPACITY);
        assert_eq!(grid.overflow(), 8);
        for member in grid.members(cell) {
            assert!(member < units.len());
        }
    }

    #[test]
    fn clear_resets_every_cell() {
        let grid = SpatialGrid::new(10.0, 5.0).unwrap();
        let units: Vec<Unit> = (0..40).map(|i| unit_at(i as f32 * 0.4 - 8.0, 0.0)).collect();
        grid.clear();
        grid.build(&units);
        grid.clear();

        for cell in 0..grid.total_cells() {
            assert_eq!(grid.cell_count(cell), 0);
        }
        assert_eq!(grid.overflow(), 0);
    }
}
