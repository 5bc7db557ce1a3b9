// --- File: unit.rs ---
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

use crate::config::FlockingConfig;
use crate::constants::{INITIAL_SPEED_FRACTION, SPAWN_MARGIN_FACTOR};
use crate::utils::random_unit_direction;

/// One simulated individual. The index into the unit buffer is its identity
/// for the tick; there is no other id.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Unit {
    pub position: Vec2,
    pub velocity: Vec2,
}

// --- GPU Data Structure ---
// Wire format handed to the rendering collaborator for instanced drawing.
// `repr(C)` keeps the 16-byte stride (position.xy, velocity.xy) stable; the
// velocity doubles as the instance heading.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct UnitInstance {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
}

impl From<&Unit> for UnitInstance {
    fn from(unit: &Unit) -> Self {
        Self {
            position: unit.position.to_array(),
            velocity: unit.velocity.to_array(),
        }
    }
}

/// Spawn the initial population: positions uniform within the spawn margin,
/// velocities in a random direction at a fraction of the speed cap.
pub fn spawn_units<R: Rng + ?Sized>(rng: &mut R, config: &FlockingConfig) -> Vec<Unit> {
    let extent = config.bounds_size * SPAWN_MARGIN_FACTOR;
    let seed_speed = config.max_speed * INITIAL_SPEED_FRACTION;
    (0..config.unit_count)
        .map(|_| Unit {
            position: Vec2::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            ),
            velocity: random_unit_direction(rng) * seed_speed,
        })
        .collect()
}
