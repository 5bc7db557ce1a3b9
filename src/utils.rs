use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

// --- Helper Functions ---

pub fn random_unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::from_angle(angle)
}
