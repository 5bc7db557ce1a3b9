//! Spatial-hash flocking simulation.
//!
//! Thousands of 2D units steer by separation, alignment, and cohesion.
//! Neighbor queries are bounded by a uniform grid that is rebuilt from
//! scratch every tick, so per-unit cost depends on local density instead of
//! total population. Each tick runs three data-parallel phases in strict
//! order (grid clear, grid build, force compute) with a full barrier
//! between them; [`simulation::SimulationState::step`] drives the pipeline
//! and [`simulation::SimulationState::units`] exposes the result to a
//! rendering front end.

pub mod config;
pub mod constants;
pub mod flocking;
pub mod grid;
pub mod simulation;
pub mod unit;
pub mod utils;
