//! Simulation driver for the NPC agent decision engine.
//!
//! `SimulationEngine` owns every agent in a flat arena and runs the
//! per-tick systems (perception, doctrine, execution) over it. Headless:
//! no rendering, no host framework, deterministic given the same sequence
//! of inputs.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
