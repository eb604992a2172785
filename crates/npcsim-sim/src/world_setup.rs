//! Spawn helpers for building a simulation world: wraps
//! `SimulationEngine::add_agent` with the placement and preset the
//! scenario tests need instead of repeating it inline everywhere.

use npcsim_core::enums::FactionId;
use npcsim_core::types::{Uid, Vec3};

use crate::engine::SimulationEngine;

/// Spawns an agent then places it, since `add_agent` itself always
/// starts an agent at the origin.
pub fn spawn_agent_at(
    engine: &mut SimulationEngine,
    name: impl Into<String>,
    faction: FactionId,
    rank: u8,
    position: Vec3,
) -> Uid {
    let id = engine.add_agent(name, faction, rank);
    if let Some(agent) = engine.agent_mut(id) {
        agent.position = position;
        agent.patrol_origin = position;
    }
    id
}

/// A small patrol line of agents from the same faction, evenly spaced
/// along the x axis starting at `origin`.
pub fn spawn_patrol_line(
    engine: &mut SimulationEngine,
    name_prefix: &str,
    faction: FactionId,
    rank: u8,
    origin: Vec3,
    count: usize,
    spacing: f32,
) -> Vec<Uid> {
    (0..count)
        .map(|i| {
            let pos = Vec3::new(origin.x + i as f32 * spacing, origin.y, origin.z);
            spawn_agent_at(engine, format!("{name_prefix}-{i}"), faction, rank, pos)
        })
        .collect()
}
