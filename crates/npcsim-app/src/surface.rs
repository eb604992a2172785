//! The external command surface: the only re-entrancy point
//! into a running simulation. Wraps `SimulationEngine` and does two
//! things the core deliberately doesn't — resolve agents by name, and
//! translate wire integers to/from the core's enums — then forwards
//! everything else straight through.

use tracing::warn;

use npcsim_core::components::{SecProfile, SecProfileUpdate};
use npcsim_core::enums::{FactionId, WorldEventType};
use npcsim_core::events::WorldEvent;
use npcsim_core::types::Vec3;
use npcsim_sim::{SimConfig, SimulationEngine};

use crate::error::CommandError;

pub struct Surface {
    engine: SimulationEngine,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self { engine: SimulationEngine::new(SimConfig::default()) }
    }

    /// Advances the simulation by one tick. The only write operation a
    /// host must serialize against every other `Surface` call.
    pub fn step(&mut self, dt: f32) {
        self.engine.step(dt);
    }

    // --- command surface ---

    pub fn add_agent(&mut self, name: &str, faction_id: i32, rank: u8) -> u64 {
        self.engine.add_agent(name, FactionId::from_wire(faction_id), rank)
    }

    pub fn set_agent_sec_profile(&mut self, name: &str, update: &SecProfileUpdate) -> bool {
        match self.engine.agent_id_by_name(name) {
            Some(id) => self.engine.set_agent_sec_profile(id, update),
            None => {
                warn!(agent = name, "set_agent_sec_profile: no such agent");
                false
            }
        }
    }

    pub fn get_agent_sec_profile(&self, name: &str) -> Option<SecProfile> {
        let id = self.engine.agent_id_by_name(name)?;
        self.engine.get_agent_sec_profile(id)
    }

    pub fn publish_event(&mut self, event_type: i32, pos: Vec3, radius: f32) {
        self.engine.publish_event(WorldEvent::synthetic(WorldEventType::from_wire(event_type), pos, radius));
    }

    pub fn get_agent_states(&self) -> Vec<(u64, Vec3, i32)> {
        self.engine
            .get_agent_states()
            .agents
            .into_iter()
            .map(|row| (row.id, row.pos, row.action.to_wire()))
            .collect()
    }

    /// Validates then forwards sensor readings to the Logic Bridge
    /// via the engine. This is the one boundary where malformed input is
    /// rejected outright rather than silently degraded.
    pub fn submit_sensor_readings(
        &mut self,
        readings: &[npcsim_core::commands::SensorReading],
    ) -> Result<(), CommandError> {
        for reading in readings {
            if reading.metric.is_empty() {
                return Err(CommandError::EmptyMetric);
            }
            if !reading.value.is_finite() || !reading.threshold.is_finite() {
                return Err(CommandError::NonFiniteReading(reading.metric.clone()));
            }
        }
        self.engine.submit_sensor_readings(readings);
        Ok(())
    }

    // --- supplemental: job blackboard & ghost replay, exposed the same way ---

    pub fn post_job(&mut self, job_type: npcsim_core::enums::JobType, position: Vec3, priority: f32, difficulty: f32) -> u64 {
        self.engine.post_job(job_type, position, priority, difficulty)
    }

    pub fn bid_for_job(
        &mut self,
        agent_name: &str,
        preferred: npcsim_core::enums::JobType,
    ) -> Option<npcsim_core::components::Job> {
        match self.engine.agent_id_by_name(agent_name) {
            Some(id) => self.engine.bid_for_job(id, preferred),
            None => {
                warn!(agent = agent_name, "bid_for_job: no such agent");
                None
            }
        }
    }

    pub fn ghost_history(&self, agent_name: &str) -> Vec<npcsim_core::components::GhostFrame> {
        let Some(id) = self.engine.agent_id_by_name(agent_name) else {
            warn!(agent = agent_name, "ghost_history: no such agent");
            return Vec::new();
        };
        self.engine.ghost_history(id).map(|frames| frames.iter().copied().collect()).unwrap_or_default()
    }

    pub fn add_trade_site(&mut self, position: Vec3) -> u32 {
        self.engine.add_trade_site(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcsim_core::enums::Action;

    #[test]
    fn add_agent_then_get_states_round_trips_position() {
        let mut surface = Surface::new();
        surface.add_agent("scout", 1, 1);
        surface.step(1.0 / 30.0);
        let states = surface.get_agent_states();
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn sec_profile_set_and_get_round_trip() {
        let mut surface = Surface::new();
        surface.add_agent("tunable", 0, 0);
        let mut update = SecProfileUpdate::default();
        update.fear_threshold = Some(25.0);
        assert!(surface.set_agent_sec_profile("tunable", &update));
        assert_eq!(surface.get_agent_sec_profile("tunable").unwrap().fear_threshold, 25.0);
    }

    #[test]
    fn get_agent_sec_profile_is_none_for_unknown_agent() {
        let surface = Surface::new();
        assert!(surface.get_agent_sec_profile("ghost").is_none());
    }

    #[test]
    fn publish_event_reaches_nearby_agents_next_step() {
        let mut surface = Surface::new();
        surface.add_agent("watcher", 2, 1);
        surface.publish_event(4, Vec3::ZERO, 50.0); // HarpoonEvent
        surface.step(1.0 / 30.0);
        let (_, _, action) = surface.get_agent_states()[0];
        assert_eq!(action, Action::Attack.to_wire());
    }

    #[test]
    fn submit_sensor_readings_rejects_empty_metric() {
        let mut surface = Surface::new();
        let reading = npcsim_core::commands::SensorReading {
            metric: String::new(),
            value: 1.0,
            threshold: 0.5,
            owner_id: 0,
            position: Vec3::ZERO,
        };
        assert_eq!(surface.submit_sensor_readings(&[reading]), Err(CommandError::EmptyMetric));
    }

    #[test]
    fn submit_sensor_readings_rejects_non_finite_value() {
        let mut surface = Surface::new();
        let reading = npcsim_core::commands::SensorReading {
            metric: "WaterLevel".to_string(),
            value: f32::NAN,
            threshold: 0.5,
            owner_id: 0,
            position: Vec3::ZERO,
        };
        assert!(matches!(surface.submit_sensor_readings(&[reading]), Err(CommandError::NonFiniteReading(_))));
    }

    #[test]
    fn bid_for_job_fails_for_unknown_agent() {
        let mut surface = Surface::new();
        surface.post_job(npcsim_core::enums::JobType::Scavenge, Vec3::ZERO, 1.0, 0.5);
        assert!(surface.bid_for_job("nobody", npcsim_core::enums::JobType::Scavenge).is_none());
    }
}
