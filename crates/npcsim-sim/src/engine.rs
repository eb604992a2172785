//! The simulation driver. `SimulationEngine` owns every agent in a flat
//! arena (`Vec<Agent>`, indexed by `Uid`) plus the shared systems that
//! operate across agents — the event bus, job blackboard, ghost
//! recorder, and trade-site registry. No ECS: agents are plain structs
//! in a contiguous vector, never free-floating components.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use npcsim_core::agent::Agent;
use npcsim_core::commands::SensorReading;
use npcsim_core::components::{GhostFrame, Job, SecProfile, SecProfileUpdate, TradeSite};
use npcsim_core::constants::FLOODING_ALARM_RESPONSE_RADIUS;
use npcsim_core::enums::{FactionId, JobType};
use npcsim_core::events::WorldEvent;
use npcsim_core::state::{AgentStateView, AgentStatesSnapshot};
use npcsim_core::types::{SimTime, SiteId, Uid, Vec3};

use crate::systems::blackboard::JobBlackboard;
use crate::systems::bus::WorldEventBus;
use crate::systems::ghost::GhostRecorder;
use crate::systems::{execute, logic_bridge, perception};

/// Configuration for starting a new simulation. No RNG seed here:
/// doctrine and wandering are both deterministic functions of agent
/// state and simulation time.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Fixed tick duration passed to `step` by convenience callers; `step`
    /// itself accepts any `dt`.
    pub tick_dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { tick_dt: npcsim_core::constants::DT }
    }
}

pub struct SimulationEngine {
    agents: Vec<Agent>,
    name_index: HashMap<String, Uid>,
    next_agent_id: Uid,
    time: SimTime,
    bus: WorldEventBus,
    blackboard: JobBlackboard,
    ghosts: GhostRecorder,
    trade_sites: Vec<TradeSite>,
    next_site_id: SiteId,
    pending_sensors: VecDeque<SensorReading>,
    config: SimConfig,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            agents: Vec::new(),
            name_index: HashMap::new(),
            next_agent_id: 0,
            time: SimTime::default(),
            bus: WorldEventBus::default(),
            blackboard: JobBlackboard::default(),
            ghosts: GhostRecorder::default(),
            trade_sites: Vec::new(),
            next_site_id: 0,
            pending_sensors: VecDeque::new(),
            config,
        }
    }

    // --- Spawning & lookup ---

    pub fn add_agent(&mut self, name: impl Into<String>, faction: FactionId, rank: u8) -> Uid {
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        let name = name.into();
        self.name_index.insert(name.clone(), id);
        self.agents.push(Agent::new(id, name, faction, rank));
        id
    }

    pub fn agent(&self, id: Uid) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: Uid) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn agent_id_by_name(&self, name: &str) -> Option<Uid> {
        self.name_index.get(name).copied()
    }

    pub fn add_trade_site(&mut self, position: Vec3) -> SiteId {
        let id = self.next_site_id;
        self.next_site_id += 1;
        self.trade_sites.push(TradeSite { id, position });
        id
    }

    // --- SEC profile ---

    pub fn get_agent_sec_profile(&self, id: Uid) -> Option<SecProfile> {
        self.agent(id).map(|a| a.faction.sec_profile)
    }

    pub fn set_agent_sec_profile(&mut self, id: Uid, update: &SecProfileUpdate) -> bool {
        match self.agent_mut(id) {
            Some(agent) => {
                agent.faction.sec_profile.apply_update(update);
                true
            }
            None => {
                debug!(agent_id = id, "set_agent_sec_profile: no such agent");
                false
            }
        }
    }

    // --- Events & sensors ---

    pub fn publish_event(&mut self, event: WorldEvent) {
        self.bus.publish(event);
    }

    pub fn submit_sensor_readings(&mut self, readings: &[SensorReading]) {
        self.pending_sensors.extend(readings.iter().cloned());
    }

    // --- Job blackboard ---

    pub fn post_job(
        &mut self,
        job_type: npcsim_core::enums::JobType,
        position: Vec3,
        priority: f32,
        difficulty: f32,
    ) -> Uid {
        self.blackboard.post_job(job_type, position, priority, difficulty)
    }

    pub fn bid_for_job(&mut self, agent_id: Uid, preferred: JobType) -> Option<Job> {
        self.blackboard.bid_for_job(agent_id, preferred)
    }

    // --- Ghost replay ---

    pub fn ghost_history(&self, id: Uid) -> Option<&VecDeque<GhostFrame>> {
        self.ghosts.history(id)
    }

    // --- Clock & snapshots ---

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn get_agent_states(&self) -> AgentStatesSnapshot {
        AgentStatesSnapshot {
            time: self.time,
            agents: self
                .agents
                .iter()
                .map(|a| AgentStateView { id: a.id, pos: a.position, action: a.current_action })
                .collect(),
        }
    }

    /// Advance the simulation by one tick of duration `dt`.
    pub fn step(&mut self, dt: f32) {
        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        while let Some(reading) = self.pending_sensors.pop_front() {
            if let Some(event) = logic_bridge::translate(&reading) {
                self.bus.publish(event);
            }
        }

        let Self { agents, bus, blackboard, ghosts, trade_sites, .. } = self;

        for agent in agents.iter_mut() {
            perception::perceive(agent, now, dt);
            ghosts.record(agent.id, GhostFrame { pos: agent.position, timestamp: now });

            // Wide enough to cover both this agent's sight and the fixed
            // flooding-alarm response radius; doctrine re-checks the exact
            // per-row cutoff itself (sight_dist for sighting rows, the flat
            // 50 m for flooding), so over-fetching here is harmless.
            let range = agent.psyche.sight_dist.max(FLOODING_ALARM_RESPONSE_RADIUS);
            let nearby = bus.query_nearby(agent.position, range);
            let job = blackboard.assigned_to(agent.id).copied();
            let outcome =
                npcsim_doctrine::doctrine::decide(agent, &nearby, job.as_ref(), trade_sites.as_slice());

            if outcome.force_alert {
                agent.awareness.set_maximally_aware();
            }
            if let Some(job_id) = outcome.consumed_job {
                blackboard.complete_job(job_id);
            }
            agent.controllers.add_measurement(now, agent.position);

            trace!(agent_id = agent.id, action = ?outcome.action, "doctrine decision");
            execute::execute(agent, &outcome, now, dt);
        }

        self.bus.clear_old();
    }
}
