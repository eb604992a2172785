//! The agent aggregate: one struct owning every piece of state a
//! tick's perception→arbitration→action pipeline touches. Agents live in
//! a contiguous `Vec` on the driver (see `npcsim-sim::engine`), indexed
//! by `Uid` — never as free ECS-style components.

use crate::commands::InboundEvent;
use crate::components::{
    ActionState, Alignment, AlignmentData, Awareness, BehaviorFlags, BuoyancyComponent,
    BuoyancyState, Chaser, FactionComponent, PidControllers, Psyche, ResourceNeeds, SoundMemory,
    Target, Timer,
};
use crate::constants::PID_SAMPLE_COUNT;
use crate::enums::{Action, FactionId};
use crate::types::{Uid, Vec3};

/// Default starting health for a freshly spawned agent.
const DEFAULT_HEALTH: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: Uid,
    pub name: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub patrol_origin: Vec3,
    pub health: f32,
    pub max_health: f32,

    pub faction: FactionComponent,
    pub alignment: AlignmentData,
    pub needs: ResourceNeeds,
    pub buoyancy: BuoyancyComponent,
    pub buoyancy_state: BuoyancyState,
    pub psyche: Psyche,
    pub awareness: Awareness,
    pub sounds: SoundMemory,
    pub target: Option<Target>,

    pub combat_state: ActionState,
    pub behavior_state: ActionState,
    pub timers: Timer,
    pub behavior_flags: BehaviorFlags,

    pub controllers: PidControllers<PID_SAMPLE_COUNT>,
    pub chaser: Chaser,

    pub current_action: Action,
    pub inbox: Vec<InboundEvent>,
}

impl Agent {
    /// Spawns at the origin with the `Humanoid` body preset, matching
    /// `add_agent`.
    pub fn new(id: Uid, name: impl Into<String>, faction_id: FactionId, rank: u8) -> Self {
        let mut faction = FactionComponent::default();
        faction.id = faction_id;
        faction.rank = rank;
        Self {
            id,
            name: name.into(),
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            patrol_origin: Vec3::ZERO,
            health: DEFAULT_HEALTH,
            max_health: DEFAULT_HEALTH,
            faction,
            alignment: AlignmentData::new(Alignment::Npc),
            needs: ResourceNeeds::default(),
            buoyancy: BuoyancyComponent::default(),
            buoyancy_state: BuoyancyState::Floating,
            psyche: Psyche::humanoid(),
            awareness: Awareness::default(),
            sounds: SoundMemory::default(),
            target: None,
            combat_state: ActionState::default(),
            behavior_state: ActionState::default(),
            timers: Timer::default(),
            behavior_flags: BehaviorFlags::empty(),
            controllers: PidControllers::default(),
            chaser: Chaser::default(),
            current_action: Action::Idle,
            inbox: Vec::new(),
        }
    }

    pub fn health_pct(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }
}
