//! Closed enumeration types used throughout the decision engine.
//!
//! Tagged variants over class hierarchies: every one of these is a pure
//! sum type with a pure-function transition table elsewhere in this crate
//! or in `npcsim-doctrine`, never a subclass tree.

use serde::{Deserialize, Serialize};

/// An agent's relational category versus other agents, governing default
/// hostility (see [`crate::components::AlignmentData`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Wild,
    Enemy,
    Npc,
    Tame,
    Owned,
    Passive,
}

/// Faction identifier. `None` is the default for unaffiliated agents and
/// for synthetic command-surface sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionId {
    #[default]
    None,
    Syndicate,
    Covenant,
    Tidebound,
}

impl FactionId {
    /// Stable wire mapping used by the command surface: out-of-range
    /// values clamp to `None` rather than erroring.
    pub fn from_wire(value: i32) -> Self {
        match value {
            1 => FactionId::Syndicate,
            2 => FactionId::Covenant,
            3 => FactionId::Tidebound,
            _ => FactionId::None,
        }
    }

    pub fn to_wire(self) -> i32 {
        match self {
            FactionId::None => 0,
            FactionId::Syndicate => 1,
            FactionId::Covenant => 2,
            FactionId::Tidebound => 3,
        }
    }
}

/// The action an agent has selected for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Trade,
    Flee,
    Attack,
    Scavenge,
    Dive,
    DamageControl,
}

impl Action {
    /// Stable wire mapping used by `get_agent_states`.
    pub fn to_wire(self) -> i32 {
        match self {
            Action::Idle => 0,
            Action::Trade => 1,
            Action::Flee => 2,
            Action::Attack => 3,
            Action::Scavenge => 4,
            Action::Dive => 5,
            Action::DamageControl => 6,
        }
    }
}

/// World event category. The specification's source defined this set
/// twice with diverging variants (`DiplomacyChange`, `ResourceScarce`
/// present in only one definition); per the resolved open question this
/// is the canonical union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldEventType {
    StructuralFailure,
    DistressSignal,
    ResourceEvent,
    FloodingAlarm,
    HarpoonEvent,
    DiplomacyChange,
    ResourceScarce,
}

impl WorldEventType {
    /// Stable wire mapping used by `publish_event`. Out-of-range
    /// values clamp to the smallest variant.
    pub fn from_wire(value: i32) -> Self {
        match value {
            0 => WorldEventType::StructuralFailure,
            1 => WorldEventType::DistressSignal,
            2 => WorldEventType::ResourceEvent,
            3 => WorldEventType::FloodingAlarm,
            4 => WorldEventType::HarpoonEvent,
            5 => WorldEventType::DiplomacyChange,
            6 => WorldEventType::ResourceScarce,
            _ => WorldEventType::StructuralFailure,
        }
    }
}

/// Cooperative task category for the [`crate::components::Job`] blackboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Scavenge,
    Repair,
    Combat,
    Transport,
}

/// Buoyancy state derived each tick from current health (see
/// [`crate::components::BuoyancyComponent::check`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuoyancyState {
    #[default]
    Floating,
    Sinking,
    Submerged,
}

/// Discrete awareness band, a pure function of [`crate::components::Awareness::level`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AwarenessState {
    #[default]
    Unaware,
    Low,
    Medium,
    High,
    Alert,
}

/// Classification of a remembered sound, used to look up the per-kind
/// awareness delta it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundKind {
    Explosion,
    Melee,
    Talk,
    Dialogue,
    Other,
}

/// PID flight mode: carried by [`crate::components::PidControllers`] but
/// not interpreted by the core — consumed by external execution code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightMode {
    #[default]
    Braking,
    FlyThrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faction_wire_mapping_round_trips() {
        for f in [FactionId::None, FactionId::Syndicate, FactionId::Covenant, FactionId::Tidebound] {
            assert_eq!(FactionId::from_wire(f.to_wire()), f);
        }
    }

    #[test]
    fn faction_wire_out_of_range_clamps_to_none() {
        assert_eq!(FactionId::from_wire(-1), FactionId::None);
        assert_eq!(FactionId::from_wire(99), FactionId::None);
    }

    #[test]
    fn world_event_type_wire_out_of_range_clamps_to_smallest() {
        assert_eq!(WorldEventType::from_wire(-1), WorldEventType::StructuralFailure);
        assert_eq!(WorldEventType::from_wire(999), WorldEventType::StructuralFailure);
    }
}
