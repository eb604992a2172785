//! Read-only snapshot views for the external command surface.

use serde::{Deserialize, Serialize};

use crate::enums::Action;
use crate::types::{SimTime, Uid, Vec3};

/// One row of `get_agent_states()`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentStateView {
    pub id: Uid,
    pub pos: Vec3,
    pub action: Action,
}

/// Full snapshot returned by the driver, wrapping the per-agent rows
/// with the clock they were taken at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentStatesSnapshot {
    pub time: SimTime,
    pub agents: Vec<AgentStateView>,
}
