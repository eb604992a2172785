//! Inbound messages: sensor readings translated by the Logic Bridge,
//! and the direct-to-agent inbox messages consumed by perception.

use serde::{Deserialize, Serialize};

use crate::enums::SoundKind;
use crate::types::{Uid, Vec3};

/// A raw sensor reading submitted to the command surface. The Logic
/// Bridge maps `metric == "WaterLevel"` (when `value > threshold`) to a
/// `FloodingAlarm` world event at `position`, radius 50; any other metric
/// is silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub metric: String,
    pub value: f32,
    pub threshold: f32,
    pub owner_id: Uid,
    pub position: Vec3,
}

/// Messages an agent drains from its inbox on ingest, ahead of doctrine.
/// Distinct from bus events: these are addressed directly to one agent,
/// not discovered via the spatial query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InboundEvent {
    Sound { kind: SoundKind, pos: Vec3, vol: f32, time: f64 },
    Hurt { attacker: Option<Uid>, time: f64 },
    Dialogue { speaker: Uid, time: f64 },
    TradeOffer { with: Uid },
    TradeAccept { with: Uid },
    TradeComplete { with: Uid },
}
