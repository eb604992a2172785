//! World events: the payload propagated by the spatially-indexed event bus.

use serde::{Deserialize, Serialize};

use crate::enums::{FactionId, WorldEventType};
use crate::types::{Uid, Vec3};

/// A transient world event. Lifetime is single-tick unless the driver
/// opts into longer retention (not required by this engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub event_type: WorldEventType,
    pub position: Vec3,
    pub radius: f32,
    pub source_id: Uid,
    pub source_faction: FactionId,
    pub intensity: f32,
    pub metadata: String,
}

impl WorldEvent {
    /// Synthetic event injected via the command surface's `publish_event`
    ///: source id 0, faction None.
    pub fn synthetic(event_type: WorldEventType, position: Vec3, radius: f32) -> Self {
        Self {
            event_type,
            position,
            radius,
            source_id: 0,
            source_faction: FactionId::None,
            intensity: 1.0,
            metadata: String::new(),
        }
    }
}
