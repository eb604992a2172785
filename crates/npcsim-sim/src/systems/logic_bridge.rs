//! Logic bridge: static dispatch translating a raw sensor reading
//! into a world event, or nothing. This is the only place sensor metric
//! names are known to the engine; doctrine never sees raw sensors.

use npcsim_core::commands::SensorReading;
use npcsim_core::constants::FLOODING_ALARM_RESPONSE_RADIUS;
use npcsim_core::enums::WorldEventType;
use npcsim_core::events::WorldEvent;

const WATER_LEVEL_METRIC: &str = "WaterLevel";

/// Maps `metric == "WaterLevel"` readings above threshold to a
/// `FloodingAlarm` world event at the reading's position; anything else
/// is silently dropped, matching the original sensor table's sole
/// translated metric.
pub fn translate(reading: &SensorReading) -> Option<WorldEvent> {
    if reading.metric != WATER_LEVEL_METRIC || reading.value <= reading.threshold {
        return None;
    }
    let mut event =
        WorldEvent::synthetic(WorldEventType::FloodingAlarm, reading.position, FLOODING_ALARM_RESPONSE_RADIUS);
    event.source_id = reading.owner_id;
    Some(event)
}
