//! World event bus: a spatially-indexed, single-tick event log.
//! Events published mid-tick are visible to every subsequent query this
//! same tick (the index and the backing vec are never cleared until the
//! driver calls `clear_old` at tick end) — this is the "intra-tick
//! visible" variant required by the perception pipeline.

use npcsim_core::events::WorldEvent;
use npcsim_core::types::Vec3;

use super::spatial::SpatialIndex;

#[derive(Debug, Default)]
pub struct WorldEventBus {
    index: SpatialIndex,
    events: Vec<WorldEvent>,
}

impl WorldEventBus {
    pub fn publish(&mut self, event: WorldEvent) {
        let id = self.events.len() as u64;
        self.index.insert(id, event.position);
        self.events.push(event);
    }

    /// Events bucketed near `pos` and within `range` of it. The spatial
    /// index only narrows candidates by ground-plane cell; the exact
    /// cutoff is the caller-supplied `range` (e.g. an agent's
    /// `sight_dist`, or the flooding-alarm response radius), not each
    /// event's own `radius` field.
    pub fn query_nearby(&self, pos: Vec3, range: f32) -> Vec<WorldEvent> {
        self.index
            .query(pos, range)
            .into_iter()
            .filter_map(|id| self.events.get(id as usize))
            .filter(|ev| pos.horizontal_distance(&ev.position) <= range)
            .cloned()
            .collect()
    }

    /// Drops every event and index entry. Called once per tick, after all
    /// agents have been given a chance to perceive this tick's events.
    pub fn clear_old(&mut self) {
        self.index.clear();
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcsim_core::enums::WorldEventType;

    #[test]
    fn published_event_is_visible_same_tick() {
        let mut bus = WorldEventBus::default();
        bus.publish(WorldEvent::synthetic(WorldEventType::FloodingAlarm, Vec3::new(5.0, 0.0, 0.0), 50.0));
        let hits = bus.query_nearby(Vec3::ZERO, 50.0);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn query_respects_caller_range_not_event_radius() {
        let mut bus = WorldEventBus::default();
        // A generous event radius shouldn't widen what a narrow-range query sees.
        bus.publish(WorldEvent::synthetic(WorldEventType::FloodingAlarm, Vec3::new(5.0, 0.0, 0.0), 500.0));
        let hits = bus.query_nearby(Vec3::new(40.0, 0.0, 0.0), 1.0);
        assert!(hits.is_empty(), "query range 1.0 should not reach a point 35m away regardless of event radius");
    }

    #[test]
    fn clear_old_drops_everything() {
        let mut bus = WorldEventBus::default();
        bus.publish(WorldEvent::synthetic(WorldEventType::FloodingAlarm, Vec3::ZERO, 50.0));
        bus.clear_old();
        assert!(bus.is_empty());
        assert!(bus.query_nearby(Vec3::ZERO, 50.0).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Query membership is exactly `distance <= range`, including the
            /// boundary case where they're equal, regardless of which cell
            /// the event and the query point happen to land in.
            #[test]
            fn query_is_distance_exact(ex in -300.0f32..300.0, ey in -300.0f32..300.0, range in 0.0f32..300.0, qx in -300.0f32..300.0, qy in -300.0f32..300.0) {
                let mut bus = WorldEventBus::default();
                let event_pos = Vec3::new(ex, ey, 0.0);
                bus.publish(WorldEvent::synthetic(WorldEventType::FloodingAlarm, event_pos, 50.0));

                let query_pos = Vec3::new(qx, qy, 0.0);
                let found = !bus.query_nearby(query_pos, range).is_empty();
                let within_range = query_pos.horizontal_distance(&event_pos) <= range;
                prop_assert_eq!(found, within_range);
            }
        }
    }
}
