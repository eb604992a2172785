//! Action execution (C10 step 6): turns the action doctrine chose into a
//! velocity and integrates position. No steering solver here — behaviors
//! set a heading and a fixed cruise speed, matching the Chaser's
//! "no search, only consumes waypoints" design.

use npcsim_core::agent::Agent;
use npcsim_core::enums::Action;
use npcsim_core::types::Vec3;

use npcsim_doctrine::doctrine::Outcome;

const CRUISE_SPEED: f32 = 3.0;
const FLEE_SPEED: f32 = 5.0;
const DIVE_DESCENT_RATE: f32 = 2.0;
const IDLE_WANDER_SPEED: f32 = 1.0;
const IDLE_WANDER_ANGULAR_RATE: f64 = 0.1;

pub fn execute(agent: &mut Agent, outcome: &Outcome, now: f64, dt: f32) {
    agent.current_action = outcome.action;
    match outcome.action {
        Action::Idle => idle_wander(agent, now),
        Action::Trade | Action::Scavenge => seek(agent, outcome.focus_position),
        Action::Attack => seek(agent, outcome.focus_position),
        Action::Flee => flee_from(agent, outcome.focus_position),
        Action::Dive => dive(agent),
        Action::DamageControl => {
            agent.velocity = Vec3::ZERO;
            agent.behavior_state.conditions[0] = true;
        }
    }
    agent.position += agent.velocity * dt;
}

/// Deterministic wander: a slow circle whose phase is a pure function of
/// simulation time, so two runs with identical ticks produce identical
/// paths without any RNG.
fn idle_wander(agent: &mut Agent, now: f64) {
    let angle = (now * IDLE_WANDER_ANGULAR_RATE) as f32;
    let speed = IDLE_WANDER_SPEED * agent.psyche.idle_wander_factor;
    agent.velocity = Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0);
}

fn seek(agent: &mut Agent, target: Option<Vec3>) {
    agent.velocity = match target {
        Some(t) => (t - agent.position).normalized() * CRUISE_SPEED,
        None => Vec3::ZERO,
    };
}

fn flee_from(agent: &mut Agent, threat: Option<Vec3>) {
    agent.velocity = match threat {
        Some(t) => (agent.position - t).normalized() * FLEE_SPEED,
        None => Vec3::ZERO,
    };
}

fn dive(agent: &mut Agent) {
    agent.buoyancy.current = 0.0;
    agent.velocity = Vec3::new(0.0, 0.0, -DIVE_DESCENT_RATE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcsim_core::enums::FactionId;

    fn outcome(action: Action, focus: Option<Vec3>) -> Outcome {
        Outcome { action, focus_position: focus, force_alert: false, consumed_job: None }
    }

    #[test]
    fn seek_moves_toward_focus_position() {
        let mut agent = Agent::new(1, "seeker", FactionId::None, 0);
        execute(&mut agent, &outcome(Action::Scavenge, Some(Vec3::new(10.0, 0.0, 0.0))), 0.0, 1.0);
        assert!(agent.position.x > 0.0);
    }

    #[test]
    fn flee_moves_away_from_threat() {
        let mut agent = Agent::new(1, "fleer", FactionId::None, 0);
        agent.position = Vec3::new(5.0, 0.0, 0.0);
        execute(&mut agent, &outcome(Action::Flee, Some(Vec3::ZERO)), 0.0, 1.0);
        assert!(agent.position.x > 5.0);
    }

    #[test]
    fn dive_zeroes_buoyancy_and_descends() {
        let mut agent = Agent::new(1, "diver", FactionId::None, 0);
        execute(&mut agent, &outcome(Action::Dive, None), 0.0, 1.0);
        assert_eq!(agent.buoyancy.current, 0.0);
        assert!(agent.position.z < 0.0);
    }

    #[test]
    fn damage_control_halts_movement() {
        let mut agent = Agent::new(1, "repairer", FactionId::None, 0);
        agent.velocity = Vec3::new(1.0, 1.0, 1.0);
        execute(&mut agent, &outcome(Action::DamageControl, None), 0.0, 1.0);
        assert_eq!(agent.velocity, Vec3::ZERO);
        assert!(agent.behavior_state.conditions[0]);
    }

    #[test]
    fn idle_wander_is_a_pure_function_of_time() {
        let mut a = Agent::new(1, "a", FactionId::None, 0);
        let mut b = Agent::new(2, "b", FactionId::None, 0);
        execute(&mut a, &outcome(Action::Idle, None), 5.0, 1.0);
        execute(&mut b, &outcome(Action::Idle, None), 5.0, 1.0);
        assert_eq!(a.velocity, b.velocity);
    }
}
