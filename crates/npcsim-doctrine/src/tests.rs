use npcsim_core::agent::Agent;
use npcsim_core::components::{AlignmentData, Job, Target, TradeSite};
use npcsim_core::enums::{Action, Alignment, BuoyancyState, FactionId, JobType, WorldEventType};
use npcsim_core::events::WorldEvent;
use npcsim_core::types::Vec3;

use crate::doctrine::decide;

fn agent_of(faction: FactionId) -> Agent {
    let mut a = Agent::new(1, "test", faction, 10);
    a.faction.sec_profile.obedience = 0.8;
    a
}

#[test]
fn default_idle_when_nothing_fires() {
    let agent = agent_of(FactionId::None);
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::Idle);
}

#[test]
fn syndicate_trades_when_coal_critical() {
    let mut agent = agent_of(FactionId::Syndicate);
    agent.needs.coal = 5.0;
    let sites = [TradeSite { id: 1, position: Vec3::new(10.0, 0.0, 0.0) }];
    let out = decide(&agent, &[], None, &sites);
    assert_eq!(out.action, Action::Trade);
    assert_eq!(out.focus_position, Some(sites[0].position));
}

#[test]
fn syndicate_scavenges_allied_structural_failure() {
    let agent = agent_of(FactionId::Syndicate);
    let ev = WorldEvent::synthetic(WorldEventType::StructuralFailure, Vec3::new(5.0, 0.0, 0.0), 80.0);
    let mut ally_event = ev.clone();
    ally_event.source_faction = FactionId::Syndicate;
    ally_event.source_id = 99;
    let out = decide(&agent, &[ally_event], None, &[]);
    assert_eq!(out.action, Action::Scavenge);
}

#[test]
fn syndicate_ignores_own_structural_failure_report() {
    let agent = agent_of(FactionId::Syndicate);
    let mut ev = WorldEvent::synthetic(WorldEventType::StructuralFailure, Vec3::new(5.0, 0.0, 0.0), 80.0);
    ev.source_faction = FactionId::Syndicate;
    ev.source_id = agent.id;
    let out = decide(&agent, &[ev], None, &[]);
    assert_eq!(out.action, Action::Idle);
}

#[test]
fn covenant_harpoon_forces_alert_and_attack() {
    let agent = agent_of(FactionId::Covenant);
    let ev = WorldEvent::synthetic(WorldEventType::HarpoonEvent, Vec3::new(1.0, 0.0, 0.0), 200.0);
    let out = decide(&agent, &[ev], None, &[]);
    assert_eq!(out.action, Action::Attack);
    assert!(out.force_alert);
}

#[test]
fn covenant_scavenges_any_structural_failure() {
    let agent = agent_of(FactionId::Covenant);
    let ev = WorldEvent::synthetic(WorldEventType::StructuralFailure, Vec3::new(1.0, 0.0, 0.0), 200.0);
    let out = decide(&agent, &[ev], None, &[]);
    assert_eq!(out.action, Action::Scavenge);
}

#[test]
fn tidebound_dives_on_high_awareness() {
    let mut agent = agent_of(FactionId::Tidebound);
    agent.awareness.set_maximally_aware();
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::Dive);
}

#[test]
fn flooding_alarm_within_radius_triggers_damage_control() {
    let agent = agent_of(FactionId::None);
    let ev = WorldEvent::synthetic(WorldEventType::FloodingAlarm, Vec3::new(10.0, 0.0, 0.0), 50.0);
    let out = decide(&agent, &[ev], None, &[]);
    assert_eq!(out.action, Action::DamageControl);
}

#[test]
fn flooding_alarm_beyond_radius_is_ignored() {
    let agent = agent_of(FactionId::None);
    let ev = WorldEvent::synthetic(WorldEventType::FloodingAlarm, Vec3::new(500.0, 0.0, 0.0), 50.0);
    let out = decide(&agent, &[ev], None, &[]);
    assert_eq!(out.action, Action::Idle);
}

#[test]
fn sinking_buoyancy_triggers_damage_control() {
    let mut agent = agent_of(FactionId::None);
    agent.buoyancy_state = BuoyancyState::Sinking;
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::DamageControl);
}

#[test]
fn low_health_triggers_flee() {
    let mut agent = agent_of(FactionId::None);
    agent.health = 10.0; // 10% of 100 max, below default 0.4 flee_health
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::Flee);
}

#[test]
fn hostile_target_in_range_triggers_attack() {
    let mut agent = agent_of(FactionId::None);
    agent.position = Vec3::ZERO;
    agent.target = Some(Target {
        target: 2,
        hostile: true,
        selected_at: 0.0,
        aggro_on: true,
        last_known_pos: Some(Vec3::new(5.0, 0.0, 0.0)),
    });
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::Attack);
}

#[test]
fn hostile_target_out_of_range_does_not_attack() {
    let mut agent = agent_of(FactionId::None);
    agent.position = Vec3::ZERO;
    agent.target = Some(Target {
        target: 2,
        hostile: true,
        selected_at: 0.0,
        aggro_on: true,
        last_known_pos: Some(Vec3::new(10_000.0, 0.0, 0.0)),
    });
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::Idle);
}

#[test]
fn non_hostile_target_does_not_attack() {
    let mut agent = agent_of(FactionId::None);
    agent.target = Some(Target {
        target: 2,
        hostile: false,
        selected_at: 0.0,
        aggro_on: false,
        last_known_pos: Some(Vec3::new(1.0, 0.0, 0.0)),
    });
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::Idle);
}

#[test]
fn assigned_job_preempts_idle_when_obedient() {
    let agent = agent_of(FactionId::None);
    let job = Job {
        id: 7,
        job_type: JobType::Repair,
        position: Vec3::new(3.0, 0.0, 0.0),
        priority: 1.0,
        difficulty: 0.5,
        assigned_to: Some(agent.id),
    };
    let out = decide(&agent, &[], Some(&job), &[]);
    assert_eq!(out.action, Action::DamageControl);
    assert_eq!(out.consumed_job, Some(7));
}

#[test]
fn assigned_job_ignored_when_disobedient() {
    let mut agent = agent_of(FactionId::None);
    agent.faction.sec_profile.obedience = 0.1;
    let job = Job {
        id: 7,
        job_type: JobType::Scavenge,
        position: Vec3::new(3.0, 0.0, 0.0),
        priority: 1.0,
        difficulty: 0.5,
        assigned_to: Some(agent.id),
    };
    let out = decide(&agent, &[], Some(&job), &[]);
    assert_eq!(out.action, Action::Idle);
}

#[test]
fn flee_and_sinking_both_fire_sinking_wins_priority() {
    // Row 7 (sinking) is strictly above row 8 (flee) in the table.
    let mut agent = agent_of(FactionId::None);
    agent.buoyancy_state = BuoyancyState::Sinking;
    agent.health = 1.0;
    let out = decide(&agent, &[], None, &[]);
    assert_eq!(out.action, Action::DamageControl);
}

#[test]
fn passive_alignment_never_reports_hostile() {
    let passive = AlignmentData::new(Alignment::Passive);
    let enemy = AlignmentData::new(Alignment::Enemy);
    assert!(!passive.hostile(&enemy));
    assert!(!enemy.hostile(&passive));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// For any scatter of trade sites, a coal-starved Syndicate agent at
        /// the origin always heads for the one that's actually closest.
        #[test]
        fn syndicate_heads_for_the_nearest_trade_site(xs in prop::collection::vec(-500.0f32..500.0, 1..8)) {
            let mut agent = agent_of(FactionId::Syndicate);
            agent.needs.coal = 0.0;
            let sites: Vec<TradeSite> = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| TradeSite { id: i as u32, position: Vec3::new(x, 0.0, 0.0) })
                .collect();

            let out = decide(&agent, &[], None, &sites);

            let expected = sites
                .iter()
                .min_by(|a, b| {
                    a.position.horizontal_distance(&Vec3::ZERO)
                        .partial_cmp(&b.position.horizontal_distance(&Vec3::ZERO))
                        .unwrap()
                })
                .unwrap();
            prop_assert_eq!(out.focus_position, Some(expected.position));
        }
    }
}
