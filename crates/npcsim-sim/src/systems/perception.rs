//! Perception pipeline: drain an agent's inbox, age its sound
//! memory, and apply passive awareness decay. Runs once per agent per
//! tick, ahead of doctrine.

use npcsim_core::agent::Agent;
use npcsim_core::commands::InboundEvent;
use npcsim_core::components::{BehaviorFlags, SoundEvent, Target};
use npcsim_core::constants::{AWARENESS_DECAY_PER_SEC, AWARENESS_DELTA_TALK, SECONDS_BEFORE_FORGET_SOUNDS};

pub fn perceive(agent: &mut Agent, now: f64, dt: f32) {
    ingest_inbox(agent, now);
    agent.sounds.forget_older_than(now, SECONDS_BEFORE_FORGET_SOUNDS);
    agent.awareness.change_by(-AWARENESS_DECAY_PER_SEC * dt);
}

fn ingest_inbox(agent: &mut Agent, now: f64) {
    let inbox = std::mem::take(&mut agent.inbox);
    for event in inbox {
        match event {
            InboundEvent::Sound { kind, pos, vol, time } => {
                agent.awareness.change_by(kind.awareness_delta());
                agent.sounds.push(SoundEvent { kind, pos, vol, time });
            }
            InboundEvent::Hurt { attacker, time } => {
                agent.awareness.set_maximally_aware();
                if let Some(attacker) = attacker {
                    agent.target =
                        Some(Target { target: attacker, hostile: true, selected_at: time, aggro_on: true, last_known_pos: None });
                }
            }
            InboundEvent::Dialogue { .. } => {
                agent.awareness.change_by(AWARENESS_DELTA_TALK);
            }
            InboundEvent::TradeOffer { .. } => {
                agent.behavior_flags.insert(BehaviorFlags::TRADING);
            }
            InboundEvent::TradeAccept { .. } => {
                agent.behavior_flags.insert(BehaviorFlags::TRADING | BehaviorFlags::TRADING_ISSUER);
            }
            InboundEvent::TradeComplete { .. } => {
                agent.behavior_flags.remove(BehaviorFlags::TRADING | BehaviorFlags::TRADING_ISSUER);
            }
        }
    }
    let _ = now;
}
