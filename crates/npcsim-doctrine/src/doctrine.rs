//! The priority-ordered rule table. `decide` is a pure function:
//! it reads an [`Agent`] and its already-perceived surroundings and
//! returns what to do, never mutating anything itself. Side effects the
//! outcome implies (forcing alert awareness, consuming a job) are carried
//! on [`Outcome`] for the driver to apply.

use npcsim_core::agent::Agent;
use npcsim_core::components::{Job, TradeSite};
use npcsim_core::constants::{FLOODING_ALARM_RESPONSE_RADIUS, OBEDIENCE_JOB_PREEMPTION_THRESHOLD};
use npcsim_core::enums::{Action, AwarenessState, BuoyancyState, FactionId, JobType, WorldEventType};
use npcsim_core::events::WorldEvent;
use npcsim_core::types::Vec3;

/// What doctrine decided, plus any side effects the driver must apply on
/// the agent (doctrine itself never mutates `Agent`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub action: Action,
    /// Where the chosen action is oriented, if anywhere: an event site, a
    /// trade site, or a target's last known position.
    pub focus_position: Option<Vec3>,
    /// Set when the row that fired also forces the agent's awareness to
    /// maximum (e.g. a `HarpoonEvent` sighting).
    pub force_alert: bool,
    /// Set when the row that fired consumed an assigned blackboard job.
    pub consumed_job: Option<npcsim_core::types::Uid>,
}

impl Outcome {
    fn simple(action: Action) -> Self {
        Self { action, focus_position: None, force_alert: false, consumed_job: None }
    }

    fn toward(action: Action, pos: Vec3) -> Self {
        Self { action, focus_position: Some(pos), force_alert: false, consumed_job: None }
    }
}

/// Evaluates the full rule table against `agent`'s current state.
///
/// `nearby_events` is whatever [`crate`]'s caller already queried from the
/// world event bus within the agent's perception radius — doctrine does
/// not requery space, it only judges what was handed to it. `job` is the
/// blackboard job currently assigned to this agent, if any. `trade_sites`
/// is the driver's registry, used to pick a destination for the `Trade`
/// row.
pub fn decide(
    agent: &Agent,
    nearby_events: &[WorldEvent],
    job: Option<&Job>,
    trade_sites: &[TradeSite],
) -> Outcome {
    let sec = &agent.faction.sec_profile;

    // 1. Syndicate: coal reserve below the critical threshold -> seek trade.
    if agent.faction.id == FactionId::Syndicate && agent.needs.is_critical(FactionId::Syndicate) {
        if let Some(site) = nearest_trade_site(agent.position, trade_sites) {
            return Outcome::toward(Action::Trade, site.position);
        }
        return Outcome::simple(Action::Trade);
    }

    // 2. Syndicate: an allied ship just reported structural failure -> scavenge it.
    if agent.faction.id == FactionId::Syndicate {
        if let Some(ev) = nearby_events.iter().find(|ev| {
            ev.event_type == WorldEventType::StructuralFailure
                && ev.source_faction == agent.faction.id
                && ev.source_id != agent.id
                && agent.position.horizontal_distance(&ev.position) <= agent.psyche.sight_dist
        }) {
            return Outcome::toward(Action::Scavenge, ev.position);
        }
    }

    // 3. Covenant: a harpoon sighting forces full alert and an attack response.
    if agent.faction.id == FactionId::Covenant {
        if let Some(ev) = nearby_events.iter().find(|ev| {
            ev.event_type == WorldEventType::HarpoonEvent
                && agent.position.horizontal_distance(&ev.position) <= agent.psyche.sight_dist
        }) {
            return Outcome {
                action: Action::Attack,
                focus_position: Some(ev.position),
                force_alert: true,
                consumed_job: None,
            };
        }
    }

    // 4. Covenant: structural failure anywhere nearby -> scavenge.
    if agent.faction.id == FactionId::Covenant {
        if let Some(ev) = nearby_events.iter().find(|ev| {
            ev.event_type == WorldEventType::StructuralFailure
                && agent.position.horizontal_distance(&ev.position) <= agent.psyche.sight_dist
        }) {
            return Outcome::toward(Action::Scavenge, ev.position);
        }
    }

    // 5. Tidebound: high awareness or above -> dive for cover.
    if agent.faction.id == FactionId::Tidebound && agent.awareness.state() >= AwarenessState::High {
        return Outcome::simple(Action::Dive);
    }

    // 6. Any faction: a flooding alarm within response radius -> damage control.
    if let Some(ev) = nearby_events.iter().find(|ev| {
        ev.event_type == WorldEventType::FloodingAlarm
            && agent.position.horizontal_distance(&ev.position) <= FLOODING_ALARM_RESPONSE_RADIUS
    }) {
        return Outcome::toward(Action::DamageControl, ev.position);
    }

    // 7. Any faction: actively sinking -> damage control in place.
    if agent.buoyancy_state == BuoyancyState::Sinking {
        return Outcome::simple(Action::DamageControl);
    }

    // 8. Any faction: health below the SEC-modulated flee threshold -> flee.
    let effective_flee_health = agent.psyche.effective_flee_health(sec);
    if agent.health_pct() < effective_flee_health {
        if let Some(away_from) = flee_source(agent) {
            return Outcome::toward(Action::Flee, away_from);
        }
        return Outcome::simple(Action::Flee);
    }

    // 9. Any faction: a hostile target within search range -> attack.
    if let Some(target) = &agent.target {
        if target.hostile {
            let in_range = target
                .last_known_pos
                .map(|p| agent.position.horizontal_distance(&p) <= agent.psyche.search_dist())
                .unwrap_or(false);
            if in_range {
                return Outcome {
                    action: Action::Attack,
                    focus_position: target.last_known_pos,
                    force_alert: false,
                    consumed_job: None,
                };
            }
        }
    }

    // 10. An assigned blackboard job preempts idling once obedience clears the bar.
    if let Some(job) = job {
        if sec.obedience >= OBEDIENCE_JOB_PREEMPTION_THRESHOLD {
            let action = match job.job_type {
                JobType::Scavenge => Action::Scavenge,
                JobType::Repair => Action::DamageControl,
                JobType::Combat => Action::Attack,
                JobType::Transport => Action::Trade,
            };
            return Outcome {
                action,
                focus_position: Some(job.position),
                force_alert: false,
                consumed_job: Some(job.id),
            };
        }
    }

    // 11. Default: idle.
    Outcome::simple(Action::Idle)
}

fn nearest_trade_site(from: Vec3, sites: &[TradeSite]) -> Option<TradeSite> {
    sites
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = from.horizontal_distance(&a.position);
            let db = from.horizontal_distance(&b.position);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Flee away from the last attacker if known, else the loudest remembered
/// sound; `None` if the agent has neither (flee in place).
fn flee_source(agent: &Agent) -> Option<Vec3> {
    agent
        .target
        .as_ref()
        .and_then(|t| t.last_known_pos)
        .or_else(|| agent.sounds.loudest().map(|s| s.pos))
}
