//! Agent components: plain data plus the pure predicates/transitions that
//! act directly on them. Unlike an ECS spread, these are owned fields on
//! a single [`Agent`](crate::agent::Agent) struct — the driver keeps
//! agents in a contiguous arena indexed by [`crate::types::Uid`], never as
//! free-floating components.

use std::collections::HashMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::constants::*;
pub use crate::enums::*;
use crate::types::{SiteId, Uid, Vec3};

// ---------------------------------------------------------------------
// Faction / alignment / needs / buoyancy
// ---------------------------------------------------------------------

/// Five tunable weights used by decision doctrine to modulate thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecProfile {
    pub truth_awareness: f32,
    pub suffering_coefficient: f32,
    pub wall_distrust_index: f32,
    pub obedience: f32,
    pub fear_threshold: f32,
}

impl Default for SecProfile {
    fn default() -> Self {
        Self {
            truth_awareness: 0.0,
            suffering_coefficient: 0.0,
            wall_distrust_index: 0.0,
            obedience: DEFAULT_OBEDIENCE,
            fear_threshold: DEFAULT_FEAR_THRESHOLD,
        }
    }
}

/// Partial update for [`SecProfile`] used by `set_agent_sec_profile`; a
/// missing field leaves the prior value untouched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SecProfileUpdate {
    pub truth_awareness: Option<f32>,
    pub suffering_coefficient: Option<f32>,
    pub wall_distrust_index: Option<f32>,
    pub obedience: Option<f32>,
    pub fear_threshold: Option<f32>,
}

impl SecProfile {
    pub fn apply_update(&mut self, update: &SecProfileUpdate) {
        if let Some(v) = update.truth_awareness {
            self.truth_awareness = v;
        }
        if let Some(v) = update.suffering_coefficient {
            self.suffering_coefficient = v;
        }
        if let Some(v) = update.wall_distrust_index {
            self.wall_distrust_index = v;
        }
        if let Some(v) = update.obedience {
            self.obedience = v;
        }
        if let Some(v) = update.fear_threshold {
            self.fear_threshold = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactionComponent {
    pub id: FactionId,
    pub rank: u8,
    pub sec_profile: SecProfile,
}

impl Default for FactionComponent {
    fn default() -> Self {
        Self {
            id: FactionId::None,
            rank: 0,
            sec_profile: SecProfile::default(),
        }
    }
}

/// An agent's relational category plus, for `Owned`, which agent owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentData {
    pub kind: Alignment,
    pub owner: Option<Uid>,
}

impl AlignmentData {
    pub fn new(kind: Alignment) -> Self {
        Self { kind, owner: None }
    }

    pub fn owned_by(owner: Uid) -> Self {
        Self { kind: Alignment::Owned, owner: Some(owner) }
    }

    /// True iff `self` always attacks `other`. Ported cell-by-cell from
    /// the original `AlignmentData::hostile_towards` truth table, in the
    /// same branch order.
    pub fn hostile(&self, other: &AlignmentData) -> bool {
        use Alignment::*;
        if self.kind == Passive || other.kind == Passive {
            return false;
        }
        if self.kind == Enemy && other.kind == Enemy {
            return false;
        }
        if self.kind == Enemy && other.kind == Wild {
            return false;
        }
        if self.kind == Wild && other.kind == Enemy {
            return false;
        }
        if self.kind == Wild && other.kind == Wild {
            return false;
        }
        if self.kind == Npc && other.kind == Wild {
            return false;
        }
        if self.kind == Npc && other.kind == Enemy {
            return true;
        }
        if self.kind == Enemy || other.kind == Enemy {
            return true;
        }
        false
    }

    /// True iff `self` usually never attacks `other`.
    pub fn passive(&self, other: &AlignmentData) -> bool {
        use Alignment::*;
        if self.kind == Enemy && other.kind == Enemy {
            return true;
        }
        if self.kind == Owned
            && other.kind == Owned
            && self.owner.is_some()
            && self.owner == other.owner
        {
            return true;
        }
        if self.kind == Npc && other.kind == Npc {
            return true;
        }
        if self.kind == Npc && other.kind == Tame {
            return true;
        }
        if self.kind == Enemy && other.kind == Wild {
            return true;
        }
        if self.kind == Wild && other.kind == Enemy {
            return true;
        }
        if self.kind == Tame && other.kind == Npc {
            return true;
        }
        if self.kind == Tame && other.kind == Tame {
            return true;
        }
        if other.kind == Passive {
            return true;
        }
        false
    }

    /// True iff `self` and `other` are on the same side. Ported
    /// cell-by-cell from the original `AlignmentData::friendly_towards`
    /// truth table, which deliberately omits the `Enemy`/`Wild` cells
    /// `passive_towards` has: a wild animal tolerating an enemy (or
    /// vice versa) isn't the same as the two being allies.
    pub fn friendly(&self, other: &AlignmentData) -> bool {
        use Alignment::*;
        if self.kind == Enemy && other.kind == Enemy {
            return true;
        }
        if self.kind == Owned
            && other.kind == Owned
            && self.owner.is_some()
            && self.owner == other.owner
        {
            return true;
        }
        if self.kind == Npc && other.kind == Npc {
            return true;
        }
        if self.kind == Npc && other.kind == Tame {
            return true;
        }
        if self.kind == Tame && other.kind == Npc {
            return true;
        }
        if self.kind == Tame && other.kind == Tame {
            return true;
        }
        if other.kind == Passive {
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceNeeds {
    pub coal: f32,
    pub scrap: f32,
    pub essence: f32,
}

impl ResourceNeeds {
    pub fn is_critical(&self, faction: FactionId) -> bool {
        match faction {
            FactionId::Syndicate => self.coal < SYNDICATE_COAL_CRITICAL,
            FactionId::Covenant => self.scrap < COVENANT_SCRAP_CRITICAL,
            _ => false,
        }
    }

    /// Invariant: needs are clamped to >= 0 after each tick.
    pub fn clamp_nonnegative(&mut self) {
        self.coal = self.coal.max(0.0);
        self.scrap = self.scrap.max(0.0);
        self.essence = self.essence.max(0.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuoyancyComponent {
    pub current: f32,
    pub max: f32,
    pub health_linked: bool,
}

impl Default for BuoyancyComponent {
    fn default() -> Self {
        Self { current: 100.0, max: 100.0, health_linked: true }
    }
}

impl BuoyancyComponent {
    /// Derives the buoyancy state from current health percentage,
    /// possibly clamping `current` down first if health-linked.
    pub fn check(&mut self, health_pct: f32) -> BuoyancyState {
        if self.health_linked && health_pct < BUOYANCY_HEALTH_LINK_THRESHOLD {
            self.current = self.current.min(self.max * BUOYANCY_SINKING_FRACTION);
        }
        if self.current <= 0.0 {
            BuoyancyState::Submerged
        } else if self.current < self.max * BUOYANCY_SINKING_FRACTION {
            BuoyancyState::Sinking
        } else {
            BuoyancyState::Floating
        }
    }
}

// ---------------------------------------------------------------------
// Psyche
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Psyche {
    pub flee_health: f32,
    pub sight_dist: f32,
    pub listen_dist: f32,
    pub aggro_dist: Option<f32>,
    pub idle_wander_factor: f32,
    pub aggro_range_multiplier: f32,
    pub should_stop_pursuing: bool,
}

impl Psyche {
    pub fn humanoid() -> Self {
        Self {
            flee_health: 0.4,
            sight_dist: 40.0,
            listen_dist: 20.0,
            aggro_dist: None,
            idle_wander_factor: 1.0,
            aggro_range_multiplier: 1.0,
            should_stop_pursuing: true,
        }
    }

    pub fn bird_large() -> Self {
        Self {
            flee_health: 0.0,
            sight_dist: 250.0,
            listen_dist: f32::INFINITY,
            aggro_dist: None,
            idle_wander_factor: 1.0,
            aggro_range_multiplier: 1.0,
            should_stop_pursuing: false,
        }
    }

    pub fn wolf() -> Self {
        Self {
            flee_health: 0.2,
            sight_dist: 40.0,
            listen_dist: f32::INFINITY,
            aggro_dist: None,
            idle_wander_factor: 1.0,
            aggro_range_multiplier: 1.0,
            should_stop_pursuing: true,
        }
    }

    pub fn search_dist(&self) -> f32 {
        self.sight_dist.max(self.listen_dist) * self.aggro_range_multiplier
    }

    /// `fear_threshold` scales the effective flee-health threshold used by
    /// doctrine; 10.0 is the default, so an un-tuned SEC profile
    /// reproduces `flee_health` unchanged.
    pub fn effective_flee_health(&self, sec: &SecProfile) -> f32 {
        (self.flee_health * sec.fear_threshold / DEFAULT_FEAR_THRESHOLD).clamp(0.0, 1.0)
    }
}

impl Default for Psyche {
    fn default() -> Self {
        Self::humanoid()
    }
}

// ---------------------------------------------------------------------
// Awareness
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Awareness {
    pub level: f32,
    pub reached: bool,
}

impl Awareness {
    /// Pure function of `level`.
    pub fn state(&self) -> AwarenessState {
        if self.level >= AWARENESS_ALERT_THRESHOLD {
            AwarenessState::Alert
        } else if self.level >= AWARENESS_HIGH_THRESHOLD {
            AwarenessState::High
        } else if self.level >= AWARENESS_MEDIUM_THRESHOLD {
            AwarenessState::Medium
        } else if self.level >= AWARENESS_LOW_THRESHOLD {
            AwarenessState::Low
        } else {
            AwarenessState::Unaware
        }
    }

    /// Clamps `level` to [0,1] and updates the sticky `reached` latch:
    /// it turns on upon entering Alert and only clears on return to
    /// Unaware, regardless of the intermediate bands visited.
    pub fn change_by(&mut self, delta: f32) {
        self.level = (self.level + delta).clamp(0.0, 1.0);
        match self.state() {
            AwarenessState::Alert => self.reached = true,
            AwarenessState::Unaware => self.reached = false,
            _ => {}
        }
    }

    pub fn set_maximally_aware(&mut self) {
        self.level = 1.0;
        self.reached = true;
    }
}

// ---------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub target: Uid,
    pub hostile: bool,
    pub selected_at: f64,
    pub aggro_on: bool,
    pub last_known_pos: Option<Vec3>,
}

// ---------------------------------------------------------------------
// Sound memory
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub kind: SoundKind,
    pub pos: Vec3,
    pub vol: f32,
    pub time: f64,
}

impl SoundKind {
    /// Per-kind awareness delta applied when the sound is heard.
    pub fn awareness_delta(&self) -> f32 {
        match self {
            SoundKind::Explosion => AWARENESS_DELTA_EXPLOSION,
            SoundKind::Melee => AWARENESS_DELTA_MELEE,
            SoundKind::Talk | SoundKind::Dialogue => AWARENESS_DELTA_TALK,
            SoundKind::Other => AWARENESS_DELTA_OTHER,
        }
    }
}

/// Finite, oldest-first eviction by time. Not a general event log: it is
/// a bounded lazy sequence that only ever shrinks from the head and
/// grows at the tail, time-monotone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundMemory {
    events: Vec<SoundEvent>,
}

impl SoundMemory {
    pub fn push(&mut self, event: SoundEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Purges entries older than `SECONDS_BEFORE_FORGET_SOUNDS` relative
    /// to `now`, preserving the tail's insertion order.
    pub fn forget_older_than(&mut self, now: f64, window_secs: f64) {
        self.events.retain(|s| now - s.time <= window_secs);
    }

    /// The loudest sound still remembered, used by the `Flee` doctrine row
    /// when no direct damager is known.
    pub fn loudest(&self) -> Option<&SoundEvent> {
        self.events
            .iter()
            .max_by(|a, b| a.vol.partial_cmp(&b.vol).unwrap_or(std::cmp::Ordering::Equal))
    }
}

// ---------------------------------------------------------------------
// Action state & timers
// ---------------------------------------------------------------------

/// Fixed-size scratch registers shared by convention among behaviors.
/// Whichever action currently owns the slots is responsible for
/// resetting them on transition.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActionState {
    pub timers: [f32; 5],
    pub counters: [f32; 5],
    pub int_counters: [u8; 5],
    pub conditions: [bool; 5],
    pub positions: [Option<Vec3>; 5],
    pub initialized: bool,
}

impl ActionState {
    pub fn reset(&mut self) {
        *self = ActionState::default();
    }
}

/// A behavior owns the [`Timer`] for as long as it is the "current
/// action"; `TimerAction` is simply [`Action`] reused, since only one
/// behavior is ever progressing the timer at a time.
pub type TimerAction = Action;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timer {
    records: HashMap<TimerAction, f64>,
    last_action: Option<TimerAction>,
}

impl Timer {
    pub fn start(&mut self, action: TimerAction, now: f64) {
        self.records.insert(action, now);
        self.last_action = Some(action);
    }

    /// Returns true iff a value was present and was cleared.
    pub fn reset(&mut self, action: TimerAction) -> bool {
        self.records.remove(&action).is_some()
    }

    pub fn time_of_last(&self, action: TimerAction) -> Option<f64> {
        self.records.get(&action).copied()
    }

    /// Restarts the timer if the last progressed action differed from
    /// `action`; otherwise leaves the recorded start time untouched.
    pub fn progress(&mut self, action: TimerAction, now: f64) {
        if self.last_action != Some(action) {
            self.start(action, now);
        } else {
            self.last_action = Some(action);
        }
    }

    /// True if there is no record, or the record is older than `timeout`.
    pub fn time_since_exceeds(&self, action: TimerAction, now: f64, timeout: f64) -> bool {
        match self.records.get(&action) {
            None => true,
            Some(started) => now - started > timeout,
        }
    }

    /// Progresses the timer, then reports whether it has exceeded
    /// `timeout`: `Some(did_reset)` when exceeded (and resets), `None`
    /// while still running.
    pub fn timeout_elapsed(&mut self, action: TimerAction, now: f64, timeout: f64) -> Option<bool> {
        self.progress(action, now);
        let exceeded = match self.records.get(&action) {
            Some(started) => now - started > timeout,
            None => true,
        };
        if exceeded {
            Some(self.reset(action))
        } else {
            None
        }
    }
}

bitflags! {
    /// Behavior state bits mutated by inbound trade messages during perception.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct BehaviorFlags: u8 {
        const TRADING = 0b0000_0001;
        const TRADING_ISSUER = 0b0000_0010;
    }
}

// ---------------------------------------------------------------------
// Chaser
// ---------------------------------------------------------------------

/// Waypoint consumer. No search: waypoints come from outside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chaser {
    nodes: std::collections::VecDeque<Vec3>,
    pub goal: Option<Vec3>,
}

impl Chaser {
    pub fn set_path(&mut self, nodes: impl IntoIterator<Item = Vec3>, goal: Option<Vec3>) {
        self.nodes = nodes.into_iter().collect();
        self.goal = goal;
    }

    pub fn get_next_node(&self) -> Option<&Vec3> {
        self.nodes.front()
    }

    pub fn advance(&mut self) -> Option<Vec3> {
        self.nodes.pop_front()
    }

    pub fn has_path(&self) -> bool {
        !self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------
// PID controller bank
// ---------------------------------------------------------------------

/// Per-axis feedback controller with a fixed-depth ring buffer of
/// `(time, measurement)` samples and a trapezoidal integral that skips
/// gaps of `PID_INTEGRAL_GAP_SECS` or more to avoid windup while paused.
#[derive(Debug, Clone)]
pub struct PidController<const N: usize> {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    pub setpoint: f32,
    samples: [(f64, f32); N],
    len: usize,
    head: usize,
    integral: f64,
}

impl<const N: usize> Default for PidController<N> {
    fn default() -> Self {
        Self {
            kp: DEFAULT_PID_KP,
            ki: DEFAULT_PID_KI,
            kd: DEFAULT_PID_KD,
            setpoint: 0.0,
            samples: [(0.0, 0.0); N],
            len: 0,
            head: 0,
            integral: 0.0,
        }
    }
}

impl<const N: usize> PidController<N> {
    pub fn new(kp: f32, ki: f32, kd: f32, setpoint: f32) -> Self {
        Self { kp, ki, kd, setpoint, ..Self::default() }
    }

    fn push(&mut self, time: f64, pv: f32) {
        let idx = (self.head + self.len) % N;
        if self.len < N {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % N;
        }
        self.samples[idx] = (time, pv);
    }

    fn nth_from_end(&self, offset: usize) -> Option<(f64, f32)> {
        if offset >= self.len {
            return None;
        }
        let idx = (self.head + self.len - 1 - offset) % N;
        Some(self.samples[idx])
    }

    pub fn add_measurement(&mut self, time: f64, pv: f32) {
        let prev = self.nth_from_end(0);
        self.push(time, pv);
        if let Some((prev_time, prev_pv)) = prev {
            let dt = time - prev_time;
            if dt > 0.0 && dt < PID_INTEGRAL_GAP_SECS {
                let prev_err = (self.setpoint - prev_pv) as f64;
                let cur_err = (self.setpoint - pv) as f64;
                self.integral += 0.5 * (prev_err + cur_err) * dt;
            }
            // a gap >= PID_INTEGRAL_GAP_SECS is ignored: no windup on resume.
        }
    }

    pub fn proportional_error(&self) -> f32 {
        match self.nth_from_end(0) {
            Some((_, pv)) => self.setpoint - pv,
            None => 0.0,
        }
    }

    pub fn integral_error(&self) -> f64 {
        self.integral
    }

    pub fn derivative_error(&self) -> f32 {
        match (self.nth_from_end(0), self.nth_from_end(1)) {
            (Some((t1, pv1)), Some((t0, pv0))) => {
                let dt = (t1 - t0) as f32;
                if dt <= 0.0 {
                    0.0
                } else {
                    ((self.setpoint - pv1) - (self.setpoint - pv0)) / dt
                }
            }
            _ => 0.0,
        }
    }

    pub fn calc_error(&self) -> f32 {
        self.kp * self.proportional_error()
            + self.ki * self.integral_error() as f32
            + self.kd * self.derivative_error()
    }

    /// External clamp on the accumulated integral, e.g. to cap windup.
    pub fn limit_integral_windup(&mut self, limiter: impl FnOnce(f64) -> f64) {
        self.integral = limiter(self.integral);
    }
}

/// Three optional per-axis controllers plus a carried (not interpreted)
/// flight mode, consumed by external execution code.
#[derive(Debug, Clone, Default)]
pub struct PidControllers<const N: usize> {
    pub mode: FlightMode,
    pub x: Option<PidController<N>>,
    pub y: Option<PidController<N>>,
    pub z: Option<PidController<N>>,
}

impl<const N: usize> PidControllers<N> {
    pub fn add_measurement(&mut self, time: f64, pos: Vec3) {
        if let Some(c) = self.x.as_mut() {
            c.add_measurement(time, pos.x);
        }
        if let Some(c) = self.y.as_mut() {
            c.add_measurement(time, pos.y);
        }
        if let Some(c) = self.z.as_mut() {
            c.add_measurement(time, pos.z);
        }
    }

    pub fn calc_error(&self) -> Vec3 {
        Vec3::new(
            self.x.as_ref().map(PidController::calc_error).unwrap_or(0.0),
            self.y.as_ref().map(PidController::calc_error).unwrap_or(0.0),
            self.z.as_ref().map(PidController::calc_error).unwrap_or(0.0),
        )
    }
}

// ---------------------------------------------------------------------
// Job blackboard
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uid,
    pub job_type: JobType,
    pub position: Vec3,
    pub priority: f32,
    pub difficulty: f32,
    pub assigned_to: Option<Uid>,
}

// ---------------------------------------------------------------------
// Ghost recorder
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostFrame {
    pub pos: Vec3,
    pub timestamp: f64,
}

// ---------------------------------------------------------------------
// Trade sites (driver-owned registry supporting the `Trade` doctrine row)
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeSite {
    pub id: SiteId,
    pub position: Vec3,
}
