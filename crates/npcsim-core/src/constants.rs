//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz), used only by example hosts; `step(dt)`
/// itself accepts any `dt`.
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at [`TICK_RATE`].
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Spatial index ---

/// Grid cell size in meters for the uniform spatial hash.
pub const SPATIAL_CELL_SIZE: f32 = 100.0;

// --- Perception & awareness ---

/// Sound memory retention window, in seconds.
pub const SECONDS_BEFORE_FORGET_SOUNDS: f64 = 180.0;

/// Passive per-second awareness decay rate.
pub const AWARENESS_DECAY_PER_SEC: f32 = 0.01;

/// Awareness band thresholds.
pub const AWARENESS_LOW_THRESHOLD: f32 = 0.1;
pub const AWARENESS_MEDIUM_THRESHOLD: f32 = 0.3;
pub const AWARENESS_HIGH_THRESHOLD: f32 = 0.6;
pub const AWARENESS_ALERT_THRESHOLD: f32 = 1.0;

/// Per-kind awareness deltas applied when a sound is heard.
pub const AWARENESS_DELTA_EXPLOSION: f32 = 0.5;
pub const AWARENESS_DELTA_MELEE: f32 = 0.3;
pub const AWARENESS_DELTA_TALK: f32 = 0.2;
pub const AWARENESS_DELTA_OTHER: f32 = 0.1;

// --- Job blackboard / SEC profile defaults ---

/// Default obedience, used by `FactionComponent::default`.
pub const DEFAULT_OBEDIENCE: f32 = 0.8;

/// Default fear threshold, used by `FactionComponent::default`. Also the
/// baseline against which SEC `fear_threshold` scales `flee_health`.
pub const DEFAULT_FEAR_THRESHOLD: f32 = 10.0;

/// Minimum SEC `obedience` required for a blackboard job assignment to
/// preempt idle wandering in the doctrine table.
pub const OBEDIENCE_JOB_PREEMPTION_THRESHOLD: f32 = 0.5;

// --- Resource needs ---

pub const SYNDICATE_COAL_CRITICAL: f32 = 20.0;
pub const COVENANT_SCRAP_CRITICAL: f32 = 10.0;

// --- Buoyancy ---

pub const BUOYANCY_HEALTH_LINK_THRESHOLD: f32 = 0.2;
pub const BUOYANCY_SINKING_FRACTION: f32 = 0.2;

// --- Doctrine ---

/// Radius within which a `FloodingAlarm` triggers damage control, regardless
/// of faction or sight distance.
pub const FLOODING_ALARM_RESPONSE_RADIUS: f32 = 50.0;

// --- PID controller bank ---

/// Ring buffer depth for each axis controller.
pub const PID_SAMPLE_COUNT: usize = 16;

/// Any sample gap at or beyond this many seconds is treated as a pause
/// and excluded from the trapezoidal integral, to avoid windup.
pub const PID_INTEGRAL_GAP_SECS: f64 = 5.0;

pub const DEFAULT_PID_KP: f32 = 1.0;
pub const DEFAULT_PID_KI: f32 = 0.1;
pub const DEFAULT_PID_KD: f32 = 0.8;

// --- Ghost recorder ---

/// Maximum retained frames per agent; oldest evicted beyond this.
pub const GHOST_MAX_SAMPLES: usize = 100;
