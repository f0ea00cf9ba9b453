//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Attack sub-protocol ---

/// Delay between starting a swing and applying its damage.
pub const ATTACK_WIND_UP_SECS: f64 = 0.5;

// --- Exploder ---

/// Exploders arm when the target is within this multiple of attack range.
pub const EXPLODER_TRIGGER_FACTOR: f64 = 1.5;

/// Fuse between arming and the blast.
pub const DETONATION_FUSE_SECS: f64 = 1.5;

// --- Death ---

/// Time a corpse lingers before it is removed from the world.
pub const CORPSE_GRACE_SECS: f64 = 5.0;

// --- Movement ---

/// Agents within this distance of their destination stop moving.
pub const ARRIVAL_DISTANCE: f64 = 0.1;

/// Search radius when snapping a flee point to walkable ground.
pub const FLEE_SAMPLE_RADIUS: f64 = 10.0;

// --- Archetype stat multipliers ---

pub const RUNNER_SPEED_FACTOR: f64 = 1.5;
pub const RUNNER_HEALTH_FACTOR: f64 = 0.8;
pub const RUNNER_COOLDOWN_FACTOR: f64 = 0.7;

pub const TANK_SPEED_FACTOR: f64 = 0.7;
pub const TANK_HEALTH_FACTOR: f64 = 2.5;
pub const TANK_DAMAGE_FACTOR: f64 = 1.5;
pub const TANK_COOLDOWN_FACTOR: f64 = 1.5;

pub const EXPLODER_HEALTH_FACTOR: f64 = 0.6;

// --- Agent base stats ---

pub const DEFAULT_AGENT_HEALTH: i32 = 100;
pub const DEFAULT_AGENT_DAMAGE: u32 = 10;
pub const DEFAULT_ATTACK_RANGE: f64 = 1.5;
pub const DEFAULT_ATTACK_COOLDOWN_SECS: f64 = 2.0;
pub const DEFAULT_DETECTION_RANGE: f64 = 15.0;
pub const DEFAULT_MOVE_SPEED: f64 = 3.5;
pub const DEFAULT_WANDER_RADIUS: f64 = 10.0;
pub const DEFAULT_WANDER_INTERVAL_SECS: f64 = 5.0;
pub const DEFAULT_RUN_AWAY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_EXPLOSION_RADIUS: f64 = 5.0;
pub const DEFAULT_EXPLOSION_DAMAGE: f64 = 50.0;
pub const DEFAULT_FLEE_DISTANCE: f64 = 10.0;

// --- Waves ---

pub const DEFAULT_BASE_PER_WAVE: u32 = 5;
pub const DEFAULT_PER_WAVE_GROWTH: u32 = 2;
pub const DEFAULT_SPAWN_INTERVAL_SECS: f64 = 2.0;
pub const DEFAULT_PRE_SPAWN_DELAY_SECS: f64 = 2.0;
pub const DEFAULT_TIME_BETWEEN_WAVES_SECS: f64 = 10.0;
pub const DEFAULT_MAX_WAVES: u32 = 10;

// --- Scoring ---

pub const DEFAULT_POINTS_PER_KILL: u64 = 10;
pub const DEFAULT_POINTS_PER_WAVE: u64 = 50;
/// Victory bonus = points_per_wave × max_waves × this.
pub const DEFAULT_VICTORY_MULTIPLIER: u64 = 2;

// --- Protagonist ---

pub const DEFAULT_PROTAGONIST_HEALTH: i32 = 100;

// --- Arena ---

/// Half the side length of the default square walkable area (meters).
pub const DEFAULT_ARENA_HALF_EXTENT: f64 = 40.0;

// --- Weapons ---

/// Shotgun bonus applies below this fraction of weapon range.
pub const SHOTGUN_CLOSE_RANGE_FRACTION: f64 = 0.3;
pub const SHOTGUN_CLOSE_RANGE_BONUS: f64 = 1.5;
