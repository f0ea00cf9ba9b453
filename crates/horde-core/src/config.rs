//! Session configuration.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a valid
//! config. Call `validate()` before handing a hand-written config to the engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::*;
use crate::enums::AgentArchetype;
use crate::error::ConfigError;
use crate::types::Position;

/// Complete configuration for one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. Same seed + same commands = same session.
    pub seed: u64,
    pub waves: WaveConfig,
    pub scoring: ScoringConfig,
    pub agents: AgentBaseStats,
    /// Archetype gates, checked in order; the first passing gate wins.
    pub selection: Vec<SelectionGate>,
    pub spawn_points: Vec<SpawnPoint>,
    pub arena: ArenaConfig,
    pub protagonist: ProtagonistConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_per_wave: u32,
    pub per_wave_growth: u32,
    pub spawn_interval_secs: f64,
    pub pre_spawn_delay_secs: f64,
    pub time_between_waves_secs: f64,
    pub max_waves: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub points_per_kill: u64,
    /// Wave completion bonus, multiplied by the wave number.
    pub points_per_wave: u64,
    pub victory_multiplier: u64,
}

/// Base agent stats before archetype scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentBaseStats {
    pub health: i32,
    pub damage: u32,
    pub attack_range: f64,
    pub attack_cooldown_secs: f64,
    pub detection_range: f64,
    pub move_speed: f64,
    pub wander_radius: f64,
    pub wander_interval_secs: f64,
    pub run_away_threshold: f64,
    pub explosion_radius: f64,
    pub explosion_damage: f64,
    pub flee_distance: f64,
}

/// One probability gate of archetype selection.
/// Passes when `wave >= min_wave && roll < base + wave × per_wave`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionGate {
    pub archetype: AgentArchetype,
    pub min_wave: u32,
    pub base: f64,
    pub per_wave: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
    #[serde(default)]
    pub yaw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub half_extent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtagonistConfig {
    pub max_health: i32,
    pub spawn: Position,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            waves: WaveConfig::default(),
            scoring: ScoringConfig::default(),
            agents: AgentBaseStats::default(),
            selection: default_selection(),
            spawn_points: default_spawn_points(),
            arena: ArenaConfig::default(),
            protagonist: ProtagonistConfig::default(),
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_per_wave: DEFAULT_BASE_PER_WAVE,
            per_wave_growth: DEFAULT_PER_WAVE_GROWTH,
            spawn_interval_secs: DEFAULT_SPAWN_INTERVAL_SECS,
            pre_spawn_delay_secs: DEFAULT_PRE_SPAWN_DELAY_SECS,
            time_between_waves_secs: DEFAULT_TIME_BETWEEN_WAVES_SECS,
            max_waves: DEFAULT_MAX_WAVES,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_kill: DEFAULT_POINTS_PER_KILL,
            points_per_wave: DEFAULT_POINTS_PER_WAVE,
            victory_multiplier: DEFAULT_VICTORY_MULTIPLIER,
        }
    }
}

impl Default for AgentBaseStats {
    fn default() -> Self {
        Self {
            health: DEFAULT_AGENT_HEALTH,
            damage: DEFAULT_AGENT_DAMAGE,
            attack_range: DEFAULT_ATTACK_RANGE,
            attack_cooldown_secs: DEFAULT_ATTACK_COOLDOWN_SECS,
            detection_range: DEFAULT_DETECTION_RANGE,
            move_speed: DEFAULT_MOVE_SPEED,
            wander_radius: DEFAULT_WANDER_RADIUS,
            wander_interval_secs: DEFAULT_WANDER_INTERVAL_SECS,
            run_away_threshold: DEFAULT_RUN_AWAY_THRESHOLD,
            explosion_radius: DEFAULT_EXPLOSION_RADIUS,
            explosion_damage: DEFAULT_EXPLOSION_DAMAGE,
            flee_distance: DEFAULT_FLEE_DISTANCE,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_extent: DEFAULT_ARENA_HALF_EXTENT,
        }
    }
}

impl Default for ProtagonistConfig {
    fn default() -> Self {
        Self {
            max_health: DEFAULT_PROTAGONIST_HEALTH,
            spawn: Position::default(),
        }
    }
}

/// Tank, then Runner, then Exploder. Later gates can be shadowed by earlier
/// ones; that skew is part of the wave balance.
pub fn default_selection() -> Vec<SelectionGate> {
    vec![
        SelectionGate {
            archetype: AgentArchetype::Tank,
            min_wave: 3,
            base: 0.1,
            per_wave: 0.03,
        },
        SelectionGate {
            archetype: AgentArchetype::Runner,
            min_wave: 2,
            base: 0.3,
            per_wave: 0.05,
        },
        SelectionGate {
            archetype: AgentArchetype::Exploder,
            min_wave: 4,
            base: 0.1,
            per_wave: 0.02,
        },
    ]
}

/// Four corners of the default arena, each facing the center.
pub fn default_spawn_points() -> Vec<SpawnPoint> {
    let d = DEFAULT_ARENA_HALF_EXTENT - 5.0;
    [(-d, d), (d, d), (d, -d), (-d, -d)]
        .into_iter()
        .map(|(x, y)| {
            let position = Position::ground(x, y);
            SpawnPoint {
                position,
                yaw: position.yaw_to(&Position::default()),
            }
        })
        .collect()
}

impl GameConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), seed = config.seed, "loaded game config");
        Ok(config)
    }

    /// Agents spawned by wave `wave_number` (1-based). Saturates at `u32::MAX`.
    pub fn agents_for_wave(&self, wave_number: u32) -> u32 {
        let growth = wave_number
            .saturating_sub(1)
            .saturating_mul(self.waves.per_wave_growth);
        self.waves.base_per_wave.saturating_add(growth)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.waves;
        if w.max_waves == 0 {
            return Err(invalid("waves.max_waves must be at least 1"));
        }
        if w.spawn_interval_secs < 0.0 || w.pre_spawn_delay_secs < 0.0 {
            return Err(invalid("wave delays must not be negative"));
        }
        if w.time_between_waves_secs < 0.0 {
            return Err(invalid("waves.time_between_waves_secs must not be negative"));
        }

        let a = &self.agents;
        if a.health <= 0 {
            return Err(invalid("agents.health must be positive"));
        }
        if a.attack_range <= 0.0 || a.detection_range <= 0.0 {
            return Err(invalid("agent ranges must be positive"));
        }
        if a.attack_cooldown_secs < ATTACK_WIND_UP_SECS {
            return Err(invalid(format!(
                "agents.attack_cooldown_secs must be at least the {ATTACK_WIND_UP_SECS}s wind-up"
            )));
        }
        if !(0.0..=1.0).contains(&a.run_away_threshold) {
            return Err(invalid("agents.run_away_threshold must be within [0, 1]"));
        }
        if a.explosion_radius <= 0.0 || a.explosion_damage < 0.0 {
            return Err(invalid("explosion radius must be positive and damage non-negative"));
        }
        if a.move_speed < 0.0 || a.wander_radius < 0.0 || a.wander_interval_secs <= 0.0 {
            return Err(invalid("agent movement parameters out of range"));
        }

        if self.arena.half_extent <= 0.0 {
            return Err(invalid("arena.half_extent must be positive"));
        }
        if self.protagonist.max_health <= 0 {
            return Err(invalid("protagonist.max_health must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
