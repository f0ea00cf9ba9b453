//! Archetype-specific stat profiles.
//!
//! Scales the configured base stats into the concrete stats an agent of a
//! given archetype spawns with.

use horde_core::components::{AgentStats, ArchetypeTraits};
use horde_core::config::AgentBaseStats;
use horde_core::constants::*;
use horde_core::enums::AgentArchetype;

/// Everything the factory needs to build an agent of one archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentProfile {
    pub stats: AgentStats,
    /// Starting and maximum health. Immutable after spawn.
    pub max_health: i32,
}

/// Derive the profile for `archetype` from the base stats.
pub fn get_profile(archetype: AgentArchetype, base: &AgentBaseStats) -> AgentProfile {
    let mut health = base.health;
    let mut damage = base.damage;
    let mut speed = base.move_speed;
    let mut cooldown = base.attack_cooldown_secs;

    let traits = match archetype {
        AgentArchetype::Normal => ArchetypeTraits::Normal,
        AgentArchetype::Runner => {
            speed *= RUNNER_SPEED_FACTOR;
            health = scale_i32(health, RUNNER_HEALTH_FACTOR);
            cooldown *= RUNNER_COOLDOWN_FACTOR;
            ArchetypeTraits::Runner
        }
        AgentArchetype::Tank => {
            speed *= TANK_SPEED_FACTOR;
            health = scale_i32(health, TANK_HEALTH_FACTOR);
            damage = scale_u32(damage, TANK_DAMAGE_FACTOR);
            cooldown *= TANK_COOLDOWN_FACTOR;
            ArchetypeTraits::Tank {
                run_away_threshold: base.run_away_threshold,
            }
        }
        AgentArchetype::Exploder => {
            health = scale_i32(health, EXPLODER_HEALTH_FACTOR);
            ArchetypeTraits::Exploder {
                explosion_radius: base.explosion_radius,
                explosion_damage: base.explosion_damage,
            }
        }
    };

    AgentProfile {
        stats: AgentStats {
            traits,
            damage,
            attack_range: base.attack_range,
            attack_cooldown_secs: cooldown,
            detection_range: base.detection_range,
            move_speed: speed,
            wander_radius: base.wander_radius,
            wander_interval_secs: base.wander_interval_secs,
            flee_distance: base.flee_distance,
        },
        max_health: health.max(1),
    }
}

fn scale_i32(value: i32, factor: f64) -> i32 {
    (value as f64 * factor).round() as i32
}

fn scale_u32(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).round().max(0.0) as u32
}
