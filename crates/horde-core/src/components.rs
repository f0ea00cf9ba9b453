//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior of their own.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, TimerHandle};

/// Hit points. Implements `DamageSink` (see `damage.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    /// Fixed at spawn.
    pub max: i32,
    pub dead: bool,
}

/// Archetype-specific parameters, tagged by archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "archetype")]
pub enum ArchetypeTraits {
    Normal,
    Runner,
    Tank {
        /// Health fraction at or below which the tank flees.
        run_away_threshold: f64,
    },
    Exploder {
        explosion_radius: f64,
        explosion_damage: f64,
    },
}

impl ArchetypeTraits {
    pub fn archetype(&self) -> AgentArchetype {
        match self {
            ArchetypeTraits::Normal => AgentArchetype::Normal,
            ArchetypeTraits::Runner => AgentArchetype::Runner,
            ArchetypeTraits::Tank { .. } => AgentArchetype::Tank,
            ArchetypeTraits::Exploder { .. } => AgentArchetype::Exploder,
        }
    }
}

/// Combat and movement stats derived from the archetype at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub traits: ArchetypeTraits,
    pub damage: u32,
    pub attack_range: f64,
    pub attack_cooldown_secs: f64,
    pub detection_range: f64,
    /// Meters per second.
    pub move_speed: f64,
    pub wander_radius: f64,
    pub wander_interval_secs: f64,
    /// How far ahead a fleeing agent aims (meters).
    pub flee_distance: f64,
}

/// Per-agent decision state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentBrain {
    pub state: AgentState,
    pub attack: AttackPhase,
    /// Counts down while wandering; a new roam point is picked at zero.
    pub wander_timer_secs: f64,
    /// Pending wind-up or recovery timer, if an attack is in flight.
    pub attack_timer: Option<TimerHandle>,
}

/// Where the agent is heading. `None` means stand still.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub destination: Option<Position>,
    /// Set by detonation and death; a halted agent never moves again.
    pub halted: bool,
}

/// Facing around the vertical axis (radians, 0 = North, clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub yaw: f64,
}

/// Marks an entity as a hostile agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Agent;

/// Marks the player's protagonist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Protagonist;

/// Entity can be hit by overlap queries and targeted. Removed on death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider;

/// A dead agent awaiting removal from the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpse {
    pub remove_at_tick: u64,
}
