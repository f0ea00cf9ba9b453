//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hostile agent behavioral/stat profile.
///
/// The declaration order is the spawn-table index order: an index produced by
/// archetype selection is clamped into the range of archetypes a factory offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentArchetype {
    #[default]
    Normal,
    Runner,
    Tank,
    Exploder,
}

impl AgentArchetype {
    pub const ALL: [AgentArchetype; 4] = [
        AgentArchetype::Normal,
        AgentArchetype::Runner,
        AgentArchetype::Tank,
        AgentArchetype::Exploder,
    ];

    /// Spawn-table index of this archetype.
    pub fn index(self) -> usize {
        match self {
            AgentArchetype::Normal => 0,
            AgentArchetype::Runner => 1,
            AgentArchetype::Tank => 2,
            AgentArchetype::Exploder => 3,
        }
    }

    /// Archetype at `index`, clamped to the first `available` entries.
    /// Returns `None` only when nothing is available.
    pub fn from_index_clamped(index: usize, available: usize) -> Option<AgentArchetype> {
        let limit = available.min(Self::ALL.len());
        if limit == 0 {
            return None;
        }
        Some(Self::ALL[index.min(limit - 1)])
    }
}

/// Movement/decision state of an agent. Exactly one is active at a time.
///
/// Attacks run on a separate axis (`AttackPhase`) so an agent can swing
/// while it keeps chasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    /// No target in detection range; roams to random nearby points.
    #[default]
    Wander,
    /// Pursuing the target's current position.
    Chasing,
    /// Tank at low health running away from the target.
    Fleeing,
    /// Exploder fuse burning. Terminal; movement frozen.
    Detonating,
    /// Killed. No further damage, movement, or decisions.
    Dead,
}

/// Attack sub-protocol phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Eligible to begin an attack.
    #[default]
    Ready,
    /// Swing started, damage pending at the end of the wind-up.
    WindUp,
    /// Swing resolved, waiting out the remainder of the cooldown.
    Recovering,
}

/// Wave lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    NotStarted,
    /// Pre-spawn delay and one-at-a-time spawning in progress.
    Spawning,
    /// All spawns issued (or aborted); waiting for the remaining agents to die.
    AwaitingCompletion,
    /// Every agent dead; next wave scheduled.
    Complete,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Active,
    Paused,
    /// Protagonist died.
    Defeat,
    /// Every wave cleared.
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Defeat | GamePhase::Victory)
    }
}

/// Protagonist weapon type, used only for damage falloff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Pistol,
    /// Bonus damage at close range.
    Shotgun,
    AssaultRifle,
    /// Area damage is handled elsewhere; the direct hit uses plain falloff.
    RocketLauncher,
}
