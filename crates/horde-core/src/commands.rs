//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;
use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Spawn the protagonist and start wave 1.
    StartGame,
    /// Freeze simulation time.
    Pause,
    /// Unfreeze simulation time.
    Resume,
    /// Quit: end the session in defeat. Honored while paused.
    EndGame,

    // --- Protagonist ---
    /// Place the protagonist (locomotion is handled outside the core).
    MoveProtagonist { position: Position },
    /// Restore protagonist health, clamped at max.
    HealProtagonist { amount: u32 },

    // --- Weapon ---
    /// A resolved weapon hit on an agent; damage falls off with distance.
    Shoot {
        agent_id: u64,
        weapon: WeaponKind,
        base_damage: u32,
        range: f64,
    },
    /// Apply raw damage to an agent.
    DamageAgent { agent_id: u64, amount: u32 },
}
