//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::AgentArchetype;

/// Lifecycle notifications republished by the score ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave began (pre-spawn delay starts now).
    WaveStarted { wave_number: u32 },
    /// Every agent of the wave has died.
    WaveEnded { wave_number: u32 },
    /// Total score changed.
    ScoreChanged { total_score: u64 },
    /// Terminal: protagonist died (`victory == false`) or all waves cleared.
    GameOver {
        final_score: u64,
        final_wave: u32,
        victory: bool,
    },
}

/// Notification kind, used to key subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    WaveStarted,
    WaveEnded,
    ScoreChanged,
    GameOver,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::WaveStarted { .. } => EventKind::WaveStarted,
            GameEvent::WaveEnded { .. } => EventKind::WaveEnded,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::GameOver { .. } => EventKind::GameOver,
        }
    }
}

/// Per-tick combat feedback for animation and sound cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Agent began its wind-up toward the target.
    AttackStarted { agent_id: u64 },
    /// Wind-up finished with the target still in range.
    AttackLanded { agent_id: u64, damage: u32 },
    /// Wind-up finished but the target had moved out of range.
    AttackWhiffed { agent_id: u64 },
    /// Exploder fuse lit.
    DetonationArmed { agent_id: u64 },
    /// Exploder blast resolved.
    Detonated { agent_id: u64, victims: u32 },
    /// Agent health reached zero.
    AgentKilled {
        agent_id: u64,
        archetype: AgentArchetype,
    },
    /// Protagonist health changed due to damage.
    ProtagonistDamaged { amount: u32, remaining: i32 },
    /// Protagonist healed.
    ProtagonistHealed { amount: u32, remaining: i32 },
}
