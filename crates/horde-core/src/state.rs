//! Game state snapshot: the complete visible state handed to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{CombatEvent, GameEvent};
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub score: ScoreView,
    pub agents: Vec<AgentView>,
    pub protagonist: Option<ProtagonistView>,
    /// Lifecycle notifications raised during this tick, in delivery order.
    pub events: Vec<GameEvent>,
    /// Combat feedback raised during this tick.
    pub combat_events: Vec<CombatEvent>,
}

/// Current wave progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub max_waves: u32,
    pub phase: WavePhase,
    pub agents_to_spawn: u32,
    pub agents_spawned: u32,
    pub agents_remaining: u32,
    /// Countdown to the next wave, while one is scheduled.
    pub next_wave_in_secs: Option<f64>,
}

/// A visible agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub agent_id: u64,
    pub archetype: AgentArchetype,
    pub state: AgentState,
    pub attacking: bool,
    pub position: Position,
    pub yaw: f64,
    pub health: i32,
    pub max_health: i32,
}

/// Protagonist status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtagonistView {
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub dead: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total_score: u64,
    pub agents_killed: u32,
}
