//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::World;

use horde_core::components::*;
use horde_core::enums::{AttackPhase, GamePhase};
use horde_core::events::{CombatEvent, GameEvent};
use horde_core::state::*;
use horde_core::types::{Position, SimTime};

use crate::systems::damage::entity_id;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    wave: WaveView,
    score: ScoreView,
    events: Vec<GameEvent>,
    combat_events: Vec<CombatEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        wave,
        score,
        agents: build_agents(world),
        protagonist: build_protagonist(world),
        events,
        combat_events,
    }
}

/// Build AgentView list, sorted by agent id. Corpses are included until removed.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Agent, &Position, &Heading, &Health, &AgentStats, &AgentBrain)>()
        .iter()
        .map(|(entity, (_, pos, heading, health, stats, brain))| AgentView {
            agent_id: entity_id(entity),
            archetype: stats.traits.archetype(),
            state: brain.state,
            attacking: brain.attack == AttackPhase::WindUp,
            position: *pos,
            yaw: heading.yaw,
            health: health.reported(),
            max_health: health.max,
        })
        .collect();
    agents.sort_by_key(|a| a.agent_id);
    agents
}

fn build_protagonist(world: &World) -> Option<ProtagonistView> {
    world
        .query::<(&Protagonist, &Position, &Health)>()
        .iter()
        .next()
        .map(|(_, (_, pos, health))| ProtagonistView {
            position: *pos,
            health: health.reported(),
            max_health: health.max,
            dead: health.dead,
        })
}
