//! Entity spawn helpers for the protagonist and agents.

use hecs::{Entity, World};

use horde_ai::profiles::AgentProfile;
use horde_core::components::*;
use horde_core::config::ProtagonistConfig;
use horde_core::types::Position;

/// Spawn the protagonist at its configured start point.
pub fn spawn_protagonist(world: &mut World, config: &ProtagonistConfig) -> Entity {
    world.spawn((
        Protagonist,
        config.spawn,
        Heading::default(),
        Health::new(config.max_health),
        Collider,
    ))
}

/// Spawn an agent built from `profile`. It starts wandering with a full
/// wander timer.
pub fn spawn_agent(world: &mut World, profile: &AgentProfile, position: Position, yaw: f64) -> Entity {
    let brain = AgentBrain {
        wander_timer_secs: profile.stats.wander_interval_secs,
        ..AgentBrain::default()
    };
    world.spawn((
        Agent,
        position,
        Heading { yaw },
        Health::new(profile.max_health),
        profile.stats,
        brain,
        Navigation::default(),
        Collider,
    ))
}
