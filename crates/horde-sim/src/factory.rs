//! Agent factory seam.
//!
//! The wave director asks the factory for agents by archetype. A factory may
//! support only a prefix of the archetype table; selection clamps to what it
//! reports as available.

use hecs::{Entity, World};

use horde_ai::profiles::get_profile;
use horde_core::config::AgentBaseStats;
use horde_core::enums::AgentArchetype;
use horde_core::types::Position;

use crate::world_setup;

pub trait AgentFactory: Send {
    /// How many archetypes, from the start of `AgentArchetype::ALL`, can be built.
    fn available_archetypes(&self) -> usize;

    /// Build one agent. `None` means the spawn failed; the wave will stall
    /// one agent short rather than abort.
    fn spawn(
        &mut self,
        world: &mut World,
        archetype: AgentArchetype,
        position: Position,
        yaw: f64,
    ) -> Option<Entity>;
}

/// Builds every archetype from the configured base stats.
#[derive(Debug, Clone)]
pub struct ProfileFactory {
    base: AgentBaseStats,
}

impl ProfileFactory {
    pub fn new(base: AgentBaseStats) -> Self {
        Self { base }
    }
}

impl AgentFactory for ProfileFactory {
    fn available_archetypes(&self) -> usize {
        AgentArchetype::ALL.len()
    }

    fn spawn(
        &mut self,
        world: &mut World,
        archetype: AgentArchetype,
        position: Position,
        yaw: f64,
    ) -> Option<Entity> {
        let profile = get_profile(archetype, &self.base);
        Some(world_setup::spawn_agent(world, &profile, position, yaw))
    }
}
