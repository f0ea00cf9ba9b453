//! Damage application and the death transition.
//!
//! All damage in the simulation (weapon hits, attacks, blasts) funnels
//! through `apply_damage`. The first lethal hit records a casualty exactly
//! once; the engine settles casualties in the order they were recorded.

use hecs::{Entity, World};
use tracing::debug;

use horde_core::components::*;
use horde_core::constants::CORPSE_GRACE_SECS;
use horde_core::damage::{DamageOutcome, DamageSink};
use horde_core::enums::{AgentArchetype, AgentState};
use horde_core::events::CombatEvent;
use horde_core::types::secs_to_ticks;

use crate::scheduler::Scheduler;

/// A sink that reached zero health this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casualty {
    Agent(Entity, AgentArchetype),
    Protagonist(Entity),
}

/// Stable external id for an entity.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Resolve an external id back to an entity, if it is still alive.
pub fn entity_from_id(world: &World, id: u64) -> Option<Entity> {
    let entity = Entity::from_bits(id)?;
    world.contains(entity).then_some(entity)
}

/// Apply `amount` to `target`'s health and handle the death transition.
/// Targets without health, or already dead, are unaffected.
pub fn apply_damage(
    world: &mut World,
    scheduler: &mut Scheduler,
    target: Entity,
    amount: u32,
    now_tick: u64,
    casualties: &mut Vec<Casualty>,
    events: &mut Vec<CombatEvent>,
) -> DamageOutcome {
    let (outcome, remaining) = match world.get::<&mut Health>(target) {
        Ok(mut health) => (health.take_damage(amount), health.reported()),
        Err(_) => return DamageOutcome::Ignored,
    };
    if outcome == DamageOutcome::Ignored {
        return outcome;
    }

    let is_protagonist = world.get::<&Protagonist>(target).is_ok();
    if is_protagonist {
        events.push(CombatEvent::ProtagonistDamaged { amount, remaining });
        if outcome == DamageOutcome::Killed {
            let _ = world.remove_one::<Collider>(target);
            casualties.push(Casualty::Protagonist(target));
            debug!("protagonist killed");
        }
        return outcome;
    }

    if outcome == DamageOutcome::Killed {
        kill_agent(world, scheduler, target, now_tick, casualties, events);
    }
    outcome
}

/// Death transition for an agent: stop acting, drop the collider, and leave
/// a corpse for cleanup.
fn kill_agent(
    world: &mut World,
    scheduler: &mut Scheduler,
    agent: Entity,
    now_tick: u64,
    casualties: &mut Vec<Casualty>,
    events: &mut Vec<CombatEvent>,
) {
    let archetype = match world.get::<&AgentStats>(agent) {
        Ok(stats) => stats.traits.archetype(),
        Err(_) => return,
    };

    if let Ok(mut brain) = world.get::<&mut AgentBrain>(agent) {
        brain.state = AgentState::Dead;
        if let Some(handle) = brain.attack_timer.take() {
            scheduler.cancel(handle);
        }
    }
    if let Ok(mut nav) = world.get::<&mut Navigation>(agent) {
        nav.destination = None;
        nav.halted = true;
    }

    let _ = world.remove_one::<Collider>(agent);
    let _ = world.insert_one(
        agent,
        Corpse {
            remove_at_tick: now_tick + secs_to_ticks(CORPSE_GRACE_SECS),
        },
    );

    casualties.push(Casualty::Agent(agent, archetype));
    events.push(CombatEvent::AgentKilled {
        agent_id: entity_id(agent),
        archetype,
    });
    debug!(agent = entity_id(agent), ?archetype, "agent killed");
}
