//! Exploder detonation.
//!
//! Once armed, the fuse always burns down and the blast always resolves,
//! even if the exploder is killed while it is counting. The blast hits every
//! live collider in radius except the exploder itself, with damage falling
//! off linearly to zero at the edge. The exploder then dies by its own blast.

use hecs::{Entity, World};
use tracing::debug;

use horde_ai::combat::blast_damage;
use horde_core::components::*;
use horde_core::constants::DETONATION_FUSE_SECS;
use horde_core::enums::AttackPhase;
use horde_core::events::CombatEvent;
use horde_core::types::{secs_to_ticks, Position};

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::spatial::SpatialQuery;
use crate::systems::damage::{apply_damage, entity_id, Casualty};

/// Halt the exploder and light the fuse. Any attack in progress is dropped.
pub fn arm(
    world: &mut World,
    scheduler: &mut Scheduler,
    agent: Entity,
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
) {
    if let Ok(mut brain) = world.get::<&mut AgentBrain>(agent) {
        if let Some(handle) = brain.attack_timer.take() {
            scheduler.cancel(handle);
        }
        brain.attack = AttackPhase::Ready;
    }
    if let Ok(mut nav) = world.get::<&mut Navigation>(agent) {
        nav.destination = None;
        nav.halted = true;
    }
    scheduler.schedule(
        now_tick,
        secs_to_ticks(DETONATION_FUSE_SECS),
        ScheduledAction::Detonate(agent),
    );
    events.push(CombatEvent::DetonationArmed {
        agent_id: entity_id(agent),
    });
    debug!(agent = entity_id(agent), "detonation armed");
}

/// Fuse expired: resolve the blast, then kill the exploder.
pub fn detonate(
    world: &mut World,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    agent: Entity,
    now_tick: u64,
    casualties: &mut Vec<Casualty>,
    events: &mut Vec<CombatEvent>,
) {
    let (origin, radius, damage) = match world.query_one_mut::<(&Position, &AgentStats)>(agent) {
        Ok((pos, stats)) => match stats.traits {
            ArchetypeTraits::Exploder {
                explosion_radius,
                explosion_damage,
            } => (*pos, explosion_radius, explosion_damage),
            _ => return,
        },
        Err(_) => return,
    };

    let victims: Vec<(Entity, f64)> = spatial
        .overlap_in_radius(world, &origin, radius)
        .into_iter()
        .filter(|(entity, _)| *entity != agent)
        .collect();

    for (victim, distance) in &victims {
        let amount = blast_damage(damage, radius, *distance);
        apply_damage(world, scheduler, *victim, amount, now_tick, casualties, events);
    }

    events.push(CombatEvent::Detonated {
        agent_id: entity_id(agent),
        victims: victims.len() as u32,
    });
    debug!(
        agent = entity_id(agent),
        victims = victims.len(),
        "exploder detonated"
    );

    // Lethal to itself; a no-op if it already died during the fuse.
    apply_damage(world, scheduler, agent, u32::MAX, now_tick, casualties, events);
}
