//! Agent melee attack: wind-up, strike, recovery.
//!
//! An attack commits the agent for `ATTACK_WIND_UP_SECS`. When the wind-up
//! expires the target is hit only if it is still within attack range, then
//! the agent recovers for the rest of its cooldown. Killing the agent cancels
//! whichever step is pending.

use hecs::{Entity, World};

use horde_core::components::*;
use horde_core::constants::ATTACK_WIND_UP_SECS;
use horde_core::damage::DamageSink;
use horde_core::enums::{AgentState, AttackPhase};
use horde_core::events::CombatEvent;
use horde_core::types::{secs_to_ticks, Position};

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::spatial::SpatialQuery;
use crate::systems::damage::{apply_damage, entity_id, Casualty};

/// Face the target and start the wind-up.
pub fn begin(
    world: &mut World,
    scheduler: &mut Scheduler,
    agent: Entity,
    target_pos: &Position,
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
) {
    let Ok((pos, heading, brain)) =
        world.query_one_mut::<(&Position, &mut Heading, &mut AgentBrain)>(agent)
    else {
        return;
    };
    if brain.attack != AttackPhase::Ready {
        return;
    }
    heading.yaw = pos.yaw_to(target_pos);
    brain.attack = AttackPhase::WindUp;
    brain.attack_timer = Some(scheduler.schedule(
        now_tick,
        secs_to_ticks(ATTACK_WIND_UP_SECS),
        ScheduledAction::AttackStrike(agent),
    ));
    events.push(CombatEvent::AttackStarted {
        agent_id: entity_id(agent),
    });
}

/// Wind-up finished: hit the target if it is still in range, then recover.
#[allow(clippy::too_many_arguments)]
pub fn strike(
    world: &mut World,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    agent: Entity,
    target: Option<Entity>,
    now_tick: u64,
    casualties: &mut Vec<Casualty>,
    events: &mut Vec<CombatEvent>,
) {
    let (agent_pos, stats) = match world.query_one_mut::<(&Position, &AgentStats, &AgentBrain)>(agent) {
        Ok((pos, stats, brain)) if brain.attack == AttackPhase::WindUp => (*pos, *stats),
        _ => return,
    };

    let in_range = target.and_then(|t| live_position(world, t)).map_or(false, |target_pos| {
        spatial.distance(&agent_pos, &target_pos) <= stats.attack_range
    });

    let agent_id = entity_id(agent);
    match target {
        Some(target) if in_range => {
            apply_damage(world, scheduler, target, stats.damage, now_tick, casualties, events);
            events.push(CombatEvent::AttackLanded {
                agent_id,
                damage: stats.damage,
            });
        }
        _ => events.push(CombatEvent::AttackWhiffed { agent_id }),
    }

    if let Ok(mut brain) = world.get::<&mut AgentBrain>(agent) {
        if brain.state == AgentState::Dead {
            return;
        }
        let recovery = (stats.attack_cooldown_secs - ATTACK_WIND_UP_SECS).max(0.0);
        brain.attack = AttackPhase::Recovering;
        brain.attack_timer = Some(scheduler.schedule(
            now_tick,
            secs_to_ticks(recovery),
            ScheduledAction::AttackRecovered(agent),
        ));
    }
}

/// Cooldown finished: the agent may attack again.
pub fn recover(world: &mut World, agent: Entity) {
    if let Ok(mut brain) = world.get::<&mut AgentBrain>(agent) {
        if brain.attack == AttackPhase::Recovering {
            brain.attack = AttackPhase::Ready;
            brain.attack_timer = None;
        }
    }
}

/// Position of `entity` if it is alive and targetable.
pub fn live_position(world: &World, entity: Entity) -> Option<Position> {
    let mut query = world.query_one::<(&Position, &Health, &Collider)>(entity).ok()?;
    let (pos, health, _) = query.get()?;
    (!health.is_dead()).then_some(*pos)
}
