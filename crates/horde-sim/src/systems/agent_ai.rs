//! Agent AI system: bridges ECS components to the pure FSM in `horde_ai`.
//!
//! For each living agent, builds an `AgentContext`, evaluates the FSM, then
//! applies the decision: state, navigation, attack start, and detonation.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};

use horde_ai::fsm::{self, AgentContext, AgentDecision, MovementIntent};
use horde_core::components::*;
use horde_core::constants::DT;
use horde_core::damage::DamageSink;
use horde_core::enums::AgentState;
use horde_core::events::CombatEvent;
use horde_core::types::Position;

use crate::scheduler::Scheduler;
use crate::spatial::{random_point_in_sphere, SpatialQuery};
use crate::systems::{attack, detonation};
use crate::systems::damage::entity_id;

/// Run the FSM for every agent and apply the decisions.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    rng: &mut ChaCha8Rng,
    target: Option<Entity>,
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
) {
    let target_pos = target.and_then(|t| attack::live_position(world, t));

    let mut updates: Vec<(Entity, AgentDecision)> = Vec::new();
    for (entity, (_agent, pos, stats, brain, health)) in world
        .query::<(&Agent, &Position, &AgentStats, &AgentBrain, &Health)>()
        .iter()
    {
        if brain.state == AgentState::Dead {
            continue;
        }
        let ctx = AgentContext {
            stats: *stats,
            state: brain.state,
            attack: brain.attack,
            position: *pos,
            health_fraction: health.health_fraction(),
            target: target_pos,
            wander_timer_secs: brain.wander_timer_secs,
            dt: DT,
        };
        updates.push((entity, fsm::evaluate(&ctx)));
    }

    for (entity, decision) in updates {
        if let Ok(mut brain) = world.get::<&mut AgentBrain>(entity) {
            brain.state = decision.new_state;
            brain.wander_timer_secs = decision.wander_timer_secs;
        }
        if decision.state_changed {
            trace!(agent = entity_id(entity), state = ?decision.new_state, "agent state changed");
        }

        steer(world, spatial, rng, entity, decision.movement);

        if decision.arm_detonation {
            detonation::arm(world, scheduler, entity, now_tick, events);
        }
        if decision.begin_attack {
            if let Some(target_pos) = target_pos {
                attack::begin(world, scheduler, entity, &target_pos, now_tick, events);
            }
        }
    }
}

/// Resolve a movement intent into a navigation destination.
fn steer(
    world: &mut World,
    spatial: &dyn SpatialQuery,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    intent: MovementIntent,
) {
    let destination = match intent {
        MovementIntent::Keep | MovementIntent::Halt => None,
        MovementIntent::Pursue(point) => Some(point),
        MovementIntent::Roam { origin, radius } => {
            let candidate = random_point_in_sphere(rng, &origin, radius);
            sample_or_hold(spatial, entity, &candidate, radius)
        }
        MovementIntent::Flee {
            toward,
            search_radius,
        } => sample_or_hold(spatial, entity, &toward, search_radius),
    };

    if let Ok(mut nav) = world.get::<&mut Navigation>(entity) {
        if intent == MovementIntent::Halt {
            nav.destination = None;
            nav.halted = true;
        } else if let Some(destination) = destination {
            nav.destination = Some(destination);
        }
    }
}

fn sample_or_hold(
    spatial: &dyn SpatialQuery,
    entity: Entity,
    point: &Position,
    max_distance: f64,
) -> Option<Position> {
    let sampled = spatial.sample_walkable_point(point, max_distance);
    if sampled.is_none() {
        warn!(agent = entity_id(entity), "no walkable point, holding destination");
    }
    sampled
}
