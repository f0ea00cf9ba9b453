//! Agent behavior finite state machine.
//!
//! Pure functions that decide, once per tick, what a single agent does based
//! on its archetype, current state, health, and distance to the target.
//! No ECS dependency; operates on plain data. The caller resolves movement
//! intents against the spatial query and runs the attack and detonation
//! timers.

use horde_core::components::{AgentStats, ArchetypeTraits};
use horde_core::constants::EXPLODER_TRIGGER_FACTOR;
use horde_core::enums::{AgentState, AttackPhase};
use horde_core::types::Position;

/// Input to the agent FSM for a single entity.
pub struct AgentContext {
    pub stats: AgentStats,
    pub state: AgentState,
    pub attack: AttackPhase,
    pub position: Position,
    /// Current health over max health.
    pub health_fraction: f64,
    /// Target position, if a live target exists.
    pub target: Option<Position>,
    pub wander_timer_secs: f64,
    /// Seconds elapsed this tick.
    pub dt: f64,
}

/// Where the agent should head next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementIntent {
    /// Keep the current destination.
    Keep,
    /// Head straight for this point (re-issued every tick while chasing).
    Pursue(Position),
    /// Pick a random walkable point within `radius` of `origin`.
    Roam { origin: Position, radius: f64 },
    /// Head for the walkable point nearest `toward`, searching `search_radius`.
    Flee { toward: Position, search_radius: f64 },
    /// Stop for good.
    Halt,
}

/// Output from the agent FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentDecision {
    pub new_state: AgentState,
    pub movement: MovementIntent,
    pub wander_timer_secs: f64,
    /// Start the attack sub-protocol this tick.
    pub begin_attack: bool,
    /// Light the exploder fuse this tick.
    pub arm_detonation: bool,
    pub state_changed: bool,
}

/// Evaluate the FSM for one agent.
pub fn evaluate(ctx: &AgentContext) -> AgentDecision {
    // Terminal states make no decisions
    if matches!(ctx.state, AgentState::Dead | AgentState::Detonating) {
        return AgentDecision {
            new_state: ctx.state,
            movement: MovementIntent::Keep,
            wander_timer_secs: ctx.wander_timer_secs,
            begin_attack: false,
            arm_detonation: false,
            state_changed: false,
        };
    }

    // A missing target is never detected.
    let distance = ctx
        .target
        .map(|target| ctx.position.range_to(&target))
        .unwrap_or(f64::INFINITY);

    let mut decision = match ctx.target {
        Some(target) if distance <= ctx.stats.detection_range => {
            evaluate_engaged(ctx, target, distance)
        }
        _ => evaluate_wander(ctx),
    };

    // Attack eligibility is independent of the movement branch.
    decision.begin_attack = !decision.arm_detonation
        && ctx.attack == AttackPhase::Ready
        && distance <= ctx.stats.attack_range;

    decision.state_changed = decision.new_state != ctx.state;
    decision
}

fn evaluate_wander(ctx: &AgentContext) -> AgentDecision {
    let mut timer = ctx.wander_timer_secs - ctx.dt;
    let movement = if timer <= 0.0 {
        timer = ctx.stats.wander_interval_secs;
        MovementIntent::Roam {
            origin: ctx.position,
            radius: ctx.stats.wander_radius,
        }
    } else {
        MovementIntent::Keep
    };

    AgentDecision {
        new_state: AgentState::Wander,
        movement,
        wander_timer_secs: timer,
        begin_attack: false,
        arm_detonation: false,
        state_changed: false,
    }
}

fn evaluate_engaged(ctx: &AgentContext, target: Position, distance: f64) -> AgentDecision {
    let chase = AgentDecision {
        new_state: AgentState::Chasing,
        movement: MovementIntent::Pursue(target),
        wander_timer_secs: ctx.wander_timer_secs,
        begin_attack: false,
        arm_detonation: false,
        state_changed: false,
    };

    match ctx.stats.traits {
        ArchetypeTraits::Normal | ArchetypeTraits::Runner => chase,
        ArchetypeTraits::Tank { run_away_threshold } => {
            if ctx.health_fraction <= run_away_threshold {
                AgentDecision {
                    new_state: AgentState::Fleeing,
                    movement: MovementIntent::Flee {
                        toward: flee_point(ctx.position, target, ctx.stats.flee_distance),
                        search_radius: ctx.stats.flee_distance,
                    },
                    ..chase
                }
            } else {
                chase
            }
        }
        ArchetypeTraits::Exploder { .. } => {
            if distance <= ctx.stats.attack_range * EXPLODER_TRIGGER_FACTOR {
                AgentDecision {
                    new_state: AgentState::Detonating,
                    movement: MovementIntent::Halt,
                    arm_detonation: true,
                    ..chase
                }
            } else {
                chase
            }
        }
    }
}

/// Point `flee_distance` meters directly away from `threat`.
/// An agent standing on the threat stays put.
pub fn flee_point(position: Position, threat: Position, flee_distance: f64) -> Position {
    let away = (position.as_dvec3() - threat.as_dvec3()).normalize_or_zero();
    Position::from(position.as_dvec3() + away * flee_distance)
}
