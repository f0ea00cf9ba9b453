//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions over `&mut World` plus whatever engine
//! collaborators they need. They do not own state; all state lives in
//! components, the scheduler, or the session.

pub mod agent_ai;
pub mod attack;
pub mod cleanup;
pub mod damage;
pub mod detonation;
pub mod movement;
pub mod snapshot;
