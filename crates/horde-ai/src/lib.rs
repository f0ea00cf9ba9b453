//! Agent AI for HORDE.
//!
//! Implements the agent behavior state machine, archetype stat profiles,
//! damage falloff rules, and wave archetype selection.

pub mod combat;
pub mod fsm;
pub mod profiles;
pub mod selection;

pub use horde_core as core;

#[cfg(test)]
mod tests;
