//! Simulation engine for the horde survival game.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, sequences
//! waves, keeps score, and produces GameStateSnapshots for the frontend.

pub mod director;
pub mod engine;
pub mod factory;
pub mod ledger;
pub mod scheduler;
pub mod session;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use horde_core as core;
