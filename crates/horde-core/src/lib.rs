//! Core types and definitions for the HORDE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, configuration, and constants.
//! It has no dependency on the ECS or on any random number source.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod damage;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
