//! Archetype selection for wave spawns.
//!
//! Gates are checked in their configured order and the first passing gate
//! wins. With the default table an earlier gate can shadow a later one even
//! when the later threshold is larger, so the result is not a normalized
//! weighted distribution. Callers must keep the gate order as configured.

use horde_core::config::SelectionGate;
use horde_core::enums::AgentArchetype;

/// Probability threshold of `gate` at `wave_number`.
pub fn gate_threshold(gate: &SelectionGate, wave_number: u32) -> f64 {
    gate.base + wave_number as f64 * gate.per_wave
}

/// Pick the archetype for one spawn slot.
///
/// `roll` is a uniform sample in [0, 1). `available` is the number of
/// archetypes the factory can build; the chosen index is clamped into it.
/// Falls back to `Normal` when no gate passes. Returns `None` only when the
/// factory offers nothing.
pub fn select_archetype(
    wave_number: u32,
    roll: f64,
    gates: &[SelectionGate],
    available: usize,
) -> Option<AgentArchetype> {
    let index = gates
        .iter()
        .find(|gate| wave_number >= gate.min_wave && roll < gate_threshold(gate, wave_number))
        .map(|gate| gate.archetype.index())
        .unwrap_or(AgentArchetype::Normal.index());

    AgentArchetype::from_index_clamped(index, available)
}
