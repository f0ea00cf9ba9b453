//! Cleanup system: removes corpses whose grace period has expired.
//!
//! Removal is pure cleanup. Death was already credited when the agent died.

use hecs::{Entity, World};

use horde_core::components::Corpse;

/// Despawn every corpse due at or before `now_tick`.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, now_tick: u64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, corpse) in world.query_mut::<&Corpse>() {
        if corpse.remove_at_tick <= now_tick {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
