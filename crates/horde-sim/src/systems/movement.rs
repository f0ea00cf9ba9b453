//! Agent locomotion toward the current navigation destination.

use hecs::World;

use horde_core::components::{AgentStats, Heading, Navigation};
use horde_core::constants::{ARRIVAL_DISTANCE, DT};
use horde_core::types::Position;

/// Step every moving agent toward its destination at its move speed.
/// A destination within `ARRIVAL_DISTANCE` counts as reached and is cleared.
pub fn run(world: &mut World) {
    for (_entity, (pos, nav, stats, heading)) in
        world.query_mut::<(&mut Position, &mut Navigation, &AgentStats, &mut Heading)>()
    {
        if nav.halted {
            continue;
        }
        let Some(destination) = nav.destination else {
            continue;
        };

        if pos.range_to(&destination) > ARRIVAL_DISTANCE {
            heading.yaw = pos.yaw_to(&destination);
            *pos = pos.step_toward(&destination, stats.move_speed * DT);
        }
        if pos.range_to(&destination) <= ARRIVAL_DISTANCE {
            nav.destination = None;
        }
    }
}
