//! Spatial query seam: walkable-point sampling and radius overlap.
//!
//! The engine never assumes a particular navigation backend. `FlatArena` is
//! the built-in square floor; a host with real navigation data supplies its
//! own `SpatialQuery`.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::{Collider, Health};
use horde_core::damage::DamageSink;
use horde_core::types::Position;

pub trait SpatialQuery: Send {
    fn distance(&self, a: &Position, b: &Position) -> f64 {
        a.range_to(b)
    }

    /// Nearest walkable point to `point`, searching up to `max_distance`.
    /// `None` when nothing walkable is in reach; callers keep their previous
    /// destination in that case.
    fn sample_walkable_point(&self, point: &Position, max_distance: f64) -> Option<Position>;

    /// Every live collider within `radius` of `center`, nearest first.
    /// Ties break on entity id so the order is stable across runs.
    fn overlap_in_radius(
        &self,
        world: &World,
        center: &Position,
        radius: f64,
    ) -> Vec<(Entity, f64)> {
        let mut hits: Vec<(Entity, f64)> = world
            .query::<(&Position, &Health, &Collider)>()
            .iter()
            .filter(|(_, (_, health, _))| !health.is_dead())
            .map(|(entity, (pos, _, _))| (entity, self.distance(center, pos)))
            .filter(|(_, distance)| *distance <= radius)
            .collect();
        hits.sort_by(|a, b| {
            a.1.total_cmp(&b.1)
                .then_with(|| a.0.to_bits().cmp(&b.0.to_bits()))
        });
        hits
    }
}

/// A flat square floor centered on the origin at z = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatArena {
    pub half_extent: f64,
}

impl FlatArena {
    pub fn new(half_extent: f64) -> Self {
        Self { half_extent }
    }
}

impl SpatialQuery for FlatArena {
    fn sample_walkable_point(&self, point: &Position, max_distance: f64) -> Option<Position> {
        let h = self.half_extent;
        let snapped = Position::ground(point.x.clamp(-h, h), point.y.clamp(-h, h));
        (point.range_to(&snapped) <= max_distance).then_some(snapped)
    }
}

/// Uniform random point inside the sphere of `radius` around `origin`.
pub fn random_point_in_sphere(rng: &mut ChaCha8Rng, origin: &Position, radius: f64) -> Position {
    let offset = loop {
        let v = DVec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if v.length_squared() <= 1.0 {
            break v;
        }
    };
    Position::from(origin.as_dvec3() + offset * radius)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn flat_arena_snaps_to_floor_within_reach() {
        let arena = FlatArena::new(10.0);
        assert_eq!(
            arena.sample_walkable_point(&Position::new(3.0, -4.0, 2.0), 5.0),
            Some(Position::ground(3.0, -4.0))
        );
        assert_eq!(
            arena.sample_walkable_point(&Position::ground(12.0, 0.0), 5.0),
            Some(Position::ground(10.0, 0.0))
        );
        assert_eq!(
            arena.sample_walkable_point(&Position::ground(30.0, 0.0), 5.0),
            None
        );
    }

    #[test]
    fn sphere_samples_stay_inside_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let origin = Position::ground(5.0, 5.0);
        for _ in 0..200 {
            let p = random_point_in_sphere(&mut rng, &origin, 3.0);
            assert!(origin.range_to(&p) <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn overlap_skips_dead_and_colliderless() {
        let mut world = World::new();
        let near = world.spawn((Position::ground(1.0, 0.0), Health::new(10), Collider));
        let far = world.spawn((Position::ground(4.0, 0.0), Health::new(10), Collider));
        world.spawn((Position::ground(9.0, 0.0), Health::new(10), Collider));
        world.spawn((Position::ground(0.5, 0.0), Health::new(10)));
        let mut dead = Health::new(10);
        dead.take_damage(10);
        world.spawn((Position::ground(0.2, 0.0), dead, Collider));

        let hits = FlatArena::new(50.0).overlap_in_radius(&world, &Position::default(), 5.0);
        let entities: Vec<Entity> = hits.iter().map(|(e, _)| *e).collect();
        assert_eq!(entities, vec![near, far]);
    }
}
