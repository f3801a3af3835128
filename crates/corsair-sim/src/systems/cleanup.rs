//! Cleanup system: removes entities that are destroyed or out of bounds.

use hecs::{Entity, World};

use corsair_core::components::{Condition, Kinematics};
use corsair_core::constants::WORLD_RADIUS;

/// Despawn destroyed entities and anything beyond the world boundary.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let radius_sq = WORLD_RADIUS * WORLD_RADIUS;

    for (entity, kin) in world.query_mut::<&Kinematics>() {
        if kin.pos.length_squared() > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    for (entity, condition) in world.query_mut::<&Condition>() {
        if *condition == Condition::Destroyed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corsair_core::types::Vec2;

    #[test]
    fn test_destroyed_entity_despawned() {
        let mut world = World::new();
        let dead = world.spawn((Kinematics::new(Vec2::ZERO, 0.0, 0.0), Condition::Destroyed));
        let alive = world.spawn((Kinematics::new(Vec2::ZERO, 0.0, 0.0), Condition::Intact));

        let mut buffer = Vec::new();
        run(&mut world, &mut buffer);

        assert!(!world.contains(dead));
        assert!(world.contains(alive));
    }

    #[test]
    fn test_out_of_bounds_entity_despawned() {
        let mut world = World::new();
        let far = world.spawn((
            Kinematics::new(Vec2::new(WORLD_RADIUS + 1.0, 0.0), 0.0, 0.0),
            Condition::Intact,
        ));

        let mut buffer = Vec::new();
        run(&mut world, &mut buffer);

        assert!(!world.contains(far));
    }

    #[test]
    fn test_double_marked_entity_despawned_once() {
        let mut world = World::new();
        // Destroyed AND out of bounds: pushed twice, despawned once.
        let gone = world.spawn((
            Kinematics::new(Vec2::new(WORLD_RADIUS * 2.0, 0.0), 0.0, 0.0),
            Condition::Destroyed,
        ));

        let mut buffer = Vec::new();
        run(&mut world, &mut buffer);

        assert!(!world.contains(gone));
        assert!(buffer.is_empty());
    }
}
