//! Kinematic integration system.
//!
//! Advances every entity's position along its heading each tick.

use hecs::World;

use corsair_core::components::Kinematics;

/// Integrate positions: `pos += heading * speed * dt`.
pub fn run(world: &mut World, dt_ms: f64) {
    let dt_s = dt_ms / 1000.0;
    for (_entity, kin) in world.query_mut::<&mut Kinematics>() {
        let velocity = kin.velocity();
        kin.pos += velocity * dt_s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corsair_core::types::Vec2;

    #[test]
    fn test_movement_integration() {
        let mut world = World::new();
        world.spawn((Kinematics::new(Vec2::ZERO, 0.0, 100.0),));

        // 30 ticks at 30 Hz = one second at 100 u/s east.
        for _ in 0..30 {
            run(&mut world, 1000.0 / 30.0);
        }

        let mut q = world.query::<&Kinematics>();
        let (_, kin) = q.iter().next().unwrap();
        assert!((kin.pos.x - 100.0).abs() < 1e-6);
        assert!(kin.pos.y.abs() < 1e-9);
    }

    #[test]
    fn test_stationary_obstacle_does_not_drift() {
        let mut world = World::new();
        world.spawn((Kinematics::new(Vec2::new(50.0, 50.0), 0.0, 0.0),));

        run(&mut world, 1000.0);

        let mut q = world.query::<&Kinematics>();
        let (_, kin) = q.iter().next().unwrap();
        assert_eq!(kin.pos, Vec2::new(50.0, 50.0));
    }
}
