//! Collision detection between in-flight missiles and world bodies.
//!
//! Produces discrete collision events; the engine applies the
//! consequences (missile removal, vessel destruction). At most one
//! collision is reported per missile per tick.

use hecs::World;

use corsair_core::components::{BoundingCircle, ContactId, Condition, HostileVessel, Kinematics, Obstacle};
use corsair_core::constants::MISSILE_BODY_RADIUS;
use corsair_core::events::{CollisionEvent, Struck};

use crate::engagement::Missile;

/// Check every missile against hostile vessels and obstacles.
pub fn run(world: &World, missiles: &[Missile]) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for missile in missiles {
        if let Some(struck) = find_collision(world, missile) {
            events.push(CollisionEvent {
                missile: missile.id,
                struck,
            });
        }
    }

    events
}

fn find_collision(world: &World, missile: &Missile) -> Option<Struck> {
    {
        let mut query = world.query::<(&ContactId, &Kinematics, &BoundingCircle, &Condition, &HostileVessel)>();
        for (_entity, (id, kin, circle, condition, _)) in query.iter() {
            if *condition == Condition::Destroyed {
                continue;
            }
            if missile.pos.distance(kin.pos) <= circle.radius + MISSILE_BODY_RADIUS {
                return Some(Struck::Vessel { id: id.0 });
            }
        }
    }

    let mut query = world.query::<(&Kinematics, &BoundingCircle, &Obstacle)>();
    for (_entity, (kin, circle, _)) in query.iter() {
        if missile.pos.distance(kin.pos) <= circle.radius + MISSILE_BODY_RADIUS {
            return Some(Struck::Obstacle);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use corsair_core::enums::WeaponKind;
    use corsair_core::types::Vec2;

    fn missile_at(id: u32, x: f64, y: f64) -> Missile {
        Missile {
            id,
            kind: WeaponKind::Aim177,
            pos: Vec2::new(x, y),
            dir: Vec2::new(1.0, 0.0),
            target_id: None,
            age_secs: 3,
            no_solution_streak: 0,
        }
    }

    #[test]
    fn test_missile_strikes_vessel() {
        let mut world = World::new();
        world.spawn((
            ContactId(7),
            Kinematics::new(Vec2::new(100.0, 0.0), 0.0, 0.0),
            BoundingCircle { radius: 8.0 },
            Condition::Intact,
            HostileVessel,
        ));

        let events = run(&world, &[missile_at(1, 95.0, 0.0)]);
        assert_eq!(
            events,
            vec![CollisionEvent {
                missile: 1,
                struck: Struck::Vessel { id: 7 }
            }]
        );
    }

    #[test]
    fn test_missile_strikes_obstacle() {
        let mut world = World::new();
        world.spawn((
            Kinematics::new(Vec2::new(50.0, 0.0), 0.0, 0.0),
            BoundingCircle { radius: 20.0 },
            Obstacle,
        ));

        let events = run(&world, &[missile_at(2, 60.0, 5.0)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].struck, Struck::Obstacle);
    }

    #[test]
    fn test_clear_miss_produces_no_event() {
        let mut world = World::new();
        world.spawn((
            ContactId(7),
            Kinematics::new(Vec2::new(100.0, 0.0), 0.0, 0.0),
            BoundingCircle { radius: 8.0 },
            Condition::Intact,
            HostileVessel,
        ));

        let events = run(&world, &[missile_at(1, 0.0, 200.0)]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_destroyed_vessel_not_struck_again() {
        let mut world = World::new();
        world.spawn((
            ContactId(7),
            Kinematics::new(Vec2::new(100.0, 0.0), 0.0, 0.0),
            BoundingCircle { radius: 8.0 },
            Condition::Destroyed,
            HostileVessel,
        ));

        let events = run(&world, &[missile_at(1, 100.0, 0.0)]);
        assert!(events.is_empty());
    }
}
