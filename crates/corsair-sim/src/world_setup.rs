//! Entity spawn factories for setting up the mission world.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use corsair_core::components::*;
use corsair_core::constants::*;
use corsair_core::geometry;
use corsair_core::types::Vec2;

/// Set up the mission world: own vessel plus rng-placed hostiles and
/// obstacles. Returns nothing; the caller reads back through queries.
pub fn setup_mission(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    hostiles: usize,
    obstacles: usize,
    next_contact_id: &mut u32,
) {
    spawn_own_vessel(world);
    for _ in 0..hostiles {
        spawn_hostile(world, rng, next_contact_id);
    }
    for _ in 0..obstacles {
        spawn_obstacle(world, rng);
    }
}

/// Spawn the player's vessel at the origin, facing east.
pub fn spawn_own_vessel(world: &mut World) -> hecs::Entity {
    world.spawn((
        OwnVessel,
        Kinematics::new(Vec2::ZERO, 0.0, PLAYER_SPEED),
        BoundingCircle {
            radius: VESSEL_RADIUS,
        },
        Condition::Intact,
        Controller::Player { turn: 0.0 },
    ))
}

/// Spawn a hostile vessel at a random bearing and range from the origin,
/// steering toward a random objective point.
pub fn spawn_hostile(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_contact_id: &mut u32,
) -> hecs::Entity {
    let bearing: f64 = rng.gen_range(-180.0..180.0);
    let range: f64 = rng.gen_range(SPAWN_RANGE_MIN..SPAWN_RANGE_MAX);
    let pos = geometry::heading_vec(bearing) * range;

    let objective_bearing: f64 = rng.gen_range(-180.0..180.0);
    let objective_range: f64 = rng.gen_range(SPAWN_RANGE_MIN..SPAWN_RANGE_MAX);
    let objective = geometry::heading_vec(objective_bearing) * objective_range;

    let heading: f64 = rng.gen_range(-180.0..180.0);

    let id = ContactId(*next_contact_id);
    *next_contact_id += 1;

    world.spawn((
        HostileVessel,
        id,
        Kinematics::new(pos, heading, VESSEL_SPEED),
        BoundingCircle {
            radius: VESSEL_RADIUS,
        },
        Condition::Intact,
        Controller::Ai { objective },
    ))
}

/// Spawn a static obstacle at a random position inside the radar envelope.
pub fn spawn_obstacle(world: &mut World, rng: &mut ChaCha8Rng) -> hecs::Entity {
    let bearing: f64 = rng.gen_range(-180.0..180.0);
    let range: f64 = rng.gen_range(SPAWN_RANGE_MIN..SPAWN_RANGE_MAX);
    let pos = geometry::heading_vec(bearing) * range;
    let radius: f64 = rng.gen_range(OBSTACLE_RADIUS_MIN..OBSTACLE_RADIUS_MAX);

    world.spawn((
        Obstacle,
        Kinematics::new(pos, 0.0, 0.0),
        BoundingCircle { radius },
        Condition::Intact,
    ))
}
