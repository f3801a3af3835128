//! Helm system — controllers steer kinematic state.
//!
//! Both controller variants drive the same `Kinematics` struct: the
//! player variant applies commanded helm deflection, the AI variant
//! steers toward its objective point with bounded turn rate.

use hecs::World;

use corsair_core::components::{Controller, Kinematics};
use corsair_core::constants::{AI_OBJECTIVE_RADIUS, AI_TURN_RATE, PLAYER_TURN_RATE};
use corsair_core::geometry;

/// Apply controller steering for one tick.
pub fn run(world: &mut World, dt_ms: f64) {
    let dt_s = dt_ms / 1000.0;

    for (_entity, (kin, controller)) in world.query_mut::<(&mut Kinematics, &Controller)>() {
        match controller {
            Controller::Player { turn } => {
                kin.heading_deg = geometry::normalize_angle(
                    kin.heading_deg + turn * PLAYER_TURN_RATE * dt_s,
                );
            }
            Controller::Ai { objective } => {
                if kin.pos.distance(*objective) <= AI_OBJECTIVE_RADIUS {
                    // Objective reached: hold course.
                    continue;
                }
                let bearing = geometry::angle_between(kin.pos, *objective);
                let diff = geometry::angle_difference(kin.heading_deg, bearing);
                let max_turn = AI_TURN_RATE * dt_s;
                kin.heading_deg = geometry::normalize_angle(
                    kin.heading_deg + diff.clamp(-max_turn, max_turn),
                );
            }
        }
    }
}
