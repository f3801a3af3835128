//! Missile guidance: closed-form intercept solution and bounded steering.
//!
//! The intercept time solves `a·t² + b·t + c = 0` for a constant-speed
//! missile against a linearly-extrapolated target, where
//! `a = |v_t|² − s²`, `b = 2·(rel·v_t)`, `c = |rel|²`. The heading update
//! is a per-tick interpolation toward the desired direction, clamped by
//! the missile's turn authority, never an instantaneous snap.

use corsair_core::track::Track;
use corsair_core::types::Vec2;

/// Coefficient threshold below which the quadratic degenerates.
const EPS: f64 = 1e-3;

/// Time until a missile flying at `missile_speed` can meet a target at
/// relative position `rel_pos` moving with velocity `target_vel`.
///
/// Returns the smallest strictly-positive root, the linear solution when
/// the quadratic degenerates, or `None` when no intercept exists.
pub fn intercept_time(rel_pos: Vec2, target_vel: Vec2, missile_speed: f64) -> Option<f64> {
    let a = target_vel.length_squared() - missile_speed * missile_speed;
    let b = 2.0 * rel_pos.dot(target_vel);
    let c = rel_pos.length_squared();

    if a.abs() < EPS {
        // Target speed matches missile speed: the equation is linear.
        if b.abs() < EPS {
            return None;
        }
        let t = -c / b;
        return (t > 0.0).then_some(t);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b + sqrt_d) / (2.0 * a);
    let t2 = (-b - sqrt_d) / (2.0 * a);

    match (t1 > 0.0, t2 > 0.0) {
        (true, true) => Some(t1.min(t2)),
        (true, false) => Some(t1),
        (false, true) => Some(t2),
        (false, false) => None,
    }
}

/// Predicted target position after `t` seconds of straight-line flight.
pub fn lead_point(target_pos: Vec2, target_vel: Vec2, t: f64) -> Vec2 {
    target_pos + target_vel * t
}

/// Unit heading from the missile toward the intercept point for `track`,
/// or `None` when no intercept solution exists this tick.
pub fn intercept_heading(missile_pos: Vec2, missile_speed: f64, track: &Track) -> Option<Vec2> {
    let target_vel = track.velocity();
    let rel_pos = track.pos - missile_pos;
    let t = intercept_time(rel_pos, target_vel, missile_speed)?;
    let aim = lead_point(track.pos, target_vel, t);
    (aim - missile_pos).try_normalize()
}

/// Interpolate the current unit heading toward `desired` with bounded
/// per-tick turn authority, then renormalize. The factor is clamped to 1
/// so the heading never overshoots the desired direction.
pub fn steer(current: Vec2, desired: Vec2, turn_rate: f64, dt_ms: f64) -> Vec2 {
    let factor = (turn_rate * dt_ms / 1000.0).min(1.0);
    let blended = current + (desired - current) * factor;
    blended.try_normalize().unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corsair_core::geometry;

    fn track_at(x: f64, y: f64, dir_deg: f64, speed: f64) -> Track {
        Track {
            id: 1,
            pos: Vec2::new(x, y),
            dist: Vec2::new(x, y).length(),
            dir_deg,
            speed,
            age: 0,
            confidence: 1.0,
            last_update_ms: 0.0,
        }
    }

    #[test]
    fn test_stationary_target_time_is_range_over_speed() {
        let t = intercept_time(Vec2::new(100.0, 0.0), Vec2::ZERO, 33.0).unwrap();
        assert!((t - 100.0 / 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_stationary_target_heading_points_at_target() {
        let track = track_at(100.0, 100.0, 0.0, 0.0);
        let heading = intercept_heading(Vec2::ZERO, 33.0, &track).unwrap();
        let expected = Vec2::new(100.0, 100.0).normalize();
        assert!((heading - expected).length() < 1e-9);
    }

    #[test]
    fn test_crossing_target_leads_ahead() {
        // Target north of the missile, crossing east at 10 u/s.
        let track = track_at(0.0, 100.0, 0.0, 10.0);
        let heading = intercept_heading(Vec2::ZERO, 33.0, &track).unwrap();
        // The aim point must lie east of the target's current bearing.
        let bearing_to_target = geometry::angle_between(Vec2::ZERO, track.pos);
        let aim_bearing = geometry::angle_between(Vec2::ZERO, heading);
        assert!(
            geometry::angle_difference(aim_bearing, bearing_to_target) > 0.0,
            "aim {aim_bearing}° should lead east of target bearing {bearing_to_target}°"
        );
    }

    #[test]
    fn test_linear_branch_head_on_equal_speeds() {
        // Target dead ahead, closing head-on at exactly missile speed:
        // |a| ~ 0, linear solution t = -c / b.
        let speed = 33.0;
        let t = intercept_time(Vec2::new(100.0, 0.0), Vec2::new(-speed, 0.0), speed).unwrap();
        // Closure at 2 * speed over 100 units.
        assert!((t - 100.0 / (2.0 * speed)).abs() < 1e-9);
    }

    #[test]
    fn test_linear_branch_receding_equal_speeds_unsolvable() {
        let speed = 33.0;
        assert!(intercept_time(Vec2::new(100.0, 0.0), Vec2::new(speed, 0.0), speed).is_none());
    }

    #[test]
    fn test_faster_fleeing_target_unsolvable() {
        // Target running directly away faster than the missile.
        assert!(intercept_time(Vec2::new(100.0, 0.0), Vec2::new(50.0, 0.0), 33.0).is_none());
    }

    #[test]
    fn test_steer_respects_turn_authority() {
        let current = Vec2::new(1.0, 0.0);
        let desired = Vec2::new(0.0, 1.0);
        let turn_rate = 0.7;
        let dt_ms = 100.0;

        let next = steer(current, desired, turn_rate, dt_ms);
        assert!((next.length() - 1.0).abs() < 1e-12, "steer output stays unit");

        // The turned angle must not exceed the angle of the clamped
        // interpolation itself.
        let factor = turn_rate * dt_ms / 1000.0;
        let max_turned = {
            let blended = current + (desired - current) * factor;
            blended.normalize().angle_to(current).abs()
        };
        let turned = next.angle_to(current).abs();
        assert!(
            turned <= max_turned + 1e-9,
            "turned {turned} rad exceeds authority {max_turned} rad"
        );
        assert!(turned > 0.0, "some turning must happen");
    }

    #[test]
    fn test_steer_factor_clamps_at_one() {
        let current = Vec2::new(1.0, 0.0);
        let desired = Vec2::new(0.0, 1.0);
        // Huge dt: factor would be 7, clamps to 1. Heading snaps exactly
        // to desired, never past it.
        let next = steer(current, desired, 0.7, 10_000.0);
        assert!((next - desired).length() < 1e-12);
    }

    #[test]
    fn test_steer_opposed_headings_degenerate() {
        // Exactly opposed unit vectors with factor 0.5 blend to zero;
        // the current heading is kept rather than dividing by zero.
        let current = Vec2::new(1.0, 0.0);
        let desired = Vec2::new(-1.0, 0.0);
        let next = steer(current, desired, 1.0, 500.0);
        assert_eq!(next, current);
    }

    #[test]
    fn test_missile_converges_on_crossing_target() {
        // Integrate a missile against a crossing target and require the
        // miss distance to shrink below the hit radius.
        let missile_speed = 33.0;
        let turn_rate = 0.7;
        let dt_ms = 1000.0 / 30.0;

        let mut missile_pos = Vec2::ZERO;
        let mut dir = Vec2::new(1.0, 0.0);
        let mut target_pos = Vec2::new(200.0, 60.0);
        let target_vel = Vec2::new(0.0, -2.0);

        let mut min_range = f64::MAX;
        for _ in 0..600 {
            let track = Track {
                id: 1,
                pos: target_pos,
                dist: target_pos.distance(missile_pos),
                dir_deg: -90.0,
                speed: 2.0,
                age: 0,
                confidence: 1.0,
                last_update_ms: 0.0,
            };
            if let Some(desired) = intercept_heading(missile_pos, missile_speed, &track) {
                dir = steer(dir, desired, turn_rate, dt_ms);
            }
            let dt_s = dt_ms / 1000.0;
            missile_pos += dir * missile_speed * dt_s;
            target_pos += target_vel * dt_s;

            min_range = min_range.min(missile_pos.distance(target_pos));
            if min_range < 5.0 {
                break;
            }
        }
        assert!(
            min_range < 5.0,
            "guidance should converge on a slow crosser, min range {min_range:.1}"
        );
    }
}
