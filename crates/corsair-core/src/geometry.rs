//! Angular and circle geometry shared by the radar and guidance code.
//!
//! Pure functions, no state. Angles are degrees in (-180, 180],
//! mathematical convention (0° = +x axis, counter-clockwise positive).

use serde::{Deserialize, Serialize};

use crate::types::Vec2;

/// A circle in world space: the bounding shape of vessels and obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The four cardinal points (right, left, top, bottom) on the rim.
    /// These are the probe points used by the radar occlusion test.
    pub fn cardinal_points(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.center.x + self.radius, self.center.y),
            Vec2::new(self.center.x - self.radius, self.center.y),
            Vec2::new(self.center.x, self.center.y + self.radius),
            Vec2::new(self.center.x, self.center.y - self.radius),
        ]
    }
}

/// Map any degree value into (-180, 180].
pub fn normalize_angle(deg: f64) -> f64 {
    let mut normalized = deg % 360.0;
    if normalized > 180.0 {
        normalized -= 360.0;
    } else if normalized <= -180.0 {
        normalized += 360.0;
    }
    normalized
}

/// Signed minimal difference `b - a`, result in (-180, 180].
/// Positive means `b` lies counter-clockwise of `a`.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

/// Bearing from `from` to `to` in degrees, normalized to (-180, 180].
pub fn angle_between(from: Vec2, to: Vec2) -> f64 {
    let d = to - from;
    normalize_angle(d.y.atan2(d.x).to_degrees())
}

/// Unit vector for a heading in degrees.
pub fn heading_vec(deg: f64) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Whether the segment from `a` to `b` intersects the circle.
pub fn segment_intersects_circle(a: Vec2, b: Vec2, circle: &Circle) -> bool {
    distance_sq_to_segment(circle.center, a, b) <= circle.radius * circle.radius
}

/// First intersection of the segment `a -> b` with the circle, if any.
/// Returns the entry point nearest `a`.
pub fn first_intersection(a: Vec2, b: Vec2, circle: &Circle) -> Option<Vec2> {
    let d = b - a;
    let f = a - circle.center;

    let qa = d.dot(d);
    if qa == 0.0 {
        // Degenerate segment: a point, inside or on the circle counts.
        return (f.length() <= circle.radius).then_some(a);
    }
    let qb = 2.0 * f.dot(d);
    let qc = f.dot(f) - circle.radius * circle.radius;

    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-qb - sqrt_d) / (2.0 * qa);
    let t2 = (-qb + sqrt_d) / (2.0 * qa);

    let t = if (0.0..=1.0).contains(&t1) {
        t1
    } else if (0.0..=1.0).contains(&t2) {
        t2
    } else {
        return None;
    };

    Some(a + d * t)
}

/// Squared distance from a point to the segment `a -> b`.
fn distance_sq_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}
