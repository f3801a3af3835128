//! Scan-area filtering and line-of-sight occlusion.
//!
//! Pure functions over contact/obstacle snapshots. The occlusion model is
//! deliberately coarse: four cardinal probe segments per target, and a
//! target is dropped only when every probe is blocked by some other body.

use corsair_core::geometry::{self, Circle};
use corsair_core::types::Vec2;

use super::{ContactSnapshot, ObstacleSnapshot};

/// A contact that survived range, cone, and occlusion filtering.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub contact: ContactSnapshot,
    /// Range from the sensor.
    pub dist: f64,
}

/// Whether `angle_deg` lies inside the cone [start, end], handling the
/// wraparound case where the normalized start exceeds the end.
pub fn in_cone(angle_deg: f64, start_deg: f64, end_deg: f64) -> bool {
    let angle = geometry::normalize_angle(angle_deg);
    let start = geometry::normalize_angle(start_deg);
    let end = geometry::normalize_angle(end_deg);

    if start > end {
        // Cone straddles the ±180 seam.
        angle >= start || angle <= end
    } else {
        angle >= start && angle <= end
    }
}

/// Whether `point` is inside the scan envelope: within `range` of the
/// sensor and inside the angular cone.
pub fn in_scan_area(origin: Vec2, range: f64, start_deg: f64, end_deg: f64, point: Vec2) -> bool {
    origin.distance(point) <= range && in_cone(geometry::angle_between(origin, point), start_deg, end_deg)
}

/// Run a full detection pass: filter contacts and obstacles to the scan
/// envelope, then drop contacts whose four cardinal probes are all
/// obstructed by some other in-envelope body.
pub fn scan(
    origin: Vec2,
    range: f64,
    start_deg: f64,
    end_deg: f64,
    contacts: &[ContactSnapshot],
    obstacles: &[ObstacleSnapshot],
) -> Vec<Detection> {
    let in_area: Vec<&ContactSnapshot> = contacts
        .iter()
        .filter(|c| in_scan_area(origin, range, start_deg, end_deg, c.pos))
        .collect();

    let mut all_circles: Vec<Circle> = in_area
        .iter()
        .map(|c| Circle::new(c.pos, c.radius))
        .collect();
    all_circles.extend(
        obstacles
            .iter()
            .filter(|o| in_scan_area(origin, range, start_deg, end_deg, o.pos))
            .map(|o| Circle::new(o.pos, o.radius)),
    );

    in_area
        .iter()
        .enumerate()
        .filter(|(idx, c)| !is_occluded(origin, Circle::new(c.pos, c.radius), &all_circles, *idx))
        .map(|(_, c)| Detection {
            contact: **c,
            dist: origin.distance(c.pos),
        })
        .collect()
}

/// A target is occluded only if all four cardinal probe segments from the
/// sensor to its rim are blocked. `own_idx` identifies the target's own
/// circle so it never blocks itself.
fn is_occluded(origin: Vec2, target: Circle, circles: &[Circle], own_idx: usize) -> bool {
    target.cardinal_points().iter().all(|probe| {
        circles
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != own_idx)
            .any(|(_, other)| geometry::segment_intersects_circle(origin, *probe, other))
    })
}
