//! Radar track data model.
//!
//! A track is the sensor's belief about a contact, never the contact
//! itself. Owned and aged by the radar sensor; read-only everywhere else.

use serde::{Deserialize, Serialize};

use crate::types::Vec2;

/// A single radar track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Contact id this track resolves to.
    pub id: u32,
    /// Last observed position.
    pub pos: Vec2,
    /// Range from the sensor at last observation.
    pub dist: f64,
    /// Observed facing in degrees.
    pub dir_deg: f64,
    /// Observed scalar speed (world units per second).
    pub speed: f64,
    /// Consecutive successful re-associations (0 for a fresh track).
    pub age: u32,
    /// 0..=1, grows with repeated association. Informational only.
    pub confidence: f64,
    /// Sensor clock time of the last refresh (ms).
    pub last_update_ms: f64,
}

impl Track {
    /// Velocity vector implied by the observed direction and speed.
    pub fn velocity(&self) -> Vec2 {
        crate::geometry::heading_vec(self.dir_deg) * self.speed
    }
}
