//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic; systems in the
//! sim crate operate on them.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Circle};
use crate::types::Vec2;

/// Kinematic state shared by every mobile entity. Controllers and systems
/// all mutate this one struct; there is no vessel class hierarchy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Kinematics {
    pub pos: Vec2,
    /// Facing in degrees, (-180, 180].
    pub heading_deg: f64,
    /// Scalar speed in world units per second.
    pub speed: f64,
}

impl Kinematics {
    pub fn new(pos: Vec2, heading_deg: f64, speed: f64) -> Self {
        Self {
            pos,
            heading_deg: geometry::normalize_angle(heading_deg),
            speed,
        }
    }

    /// Velocity vector implied by heading and speed.
    pub fn velocity(&self) -> Vec2 {
        geometry::heading_vec(self.heading_deg) * self.speed
    }
}

/// Collision/occlusion footprint. Center is the entity's `Kinematics.pos`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingCircle {
    pub radius: f64,
}

impl BoundingCircle {
    pub fn circle_at(&self, pos: Vec2) -> Circle {
        Circle::new(pos, self.radius)
    }
}

/// Stable contact identity, unique per simulation epoch. Copied verbatim
/// into radar tracks (perfect identity resolution by design).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub u32);

/// Hull condition; `Destroyed` entities are despawned by cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    Intact,
    Destroyed,
}

/// Steering authority over an entity's `Kinematics`. Both variants drive
/// the same struct; there is no player/AI subclassing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Controller {
    /// Helm deflection in [-1, 1] set by player commands.
    Player { turn: f64 },
    /// Steers toward a fixed objective point, then holds course.
    Ai { objective: Vec2 },
}

/// Marks the player's own vessel (radar and launcher owner).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnVessel;

/// Marks a hostile maneuvering vessel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HostileVessel;

/// Marks an inert obstacle (asteroid, derelict). Obstacles occlude the
/// radar and stop missiles but are never tracked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;
