//! Typed events returned by the simulation each tick.
//!
//! There is no event emitter: systems return event values directly and
//! the engine ships them in the snapshot, so listener lifecycles cannot
//! leak.

use serde::{Deserialize, Serialize};

use crate::enums::{RadarMode, ShotRejection, WeaponKind};

/// Result of one radar update, returned directly to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Whether a scan was committed this update.
    pub swept: bool,
    /// Contact ids acquired as tracks this update.
    pub new_tracks: Vec<u32>,
    /// Contact ids whose tracks were dropped this update.
    pub lost_tracks: Vec<u32>,
    /// Contact id currently held in single-target-track, if any.
    pub lock: Option<u32>,
    /// Whether the automatic STT -> RWS downgrade fired this update.
    pub downgraded: bool,
    /// Configuration fault that made the scan a no-op, if any.
    pub fault: Option<RadarFault>,
}

/// Sensor configuration faults. Reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarFault {
    PositionUnset,
    RangeUnset,
}

/// What a missile struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Struck {
    Vessel { id: u32 },
    Obstacle,
}

/// A discrete collision notification from the physics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub missile: u32,
    pub struck: Struck,
}

/// Events surfaced to the host in each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// New radar track established.
    ContactAcquired { id: u32 },
    /// Radar track dropped.
    ContactLost { id: u32 },
    /// Single-target-track lock established.
    LockAcquired { id: u32 },
    /// STT automatically downgraded back to search.
    LockDowngraded,
    /// Radar mode changed by command.
    ModeChanged { mode: RadarMode },
    /// A commanded mode change was refused.
    ModeRejected,
    /// Missile launched.
    MissileAway { missile: u32, kind: WeaponKind },
    /// A shot was refused.
    ShotRejected { reason: ShotRejection },
    /// Missile removed on motor burnout.
    MissileBurnout { missile: u32 },
    /// Missile self-destructed after repeated unsolvable intercepts.
    MissileNoSolution { missile: u32 },
    /// Missile struck something.
    MissileImpact { missile: u32, struck: Struck },
    /// A hostile vessel was destroyed.
    VesselDestroyed { id: u32 },
}
