//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Radar operating mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarMode {
    /// Range-while-search: wide cone, track list rebuilt every scan.
    #[default]
    Rws,
    /// Track-while-scan: narrower cone, persistent aging tracks.
    Tws,
    /// Single-target-track: locked onto one track, refreshed every tick.
    Stt,
    /// Emissions off, no scanning at all.
    Emcon,
}

impl RadarMode {
    /// Half-cone azimuth commanded when entering this mode (degrees).
    /// STT keeps whatever cone the previous search mode used.
    pub fn azimuth(&self) -> Option<f64> {
        match self {
            RadarMode::Rws => Some(RWS_AZIMUTH),
            RadarMode::Tws => Some(TWS_AZIMUTH),
            RadarMode::Stt => None,
            RadarMode::Emcon => Some(EMCON_AZIMUTH),
        }
    }
}

/// Weapon station identity — the closed set of loadout keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// AIM-177: semi-active homing, high-explosive warhead.
    #[default]
    Aim177,
    /// AIM-220: active homing, fragmentation warhead.
    Aim220,
}

impl WeaponKind {
    /// Fixed cycling order for the loadout selector.
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Aim177, WeaponKind::Aim220];

    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::Aim177 => "AIM-177",
            WeaponKind::Aim220 => "AIM-220",
        }
    }

    pub fn guidance(&self) -> GuidanceKind {
        match self {
            WeaponKind::Aim177 => GuidanceKind::SemiActive,
            WeaponKind::Aim220 => GuidanceKind::Active,
        }
    }

    pub fn warhead(&self) -> Warhead {
        match self {
            WeaponKind::Aim177 => Warhead::HighExplosive,
            WeaponKind::Aim220 => Warhead::Fragmentation,
        }
    }

    /// Top speed in world units per second.
    pub fn speed(&self) -> f64 {
        match self {
            WeaponKind::Aim177 => AIM177_SPEED,
            WeaponKind::Aim220 => AIM220_SPEED,
        }
    }

    /// Turn authority (interpolation rate per second).
    pub fn turn_rate(&self) -> f64 {
        match self {
            WeaponKind::Aim177 => AIM177_TURN_RATE,
            WeaponKind::Aim220 => AIM220_TURN_RATE,
        }
    }

    /// Seconds of motor burn before the round is expended.
    pub fn burn_time_secs(&self) -> u32 {
        match self {
            WeaponKind::Aim177 => AIM177_BURN_TIME_SECS,
            WeaponKind::Aim220 => AIM220_BURN_TIME_SECS,
        }
    }
}

/// Seeker guidance flavor. Labeling only: both kinds fly the same
/// intercept law against radar track data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidanceKind {
    SemiActive,
    Active,
}

/// Warhead tag carried by a missile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warhead {
    HighExplosive,
    Fragmentation,
}

/// Top-level engine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Standby,
    Active,
    Paused,
}

/// Why a commanded radar mode change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandRejection {
    /// Single-target-track requires at least one existing track to bind.
    NoTrackToLock,
}

/// Why a shot was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotRejection {
    /// Current radar mode provides no target resolution (RWS/EMCON, or
    /// a tracking mode with an empty track list).
    NoTrackContext,
    /// The active weapon station has no rounds left.
    StationEmpty,
    /// Target sits exactly on the spawn point even after nudging.
    TargetCoincident,
}
