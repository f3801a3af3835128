//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::RadarMode;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Set up the mission world and start ticking.
    StartMission,
    /// Pause the simulation.
    Pause,
    /// Resume from pause.
    Resume,

    // --- Helm ---
    /// Set helm deflection, clamped to [-1, 1].
    Helm { turn: f64 },

    // --- Radar control ---
    /// Command a radar mode change (guarded; may be rejected).
    SetRadarMode { mode: RadarMode },
    /// Stop emitting (scanning gate off). Distinct from EMCON mode:
    /// standby halts the sensor entirely, whatever the mode.
    RadarStandby,
    /// Resume scanning.
    RadarResume,

    // --- Engagement ---
    /// Fire the active weapon along the vessel's current heading.
    Shoot,
    /// Advance the active weapon station to the next in the fixed order.
    CycleLoadout,
}
