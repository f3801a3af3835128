//! Simulation snapshot — the complete visible state returned each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::track::Track;
use crate::types::{SimTime, Vec2};

/// Complete state handed to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub own: OwnVesselView,
    pub radar: RadarView,
    pub tracks: Vec<Track>,
    pub missiles: Vec<MissileView>,
    pub loadout: LoadoutView,
    pub events: Vec<GameEvent>,
}

/// Own vessel position and helm state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnVesselView {
    pub pos: Vec2,
    pub heading_deg: f64,
    pub speed: f64,
}

/// Radar status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarView {
    pub mode: RadarMode,
    pub scanning: bool,
    /// Half-cone azimuth currently in effect (degrees).
    pub azimuth_deg: f64,
    /// Sweep center this tick (degrees): the vessel heading.
    pub sweep_deg: f64,
    pub range: f64,
    /// Contact id held in STT, if locked.
    pub lock: Option<u32>,
}

/// An in-flight missile for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub id: u32,
    pub kind: WeaponKind,
    pub guidance: GuidanceKind,
    pub warhead: Warhead,
    pub pos: Vec2,
    /// Current heading in degrees.
    pub heading_deg: f64,
    pub age_secs: u32,
    /// Contact id the missile was assigned at launch, if fired in TWS.
    pub target: Option<u32>,
}

/// One weapon station for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationView {
    pub kind: WeaponKind,
    pub rounds: u32,
    pub active: bool,
}

/// The full loadout in fixed station order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadoutView {
    pub stations: Vec<StationView>,
}
