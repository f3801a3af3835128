//! Snapshot system: builds the complete per-tick view of the simulation.
//!
//! Read-only — never modifies the world, the radar, or the orchestrator.

use hecs::World;

use corsair_core::components::{Kinematics, OwnVessel};
use corsair_core::enums::GamePhase;
use corsair_core::events::GameEvent;
use corsair_core::state::{MissileView, OwnVesselView, RadarView, Snapshot};
use corsair_core::types::SimTime;

use crate::engagement::EngagementOrchestrator;
use crate::radar::RadarSensor;

/// Assemble a snapshot from the current state.
pub fn build(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    radar: &RadarSensor,
    orchestrator: &EngagementOrchestrator,
    events: Vec<GameEvent>,
) -> Snapshot {
    let own = build_own(world);

    Snapshot {
        time: *time,
        phase,
        radar: RadarView {
            mode: radar.mode(),
            scanning: radar.is_scanning(),
            azimuth_deg: radar.azimuth_deg(),
            sweep_deg: own.heading_deg,
            range: radar.range().unwrap_or_default(),
            lock: radar.lock_id(),
        },
        tracks: radar.tracks().to_vec(),
        missiles: build_missiles(orchestrator),
        loadout: orchestrator.loadout().view(),
        own,
        events,
    }
}

/// Own vessel view; defaults when no mission is set up.
fn build_own(world: &World) -> OwnVesselView {
    let mut query = world.query::<(&OwnVessel, &Kinematics)>();
    query
        .iter()
        .next()
        .map(|(_, (_, kin))| OwnVesselView {
            pos: kin.pos,
            heading_deg: kin.heading_deg,
            speed: kin.speed,
        })
        .unwrap_or_default()
}

fn build_missiles(orchestrator: &EngagementOrchestrator) -> Vec<MissileView> {
    orchestrator
        .active_missiles()
        .iter()
        .map(|m| MissileView {
            id: m.id,
            kind: m.kind,
            guidance: m.kind.guidance(),
            warhead: m.kind.warhead(),
            pos: m.pos,
            heading_deg: corsair_core::geometry::angle_between(
                corsair_core::types::Vec2::ZERO,
                m.dir,
            ),
            age_secs: m.age_secs,
            target: m.target_id,
        })
        .collect()
}
