//! Radar sensor and mode state machine.
//!
//! The sensor sweeps a half-angle cone centered on the owning vessel's
//! heading. Scan refresh time scales with range and cone width, so wide
//! search modes revisit slowly and narrow tracking modes revisit fast.
//! Mode behavior:
//!
//! - RWS: rebuild the whole track list every committed scan, no aging.
//! - TWS: persistent tracks associated by contact id, capped at
//!   `MAX_TWS_TRACKS`, aged and confidence-weighted.
//! - STT: one bound track refreshed every tick straight from the contact;
//!   automatically downgrades to RWS when the lock breaks.
//! - EMCON: silent; existing tracks are frozen, not cleared.

pub mod detection;

use corsair_core::constants::*;
use corsair_core::enums::{CommandRejection, RadarMode};
use corsair_core::events::{RadarFault, ScanReport};
use corsair_core::geometry;
use corsair_core::track::Track;
use corsair_core::types::Vec2;

use detection::Detection;

/// What the host observed about one contact this tick. Built from entity
/// accessors; the sensor never touches world entities directly.
#[derive(Debug, Clone, Copy)]
pub struct ContactSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub heading_deg: f64,
    pub speed: f64,
    /// Bounding-circle radius.
    pub radius: f64,
}

/// An inert body that occludes the beam but is never tracked.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleSnapshot {
    pub pos: Vec2,
    pub radius: f64,
}

/// The radar sensor. Owns all track state.
#[derive(Debug, Clone)]
pub struct RadarSensor {
    mode: RadarMode,
    position: Option<Vec2>,
    range: Option<f64>,
    /// Half-cone azimuth in effect (degrees).
    azimuth_deg: f64,
    scanning: bool,
    /// Accumulated ms since the last committed scan (or STT report).
    scan_accumulator_ms: f64,
    /// Sensor clock, ms since construction.
    clock_ms: f64,
    tracks: Vec<Track>,
    stt: Option<Track>,
}

impl Default for RadarSensor {
    fn default() -> Self {
        Self {
            mode: RadarMode::default(),
            position: None,
            range: None,
            azimuth_deg: RWS_AZIMUTH,
            scanning: true,
            scan_accumulator_ms: 0.0,
            clock_ms: 0.0,
            tracks: Vec::new(),
            stt: None,
        }
    }
}

impl RadarSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.position = Some(pos);
    }

    pub fn set_range(&mut self, range: f64) {
        self.range = Some(range);
    }

    pub fn range(&self) -> Option<f64> {
        self.range
    }

    pub fn mode(&self) -> RadarMode {
        self.mode
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Resume emitting.
    pub fn start(&mut self) {
        self.scanning = true;
    }

    /// Stop emitting entirely. Updates become pure no-ops until `start`.
    pub fn stop(&mut self) {
        self.scanning = false;
    }

    /// The current track set. In STT this is the single bound track.
    pub fn tracks(&self) -> &[Track] {
        match (self.mode, &self.stt) {
            (RadarMode::Stt, Some(t)) => std::slice::from_ref(t),
            (RadarMode::Stt, None) => &[],
            _ => &self.tracks,
        }
    }

    /// The STT-bound track, if locked.
    pub fn lock_track(&self) -> Option<&Track> {
        match self.mode {
            RadarMode::Stt => self.stt.as_ref(),
            _ => None,
        }
    }

    /// Contact ids currently under track; drives RWR-style indicators.
    pub fn tracked_ids(&self) -> Vec<u32> {
        self.tracks().iter().map(|t| t.id).collect()
    }

    /// Contact id held in STT, if any.
    pub fn lock_id(&self) -> Option<u32> {
        self.lock_track().map(|t| t.id)
    }

    /// Command a mode change. Entering STT binds the nearest existing
    /// track and is refused when there is none; every other transition is
    /// unconditional. Each mode applies its own cone width (STT keeps the
    /// previous cone). Leaving STT drops the bound track.
    pub fn set_mode(&mut self, mode: RadarMode) -> Result<(), CommandRejection> {
        if mode == RadarMode::Stt {
            if self.mode == RadarMode::Stt && self.stt.is_some() {
                // Already locked; nothing to rebind.
                return Ok(());
            }
            let nearest = self
                .tracks
                .iter()
                .min_by(|a, b| a.dist.total_cmp(&b.dist))
                .cloned();
            match nearest {
                Some(track) => {
                    self.stt = Some(track);
                    self.tracks.clear();
                }
                None => return Err(CommandRejection::NoTrackToLock),
            }
        } else {
            self.stt = None;
        }

        self.mode = mode;
        if let Some(az) = mode.azimuth() {
            self.azimuth_deg = az;
        }
        self.scan_accumulator_ms = 0.0;
        Ok(())
    }

    /// Advance the sensor by `elapsed_ms` with the sweep centered on
    /// `sweep_deg`. Contact and obstacle snapshots are this tick's ground
    /// truth as supplied by the host (owner excluded).
    pub fn update(
        &mut self,
        elapsed_ms: f64,
        sweep_deg: f64,
        contacts: &[ContactSnapshot],
        obstacles: &[ObstacleSnapshot],
    ) -> ScanReport {
        let mut report = ScanReport {
            lock: self.lock_id(),
            ..ScanReport::default()
        };

        if !self.scanning {
            return report;
        }

        self.clock_ms += elapsed_ms;

        let (origin, range) = match (self.position, self.range) {
            (Some(p), Some(r)) => (p, r),
            (None, _) => {
                report.fault = Some(RadarFault::PositionUnset);
                return report;
            }
            (_, None) => {
                report.fault = Some(RadarFault::RangeUnset);
                return report;
            }
        };

        match self.mode {
            RadarMode::Rws => self.update_search(elapsed_ms, sweep_deg, origin, range, contacts, obstacles, false, &mut report),
            RadarMode::Tws => self.update_search(elapsed_ms, sweep_deg, origin, range, contacts, obstacles, true, &mut report),
            RadarMode::Stt => self.update_stt(elapsed_ms, sweep_deg, origin, range, contacts, &mut report),
            RadarMode::Emcon => {
                // Emissions off: no detection, tracks frozen in place.
            }
        }

        report
    }

    /// Shared RWS/TWS path: accumulate dwell time and commit a scan once
    /// the cone has been covered.
    #[allow(clippy::too_many_arguments)]
    fn update_search(
        &mut self,
        elapsed_ms: f64,
        sweep_deg: f64,
        origin: Vec2,
        range: f64,
        contacts: &[ContactSnapshot],
        obstacles: &[ObstacleSnapshot],
        persistent: bool,
        report: &mut ScanReport,
    ) {
        self.scan_accumulator_ms += elapsed_ms;

        let start_deg = sweep_deg - self.azimuth_deg;
        let end_deg = sweep_deg + self.azimuth_deg;
        let cone_width = end_deg - start_deg;
        let scan_duration_ms = range * RADAR_SCAN_SPEED * cone_width;

        if self.scan_accumulator_ms < scan_duration_ms {
            return;
        }
        self.scan_accumulator_ms = 0.0;

        let survivors = detection::scan(origin, range, start_deg, end_deg, contacts, obstacles);

        let previous_ids: Vec<u32> = self.tracks.iter().map(|t| t.id).collect();
        if persistent {
            self.commit_tws_scan(&survivors);
        } else {
            self.commit_rws_scan(&survivors);
        }

        report.swept = true;
        report.new_tracks = self
            .tracks
            .iter()
            .map(|t| t.id)
            .filter(|id| !previous_ids.contains(id))
            .collect();
        report.lost_tracks = previous_ids
            .into_iter()
            .filter(|id| !self.tracks.iter().any(|t| t.id == *id))
            .collect();
    }

    /// RWS: the entire track list is replaced every scan cycle, sorted by
    /// ascending range. No identity carry-over, no aging.
    fn commit_rws_scan(&mut self, survivors: &[Detection]) {
        self.tracks = survivors
            .iter()
            .map(|d| Track {
                id: d.contact.id,
                pos: d.contact.pos,
                dist: d.dist,
                dir_deg: d.contact.heading_deg,
                speed: d.contact.speed,
                age: 0,
                confidence: 0.0,
                last_update_ms: self.clock_ms,
            })
            .collect();
        self.tracks.sort_by(|a, b| a.dist.total_cmp(&b.dist));
    }

    /// TWS: associate survivors to existing tracks by id, refresh and age
    /// the matches, drop the rest, then fill free slots with the nearest
    /// previously-untracked survivors.
    fn commit_tws_scan(&mut self, survivors: &[Detection]) {
        let mut updated: Vec<Track> = Vec::with_capacity(MAX_TWS_TRACKS);

        for track in &self.tracks {
            if let Some(d) = survivors.iter().find(|d| d.contact.id == track.id) {
                updated.push(Track {
                    id: d.contact.id,
                    pos: d.contact.pos,
                    dist: d.dist,
                    dir_deg: d.contact.heading_deg,
                    speed: d.contact.speed,
                    age: track.age + 1,
                    confidence: (track.confidence + TRACK_CONFIDENCE_GAIN)
                        .min(TRACK_CONFIDENCE_MAX),
                    last_update_ms: self.clock_ms,
                });
            }
        }

        if updated.len() < MAX_TWS_TRACKS {
            let mut unused: Vec<&Detection> = survivors
                .iter()
                .filter(|d| !updated.iter().any(|t| t.id == d.contact.id))
                .collect();
            unused.sort_by(|a, b| a.dist.total_cmp(&b.dist));

            for d in unused {
                if updated.len() >= MAX_TWS_TRACKS {
                    break;
                }
                updated.push(Track {
                    id: d.contact.id,
                    pos: d.contact.pos,
                    dist: d.dist,
                    dir_deg: d.contact.heading_deg,
                    speed: d.contact.speed,
                    age: 0,
                    confidence: TRACK_INITIAL_CONFIDENCE,
                    last_update_ms: self.clock_ms,
                });
            }
        }

        self.tracks = updated;
    }

    /// STT: no re-detection scan. Refresh the bound track's kinematics
    /// from its contact every tick, and downgrade to RWS the moment the
    /// lock condition fails. This is the only automatic mode transition
    /// and runs every tick, not just on command.
    fn update_stt(
        &mut self,
        elapsed_ms: f64,
        sweep_deg: f64,
        origin: Vec2,
        range: f64,
        contacts: &[ContactSnapshot],
        report: &mut ScanReport,
    ) {
        let Some(track) = self.stt.as_mut() else {
            // Lock evaporated out from under us (should not happen via the
            // guarded set_mode path): treat as a broken lock.
            self.downgrade(report);
            return;
        };

        let Some(contact) = contacts.iter().find(|c| c.id == track.id) else {
            // Contact no longer resolvable: destroyed or absent.
            self.downgrade(report);
            return;
        };

        track.pos = contact.pos;
        track.dir_deg = contact.heading_deg;
        track.speed = contact.speed;
        track.dist = origin.distance(contact.pos);
        track.last_update_ms = self.clock_ms;

        let bearing = geometry::angle_between(origin, contact.pos);
        let in_cone = detection::in_cone(
            bearing,
            sweep_deg - self.azimuth_deg,
            sweep_deg + self.azimuth_deg,
        );

        if track.dist > range || !in_cone {
            self.downgrade(report);
            return;
        }

        report.lock = Some(track.id);

        // Periodic track-refresh report.
        self.scan_accumulator_ms += elapsed_ms;
        if self.scan_accumulator_ms >= STT_REPORT_INTERVAL_MS {
            self.scan_accumulator_ms = 0.0;
            report.swept = true;
        }
    }

    /// Break the STT lock and fall back to RWS.
    fn downgrade(&mut self, report: &mut ScanReport) {
        if let Some(track) = self.stt.take() {
            report.lost_tracks.push(track.id);
        }
        self.mode = RadarMode::Rws;
        self.azimuth_deg = RWS_AZIMUTH;
        self.scan_accumulator_ms = 0.0;
        report.lock = None;
        report.downgraded = true;
    }

    #[cfg(test)]
    pub(crate) fn seed_tracks_for_test(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }
}
