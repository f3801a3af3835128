//! Simulation constants and tuning parameters.
//!
//! World units are arcade-scale: the radar reaches 400 units and a missile
//! covers ~33 units per second.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- World bounds ---

/// Playfield radius in world units; entities beyond it are despawned.
pub const WORLD_RADIUS: f64 = 2000.0;

// --- Radar ---

/// Detection range in world units.
pub const RADAR_RANGE: f64 = 400.0;

/// Scan dwell factor: milliseconds of scan time per world-unit of range
/// per degree of cone width. Wider cone and longer range refresh slower.
pub const RADAR_SCAN_SPEED: f64 = 0.04;

/// Half-cone azimuth in range-while-search mode (degrees).
pub const RWS_AZIMUTH: f64 = 45.0;

/// Half-cone azimuth in track-while-scan mode (degrees).
pub const TWS_AZIMUTH: f64 = 20.0;

/// Half-cone azimuth with emissions off.
pub const EMCON_AZIMUTH: f64 = 0.0;

/// Interval between single-target-track status refresh reports (ms).
pub const STT_REPORT_INTERVAL_MS: f64 = 1000.0;

// --- Tracking ---

/// Maximum simultaneous tracks held in track-while-scan mode.
pub const MAX_TWS_TRACKS: usize = 3;

/// Confidence assigned to a freshly initiated TWS track.
pub const TRACK_INITIAL_CONFIDENCE: f64 = 0.5;

/// Confidence gained per successful re-association.
pub const TRACK_CONFIDENCE_GAIN: f64 = 0.1;

/// Confidence ceiling.
pub const TRACK_CONFIDENCE_MAX: f64 = 1.0;

// --- Missiles ---

/// Guidance-enable delay: missiles fly straight until this age (seconds).
pub const MISSILE_FLYOUT_AGE_SECS: u32 = 2;

/// Missile age accounting interval (ms); age ticks up once per interval.
pub const MISSILE_AGE_INTERVAL_MS: f64 = 1000.0;

/// Launch stand-off distance along the launch angle (world units),
/// keeping the missile clear of the launching vessel's bounding circle.
pub const LAUNCH_STANDOFF: f64 = 100.0;

/// Nudge applied when the spawn point lands exactly on the target.
pub const LAUNCH_NUDGE: f64 = 1.0;

/// Consecutive unsolvable guidance attempts before a missile self-destructs.
pub const NO_SOLUTION_LIMIT: u32 = 2;

/// Collision radius of a missile body (world units).
pub const MISSILE_BODY_RADIUS: f64 = 4.0;

// --- AIM-177 (semi-active homing) ---

pub const AIM177_SPEED: f64 = 33.0;
pub const AIM177_TURN_RATE: f64 = 0.7;
pub const AIM177_BURN_TIME_SECS: u32 = 14;
pub const AIM177_DEFAULT_ROUNDS: u32 = 4;

// --- AIM-220 (active homing) ---

pub const AIM220_SPEED: f64 = 38.0;
pub const AIM220_TURN_RATE: f64 = 0.8;
pub const AIM220_BURN_TIME_SECS: u32 = 14;
pub const AIM220_DEFAULT_ROUNDS: u32 = 2;

// --- Vessels ---

/// Hostile vessel cruise speed (world units per second).
pub const VESSEL_SPEED: f64 = 2.0;

/// Player vessel cruise speed.
pub const PLAYER_SPEED: f64 = 2.0;

/// Player helm turn rate (degrees per second at full deflection).
pub const PLAYER_TURN_RATE: f64 = 16.0;

/// Hostile helm turn rate (degrees per second).
pub const AI_TURN_RATE: f64 = 8.0;

/// Distance at which an AI vessel considers its objective reached.
pub const AI_OBJECTIVE_RADIUS: f64 = 10.0;

/// Default vessel bounding-circle radius.
pub const VESSEL_RADIUS: f64 = 8.0;

/// Obstacle bounding-circle radius bounds for mission generation.
pub const OBSTACLE_RADIUS_MIN: f64 = 10.0;
pub const OBSTACLE_RADIUS_MAX: f64 = 30.0;

// --- Mission generation ---

/// Hostiles spawn between these ranges from the player (world units).
pub const SPAWN_RANGE_MIN: f64 = 150.0;
pub const SPAWN_RANGE_MAX: f64 = 380.0;
