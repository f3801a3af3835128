//! Simulation engine — the core of the crate.
//!
//! `SimulationEngine` owns the hecs world, the radar sensor, and the
//! engagement orchestrator; it processes player commands, runs the
//! systems in fixed order, and produces a `Snapshot` each tick.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use corsair_core::commands::PlayerCommand;
use corsair_core::components::*;
use corsair_core::constants::RADAR_RANGE;
use corsair_core::enums::GamePhase;
use corsair_core::events::{CollisionEvent, GameEvent, ScanReport, Struck};
use corsair_core::state::Snapshot;
use corsair_core::types::{SimTime, Vec2};

use crate::engagement::EngagementOrchestrator;
use crate::radar::{ContactSnapshot, ObstacleSnapshot, RadarSensor};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same mission.
    pub seed: u64,
    /// Hostile vessels spawned by `StartMission`.
    pub hostiles: usize,
    /// Obstacles spawned by `StartMission`.
    pub obstacles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hostiles: 4,
            obstacles: 6,
        }
    }
}

/// The simulation engine. Owns all mutable state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    radar: RadarSensor,
    orchestrator: EngagementOrchestrator,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    next_contact_id: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            config,
            rng,
            radar: RadarSensor::new(),
            orchestrator: EngagementOrchestrator::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            next_contact_id: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the snapshot.
    pub fn tick(&mut self) -> Snapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.phase,
            &self.radar,
            &self.orchestrator,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only access to the sensor (mode, tracks, lock).
    pub fn radar(&self) -> &RadarSensor {
        &self.radar
    }

    /// Read-only access to the orchestrator (loadout, missiles).
    pub fn orchestrator(&self) -> &EngagementOrchestrator {
        &self.orchestrator
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a hostile at an exact position (for tests needing a known
    /// geometry instead of the rng mission layout).
    #[cfg(test)]
    pub(crate) fn spawn_hostile_at(&mut self, pos: Vec2, heading_deg: f64, speed: f64) -> u32 {
        let id = self.next_contact_id;
        self.next_contact_id += 1;
        self.world.spawn((
            HostileVessel,
            ContactId(id),
            Kinematics::new(pos, heading_deg, speed),
            BoundingCircle {
                radius: corsair_core::constants::VESSEL_RADIUS,
            },
            Condition::Intact,
            Controller::Ai { objective: pos },
        ));
        id
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => {
                if self.phase == GamePhase::Standby {
                    self.world = World::new();
                    self.radar = RadarSensor::new();
                    self.radar.set_range(RADAR_RANGE);
                    self.radar.set_position(Vec2::ZERO);
                    self.orchestrator = EngagementOrchestrator::new();
                    self.next_contact_id = 0;
                    world_setup::setup_mission(
                        &mut self.world,
                        &mut self.rng,
                        self.config.hostiles,
                        self.config.obstacles,
                        &mut self.next_contact_id,
                    );
                    self.time = SimTime::default();
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Helm { turn } => {
                let turn = turn.clamp(-1.0, 1.0);
                for (_entity, (_own, controller)) in
                    self.world.query_mut::<(&OwnVessel, &mut Controller)>()
                {
                    if let Controller::Player { turn: t } = controller {
                        *t = turn;
                    }
                }
            }
            PlayerCommand::SetRadarMode { mode } => match self.radar.set_mode(mode) {
                Ok(()) => {
                    self.events.push(GameEvent::ModeChanged { mode });
                    if let Some(id) = self.radar.lock_id() {
                        self.events.push(GameEvent::LockAcquired { id });
                    }
                }
                Err(_) => self.events.push(GameEvent::ModeRejected),
            },
            PlayerCommand::RadarStandby => self.radar.stop(),
            PlayerCommand::RadarResume => self.radar.start(),
            PlayerCommand::Shoot => {
                let Some(own) = self.own_kinematics() else {
                    self.events.push(GameEvent::ShotRejected {
                        reason: corsair_core::enums::ShotRejection::NoTrackContext,
                    });
                    return;
                };
                match self
                    .orchestrator
                    .shoot(own.pos, own.heading_deg, &self.radar)
                {
                    Ok(missile) => {
                        let kind = self
                            .orchestrator
                            .active_missiles()
                            .iter()
                            .find(|m| m.id == missile)
                            .map(|m| m.kind)
                            .unwrap_or_default();
                        self.events.push(GameEvent::MissileAway { missile, kind });
                    }
                    Err(reason) => self.events.push(GameEvent::ShotRejected { reason }),
                }
            }
            PlayerCommand::CycleLoadout => {
                self.orchestrator.cycle_loadout();
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt_ms = self.time.dt_ms();

        // 1. Helm: controllers steer kinematic state.
        systems::helm::run(&mut self.world, dt_ms);
        // 2. Movement integration.
        systems::movement::run(&mut self.world, dt_ms);
        // 3. Radar: anchor to own vessel, build the sensor picture, scan.
        if let Some(own) = self.own_kinematics() {
            self.radar.set_position(own.pos);
            let (contacts, obstacles) = self.build_sensor_picture();
            let report = self
                .radar
                .update(dt_ms, own.heading_deg, &contacts, &obstacles);
            self.collect_scan_events(report);
        }
        // 4. Missile guidance and flight.
        let missile_events = self.orchestrator.update(dt_ms, &self.radar);
        self.events.extend(missile_events);
        // 5. Collision detection and consequences.
        let collisions = systems::collision::run(&self.world, self.orchestrator.active_missiles());
        self.apply_collisions(collisions);
        // 6. Cleanup of destroyed / out-of-bounds entities.
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Current own-vessel kinematics, if a mission is set up.
    fn own_kinematics(&self) -> Option<Kinematics> {
        let mut query = self.world.query::<(&OwnVessel, &Kinematics)>();
        query.iter().next().map(|(_, (_, kin))| *kin)
    }

    /// Snapshot every live hostile and obstacle for the sensor. The
    /// radar's owner is not a candidate.
    fn build_sensor_picture(&self) -> (Vec<ContactSnapshot>, Vec<ObstacleSnapshot>) {
        let mut contacts = Vec::new();
        {
            let mut query = self.world.query::<(
                &HostileVessel,
                &ContactId,
                &Kinematics,
                &BoundingCircle,
                &Condition,
            )>();
            for (_entity, (_, id, kin, circle, condition)) in query.iter() {
                if *condition == Condition::Destroyed {
                    continue;
                }
                contacts.push(ContactSnapshot {
                    id: id.0,
                    pos: kin.pos,
                    heading_deg: kin.heading_deg,
                    speed: kin.speed,
                    radius: circle.radius,
                });
            }
        }
        // Stable ordering keeps scans deterministic across runs.
        contacts.sort_by_key(|c| c.id);

        let mut obstacles = Vec::new();
        let mut query = self
            .world
            .query::<(&Obstacle, &Kinematics, &BoundingCircle)>();
        for (_entity, (_, kin, circle)) in query.iter() {
            obstacles.push(ObstacleSnapshot {
                pos: kin.pos,
                radius: circle.radius,
            });
        }
        obstacles.sort_by(|a, b| a.pos.x.total_cmp(&b.pos.x).then(a.pos.y.total_cmp(&b.pos.y)));

        (contacts, obstacles)
    }

    /// Translate a scan report into snapshot events.
    fn collect_scan_events(&mut self, report: ScanReport) {
        for id in &report.new_tracks {
            self.events.push(GameEvent::ContactAcquired { id: *id });
        }
        for id in &report.lost_tracks {
            self.events.push(GameEvent::ContactLost { id: *id });
        }
        if report.downgraded {
            self.events.push(GameEvent::LockDowngraded);
        }
    }

    /// Apply collision notifications: remove the missile, destroy the
    /// struck vessel, surface the events.
    fn apply_collisions(&mut self, collisions: Vec<CollisionEvent>) {
        for collision in collisions {
            if !self.orchestrator.remove_missile(collision.missile) {
                continue;
            }
            self.events.push(GameEvent::MissileImpact {
                missile: collision.missile,
                struck: collision.struck,
            });

            if let Struck::Vessel { id } = collision.struck {
                for (_entity, (contact_id, condition)) in
                    self.world.query_mut::<(&ContactId, &mut Condition)>()
                {
                    if contact_id.0 == id {
                        *condition = Condition::Destroyed;
                    }
                }
                self.events.push(GameEvent::VesselDestroyed { id });
            }
        }
    }
}
