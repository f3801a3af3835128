//! Headless engagement simulation for CORSAIR.
//!
//! Owns the radar sensor, missile guidance, engagement orchestration,
//! and the hecs world of vessels and obstacles. Runs at a fixed tick
//! rate and produces serde-serializable snapshots for any host.

pub mod engagement;
pub mod engine;
pub mod guidance;
pub mod radar;
pub mod systems;
pub mod world_setup;

pub use corsair_core as core;
pub use engine::SimulationEngine;
