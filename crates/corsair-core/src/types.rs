//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

/// 2D position or direction in simulation space (world units, Cartesian).
/// Angles throughout the workspace are degrees, 0° = +x, counter-clockwise.
pub type Vec2 = glam::DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Milliseconds per tick at the fixed tick rate.
    pub fn dt_ms(&self) -> f64 {
        1000.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms += self.dt_ms();
    }
}
