//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// 3D position in simulation space (meters, Cartesian).
/// x = East, y = North, z = Up. The arena floor is z = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each unpaused tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Handle to a delayed action registered with the tick scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the arena floor.
    pub fn ground(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Range to another position in meters (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance(other.as_dvec3())
    }

    /// Yaw toward another position in radians (0 = North, clockwise).
    pub fn yaw_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
    }

    /// Move up to `max_step` meters toward `target`, never overshooting.
    pub fn step_toward(&self, target: &Position, max_step: f64) -> Position {
        let from = self.as_dvec3();
        let delta = target.as_dvec3() - from;
        let len = delta.length();
        if len <= max_step || len == 0.0 {
            return *target;
        }
        Position::from(from + delta / len * max_step)
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * self.dt();
    }
}

/// Convert a duration in seconds to a whole number of ticks (rounded, at least 0).
pub fn secs_to_ticks(secs: f64) -> u64 {
    (secs.max(0.0) * TICK_RATE as f64).round() as u64
}

/// Convert a tick count back to seconds.
pub fn ticks_to_secs(ticks: u64) -> f64 {
    ticks as f64 / TICK_RATE as f64
}
