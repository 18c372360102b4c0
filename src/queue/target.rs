//! Commanded servo targets.

use serde::{Deserialize, Serialize};

use crate::config::units::{Degrees, DegreesPerSec};

/// A commanded `(angle, speed)` pair awaiting execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    /// Angle to reach.
    pub angle: Degrees,
    /// Constant angular speed used to get there.
    pub speed: DegreesPerSec,
}

impl Target {
    /// Create a new target.
    #[inline]
    pub const fn new(angle: i32, speed: u32) -> Self {
        Self {
            angle: Degrees(angle),
            speed: DegreesPerSec(speed),
        }
    }

    /// Milliseconds between one-degree steps, `None` for zero speed.
    #[inline]
    pub fn step_interval_ms(&self) -> Option<u32> {
        self.speed.step_interval_ms()
    }

    /// Time needed to travel from `from` to this target, ignoring tick jitter.
    pub fn travel_time_ms(&self, from: Degrees) -> Option<u64> {
        let interval = self.step_interval_ms()? as u64;
        Some(from.distance(self.angle) as u64 * interval)
    }
}
