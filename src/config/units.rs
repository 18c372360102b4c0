//! Unit types for physical quantities.
//!
//! Provides type-safe representations of servo angles and angular speeds
//! to prevent unit confusion at compile time.

use serde::{Deserialize, Serialize};

/// Angular position in whole degrees.
///
/// Values are passed through uninterpreted; hobby servos conventionally use
/// `[0, 180]` or `[-90, 90]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub i32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// One degree closer to `target`, or `None` when already there.
    #[inline]
    pub fn step_toward(self, target: Degrees) -> Option<Degrees> {
        match self.0.cmp(&target.0) {
            core::cmp::Ordering::Less => Some(Degrees(self.0 + 1)),
            core::cmp::Ordering::Greater => Some(Degrees(self.0 - 1)),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// Absolute distance to another angle.
    #[inline]
    pub fn distance(self, other: Degrees) -> u32 {
        self.0.abs_diff(other.0)
    }
}

/// Angular speed in whole degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct DegreesPerSec(pub u32);

impl DegreesPerSec {
    /// Create a new DegreesPerSec value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Milliseconds between one-degree steps (`1000 / speed`, truncating).
    ///
    /// Returns `None` for a zero speed. Speeds above 1000 deg/s yield an
    /// interval of 0, i.e. one step per tick.
    #[inline]
    pub fn step_interval_ms(self) -> Option<u32> {
        1000u32.checked_div(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward() {
        assert_eq!(Degrees(0).step_toward(Degrees(10)), Some(Degrees(1)));
        assert_eq!(Degrees(0).step_toward(Degrees(-10)), Some(Degrees(-1)));
        assert_eq!(Degrees(7).step_toward(Degrees(7)), None);
    }

    #[test]
    fn test_step_interval() {
        assert_eq!(DegreesPerSec(1000).step_interval_ms(), Some(1));
        assert_eq!(DegreesPerSec(200).step_interval_ms(), Some(5));
        assert_eq!(DegreesPerSec(3).step_interval_ms(), Some(333));
        assert_eq!(DegreesPerSec(5000).step_interval_ms(), Some(0));
        assert_eq!(DegreesPerSec(0).step_interval_ms(), None);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Degrees(-10).distance(Degrees(10)), 20);
        assert_eq!(Degrees(90).distance(Degrees(90)), 0);
    }
}
