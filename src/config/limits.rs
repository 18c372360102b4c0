//! Soft angle limits applied to pushed targets.

use serde::Deserialize;

use super::units::Degrees;

/// What happens to a target outside the soft limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Refuse the target.
    #[default]
    Reject,
    /// Move the target onto the nearest bound.
    Clamp,
}

/// Inclusive angle window for one servo.
///
/// The state machine itself never clamps; these limits are checked once,
/// when a target is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftLimits {
    /// Lowest accepted angle.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Highest accepted angle.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,

    /// Out-of-window handling.
    #[serde(default)]
    pub policy: LimitPolicy,
}

impl SoftLimits {
    /// Build a window; see [`SoftLimits::is_valid`].
    pub const fn new(min: Degrees, max: Degrees, policy: LimitPolicy) -> Self {
        Self { min, max, policy }
    }

    /// A window needs `min < max`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Whether `angle` lies inside the window, bounds included.
    #[inline]
    pub fn contains(&self, angle: Degrees) -> bool {
        (self.min..=self.max).contains(&angle)
    }

    /// Angle to queue for a requested target, or `None` if rejected.
    pub fn apply(&self, requested: Degrees) -> Option<Degrees> {
        match self.policy {
            _ if self.contains(requested) => Some(requested),
            LimitPolicy::Reject => None,
            LimitPolicy::Clamp if requested < self.min => Some(self.min),
            LimitPolicy::Clamp => Some(self.max),
        }
    }
}
