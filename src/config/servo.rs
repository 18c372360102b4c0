//! Servo configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::SoftLimits;
use super::pulse::PulseRange;
use super::units::Degrees;

/// Complete servo configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ServoConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Output pin or PWM channel number the board binds the servo to.
    pub pin: u8,

    /// Angle written to the actuator during setup.
    #[serde(default, rename = "initial_angle_deg")]
    pub initial_angle: Degrees,

    /// Angle to pulse-width mapping.
    #[serde(default)]
    pub pulse: PulseRange,

    /// Optional soft limits applied to incoming targets.
    #[serde(default)]
    pub limits: Option<SoftLimits>,
}

impl ServoConfig {
    /// Create a configuration with default pulse mapping and no limits.
    pub fn new(name: &str, pin: u8) -> Self {
        Self {
            name: super::truncate(name),
            pin,
            initial_angle: Degrees(0),
            pulse: PulseRange::default(),
            limits: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = ServoConfig::new("joint0", 3);

        assert_eq!(config.name.as_str(), "joint0");
        assert_eq!(config.pin, 3);
        assert_eq!(config.initial_angle, Degrees(0));
        assert_eq!(config.pulse, PulseRange::default());
        assert!(config.limits.is_none());
    }
}
