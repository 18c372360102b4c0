//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{ServoConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Pulse ranges are non-empty and fit inside the PWM period
/// - Angle ranges are non-empty
/// - Soft limits are valid (min < max)
/// - The initial angle lies inside the soft limits
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, servo) in config.servos.iter() {
        validate_servo(servo)?;
    }

    Ok(())
}

fn validate_servo(config: &ServoConfig) -> Result<()> {
    let pulse = &config.pulse;

    if pulse.min_pulse_us >= pulse.max_pulse_us {
        return Err(Error::Config(ConfigError::InvalidPulseRange {
            min_us: pulse.min_pulse_us,
            max_us: pulse.max_pulse_us,
        }));
    }

    if pulse.period_us <= pulse.max_pulse_us {
        return Err(Error::Config(ConfigError::InvalidPeriod {
            period_us: pulse.period_us,
            max_pulse_us: pulse.max_pulse_us,
        }));
    }

    if pulse.min_angle >= pulse.max_angle {
        return Err(Error::Config(ConfigError::InvalidAngleRange {
            min: pulse.min_angle.0,
            max: pulse.max_angle.0,
        }));
    }

    if let Some(ref limits) = config.limits {
        if !limits.is_valid() {
            return Err(Error::Config(ConfigError::InvalidSoftLimits {
                min: limits.min.0,
                max: limits.max.0,
            }));
        }

        // The initial write bypasses ingress, so the policy cannot clamp it
        if !limits.contains(config.initial_angle) {
            return Err(Error::Config(ConfigError::InitialAngleOutOfLimits {
                angle: config.initial_angle.0,
                min: limits.min.0,
                max: limits.max.0,
            }));
        }
    }

    Ok(())
}
