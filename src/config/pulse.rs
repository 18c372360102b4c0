//! Pulse-width mapping for hobby servos.

use serde::Deserialize;

use super::units::Degrees;

/// Pulse width at the minimum angle, matching the Arduino `Servo` default.
pub const DEFAULT_MIN_PULSE_US: u16 = 544;
/// Pulse width at the maximum angle, matching the Arduino `Servo` default.
pub const DEFAULT_MAX_PULSE_US: u16 = 2400;
/// 50 Hz frame.
pub const DEFAULT_PERIOD_US: u16 = 20_000;

/// Linear angle → pulse-width mapping of a servo.
///
/// Angles outside `[min_angle, max_angle]` are clamped here, at the driver,
/// never in the queue or state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PulseRange {
    /// Pulse width at `min_angle` (microseconds).
    #[serde(default = "default_min_pulse")]
    pub min_pulse_us: u16,

    /// Pulse width at `max_angle` (microseconds).
    #[serde(default = "default_max_pulse")]
    pub max_pulse_us: u16,

    /// PWM frame period (microseconds).
    #[serde(default = "default_period")]
    pub period_us: u16,

    /// Angle producing the shortest pulse.
    #[serde(default, rename = "min_angle_deg")]
    pub min_angle: Degrees,

    /// Angle producing the longest pulse.
    #[serde(default = "default_max_angle", rename = "max_angle_deg")]
    pub max_angle: Degrees,
}

fn default_min_pulse() -> u16 {
    DEFAULT_MIN_PULSE_US
}

fn default_max_pulse() -> u16 {
    DEFAULT_MAX_PULSE_US
}

fn default_period() -> u16 {
    DEFAULT_PERIOD_US
}

fn default_max_angle() -> Degrees {
    Degrees(180)
}

impl Default for PulseRange {
    fn default() -> Self {
        Self {
            min_pulse_us: DEFAULT_MIN_PULSE_US,
            max_pulse_us: DEFAULT_MAX_PULSE_US,
            period_us: DEFAULT_PERIOD_US,
            min_angle: Degrees(0),
            max_angle: default_max_angle(),
        }
    }
}

impl PulseRange {
    /// Pulse width in microseconds for an angle.
    pub fn pulse_us(&self, angle: Degrees) -> u16 {
        let span_deg = self.max_angle.0 as i64 - self.min_angle.0 as i64;
        if span_deg <= 0 {
            return self.min_pulse_us;
        }
        let angle = angle.clamp(self.min_angle, self.max_angle);

        let span_us = self.max_pulse_us as i64 - self.min_pulse_us as i64;
        let offset = angle.0 as i64 - self.min_angle.0 as i64;
        (self.min_pulse_us as i64 + offset * span_us / span_deg) as u16
    }

    /// Duty cycle for an angle given the PWM channel's maximum duty.
    pub fn duty(&self, angle: Degrees, max_duty: u16) -> u16 {
        if self.period_us == 0 {
            return 0;
        }
        let duty = self.pulse_us(angle) as u32 * max_duty as u32 / self.period_us as u32;
        duty.min(max_duty as u32) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let range = PulseRange::default();

        assert_eq!(range.pulse_us(Degrees(0)), 544);
        assert_eq!(range.pulse_us(Degrees(180)), 2400);
        // 544 + 90 * 1856 / 180 = 1472
        assert_eq!(range.pulse_us(Degrees(90)), 1472);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let range = PulseRange::default();

        assert_eq!(range.pulse_us(Degrees(-45)), 544);
        assert_eq!(range.pulse_us(Degrees(400)), 2400);
    }

    #[test]
    fn test_symmetric_range() {
        let range = PulseRange {
            min_pulse_us: 1000,
            max_pulse_us: 2000,
            period_us: DEFAULT_PERIOD_US,
            min_angle: Degrees(-90),
            max_angle: Degrees(90),
        };

        assert_eq!(range.pulse_us(Degrees(0)), 1500);
        assert_eq!(range.pulse_us(Degrees(-90)), 1000);
    }

    #[test]
    fn test_duty_scaling() {
        let range = PulseRange::default();

        // 2400us of a 20000us frame at 16-bit resolution
        assert_eq!(range.duty(Degrees(180), u16::MAX), (2400u32 * 65535 / 20000) as u16);
        assert_eq!(range.duty(Degrees(0), 20000), 544);
    }
}
