//! Physical actuation seam.
//!
//! The state machine only needs to attach an actuator once and write angles
//! to it. [`PwmServo`] implements this for any embedded-hal 1.0
//! [`SetDutyCycle`] channel driving a hobby servo.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::Degrees;
use crate::config::PulseRange;

/// Something that can be driven to an angle.
pub trait Actuator {
    /// Driver error type.
    type Error: core::fmt::Debug;

    /// One-time hardware attach, called by servo setup.
    fn attach(&mut self) -> Result<(), Self::Error>;

    /// Command the actuator to an angle.
    fn write(&mut self, angle: Degrees) -> Result<(), Self::Error>;
}

/// Errors from [`PwmServo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmServoError<E> {
    /// Write attempted before `attach`.
    Detached,
    /// Underlying PWM channel error.
    Pwm(E),
}

/// Hobby servo on a PWM channel.
pub struct PwmServo<P>
where
    P: SetDutyCycle,
{
    pwm: P,
    range: PulseRange,
    attached: bool,
    last_duty: Option<u16>,
}

impl<P> PwmServo<P>
where
    P: SetDutyCycle,
{
    /// Create a detached servo on a PWM channel.
    pub fn new(pwm: P, range: PulseRange) -> Self {
        Self {
            pwm,
            range,
            attached: false,
            last_duty: None,
        }
    }

    /// Pulse mapping in use.
    #[inline]
    pub fn range(&self) -> &PulseRange {
        &self.range
    }

    /// Whether `attach` has run.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Duty cycle of the last write.
    #[inline]
    pub fn last_duty(&self) -> Option<u16> {
        self.last_duty
    }

    /// Stop driving pulses; the servo stops holding its position.
    pub fn detach(&mut self) -> Result<(), PwmServoError<P::Error>> {
        self.pwm.set_duty_cycle_fully_off().map_err(PwmServoError::Pwm)?;
        self.attached = false;
        self.last_duty = None;
        Ok(())
    }

    /// Give back the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P> Actuator for PwmServo<P>
where
    P: SetDutyCycle,
{
    type Error = PwmServoError<P::Error>;

    fn attach(&mut self) -> Result<(), Self::Error> {
        self.attached = true;
        Ok(())
    }

    fn write(&mut self, angle: Degrees) -> Result<(), Self::Error> {
        if !self.attached {
            return Err(PwmServoError::Detached);
        }

        let duty = self.range.duty(angle, self.pwm.max_duty_cycle());
        self.pwm.set_duty_cycle(duty).map_err(PwmServoError::Pwm)?;
        self.last_duty = Some(duty);
        Ok(())
    }
}
