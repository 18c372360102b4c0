//! Builder pattern for SpeedServo.

use crate::config::units::Degrees;
use crate::config::{truncate, ServoConfig, SoftLimits, SystemConfig};
use crate::error::{ConfigError, Error, Result};

use super::actuator::Actuator;
use super::machine::SpeedServo;

/// Builder for creating SpeedServo instances.
pub struct SpeedServoBuilder<A>
where
    A: Actuator,
{
    actuator: Option<A>,
    name: Option<heapless::String<32>>,
    initial_angle: Degrees,
    limits: Option<SoftLimits>,
}

impl<A> Default for SpeedServoBuilder<A>
where
    A: Actuator,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> SpeedServoBuilder<A>
where
    A: Actuator,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            actuator: None,
            name: None,
            initial_angle: Degrees(0),
            limits: None,
        }
    }

    /// Set the actuator.
    pub fn actuator(mut self, actuator: A) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Set the servo name, keeping the first 32 bytes of a longer one.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncate(name));
        self
    }

    /// Set the angle written during setup.
    pub fn initial_angle(mut self, angle: Degrees) -> Self {
        self.initial_angle = angle;
        self
    }

    /// Set soft limits applied to pushed targets.
    pub fn limits(mut self, limits: SoftLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Configure from a ServoConfig.
    pub fn from_servo_config(mut self, config: &ServoConfig) -> Self {
        self.name = Some(config.name.clone());
        self.initial_angle = config.initial_angle;
        self.limits = config.limits;
        self
    }

    /// Configure from SystemConfig by servo key.
    pub fn from_config(self, config: &SystemConfig, servo_name: &str) -> Result<Self> {
        let servo_config = config.servo(servo_name).ok_or_else(|| {
            Error::Config(ConfigError::ServoNotFound(
                truncate(servo_name),
            ))
        })?;

        Ok(self.from_servo_config(servo_config))
    }

    /// Build the SpeedServo.
    ///
    /// # Errors
    ///
    /// Returns an error if no actuator was provided.
    pub fn build(self) -> Result<SpeedServo<A>> {
        let actuator = self
            .actuator
            .ok_or(Error::Config(ConfigError::MissingField("actuator")))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("servo").unwrap_or_default());

        Ok(SpeedServo::new(name, actuator, self.initial_angle, self.limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimitPolicy;
    use crate::servo::StateKind;

    struct NullActuator;

    impl Actuator for NullActuator {
        type Error = ();

        fn attach(&mut self) -> core::result::Result<(), ()> {
            Ok(())
        }

        fn write(&mut self, _angle: Degrees) -> core::result::Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_requires_actuator() {
        let result = SpeedServoBuilder::<NullActuator>::new().name("joint0").build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("actuator")))
        ));
    }

    #[test]
    fn test_build_from_servo_config() {
        let mut config = ServoConfig::new("Wrist", 5);
        config.initial_angle = Degrees(90);
        config.limits = Some(SoftLimits::new(Degrees(10), Degrees(170), LimitPolicy::Clamp));

        let servo = SpeedServoBuilder::new()
            .actuator(NullActuator)
            .from_servo_config(&config)
            .build()
            .unwrap();

        assert_eq!(servo.name(), "Wrist");
        assert_eq!(servo.angle(), Degrees(90));
        assert_eq!(servo.state(), StateKind::Uninitialized);
        assert!(servo.limits().is_some());
    }

    #[test]
    fn test_long_name_is_truncated() {
        let long = "left_shoulder_rotation_joint_servo_a";
        let servo = SpeedServoBuilder::new()
            .name(long)
            .actuator(NullActuator)
            .build()
            .unwrap();

        assert_eq!(servo.name(), &long[..32]);
    }

    #[test]
    fn test_default_name() {
        let servo = SpeedServoBuilder::new().actuator(NullActuator).build().unwrap();
        assert_eq!(servo.name(), "servo");
    }
}
