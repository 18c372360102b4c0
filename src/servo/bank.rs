//! Servo bank: independent servos addressed by index.
//!
//! The bank owns every servo and a shared clock. Queue notifications come
//! back from `tick` tagged with the servo index, ready for a transport to
//! publish.

use heapless::Vec;

use crate::config::units::Degrees;
use crate::config::MAX_SERVOS;
use crate::error::{ConfigError, Error, Result, ServoError};
use crate::queue::{QueueEvent, Target};

use super::actuator::Actuator;
use super::clock::Clock;
use super::machine::SpeedServo;

/// Queue notification from one servo of a bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoEvent {
    /// Index of the servo that raised it.
    pub servo: usize,
    /// What happened to its queue.
    pub kind: QueueEvent,
}

/// A fixed-size collection of servos sharing one clock.
///
/// # Example
///
/// ```rust,ignore
/// use servo_motion::{ServoBank, SpeedServoBuilder, StdClock, Target};
///
/// let mut bank = ServoBank::new(StdClock::new());
/// let joint = bank.add(SpeedServoBuilder::new().name("joint0").actuator(pwm0).build()?)?;
/// bank.setup_all()?;
///
/// bank.push(joint, Target::new(120, 200))?;
/// loop {
///     bank.tick_all(|event| publish(event))?;
/// }
/// ```
pub struct ServoBank<A, C>
where
    A: Actuator,
    C: Clock,
{
    servos: Vec<SpeedServo<A>, MAX_SERVOS>,
    clock: C,
}

impl<A, C> ServoBank<A, C>
where
    A: Actuator,
    C: Clock,
{
    /// Create an empty bank.
    pub fn new(clock: C) -> Self {
        Self {
            servos: Vec::new(),
            clock,
        }
    }

    /// Add a servo and return its index.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TooManyServos` when the bank is full.
    pub fn add(&mut self, servo: SpeedServo<A>) -> Result<usize> {
        self.servos
            .push(servo)
            .map_err(|_| Error::Config(ConfigError::TooManyServos(MAX_SERVOS)))?;
        Ok(self.servos.len() - 1)
    }

    /// Number of servos.
    #[inline]
    pub fn len(&self) -> usize {
        self.servos.len()
    }

    /// Check if the bank has no servos.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.servos.is_empty()
    }

    /// Get the clock.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get a servo by index.
    pub fn servo(&self, index: usize) -> Result<&SpeedServo<A>> {
        self.servos
            .get(index)
            .ok_or(Error::Servo(ServoError::InvalidIndex(index)))
    }

    fn servo_mut(&mut self, index: usize) -> Result<&mut SpeedServo<A>> {
        self.servos
            .get_mut(index)
            .ok_or(Error::Servo(ServoError::InvalidIndex(index)))
    }

    /// Find a servo by name, returning its index.
    pub fn servo_by_name(&self, name: &str) -> Option<(usize, &SpeedServo<A>)> {
        self.servos
            .iter()
            .enumerate()
            .find(|(_, servo)| servo.name() == name)
    }

    /// Run one servo's one-time setup.
    pub fn setup(&mut self, index: usize) -> Result<bool> {
        self.servo_mut(index)?.setup()
    }

    /// Run setup for every servo that has not been set up yet.
    pub fn setup_all(&mut self) -> Result<()> {
        for servo in self.servos.iter_mut() {
            servo.setup()?;
        }
        Ok(())
    }

    /// Queue a target on one servo.
    pub fn push(&mut self, index: usize, target: Target) -> Result<()> {
        self.servo_mut(index)?.push(target)
    }

    /// Queue targets in order, stopping at the first rejection.
    ///
    /// Returns the number of targets queued. Targets accepted before a
    /// rejection stay queued.
    pub fn push_batch<I>(&mut self, index: usize, targets: I) -> Result<usize>
    where
        I: IntoIterator<Item = Target>,
    {
        let servo = self.servo_mut(index)?;
        let mut count = 0;
        for target in targets {
            servo.push(target)?;
            count += 1;
        }
        Ok(count)
    }

    /// Advance one servo.
    pub fn tick(&mut self, index: usize) -> Result<Option<ServoEvent>> {
        let now_ms = self.clock.now_ms();
        let event = self.servo_mut(index)?.tick(now_ms)?;

        Ok(event.map(|kind| {
            #[cfg(feature = "defmt")]
            defmt::debug!("servo {}: {}", index, kind);
            ServoEvent { servo: index, kind }
        }))
    }

    /// Notification left behind by a failed [`ServoBank::tick`] of one servo.
    pub fn take_event(&mut self, index: usize) -> Result<Option<ServoEvent>> {
        let kind = self.servo_mut(index)?.take_event();
        Ok(kind.map(|kind| ServoEvent { servo: index, kind }))
    }

    /// Advance every servo once, in index order.
    ///
    /// Stops at the first error; servos after it are not ticked this cycle.
    /// A notification raised by the failing servo before its error is still
    /// passed to `on_event`.
    pub fn tick_all<F>(&mut self, mut on_event: F) -> Result<()>
    where
        F: FnMut(ServoEvent),
    {
        for index in 0..self.servos.len() {
            match self.tick(index) {
                Ok(Some(event)) => on_event(event),
                Ok(None) => {}
                Err(e) => {
                    if let Some(event) = self.take_event(index)? {
                        on_event(event);
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Current angle of one servo.
    pub fn angle(&self, index: usize) -> Result<Degrees> {
        Ok(self.servo(index)?.angle())
    }

    /// Current angles of all servos in index order.
    pub fn angles(&self) -> impl Iterator<Item = Degrees> + '_ {
        self.servos.iter().map(|servo| servo.angle())
    }

    /// Iterate over servos in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeedServo<A>> {
        self.servos.iter()
    }
}
