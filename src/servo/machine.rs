//! Speed-paced servo state machine.
//!
//! Each tick runs the pending transition (exit the old state, commit, enter
//! the new state) before the do action of the now-current state, so a
//! target popped on entry is stepped in the same tick.

use heapless::String;

use crate::config::units::Degrees;
use crate::config::SoftLimits;
use crate::error::{QueueError, Result, ServoError};
use crate::queue::{QueueEvent, Target, TargetQueue, QUEUE_CAPACITY};

use super::actuator::Actuator;
use super::state::{AdjustingState, StateKind};

/// One servo: its target queue, its actuator, and its motion state.
///
/// `angle()` is the single source of truth for the commanded position and
/// moves by exactly one degree per step, at `speed` steps per second.
pub struct SpeedServo<A>
where
    A: Actuator,
{
    /// Servo name for logging/debugging.
    name: String<32>,

    /// Real actuator, attached during setup.
    actuator: A,

    /// Pending targets, strict FIFO.
    queue: TargetQueue,

    state: StateKind,
    next_state: StateKind,

    /// Commanded angle; persists across states.
    angle: Degrees,

    /// Present only after an adjusting entry.
    adjusting: Option<AdjustingState>,

    /// Notification of the last pop, held until a tick hands it out.
    pending_event: Option<QueueEvent>,

    /// Applied to targets at ingress.
    limits: Option<SoftLimits>,
}

impl<A> SpeedServo<A>
where
    A: Actuator,
{
    /// Create an uninitialized servo.
    pub(crate) fn new(
        name: String<32>,
        actuator: A,
        initial_angle: Degrees,
        limits: Option<SoftLimits>,
    ) -> Self {
        Self {
            name,
            actuator,
            queue: TargetQueue::new(),
            state: StateKind::Uninitialized,
            next_state: StateKind::Uninitialized,
            angle: initial_angle,
            adjusting: None,
            pending_event: None,
            limits,
        }
    }

    /// Get the servo name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current commanded angle, live even mid-adjustment.
    #[inline]
    pub fn angle(&self) -> Degrees {
        self.angle
    }

    /// Committed state.
    #[inline]
    pub fn state(&self) -> StateKind {
        self.state
    }

    /// State that the next tick will commit.
    #[inline]
    pub fn next_state(&self) -> StateKind {
        self.next_state
    }

    /// Tracking data of the last adjusting entry.
    #[inline]
    pub fn adjusting(&self) -> Option<&AdjustingState> {
        self.adjusting.as_ref()
    }

    /// Pending targets.
    #[inline]
    pub fn queue(&self) -> &TargetQueue {
        &self.queue
    }

    /// Soft limits applied at ingress.
    #[inline]
    pub fn limits(&self) -> Option<&SoftLimits> {
        self.limits.as_ref()
    }

    /// Get the actuator.
    #[inline]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Attach the actuator and write the initial angle.
    ///
    /// Returns `Ok(false)` without touching the actuator if setup already ran.
    pub fn setup(&mut self) -> Result<bool> {
        if self.state != StateKind::Uninitialized || self.next_state != StateKind::Uninitialized {
            return Ok(false);
        }

        self.actuator.attach().map_err(|_| ServoError::ActuatorError)?;
        self.actuator
            .write(self.angle)
            .map_err(|_| ServoError::ActuatorError)?;

        #[cfg(feature = "defmt")]
        defmt::info!("{}: attached at {}", self.name, self.angle);

        self.transition(StateKind::Idle);
        Ok(true)
    }

    /// Queue a target.
    ///
    /// # Errors
    ///
    /// - `ServoError::ZeroSpeed` if the target could never be paced
    /// - `ServoError::LimitExceeded` if soft limits reject the angle
    /// - `QueueError::Full` if the queue is at capacity; nothing is stored
    pub fn push(&mut self, target: Target) -> Result<()> {
        if target.speed.value() == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: rejected zero-speed target {}", self.name, target);
            return Err(ServoError::ZeroSpeed.into());
        }

        let target = match self.limits {
            Some(limits) => match limits.apply(target.angle) {
                Some(angle) => Target { angle, ..target },
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("{}: target {} outside soft limits", self.name, target.angle);
                    return Err(ServoError::LimitExceeded {
                        angle: target.angle.0,
                        min: limits.min.0,
                        max: limits.max.0,
                    }
                    .into())
                }
            },
            None => target,
        };

        self.queue.push(target).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::error!("{}: target queue overflow", self.name);
            QueueError::Full {
                servo: self.name.clone(),
                capacity: QUEUE_CAPACITY,
            }
        })?;

        Ok(())
    }

    /// Request a transition, applied on the next tick.
    ///
    /// Returns `false` and leaves the pending state alone if `to` is already
    /// the current or the pending state.
    pub fn transition(&mut self, to: StateKind) -> bool {
        if to == self.state || to == self.next_state {
            return false;
        }

        self.next_state = to;
        true
    }

    /// Advance the state machine once.
    ///
    /// Returns the queue notification raised by a pop during this tick.
    ///
    /// # Errors
    ///
    /// Fatal errors (see [`crate::Error::is_fatal`]) when the adjusting entry
    /// finds no usable target or the actuator write fails. A notification
    /// raised earlier in a failing tick is kept; fetch it with
    /// [`SpeedServo::take_event`].
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<QueueEvent>> {
        if self.state != self.next_state {
            self.state_exit();
            self.state = self.next_state;

            #[cfg(feature = "defmt")]
            defmt::trace!("{}: entering {}", self.name, self.state);

            self.state_entry(now_ms)?;
        }

        self.state_do(now_ms)?;
        Ok(self.pending_event.take())
    }

    /// Hand out a queue notification not yet returned by `tick`.
    ///
    /// Only a tick that failed after its pop leaves one behind.
    #[inline]
    pub fn take_event(&mut self) -> Option<QueueEvent> {
        self.pending_event.take()
    }

    fn state_entry(&mut self, _now_ms: u64) -> Result<()> {
        match self.state {
            StateKind::Adjusting => self.adjusting_entry(),
            _ => Ok(()),
        }
    }

    fn state_do(&mut self, now_ms: u64) -> Result<()> {
        match self.state {
            StateKind::Idle => {
                self.idle_do();
                Ok(())
            }
            StateKind::Adjusting => self.adjusting_do(now_ms),
            StateKind::Uninitialized => Ok(()),
        }
    }

    fn state_exit(&mut self) {
        if self.state == StateKind::Adjusting {
            self.adjusting_exit();
        }
    }

    fn idle_do(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        self.transition(StateKind::Adjusting);
    }

    fn adjusting_entry(&mut self) -> Result<()> {
        let popped = self.queue.pop().ok_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::error!("{}: adjusting entered, but no target to pop", self.name);
            ServoError::EmptyQueueOnEntry {
                servo: self.name.clone(),
            }
        })?;

        // Held until a tick returns it, even if this tick fails
        if popped.event.is_some() {
            self.pending_event = popped.event;
        }

        let interval_ms = popped.item.step_interval_ms().ok_or_else(|| {
            ServoError::ZeroSpeedOnEntry {
                servo: self.name.clone(),
            }
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: tracking {} every {}ms", self.name, popped.item, interval_ms);

        self.adjusting = Some(AdjustingState::new(popped.item, interval_ms));
        Ok(())
    }

    fn adjusting_do(&mut self, now_ms: u64) -> Result<()> {
        let target = match self.adjusting.as_mut() {
            Some(adjusting) => {
                if !adjusting.take_step_slot(now_ms) {
                    return Ok(());
                }
                adjusting.target_angle()
            }
            None => return Ok(()),
        };

        let Some(next) = self.angle.step_toward(target) else {
            self.transition(StateKind::Idle);
            return Ok(());
        };

        self.angle = next;
        self.actuator
            .write(next)
            .map_err(|_| ServoError::ActuatorError)?;

        if let Some(adjusting) = self.adjusting.as_mut() {
            adjusting.last_step_ms = Some(now_ms);
        }
        Ok(())
    }

    fn adjusting_exit(&mut self) {}
}
