//! Servo state machine states.

use crate::config::units::Degrees;
use crate::queue::Target;

/// Top-level state of a servo.
///
/// Starts `Uninitialized`, becomes `Idle` after setup, then cycles
/// `Idle` ⇄ `Adjusting` for the rest of its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateKind {
    /// Constructed, actuator not attached yet.
    #[default]
    Uninitialized,
    /// Waiting for a queued target.
    Idle,
    /// Stepping toward a popped target.
    Adjusting,
}

impl StateKind {
    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            StateKind::Uninitialized => "Uninitialized",
            StateKind::Idle => "Idle",
            StateKind::Adjusting => "Adjusting",
        }
    }
}

/// Bookkeeping for the target being tracked while `Adjusting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustingState {
    /// Target popped on entry.
    pub target: Target,
    /// Minimum time between one-degree steps.
    pub interval_ms: u32,
    /// Timestamp of the last actual step, if any.
    pub last_step_ms: Option<u64>,
    /// The next step may run without waiting for the interval.
    pub first_step: bool,
}

impl AdjustingState {
    pub(crate) fn new(target: Target, interval_ms: u32) -> Self {
        Self {
            target,
            interval_ms,
            last_step_ms: None,
            first_step: true,
        }
    }

    /// Angle being tracked.
    #[inline]
    pub fn target_angle(&self) -> Degrees {
        self.target.angle
    }

    /// Whether a step may run at `now_ms`. Consumes the first-step pass.
    pub(crate) fn take_step_slot(&mut self, now_ms: u64) -> bool {
        if self.first_step {
            self.first_step = false;
            return true;
        }

        match self.last_step_ms {
            // Wrapping keeps 32-bit millisecond timers working across rollover
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms as u64,
            None => true,
        }
    }
}
