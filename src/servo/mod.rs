//! Servo module for servo-motion.
//!
//! Provides the speed-paced servo state machine, its hardware seams, and
//! the bank that drives several servos from one scheduler loop.

mod actuator;
mod bank;
mod builder;
mod clock;
mod machine;
pub mod state;

pub use actuator::{Actuator, PwmServo, PwmServoError};
pub use bank::{ServoBank, ServoEvent};
pub use builder::SpeedServoBuilder;
pub use clock::Clock;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use machine::SpeedServo;
pub use state::{AdjustingState, StateKind};
