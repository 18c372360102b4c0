//! # servo-motion
//!
//! Speed-controlled hobby servo motion with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Speed-paced motion**: each target moves the servo one degree at a time at a commanded speed
//! - **Bounded command queues**: fixed-capacity FIFO per servo with drain/empty notifications
//! - **Cooperative scheduling**: non-blocking `tick`, safe to interleave many servos in one loop
//! - **embedded-hal 1.0**: Uses `SetDutyCycle` for PWM output, `OutputPin` for the fault indicator
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Define servos, pulse ranges and soft limits in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use servo_motion::{PwmServo, ServoBank, SpeedServoBuilder, StdClock, Target};
//!
//! // Load configuration from TOML
//! let config = servo_motion::load_config("servos.toml")?;
//! let wrist = config.servo("wrist").unwrap();
//!
//! // Create a servo on an embedded-hal PWM channel
//! let servo = SpeedServoBuilder::new()
//!     .from_servo_config(wrist)
//!     .actuator(PwmServo::new(pwm_channel, wrist.pulse))
//!     .build()?;
//!
//! let mut bank = ServoBank::new(StdClock::new());
//! let index = bank.add(servo)?;
//! bank.setup_all()?;
//!
//! // Move to 120 degrees at 60 degrees per second
//! bank.push(index, Target::new(120, 60))?;
//! loop {
//!     bank.tick_all(|event| publish(event))?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML config loading, the JSON command protocol and `StdClock`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod fault;
#[cfg(feature = "std")]
pub mod protocol;
pub mod queue;
pub mod servo;

// Re-exports for ergonomic API
pub use config::{
    validate_config, LimitPolicy, PulseRange, ServoConfig, SoftLimits, SystemConfig, MAX_SERVOS,
};
pub use error::{Error, Result};
pub use fault::FaultIndicator;
pub use queue::{CommandQueue, QueueEvent, Target, QUEUE_CAPACITY};
pub use servo::{
    state, Actuator, Clock, PwmServo, ServoBank, ServoEvent, SpeedServo, SpeedServoBuilder,
    StateKind,
};

// Configuration loading and wall clock (std only)
#[cfg(feature = "std")]
pub use config::load_config;
#[cfg(feature = "std")]
pub use servo::StdClock;

// Unit types
pub use config::units::{Degrees, DegreesPerSec};
