//! Configuration module for servo-motion.
//!
//! Provides types for loading and validating servo configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod limits;
#[cfg(feature = "std")]
mod loader;
mod pulse;
mod servo;
mod system;
pub mod units;
mod validation;

pub use limits::{LimitPolicy, SoftLimits};
pub use pulse::{PulseRange, DEFAULT_MAX_PULSE_US, DEFAULT_MIN_PULSE_US, DEFAULT_PERIOD_US};
pub use servo::ServoConfig;
pub use system::{ProtocolConfig, SystemConfig, DEFAULT_TOPIC_PREFIX, MAX_SERVOS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, DegreesPerSec};

/// Copy as much of `s` as fits, cutting on a char boundary.
pub(crate) fn truncate<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
