//! Error types for servo-motion library.
//!
//! Provides unified error handling across configuration, queueing, servo
//! state machines, and command decoding.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all servo-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command queue error
    Queue(QueueError),
    /// Servo state machine or actuator error
    Servo(ServoError),
    /// Command topic or payload decoding error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Servo name not found in configuration
    ServoNotFound(heapless::String<32>),
    /// Pulse width range is empty or inverted
    InvalidPulseRange {
        /// Pulse width at the minimum angle (microseconds)
        min_us: u16,
        /// Pulse width at the maximum angle (microseconds)
        max_us: u16,
    },
    /// PWM period does not leave room for the longest pulse
    InvalidPeriod {
        /// Configured PWM period (microseconds)
        period_us: u16,
        /// Longest configured pulse (microseconds)
        max_pulse_us: u16,
    },
    /// Mechanical angle range is empty or inverted
    InvalidAngleRange {
        /// Angle mapped to the shortest pulse
        min: i32,
        /// Angle mapped to the longest pulse
        max: i32,
    },
    /// Invalid soft limits (min must be < max)
    InvalidSoftLimits {
        /// Minimum limit value
        min: i32,
        /// Maximum limit value
        max: i32,
    },
    /// Initial angle lies outside the configured soft limits
    InitialAngleOutOfLimits {
        /// Configured initial angle
        angle: i32,
        /// Minimum limit value
        min: i32,
        /// Maximum limit value
        max: i32,
    },
    /// More servos than the bank can hold
    TooManyServos(usize),
    /// Required builder field not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Command queue errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Queue is at capacity; the target was not stored
    Full {
        /// Name of the servo whose queue overflowed
        servo: heapless::String<32>,
        /// Queue capacity
        capacity: usize,
    },
}

/// Servo state machine and actuator errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ServoError {
    /// Actuator attach or write failed
    ActuatorError,
    /// Fault indicator pin operation failed
    PinError,
    /// No servo at the given index
    InvalidIndex(usize),
    /// Target rejected at ingress because its speed is zero
    ZeroSpeed,
    /// Target angle rejected by soft limits
    LimitExceeded {
        /// Requested angle
        angle: i32,
        /// Minimum limit value
        min: i32,
        /// Maximum limit value
        max: i32,
    },
    /// Adjusting state entered while the queue was empty
    EmptyQueueOnEntry {
        /// Servo name
        servo: heapless::String<32>,
    },
    /// A zero-speed target reached the adjusting entry
    ZeroSpeedOnEntry {
        /// Servo name
        servo: heapless::String<32>,
    },
}

/// Command decoding errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Topic does not start with the prefix or lacks a servo index
    InvalidTopic(heapless::String<64>),
    /// Servo index parsed from the topic is out of range
    InvalidServoIndex(usize),
    /// Payload is not a valid target batch
    MalformedPayload(heapless::String<128>),
}

impl Error {
    /// Whether the surrounding system must stop driving the servos.
    ///
    /// Fatal errors leave the commanded angle out of sync with what the
    /// caller asked for, or signal a scheduler bug. They are not retried.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Queue(QueueError::Full { .. }) => true,
            Error::Servo(
                ServoError::ActuatorError
                | ServoError::EmptyQueueOnEntry { .. }
                | ServoError::ZeroSpeedOnEntry { .. },
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Queue(e) => write!(f, "Queue error: {}", e),
            Error::Servo(e) => write!(f, "Servo error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ServoNotFound(name) => write!(f, "Servo '{}' not found", name),
            ConfigError::InvalidPulseRange { min_us, max_us } => {
                write!(f, "Invalid pulse range: min ({}us) must be < max ({}us)", min_us, max_us)
            }
            ConfigError::InvalidPeriod { period_us, max_pulse_us } => {
                write!(f, "Invalid period: {}us must exceed max pulse {}us", period_us, max_pulse_us)
            }
            ConfigError::InvalidAngleRange { min, max } => {
                write!(f, "Invalid angle range: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidSoftLimits { min, max } => {
                write!(f, "Invalid soft limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InitialAngleOutOfLimits { angle, min, max } => {
                write!(f, "Initial angle {} outside limits [{}, {}]", angle, min, max)
            }
            ConfigError::TooManyServos(max) => write!(f, "Too many servos (max {})", max),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Full { servo, capacity } => {
                write!(f, "Queue for servo '{}' is full ({} targets)", servo, capacity)
            }
        }
    }
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServoError::ActuatorError => write!(f, "Actuator operation failed"),
            ServoError::PinError => write!(f, "Indicator pin operation failed"),
            ServoError::InvalidIndex(i) => write!(f, "No servo at index {}", i),
            ServoError::ZeroSpeed => write!(f, "Target speed must be > 0"),
            ServoError::LimitExceeded { angle, min, max } => {
                write!(f, "Angle {} exceeds limits [{}, {}]", angle, min, max)
            }
            ServoError::EmptyQueueOnEntry { servo } => {
                write!(f, "Servo '{}' entered adjusting with no target to pop", servo)
            }
            ServoError::ZeroSpeedOnEntry { servo } => {
                write!(f, "Servo '{}' popped a zero-speed target", servo)
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidTopic(topic) => write!(f, "Invalid topic: '{}'", topic),
            CommandError::InvalidServoIndex(i) => write!(f, "Invalid servo number: {}", i),
            CommandError::MalformedPayload(msg) => write!(f, "Malformed payload: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<QueueError> for Error {
    fn from(e: QueueError) -> Self {
        Error::Queue(e)
    }
}

impl From<ServoError> for Error {
    fn from(e: ServoError) -> Self {
        Error::Servo(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for QueueError {}

#[cfg(feature = "std")]
impl std::error::Error for ServoError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
