//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::{truncate, SystemConfig};

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use servo_motion::load_config;
///
/// let config = load_config("servos.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = e.to_string();
        Error::Config(ConfigError::IoError(truncate(&msg)))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncate::<128>(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[servos.joint0]
name = "Joint 0"
pin = 3
"#;

        let config = parse_config(toml).unwrap();
        let servo = config.servo("joint0").unwrap();
        assert_eq!(servo.initial_angle, Degrees(0));
        assert_eq!(servo.pulse.max_pulse_us, 2400);
        assert_eq!(config.protocol.topic_prefix.as_str(), "/nodes/arduino/servo/");
    }

    #[test]
    fn test_parse_rejects_invalid_limits() {
        let toml = r#"
[servos.joint0]
name = "Joint 0"
pin = 3

[servos.joint0.limits]
min_degrees = 90
max_degrees = -90
"#;

        let result = parse_config(toml);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidSoftLimits { min: 90, max: -90 }))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[servos.joint0]\npin = \"three\"");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(300);
        let msg = truncate::<128>(&long);
        assert_eq!(msg.len(), 128);
    }
}
