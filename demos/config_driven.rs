//! Example: Configuration-driven servo node.
//!
//! This example demonstrates how to:
//! - Load servo configuration from TOML
//! - Build a servo bank with per-servo pulse ranges and soft limits
//! - Feed it JSON push messages and publish drain/empty notifications
//! - Raise a fault indicator when a fatal error surfaces
//!
//! Run with: `cargo run --example config_driven --features std`

use servo_motion::{
    config::parse_config,
    error::Result,
    protocol::{dispatch, encode_event},
    FaultIndicator, PwmServo, ServoBank, SpeedServoBuilder, StdClock,
};

/// Mock PWM channel for demonstration.
struct MockPwm;

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = core::convert::Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Mock status LED for demonstration.
struct MockLed;

impl embedded_hal::digital::ErrorType for MockLed {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockLed {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        println!("  [fault LED on]");
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Configuration-Driven Servo Node Example ===\n");

    let toml_content = r#"
[protocol]
topic_prefix = "/nodes/arduino/servo/"

[servos.pan]
name = "pan"
pin = 3
initial_angle_deg = 90

[servos.pan.limits]
min_degrees = 20
max_degrees = 160
policy = "clamp"

[servos.tilt]
name = "tilt"
pin = 5
initial_angle_deg = 45

[servos.tilt.pulse]
min_pulse_us = 1000
max_pulse_us = 2000

[servos.tilt.limits]
min_degrees = 0
max_degrees = 90
policy = "reject"
"#;

    let config = parse_config(toml_content)?;
    let prefix = config.protocol.topic_prefix.as_str();
    println!("Loaded {} servo(s), topic prefix '{}'", config.servos.len(), prefix);

    let mut bank = ServoBank::new(StdClock::new());
    for name in config.servo_names() {
        let servo_config = config.servo(name).expect("listed servo exists");
        let servo = SpeedServoBuilder::new()
            .from_config(&config, name)?
            .actuator(PwmServo::new(MockPwm, servo_config.pulse))
            .build()?;
        let index = bank.add(servo)?;
        println!(
            "  [{}] {} on pin {}, starts at {} deg",
            index, servo_config.name, servo_config.pin, servo_config.initial_angle.0
        );
    }
    bank.setup_all()?;

    let mut fault = FaultIndicator::new(MockLed);

    println!("\n=== Incoming Messages ===");
    let messages = [
        (
            "/nodes/arduino/servo/0/buffer/push",
            r#"{"targets":[{"angle":180,"speed":400},{"angle":90,"speed":400}]}"#,
        ),
        (
            "/nodes/arduino/servo/1/buffer/push",
            r#"{"targets":[{"angle":80,"speed":500}]}"#,
        ),
        ("/nodes/arduino/servo/1/buffer/push", r#"{"targets":[{"angle":120,"speed":500}]}"#),
        ("/nodes/arduino/servo/7/buffer/push", r#"{"targets":[]}"#),
    ];

    for (topic, payload) in messages {
        match fault.check(dispatch(&mut bank, prefix, topic, payload)) {
            Ok(count) => println!("  {topic}: queued {count}"),
            Err(e) => println!("  {topic}: rejected ({e})"),
        }
    }

    println!("\n=== Running ===");
    let start = std::time::Instant::now();
    while start.elapsed() < std::time::Duration::from_millis(600) {
        let result = bank.tick_all(|event| {
            let (topic, payload) = encode_event(prefix, &event);
            println!("  publish {topic} {payload}");
        });

        if fault.check(result).is_err() {
            println!("Halting on fatal error");
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    for (servo, angle) in bank.iter().zip(bank.angles()) {
        println!("  {} at {} deg", servo.name(), angle.0);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
