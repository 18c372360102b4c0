//! Basic servo control example.
//!
//! Demonstrates building one speed-paced servo on a PWM channel, queueing a
//! few targets and ticking it until the queue is exhausted.
//!
//! This example uses an in-memory PWM channel instead of real hardware.

use servo_motion::{
    Degrees, PulseRange, PwmServo, QueueEvent, ServoBank, SpeedServoBuilder, StateKind, StdClock,
    Target,
};

/// Mock PWM channel for demonstration.
struct MockPwm {
    duty: u16,
}

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = core::convert::Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        // One count per microsecond of a 20ms frame
        20_000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

fn main() {
    println!("=== Basic Servo Control Example ===\n");

    let range = PulseRange::default();
    println!(
        "Pulse range: {}us..{}us over {}..{} degrees",
        range.min_pulse_us, range.max_pulse_us, range.min_angle.0, range.max_angle.0
    );

    let servo = SpeedServoBuilder::new()
        .name("demo_servo")
        .initial_angle(Degrees(90))
        .actuator(PwmServo::new(MockPwm { duty: 0 }, range))
        .build()
        .expect("Failed to build servo");

    let mut bank = ServoBank::new(StdClock::new());
    let index = bank.add(servo).expect("Bank full");
    bank.setup_all().expect("Setup failed");

    // Sweep out and back at different speeds
    let targets = [
        Target::new(120, 60),
        Target::new(60, 120),
        Target::new(90, 240),
    ];
    for target in targets {
        println!(
            "Queued {} deg at {} deg/s ({}ms per degree)",
            target.angle.0,
            target.speed.0,
            target.step_interval_ms().unwrap_or(0)
        );
    }
    bank.push_batch(index, targets).expect("Push rejected");

    println!("\n=== Running ===");
    let mut last = bank.angle(index).expect("Invalid index");
    loop {
        let event = bank.tick(index).expect("Fatal servo error");
        if let Some(event) = event {
            match event.kind {
                QueueEvent::Drain { free } => println!("  queue drained, {free} slots free"),
                QueueEvent::Empty => println!("  queue empty"),
            }
        }

        let servo = bank.servo(index).expect("Invalid index");
        let angle = servo.angle();
        if angle != last && angle.0 % 10 == 0 {
            let duty = servo.actuator().last_duty().unwrap_or(0);
            println!("  {:>4} deg  duty {}", angle.0, duty);
        }
        last = angle;

        if servo.state() == StateKind::Idle
            && servo.next_state() == StateKind::Idle
            && servo.queue().is_empty()
        {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    println!("\n=== Example Complete ===");
    println!("Final angle: {} degrees", bank.angle(index).map(|a| a.0).unwrap_or(0));
}
