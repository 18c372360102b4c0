//! Multi-servo example.
//!
//! Drives several servos from a single cooperative loop. Each servo keeps
//! its own queue and pace; refills are requested through drain
//! notifications the way a remote planner would see them.

use std::collections::VecDeque;

use servo_motion::{
    Actuator, Degrees, QueueEvent, ServoBank, SpeedServoBuilder, StdClock, Target, QUEUE_CAPACITY,
};

/// Actuator printing every tenth degree.
struct ConsoleServo {
    label: &'static str,
}

impl Actuator for ConsoleServo {
    type Error = core::convert::Infallible;

    fn attach(&mut self) -> Result<(), Self::Error> {
        println!("  {} attached", self.label);
        Ok(())
    }

    fn write(&mut self, angle: Degrees) -> Result<(), Self::Error> {
        if angle.0 % 10 == 0 {
            println!("  {} -> {} deg", self.label, angle.0);
        }
        Ok(())
    }
}

fn main() {
    println!("=== Multi-Servo Example ===\n");

    let mut bank = ServoBank::new(StdClock::new());
    for label in ["shoulder", "elbow", "wrist"] {
        let servo = SpeedServoBuilder::new()
            .name(label)
            .initial_angle(Degrees(90))
            .actuator(ConsoleServo { label })
            .build()
            .expect("Failed to build servo");
        bank.add(servo).expect("Bank full");
    }
    bank.setup_all().expect("Setup failed");

    // A planner backlog bigger than one queue; the wrist gets it in chunks
    let mut backlog: VecDeque<Target> = (0..30)
        .map(|i| Target::new(if i % 2 == 0 { 80 } else { 100 }, 1000))
        .collect();

    let first: Vec<Target> = backlog.drain(..QUEUE_CAPACITY).collect();
    bank.push_batch(2, first).expect("Push rejected");
    bank.push(0, Target::new(150, 200)).expect("Push rejected");
    bank.push(1, Target::new(30, 100)).expect("Push rejected");

    let start = std::time::Instant::now();
    while start.elapsed() < std::time::Duration::from_secs(1) {
        let mut refills = Vec::new();
        bank.tick_all(|event| match event.kind {
            QueueEvent::Drain { free } => {
                println!("  servo {} wants {} more", event.servo, free);
                refills.push((event.servo, free));
            }
            QueueEvent::Empty => println!("  servo {} queue empty", event.servo),
        })
        .expect("Fatal servo error");

        for (servo, free) in refills {
            let count = free.min(backlog.len());
            let chunk: Vec<Target> = backlog.drain(..count).collect();
            bank.push_batch(servo, chunk).expect("Push rejected");
        }

        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    println!("\n=== Final Angles ===");
    for (servo, angle) in bank.iter().zip(bank.angles()) {
        println!("  {}: {} deg", servo.name(), angle.0);
    }
}
