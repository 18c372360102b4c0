//! Property tests for queue ordering and motion convergence.

use std::cell::Cell;

use proptest::prelude::*;
use servo_motion::queue::{CommandQueue, QueueEvent};
use servo_motion::{Actuator, Clock, Degrees, ServoBank, SpeedServoBuilder, StateKind, Target};

struct NullActuator;

impl Actuator for NullActuator {
    type Error = ();

    fn attach(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn write(&mut self, _angle: Degrees) -> Result<(), ()> {
        Ok(())
    }
}

#[derive(Default)]
struct ManualClock(Cell<u64>);

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Queue operations: `Some(v)` pushes, `None` pops.
fn ops() -> impl Strategy<Value = Vec<Option<u16>>> {
    prop::collection::vec(prop::option::of(any::<u16>()), 0..200)
}

proptest! {
    #[test]
    fn queue_matches_model(ops in ops()) {
        let mut queue: CommandQueue<u16, 20> = CommandQueue::new();
        let mut model = std::collections::VecDeque::new();

        for op in ops {
            match op {
                Some(value) => {
                    let accepted = queue.push(value).is_ok();
                    prop_assert_eq!(accepted, model.len() < 20);
                    if accepted {
                        model.push_back(value);
                    }
                }
                None => {
                    let popped = queue.pop();
                    prop_assert_eq!(popped.map(|p| p.item), model.pop_front());

                    let expected = match (popped, model.len()) {
                        (None, _) => None,
                        (Some(_), 0) => Some(QueueEvent::Empty),
                        (Some(_), 10) => Some(QueueEvent::Drain { free: 10 }),
                        (Some(_), _) => None,
                    };
                    prop_assert_eq!(popped.and_then(|p| p.event), expected);
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert!(queue.len() <= 20);
        }
    }

    #[test]
    fn servo_converges_without_overshoot(
        start in -180i32..180,
        targets in prop::collection::vec((-180i32..180, 100u32..2000), 1..5),
    ) {
        let clock = ManualClock::default();
        let servo = SpeedServoBuilder::new()
            .initial_angle(Degrees(start))
            .actuator(NullActuator)
            .build()
            .unwrap();
        let mut bank = ServoBank::new(&clock);
        bank.add(servo).unwrap();
        bank.setup_all().unwrap();

        for &(angle, speed) in &targets {
            bank.push(0, Target::new(angle, speed)).unwrap();
        }

        let low = targets.iter().map(|t| t.0).chain([start]).min().unwrap();
        let high = targets.iter().map(|t| t.0).chain([start]).max().unwrap();
        let mut previous = start;
        let mut settled = false;

        for _ in 0..100_000 {
            bank.tick(0).unwrap();
            let angle = bank.angle(0).unwrap().0;
            prop_assert!(angle.abs_diff(previous) <= 1);
            prop_assert!(angle >= low && angle <= high);
            previous = angle;

            let servo = bank.servo(0).unwrap();
            if servo.state() == StateKind::Idle
                && servo.next_state() == StateKind::Idle
                && servo.queue().is_empty()
            {
                settled = true;
                break;
            }
            clock.0.set(clock.0.get() + 1);
        }

        prop_assert!(settled);
        prop_assert_eq!(previous, targets[targets.len() - 1].0);
    }
}
