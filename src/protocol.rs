//! JSON-over-topic command protocol.
//!
//! Topics have the shape `<prefix><n>/buffer/<operation>`. Push messages
//! carry targets for servo `n`; drain and empty messages are published
//! when that servo's queue needs refilling. The transport is up to the
//! caller: this module only maps topics and payloads to bank operations.

use serde::Deserialize;

use crate::config::truncate;
use crate::error::{CommandError, Error, Result};
use crate::queue::{QueueEvent, Target, QUEUE_CAPACITY};
use crate::servo::{Actuator, Clock, ServoBank, ServoEvent};

/// Subtopic for incoming targets.
pub const SUBTOPIC_PUSH: &str = "/buffer/push";
/// Subtopic for half-drained notifications.
pub const SUBTOPIC_DRAIN: &str = "/buffer/drain";
/// Subtopic for empty notifications.
pub const SUBTOPIC_EMPTY: &str = "/buffer/empty";

/// Operation named by a topic's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Queue targets.
    Push,
    /// Queue drained to half capacity.
    Drain,
    /// Queue emptied.
    Empty,
    /// Any other suffix; ignored.
    Other,
}

impl Operation {
    fn from_suffix(suffix: &str) -> Self {
        match suffix {
            SUBTOPIC_PUSH => Self::Push,
            SUBTOPIC_DRAIN => Self::Drain,
            SUBTOPIC_EMPTY => Self::Empty,
            _ => Self::Other,
        }
    }
}

/// A parsed topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Servo index from the topic.
    pub servo: usize,
    /// Requested operation.
    pub operation: Operation,
}

/// Body of a push message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PushPayload {
    /// Targets in execution order.
    #[serde(default)]
    pub targets: heapless::Vec<Target, QUEUE_CAPACITY>,
}

fn invalid_topic(topic: &str) -> Error {
    Error::Command(CommandError::InvalidTopic(truncate::<64>(topic)))
}

/// Split a topic into servo index and operation.
///
/// # Errors
///
/// Returns `CommandError::InvalidTopic` if the topic does not start with
/// `prefix` or carries no servo index of plain decimal digits followed by
/// a `/`.
pub fn parse_topic(prefix: &str, topic: &str) -> Result<Route> {
    let remainder = topic
        .strip_prefix(prefix)
        .ok_or_else(|| invalid_topic(topic))?;

    let slash = remainder.find('/').ok_or_else(|| invalid_topic(topic))?;
    let (index, suffix) = remainder.split_at(slash);

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_topic(topic));
    }
    let servo = index.parse::<usize>().map_err(|_| invalid_topic(topic))?;

    Ok(Route {
        servo,
        operation: Operation::from_suffix(suffix),
    })
}

/// Decode a push payload.
///
/// A missing `targets` field decodes as an empty list.
pub fn decode_push(payload: &str) -> Result<PushPayload> {
    serde_json::from_str(payload).map_err(|e| {
        let msg = e.to_string();
        Error::Command(CommandError::MalformedPayload(truncate::<128>(&msg)))
    })
}

/// Build the topic and payload announcing a queue event.
pub fn encode_event(prefix: &str, event: &ServoEvent) -> (String, String) {
    match event.kind {
        QueueEvent::Drain { free } => (
            format!("{prefix}{}{SUBTOPIC_DRAIN}", event.servo),
            serde_json::json!({ "need": free }).to_string(),
        ),
        QueueEvent::Empty => (
            format!("{prefix}{}{SUBTOPIC_EMPTY}", event.servo),
            String::from("{}"),
        ),
    }
}

/// Route one incoming message into the bank.
///
/// Returns the number of targets queued; messages other than push queue
/// nothing and return `0`. Targets accepted before a rejected one stay
/// queued.
///
/// # Errors
///
/// Returns `CommandError` for a bad topic, servo index or payload, and
/// whatever the bank returns for a rejected target.
pub fn dispatch<A, C>(
    bank: &mut ServoBank<A, C>,
    prefix: &str,
    topic: &str,
    payload: &str,
) -> Result<usize>
where
    A: Actuator,
    C: Clock,
{
    let route = parse_topic(prefix, topic)?;

    if route.servo >= bank.len() {
        return Err(Error::Command(CommandError::InvalidServoIndex(route.servo)));
    }

    match route.operation {
        Operation::Push => {
            let message = decode_push(payload)?;
            bank.push_batch(route.servo, message.targets)
        }
        Operation::Drain | Operation::Empty | Operation::Other => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;
    use crate::config::DEFAULT_TOPIC_PREFIX;
    use crate::error::{QueueError, ServoError};
    use crate::servo::SpeedServoBuilder;

    struct NullActuator;

    impl Actuator for NullActuator {
        type Error = ();

        fn attach(&mut self) -> core::result::Result<(), ()> {
            Ok(())
        }

        fn write(&mut self, _angle: Degrees) -> core::result::Result<(), ()> {
            Ok(())
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            0
        }
    }

    fn bank(count: usize) -> ServoBank<NullActuator, FixedClock> {
        let mut bank = ServoBank::new(FixedClock);
        for _ in 0..count {
            let servo = SpeedServoBuilder::new().actuator(NullActuator).build().unwrap();
            bank.add(servo).unwrap();
        }
        bank
    }

    fn topic(n: usize, suffix: &str) -> String {
        format!("{DEFAULT_TOPIC_PREFIX}{n}{suffix}")
    }

    #[test]
    fn test_parse_topic() {
        let route = parse_topic(DEFAULT_TOPIC_PREFIX, &topic(3, SUBTOPIC_PUSH)).unwrap();
        assert_eq!(
            route,
            Route {
                servo: 3,
                operation: Operation::Push
            }
        );

        let route = parse_topic(DEFAULT_TOPIC_PREFIX, &topic(0, "/buffer/reset")).unwrap();
        assert_eq!(route.operation, Operation::Other);
    }

    #[test]
    fn test_parse_topic_rejects_malformed() {
        let prefix = DEFAULT_TOPIC_PREFIX;

        for bad in [
            "/nodes/other/servo/1/buffer/push",
            "/nodes/arduino/servo/1",
            "/nodes/arduino/servo/x/buffer/push",
            "/nodes/arduino/servo//buffer/push",
            "/nodes/arduino/servo/-1/buffer/push",
            "/nodes/arduino/servo/+1/buffer/push",
            "/nodes/arduino/servo/ 1/buffer/push",
        ] {
            assert!(
                matches!(
                    parse_topic(prefix, bad),
                    Err(Error::Command(CommandError::InvalidTopic(_)))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_push() {
        let message =
            decode_push(r#"{"targets":[{"angle":90,"speed":45},{"angle":10,"speed":200}]}"#)
                .unwrap();
        assert_eq!(
            message.targets.as_slice(),
            &[Target::new(90, 45), Target::new(10, 200)]
        );

        assert!(decode_push("{}").unwrap().targets.is_empty());
        assert!(matches!(
            decode_push("{\"targets\":"),
            Err(Error::Command(CommandError::MalformedPayload(_)))
        ));
    }

    #[test]
    fn test_decode_push_rejects_more_than_capacity() {
        let entries: Vec<String> = (0..=QUEUE_CAPACITY)
            .map(|i| format!(r#"{{"angle":{i},"speed":10}}"#))
            .collect();
        let payload = format!(r#"{{"targets":[{}]}}"#, entries.join(","));

        assert!(decode_push(&payload).is_err());
    }

    #[test]
    fn test_encode_event() {
        let drain = ServoEvent {
            servo: 1,
            kind: QueueEvent::Drain { free: 10 },
        };
        let (topic_name, payload) = encode_event(DEFAULT_TOPIC_PREFIX, &drain);
        assert_eq!(topic_name, "/nodes/arduino/servo/1/buffer/drain");
        assert_eq!(payload, r#"{"need":10}"#);

        let empty = ServoEvent {
            servo: 0,
            kind: QueueEvent::Empty,
        };
        let (topic_name, payload) = encode_event(DEFAULT_TOPIC_PREFIX, &empty);
        assert_eq!(topic_name, "/nodes/arduino/servo/0/buffer/empty");
        assert_eq!(payload, "{}");
    }

    #[test]
    fn test_dispatch_push() {
        let mut bank = bank(2);
        let payload = r#"{"targets":[{"angle":30,"speed":60},{"angle":0,"speed":60}]}"#;

        let queued = dispatch(&mut bank, DEFAULT_TOPIC_PREFIX, &topic(1, SUBTOPIC_PUSH), payload);
        assert_eq!(queued, Ok(2));
        assert_eq!(bank.servo(1).unwrap().queue().len(), 2);
        assert!(bank.servo(0).unwrap().queue().is_empty());
    }

    #[test]
    fn test_dispatch_ignores_other_operations() {
        let mut bank = bank(1);

        let queued = dispatch(&mut bank, DEFAULT_TOPIC_PREFIX, &topic(0, SUBTOPIC_DRAIN), "junk");
        assert_eq!(queued, Ok(0));
    }

    #[test]
    fn test_dispatch_rejects_signed_index() {
        let mut bank = bank(2);
        let signed = format!("{DEFAULT_TOPIC_PREFIX}+1{SUBTOPIC_PUSH}");
        let payload = r#"{"targets":[{"angle":30,"speed":60}]}"#;

        assert!(matches!(
            dispatch(&mut bank, DEFAULT_TOPIC_PREFIX, &signed, payload),
            Err(Error::Command(CommandError::InvalidTopic(_)))
        ));
        assert!(bank.servo(1).unwrap().queue().is_empty());
    }

    #[test]
    fn test_dispatch_invalid_index() {
        let mut bank = bank(2);

        assert_eq!(
            dispatch(&mut bank, DEFAULT_TOPIC_PREFIX, &topic(2, SUBTOPIC_PUSH), "{}"),
            Err(Error::Command(CommandError::InvalidServoIndex(2)))
        );
    }

    #[test]
    fn test_dispatch_propagates_rejections() {
        let mut bank = bank(1);
        let push = topic(0, SUBTOPIC_PUSH);

        let zero = r#"{"targets":[{"angle":5,"speed":10},{"angle":9,"speed":0}]}"#;
        assert_eq!(
            dispatch(&mut bank, DEFAULT_TOPIC_PREFIX, &push, zero),
            Err(Error::Servo(ServoError::ZeroSpeed))
        );
        assert_eq!(bank.servo(0).unwrap().queue().len(), 1);

        let entries: Vec<String> = (0..QUEUE_CAPACITY)
            .map(|i| format!(r#"{{"angle":{i},"speed":10}}"#))
            .collect();
        let full = format!(r#"{{"targets":[{}]}}"#, entries.join(","));
        let result = dispatch(&mut bank, DEFAULT_TOPIC_PREFIX, &push, &full);
        assert!(matches!(result, Err(Error::Queue(QueueError::Full { .. }))));
        assert_eq!(bank.servo(0).unwrap().queue().len(), QUEUE_CAPACITY);
    }
}
