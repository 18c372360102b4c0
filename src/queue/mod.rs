//! Queue module for servo-motion.
//!
//! Provides the per-servo bounded command queue and the target value type.

mod ring;
mod target;

pub use ring::{CommandQueue, Popped, QueueEvent};
pub use target::Target;

/// Capacity of every servo's target queue.
pub const QUEUE_CAPACITY: usize = 20;

/// Queue of pending targets owned by one servo.
pub type TargetQueue = CommandQueue<Target, QUEUE_CAPACITY>;
