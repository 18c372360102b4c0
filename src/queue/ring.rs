//! Bounded FIFO with drain and empty notifications.

use heapless::Deque;

/// Notification produced by a successful pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueEvent {
    /// Occupancy just dropped to half capacity; `free` slots can be refilled.
    Drain {
        /// Free slots at the moment of the pop.
        free: usize,
    },
    /// The last queued item was removed.
    Empty,
}

/// An item removed from the queue together with the notification it raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Popped<T> {
    /// The removed item.
    pub item: T,
    /// At most one notification per pop.
    pub event: Option<QueueEvent>,
}

/// Fixed-capacity ring buffer of `N` items.
///
/// Capacity never grows. Notifications are never raised by `push`; `pop`
/// raises [`QueueEvent::Empty`] when the queue becomes empty and otherwise
/// [`QueueEvent::Drain`] when the count lands exactly on `N / 2`.
#[derive(Debug, Clone)]
pub struct CommandQueue<T, const N: usize> {
    items: Deque<T, N>,
}

impl<T, const N: usize> Default for CommandQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> CommandQueue<T, N> {
    /// Maximum number of queued items.
    pub const CAPACITY: usize = N;

    /// Occupancy at which a drain notification fires.
    pub const HALF: usize = N / 2;

    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
        }
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// Returns the item back, leaving the queue untouched, when full.
    pub fn push(&mut self, item: T) -> core::result::Result<(), T> {
        self.items.push_back(item)
    }

    /// Remove the oldest item.
    pub fn pop(&mut self) -> Option<Popped<T>> {
        let item = self.items.pop_front()?;

        let remaining = self.items.len();
        let event = if remaining == 0 {
            Some(QueueEvent::Empty)
        } else if remaining == Self::HALF {
            Some(QueueEvent::Drain {
                free: N - remaining,
            })
        } else {
            None
        };

        Some(Popped { item, event })
    }

    /// Oldest item without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if the queue is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Number of items that can still be pushed.
    #[inline]
    pub fn free(&self) -> usize {
        N - self.items.len()
    }

    /// Queued items, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Queue = CommandQueue<u32, 20>;

    fn filled(n: u32) -> Queue {
        let mut queue = Queue::new();
        for i in 0..n {
            queue.push(i).unwrap();
        }
        queue
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = filled(5);

        for expected in 0..5 {
            assert_eq!(queue.pop().map(|p| p.item), Some(expected));
        }
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_full_push_is_rejected() {
        let mut queue = filled(20);

        assert!(queue.is_full());
        assert_eq!(queue.push(99), Err(99));
        assert_eq!(queue.len(), 20);
        assert_eq!(queue.iter().copied().last(), Some(19));
    }

    #[test]
    fn test_single_pop_raises_empty_only() {
        let mut queue = filled(1);

        let popped = queue.pop().unwrap();
        assert_eq!(popped.event, Some(QueueEvent::Empty));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_fires_once_at_half() {
        let mut queue = filled(20);

        let events: heapless::Vec<(usize, Option<QueueEvent>), 10> = (0..10)
            .map(|_| {
                let popped = queue.pop().unwrap();
                (queue.len(), popped.event)
            })
            .collect();

        for (len, event) in events {
            if len == 10 {
                assert_eq!(event, Some(QueueEvent::Drain { free: 10 }));
            } else {
                assert_eq!(event, None);
            }
        }
    }

    #[test]
    fn test_push_never_notifies_and_drain_rearms() {
        let mut queue = filled(11);

        assert_eq!(queue.pop().unwrap().event, Some(QueueEvent::Drain { free: 10 }));
        // Refill above half, the next crossing fires again
        queue.push(100).unwrap();
        assert_eq!(queue.pop().unwrap().event, Some(QueueEvent::Drain { free: 10 }));
    }

    #[test]
    fn test_wraparound_keeps_order() {
        let mut queue = filled(20);
        for _ in 0..15 {
            queue.pop();
        }
        for i in 20..35 {
            queue.push(i).unwrap();
        }

        let drained: heapless::Vec<u32, 20> =
            core::iter::from_fn(|| queue.pop().map(|p| p.item)).collect();
        assert_eq!(drained.len(), 20);
        assert!(drained.iter().zip(15..35).all(|(a, b)| *a == b));
    }
}
