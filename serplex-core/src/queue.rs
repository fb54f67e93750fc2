//! Bounded FIFO of pending commands
//!
//! Insertion never evicts: when the queue is full the newest request is
//! rejected and the queued entries stay exactly as they were.

use heapless::Deque;

use crate::command::Command;
use crate::error::DriverError;

/// Number of commands the queue holds
pub const QUEUE_CAPACITY: usize = 8;

/// Fixed-capacity ring buffer of commands
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    entries: Deque<Command, QUEUE_CAPACITY>,
}

impl CommandQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
        }
    }

    /// Append a command at the tail
    pub fn push(&mut self, command: Command) -> Result<(), DriverError> {
        self.entries
            .push_back(command)
            .map_err(|_| DriverError::QueueFull)
    }

    /// Remove the command at the head
    pub fn pop(&mut self) -> Option<Command> {
        self.entries.pop_front()
    }

    /// Peek at the command at the head
    pub fn front(&self) -> Option<&Command> {
        self.entries.front()
    }

    /// Drop every pending command
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no command is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if another push would be rejected
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Iterate pending commands from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::write(1)).unwrap();
        queue.push(Command::shift(2)).unwrap();
        queue.push(Command::latch()).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Command::write(1)));
        assert_eq!(queue.pop(), Some(Command::shift(2)));
        assert_eq!(queue.pop(), Some(Command::latch()));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_full_rejects_newest() {
        let mut queue = CommandQueue::new();
        for value in 0..QUEUE_CAPACITY as u8 {
            assert!(queue.push(Command::write(value)).is_ok());
        }
        assert!(queue.is_full());

        assert_eq!(queue.push(Command::write(8)), Err(DriverError::QueueFull));
        assert_eq!(queue.len(), QUEUE_CAPACITY);
        assert_eq!(queue.front(), Some(&Command::write(0)));
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut queue = CommandQueue::new();
        queue.push(Command::write(9)).unwrap();
        queue.clear();
        assert!(queue.is_empty());

        queue.push(Command::clear()).unwrap();
        assert_eq!(queue.pop(), Some(Command::clear()));
    }

    #[test]
    fn test_wraps_around_ring() {
        let mut queue = CommandQueue::new();
        for round in 0..3u8 {
            for i in 0..QUEUE_CAPACITY as u8 {
                queue.push(Command::write(round * 10 + i)).unwrap();
            }
            for i in 0..QUEUE_CAPACITY as u8 {
                assert_eq!(queue.pop(), Some(Command::write(round * 10 + i)));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_fifo_up_to_capacity(values in proptest::collection::vec(any::<u8>(), 0..=QUEUE_CAPACITY)) {
            let mut queue = CommandQueue::new();
            for &v in &values {
                prop_assert!(queue.push(Command::write(v)).is_ok());
            }
            for &v in &values {
                prop_assert_eq!(queue.pop(), Some(Command::write(v)));
            }
            prop_assert!(queue.is_empty());
        }

        #[test]
        fn prop_overflow_leaves_entries_intact(
            values in proptest::collection::vec(any::<u8>(), QUEUE_CAPACITY),
            extra in any::<u8>(),
        ) {
            let mut queue = CommandQueue::new();
            for &v in &values {
                queue.push(Command::write(v)).unwrap();
            }
            prop_assert_eq!(queue.push(Command::shift(extra)), Err(DriverError::QueueFull));

            let kept: heapless::Vec<u8, QUEUE_CAPACITY> = queue.iter().map(|c| c.payload).collect();
            prop_assert_eq!(kept.as_slice(), values.as_slice());
        }
    }
}
