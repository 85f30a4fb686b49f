//! Outbound message buffer
//!
//! Holds messages until a bound channel accepts them. Drained in FIFO order.

use buddy_domain::OutboundMessage;
use std::collections::VecDeque;

/// Unbounded FIFO of undelivered outbound messages.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<OutboundMessage>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: OutboundMessage) {
        self.queue.push_back(message);
    }

    /// Return a message whose delivery failed to the head of the queue.
    pub fn push_front(&mut self, message: OutboundMessage) {
        self.queue.push_front(message);
    }

    pub fn pop_front(&mut self) -> Option<OutboundMessage> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything still queued, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut outbox = Outbox::new();
        outbox.push(OutboundMessage::assistant("one"));
        outbox.push(OutboundMessage::error("two"));

        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox.pop_front().unwrap().content(), "one");
        assert_eq!(outbox.pop_front().unwrap().content(), "two");
        assert!(outbox.pop_front().is_none());
    }

    #[test]
    fn test_clear_reports_dropped() {
        let mut outbox = Outbox::new();
        outbox.push(OutboundMessage::assistant("a"));
        outbox.push(OutboundMessage::assistant("b"));

        assert_eq!(outbox.clear(), 2);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_push_front_goes_ahead_of_queue() {
        let mut outbox = Outbox::new();
        outbox.push(OutboundMessage::assistant("two"));
        outbox.push_front(OutboundMessage::assistant("one"));

        assert_eq!(outbox.pop_front().unwrap().content(), "one");
        assert_eq!(outbox.pop_front().unwrap().content(), "two");
    }
}
