use std::collections::VecDeque;

use super::packet::Packet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

/// Live state of a node: its FIFO of packets awaiting routing, and how many
/// packets it has ever managed to enqueue.
#[derive(Debug, Clone, Default)]
pub struct Node {
    queue: VecDeque<Packet>,
    packets_generated: u64,
}

impl Node {
    #[must_use]
    pub fn new() -> Node {
        Node::default()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub const fn packets_generated(&self) -> u64 {
        self.packets_generated
    }

    #[must_use]
    pub fn head(&self) -> Option<&Packet> {
        self.queue.front()
    }

    pub fn queued(&self) -> impl Iterator<Item = &Packet> {
        self.queue.iter()
    }

    /// Appends a freshly generated packet. The generated counter only moves
    /// when the packet actually makes it into the queue.
    pub fn try_enqueue(&mut self, packet: Packet, max_queue_size: usize) -> Result<(), QueueFull> {
        if self.queue.len() >= max_queue_size {
            return Err(QueueFull);
        }
        self.queue.push_back(packet);
        self.packets_generated += 1;
        Ok(())
    }

    pub(super) fn pop_head(&mut self) -> Option<Packet> {
        self.queue.pop_front()
    }
}
