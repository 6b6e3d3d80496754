//! Bounded ready queue for Round-Robin.
//!
//! A ring buffer of job indices with capacity equal to the job count. At
//! most one entry per unfinished job is ever live, so the buffer never needs
//! to grow.

/// Returned when pushing onto a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull {
    /// Capacity of the queue that rejected the push.
    pub capacity: usize,
}

/// Fixed-capacity FIFO of job indices.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    slots: Vec<usize>,
    front: usize,
    len: usize,
}

impl ReadyQueue {
    /// Creates an empty queue holding at most `capacity` indices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity],
            front: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an index at the tail.
    pub fn push(&mut self, index: usize) -> Result<(), QueueFull> {
        if self.len == self.capacity() {
            return Err(QueueFull {
                capacity: self.capacity(),
            });
        }
        let back = (self.front + self.len) % self.capacity();
        self.slots[back] = index;
        self.len += 1;
        Ok(())
    }

    /// Removes the index at the head.
    pub fn pop(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let index = self.slots[self.front];
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;
        Some(index)
    }

    /// Head of the queue without removing it.
    pub fn peek(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.slots[self.front])
    }
}
