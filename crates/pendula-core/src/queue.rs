// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A resizable circular queue of owned elements.
//!
//! [`RingQueue`] stores its elements in a fixed arena of slots and walks it with
//! index arithmetic, so pushing and popping never allocate. Growing the queue
//! reallocates immediately; shrinking below the current number of elements is
//! deferred until enough elements have been popped.
//!
//! ```text
//!  oldest                 newest
//!    v                      v
//! [  3  |  4  |  5  |  6  |  7  |     |     |  ]   capacity 8, size 5
//! ```

use crate::error::QueueError;

/// The capacity used by [`RingQueue::default`].
pub const DEFAULT_CAPACITY: usize = 128;

/// A first-in first-out circular queue with a resizable capacity.
#[derive(Debug)]
pub struct RingQueue<T> {
    /// The slot arena. Occupied slots hold `Some`.
    slots: Box<[Option<T>]>,
    /// Number of occupied slots.
    size: usize,
    /// Index of the oldest occupied slot.
    oldest: usize,
    /// Requested capacity that could not be applied yet because more
    /// elements than it allows were stored at the time of the request.
    pending_capacity: Option<usize>,
}

impl<T> RingQueue<T> {
    /// Creates an empty queue able to hold `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidArgument);
        }
        Ok(Self {
            slots: allocate_slots(capacity),
            size: 0,
            oldest: 0,
            pending_capacity: None,
        })
    }

    /// Returns the oldest element.
    pub fn front(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyContainer);
        }
        self.slots[self.oldest]
            .as_ref()
            .ok_or(QueueError::EmptyContainer)
    }

    /// Returns the most recently pushed element.
    pub fn back(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyContainer);
        }
        self.slots[self.slot_index(self.size - 1)]
            .as_ref()
            .ok_or(QueueError::EmptyContainer)
    }

    /// Appends `item` after the newest element.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CapacityExceeded`] if the queue is full.
    pub fn push(&mut self, item: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        let index = self.slot_index(self.size);
        self.slots[index] = Some(item);
        self.size += 1;
        Ok(())
    }

    /// Removes and returns the oldest element.
    ///
    /// A deferred shrink is applied as soon as the remaining elements fit into
    /// the requested capacity.
    pub fn pop(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyContainer);
        }
        let item = self.slots[self.oldest].take();
        self.oldest = (self.oldest + 1) % self.slots.len();
        self.size -= 1;

        if let Some(pending) = self.pending_capacity {
            if self.size <= pending {
                log::debug!(
                    "RingQueue: applying deferred shrink {} -> {}",
                    self.slots.len(),
                    pending
                );
                self.reallocate(pending);
            }
        }

        item.ok_or(QueueError::EmptyContainer)
    }

    /// Pops every element. A pending shrink is applied on the way.
    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
    }

    /// Returns the number of stored elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the intended capacity.
    ///
    /// While a shrink is deferred this is the requested target, not the number
    /// of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.pending_capacity.unwrap_or(self.slots.len())
    }

    /// Returns the number of slots currently allocated.
    pub fn allocated_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Changes the capacity of the queue.
    ///
    /// If `capacity` can hold every stored element the storage is reallocated
    /// right away, keeping the elements in oldest-to-newest order. Otherwise the
    /// request is remembered and applied by a later [`pop`](Self::pop).
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidArgument`] if `capacity` is zero.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidArgument);
        }
        if capacity < self.size {
            log::debug!(
                "RingQueue: deferring shrink to {} while holding {} elements",
                capacity,
                self.size
            );
            self.pending_capacity = Some(capacity);
            return Ok(());
        }
        self.reallocate(capacity);
        Ok(())
    }

    /// Returns `true` if no element is stored.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the queue holds as many elements as its intended capacity.
    pub fn is_full(&self) -> bool {
        self.size >= self.capacity()
    }

    fn slot_index(&self, offset: usize) -> usize {
        (self.oldest + offset) % self.slots.len()
    }

    /// Moves the stored elements into a fresh arena of `capacity` slots,
    /// unwrapping the ring so the oldest element lands at index 0.
    fn reallocate(&mut self, capacity: usize) {
        let mut slots = allocate_slots(capacity);
        for (offset, slot) in slots.iter_mut().take(self.size).enumerate() {
            let index = self.slot_index(offset);
            *slot = self.slots[index].take();
        }
        self.slots = slots;
        self.oldest = 0;
        self.pending_capacity = None;
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self {
            slots: allocate_slots(DEFAULT_CAPACITY),
            size: 0,
            oldest: 0,
            pending_capacity: None,
        }
    }
}

fn allocate_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, items: std::ops::Range<i32>) -> RingQueue<i32> {
        let mut queue = RingQueue::new(capacity).unwrap();
        for i in items {
            queue.push(i).unwrap();
        }
        queue
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            RingQueue::<i32>::new(0).unwrap_err(),
            QueueError::InvalidArgument
        );
        let mut queue = RingQueue::<i32>::default();
        assert_eq!(queue.set_capacity(0), Err(QueueError::InvalidArgument));
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = filled(4, 0..4);
        assert!(queue.is_full());
        let popped: Vec<_> = (0..4).map(|_| queue.pop().unwrap()).collect();
        assert_eq!(popped, vec![0, 1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_front_and_back() {
        let mut queue = filled(3, 10..12);
        assert_eq!(*queue.front().unwrap(), 10);
        assert_eq!(*queue.back().unwrap(), 11);
        queue.pop().unwrap();
        assert_eq!(*queue.front().unwrap(), 11);
        assert_eq!(*queue.back().unwrap(), 11);
    }

    #[test]
    fn test_empty_container_errors() {
        let mut queue = RingQueue::<i32>::new(2).unwrap();
        assert_eq!(queue.front(), Err(QueueError::EmptyContainer));
        assert_eq!(queue.back(), Err(QueueError::EmptyContainer));
        assert_eq!(queue.pop(), Err(QueueError::EmptyContainer));
    }

    #[test]
    fn test_push_to_full_queue_fails() {
        let mut queue = filled(2, 0..2);
        assert_eq!(
            queue.push(2),
            Err(QueueError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(queue.size(), 2);
    }

    #[test]
    fn test_wraparound_keeps_order() {
        let mut queue = filled(3, 0..3);
        queue.pop().unwrap();
        queue.pop().unwrap();
        queue.push(3).unwrap();
        queue.push(4).unwrap();
        // Newest slot index is now behind the oldest one.
        assert_eq!(*queue.back().unwrap(), 4);
        let popped: Vec<_> = (0..3).map(|_| queue.pop().unwrap()).collect();
        assert_eq!(popped, vec![2, 3, 4]);
    }

    #[test]
    fn test_grow_preserves_wrapped_order() {
        let mut queue = filled(4, 0..4);
        queue.pop().unwrap();
        queue.pop().unwrap();
        queue.push(4).unwrap();
        queue.push(5).unwrap();

        queue.set_capacity(8).unwrap();
        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.allocated_capacity(), 8);
        for i in 6..10 {
            queue.push(i).unwrap();
        }
        assert!(queue.is_full());
        let popped: Vec<_> = (0..8).map(|_| queue.pop().unwrap()).collect();
        assert_eq!(popped, (2..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_shrink_to_size_is_immediate() {
        let mut queue = filled(8, 0..3);
        queue.set_capacity(3).unwrap();
        assert_eq!(queue.allocated_capacity(), 3);
        assert!(queue.is_full());
        assert_eq!(*queue.front().unwrap(), 0);
    }

    #[test]
    fn test_shrink_is_deferred_until_elements_fit() {
        let mut queue = filled(8, 0..5);

        queue.set_capacity(2).unwrap();
        assert_eq!(queue.capacity(), 2);
        assert_eq!(queue.size(), 5);
        assert_eq!(queue.allocated_capacity(), 8);
        assert!(queue.is_full());

        assert_eq!(queue.pop(), Ok(0));
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.allocated_capacity(), 8);
        assert_eq!(queue.pop(), Ok(2));
        assert_eq!(queue.allocated_capacity(), 2);

        assert_eq!(
            queue.push(99),
            Err(QueueError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(queue.pop(), Ok(3));
        assert_eq!(queue.pop(), Ok(4));
    }

    #[test]
    fn test_clear_applies_pending_shrink() {
        let mut queue = filled(6, 0..6);
        queue.set_capacity(1).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.allocated_capacity(), 1);
        queue.push(7).unwrap();
        assert!(queue.is_full());
    }

    #[test]
    fn test_owned_values_are_dropped_on_pop() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut queue = RingQueue::new(2).unwrap();
        queue.push(Rc::clone(&tracker)).unwrap();
        queue.push(Rc::clone(&tracker)).unwrap();
        assert_eq!(Rc::strong_count(&tracker), 3);

        drop(queue.pop().unwrap());
        assert_eq!(Rc::strong_count(&tracker), 2);
        queue.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
