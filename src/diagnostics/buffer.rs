// SPDX-License-Identifier: MPL-2.0
//! Bounded event storage.
//!
//! Holds the most recent events of a session; once full, each push drops the
//! oldest entry.

use std::collections::VecDeque;

pub use crate::domain::diagnostics::BufferCapacity;

/// Ring buffer of the latest `capacity` items, oldest first.
///
/// ```
/// use story_lens::diagnostics::{BufferCapacity, CircularBuffer};
///
/// // Clamped up to the 10-event minimum.
/// let mut buffer = CircularBuffer::new(BufferCapacity::new(0));
/// buffer.extend(0..12u32);
///
/// assert_eq!(buffer.len(), 10);
/// assert_eq!(buffer.iter().next(), Some(&2));
/// assert_eq!(buffer.latest(), Some(&11));
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    items: VecDeque<T>,
    capacity: BufferCapacity,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.value()),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity.value() {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }

    /// Most recently pushed item.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Extend<T> for CircularBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        MIN_DIAGNOSTICS_BUFFER_CAPACITY,
    };
    use crate::domain::diagnostics::buffer_capacity_bounds;
    use crate::domain::story::StoryId;

    #[test]
    fn capacity_bounds_follow_config() {
        assert_eq!(buffer_capacity_bounds::MIN, MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(buffer_capacity_bounds::MAX, MAX_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            buffer_capacity_bounds::DEFAULT,
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn full_buffer_drops_oldest_story() {
        let mut buffer = CircularBuffer::new(BufferCapacity::new(MIN_DIAGNOSTICS_BUFFER_CAPACITY));
        buffer.extend((0..=MIN_DIAGNOSTICS_BUFFER_CAPACITY).map(|n| StoryId::new(format!("s{n}"))));

        assert_eq!(buffer.len(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(buffer.iter().next().map(StoryId::as_str), Some("s1"));
        let last = format!("s{MIN_DIAGNOSTICS_BUFFER_CAPACITY}");
        assert_eq!(buffer.latest().map(StoryId::as_str), Some(last.as_str()));
    }

    #[test]
    fn len_never_exceeds_capacity() {
        let mut buffer = CircularBuffer::new(BufferCapacity::new(10));
        for n in 0..25 {
            buffer.push(n);
            assert!(buffer.len() <= buffer.capacity());
        }
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), (15..25).collect::<Vec<_>>());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = CircularBuffer::new(BufferCapacity::new(500));
        buffer.push(1u8);
        buffer.clear();

        assert!(buffer.is_empty());
        assert!(buffer.latest().is_none());
        assert_eq!(buffer.capacity(), 500);
    }
}
