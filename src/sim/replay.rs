//! Fixed-delay input replay
//!
//! The past runner re-lives the present runner's input a constant number of
//! ticks later. The buffer always holds exactly `capacity` samples; each tick
//! pushes the newest and pops the oldest.

use std::collections::VecDeque;

/// Fixed-length FIFO that hands back the sample pushed `capacity` calls ago
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayBuffer<T = bool> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> ReplayBuffer<T> {
    /// Create a buffer pre-filled with `capacity` copies of `fill`.
    ///
    /// Returns `None` for a zero capacity: there would be no oldest sample
    /// to hand back.
    pub fn new(capacity: usize, fill: T) -> Option<Self> {
        if capacity == 0 {
            return None;
        }
        let mut samples = VecDeque::with_capacity(capacity + 1);
        samples.extend(std::iter::repeat_n(fill, capacity));
        Some(Self { samples, capacity })
    }

    /// Append `value` and return the sample pushed `capacity` calls earlier
    /// (or the pre-fill value during the first `capacity` calls).
    pub fn push_and_pop_oldest(&mut self, value: T) -> T {
        // Length is `capacity >= 1` between calls, so the front always exists
        match self.samples.pop_front() {
            Some(oldest) => {
                self.samples.push_back(value);
                oldest
            }
            None => value,
        }
    }

    /// Refill with `fill` (game restart)
    pub fn reset(&mut self, fill: T) {
        self.samples.clear();
        self.samples.extend(std::iter::repeat_n(fill, self.capacity));
    }

    /// The sample that the next push will pop
    pub fn oldest(&self) -> Option<&T> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }
}
