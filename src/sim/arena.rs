//! Index-based entity storage with deferred removal
//!
//! Entities are never removed or inserted while a tick iterates over them.
//! Removal is a mark; spawns queue up. `compact` applies both at the end of
//! the tick, keeping survivors in their original order.

/// Dense entity list with mark-for-removal semantics
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: Vec<T>,
    doomed: Vec<bool>,
    spawned: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            doomed: Vec::new(),
            spawned: Vec::new(),
        }
    }

    /// Queue an entity; it becomes visible after the next `compact`
    pub fn spawn(&mut self, item: T) {
        self.spawned.push(item);
    }

    /// Insert immediately (setup only, outside of a tick)
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.doomed.push(false);
    }

    /// Mark the entity at `index` for removal at the next `compact`
    pub fn mark_removed(&mut self, index: usize) {
        if let Some(flag) = self.doomed.get_mut(index) {
            *flag = true;
        }
    }

    /// Mark every entity matching `pred`
    pub fn mark_where(&mut self, mut pred: impl FnMut(&T) -> bool) {
        for (item, flag) in self.items.iter().zip(self.doomed.iter_mut()) {
            if pred(item) {
                *flag = true;
            }
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.doomed.get(index).copied().unwrap_or(false)
    }

    /// Drop marked entities and append queued spawns
    pub fn compact(&mut self) {
        if self.doomed.iter().any(|d| *d) {
            let mut flags = self.doomed.iter();
            self.items.retain(|_| !flags.next().copied().unwrap_or(false));
        }
        self.items.append(&mut self.spawned);
        self.doomed.clear();
        self.doomed.resize(self.items.len(), false);
    }

    /// Cap the live count, dropping the oldest entities first
    pub fn truncate_oldest(&mut self, max: usize) {
        if self.items.len() > max {
            let excess = self.items.len() - max;
            self.items.drain(..excess);
            self.doomed.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.doomed.clear();
        self.spawned.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Entities plus their index, for marking during iteration
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Arena<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_survive_until_compact() {
        let mut arena = Arena::new();
        for i in 0..5 {
            arena.insert(i);
        }
        arena.mark_removed(1);
        arena.mark_removed(3);
        assert_eq!(arena.len(), 5);
        assert!(arena.is_marked(1));

        arena.compact();
        assert_eq!(arena.as_slice(), &[0, 2, 4]);
        assert!(!arena.is_marked(1));
    }

    #[test]
    fn test_mark_where() {
        let mut arena = Arena::new();
        for i in 0..6 {
            arena.insert(i);
        }
        arena.mark_where(|v| v % 2 == 0);
        arena.compact();
        assert_eq!(arena.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn test_spawn_deferred() {
        let mut arena = Arena::new();
        arena.insert(1);
        arena.spawn(2);
        assert_eq!(arena.len(), 1);
        arena.compact();
        assert_eq!(arena.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_mark_out_of_range_ignored() {
        let mut arena: Arena<u8> = Arena::new();
        arena.mark_removed(10);
        arena.compact();
        assert!(arena.is_empty());
    }

    #[test]
    fn test_truncate_oldest() {
        let mut arena = Arena::new();
        for i in 0..10 {
            arena.insert(i);
        }
        arena.truncate_oldest(4);
        assert_eq!(arena.as_slice(), &[6, 7, 8, 9]);
    }
}
