//! In-memory key-value stores and the FIFO waiting queue.
//!
//! Both are owned by a single [`EventProcessor`](crate::EventProcessor) and
//! need no locking.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use thiserror::Error;

/// Queue errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `pop` or `peek` on a queue with no items.
    #[error("queue is empty")]
    Empty,
}

/// Key-value storage contract.
pub trait Store<K, V> {
    /// Returns the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Inserts or replaces the value stored under `key`.
    fn set(&mut self, key: K, value: V);

    /// Removes `key`, returning its value. Absent keys are a no-op.
    fn delete(&mut self, key: &K) -> Option<V>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unordered snapshot of every entry.
    fn entries(&self) -> Vec<(&K, &V)>;
}

/// [`Store`] backed by a `HashMap`.
#[derive(Debug, Clone)]
pub struct InMemoryStore<K, V> {
    items: HashMap<K, V>,
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Eq + Hash, V> Store<K, V> for InMemoryStore<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        self.items.get(key)
    }

    fn set(&mut self, key: K, value: V) {
        self.items.insert(key, value);
    }

    fn delete(&mut self, key: &K) -> Option<V> {
        self.items.remove(key)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.items.iter().collect()
    }
}

/// FIFO queue contract. No deduplication, no capacity limit.
pub trait Queue<T> {
    /// Appends `item` at the back.
    fn push(&mut self, item: T);

    /// Removes and returns the oldest item.
    fn pop(&mut self) -> Result<T, QueueError>;

    /// Returns the oldest item without removing it.
    fn peek(&self) -> Result<&T, QueueError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `item` is anywhere in the queue.
    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq;

    /// Removes every item.
    fn clear(&mut self);

    /// Removes every item, returning them oldest first.
    fn drain_all(&mut self) -> Vec<T>;
}

/// [`Queue`] backed by a `VecDeque`.
#[derive(Debug, Clone)]
pub struct InMemoryQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for InMemoryQueue<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> InMemoryQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Queue<T> for InMemoryQueue<T> {
    fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    fn pop(&mut self) -> Result<T, QueueError> {
        self.items.pop_front().ok_or(QueueError::Empty)
    }

    fn peek(&self) -> Result<&T, QueueError> {
        self.items.front().ok_or(QueueError::Empty)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn drain_all(&mut self) -> Vec<T> {
        self.items.drain(..).collect()
    }
}
