//! Bounded, blocking, closable FIFO queue.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::config::QueueConfig;
use crate::error::{Error, Result};

/// Capacity used by [`Queue::new`] and [`Queue::from_values`].
pub const DEFAULT_CAPACITY: usize = 16;

/// A bounded FIFO queue shared between producer and consumer threads.
///
/// A `Queue` is a handle: clones refer to the same underlying buffer, so one
/// clone can be moved into a producer thread and another into a consumer.
/// Adding to a full queue blocks until space frees up. Removing from an empty
/// queue blocks until a value arrives or the queue is closed.
///
/// # Example
///
/// ```rust
/// use std::thread;
///
/// use componentry_queue::Queue;
///
/// let queue = Queue::with_capacity(2).unwrap();
/// let producer = {
///     let queue = queue.clone();
///     thread::spawn(move || {
///         for value in 1..=5 {
///             queue.add_value(value).unwrap();
///         }
///         queue.close().unwrap();
///     })
/// };
///
/// let mut received = Vec::new();
/// while let Some(value) = queue.remove_first() {
///     received.push(value);
/// }
/// producer.join().unwrap();
/// assert_eq!(received, [1, 2, 3, 4, 5]);
/// ```
pub struct Queue<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

struct State<T> {
    values: VecDeque<T>,
    closed: bool,
}

impl<T> Queue<T> {
    /// Create an empty queue with the default capacity.
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY, VecDeque::with_capacity(DEFAULT_CAPACITY))
    }

    /// Create an empty queue holding at most `capacity` values.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_argument(
                "queue capacity must be at least one",
            ));
        }
        Ok(Self::build(capacity, VecDeque::with_capacity(capacity)))
    }

    pub fn from_config(config: &QueueConfig) -> Result<Self> {
        Self::with_capacity(config.capacity)
    }

    /// Create an open queue preloaded with `values` in iteration order.
    ///
    /// The capacity is the default or the number of values, whichever is
    /// larger, so preloading never blocks.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: VecDeque<T> = values.into_iter().collect();
        let capacity = values.len().max(DEFAULT_CAPACITY);
        Self::build(capacity, values)
    }

    fn build(capacity: usize, values: VecDeque<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    values,
                    closed: false,
                }),
                not_empty: Condvar::new(),
                not_full: Condvar::new(),
                capacity,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Number of values currently buffered.
    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().values.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Append a value, blocking while the queue is full.
    ///
    /// Fails with [`Error::ClosedQueue`] if the queue is closed, including
    /// when it is closed while this call is waiting for space.
    pub fn add_value(&self, value: T) -> Result<()> {
        self.push(value).map_err(|_| Error::ClosedQueue)
    }

    /// Like [`add_value`](Self::add_value), but hands the value back when
    /// the queue is closed.
    pub(crate) fn push(&self, value: T) -> std::result::Result<(), T> {
        let mut state = self.lock();
        loop {
            if state.closed {
                return Err(value);
            }
            if state.values.len() < self.shared.capacity {
                break;
            }
            state = self
                .shared
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.values.push_back(value);
        drop(state);
        self.shared.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest value, blocking while the queue is empty and open.
    ///
    /// Returns `None` once the queue is closed and drained.
    pub fn remove_first(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(value) = state.values.pop_front() {
                drop(state);
                self.shared.not_full.notify_one();
                return Some(value);
            }
            if state.closed {
                return None;
            }
            state = self
                .shared
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Close the queue.
    ///
    /// Buffered values stay available to consumers. Blocked producers fail
    /// and blocked consumers wake up. Closing twice is an error.
    pub fn close(&self) -> Result<()> {
        let mut state = self.lock();
        if state.closed {
            return Err(Error::ClosedQueue);
        }
        state.closed = true;
        drop(state);
        self.shared.not_empty.notify_all();
        self.shared.not_full.notify_all();
        Ok(())
    }

    // Queue state stays consistent across every critical section, so a
    // panic elsewhere while holding the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Queue<T> {
    /// Snapshot of the buffered values, oldest first.
    pub fn values(&self) -> Vec<T> {
        self.lock().values.iter().cloned().collect()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Queue")
            .field("capacity", &self.shared.capacity)
            .field("len", &state.values.len())
            .field("closed", &state.closed)
            .finish()
    }
}
