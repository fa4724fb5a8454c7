//! Wait group for background tasks.

use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};

/// Tracks background tasks so a caller can wait for all of them.
///
/// Relays created by [`Queue::fork`](crate::Queue::fork),
/// [`Queue::split`](crate::Queue::split) and [`Queue::join`](crate::Queue::join)
/// register here. Callers may register their own producers and consumers
/// too. Tasks that are still running when the group is dropped keep running
/// detached.
///
/// # Example
///
/// ```rust
/// use componentry_queue::{Group, Queue};
///
/// let group = Group::new();
/// let queue = Queue::new();
/// let producer = queue.clone();
/// group
///     .spawn("producer", move || {
///         producer.add_value(42).unwrap();
///         producer.close().unwrap();
///     })
///     .unwrap();
///
/// group.wait().unwrap();
/// assert_eq!(queue.remove_first(), Some(42));
/// ```
#[derive(Default)]
pub struct Group {
    tasks: Mutex<Vec<Task>>,
}

struct Task {
    name: String,
    handle: JoinHandle<()>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on a new named thread and register it with the group.
    pub fn spawn<F>(&self, name: impl Into<String>, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let name = name.into();
        let handle = thread::Builder::new().name(name.clone()).spawn(task)?;
        tracing::trace!(task = %name, "task spawned");
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Task { name, handle });
        Ok(())
    }

    /// Number of registered tasks not yet waited on.
    pub fn len(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block until every registered task has finished.
    ///
    /// All tasks are joined even if some panicked; the first panic is
    /// reported as [`Error::TaskPanicked`].
    pub fn wait(&self) -> Result<()> {
        let tasks: Vec<Task> = std::mem::take(
            &mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner),
        );
        let mut outcome = Ok(());
        for Task { name, handle } in tasks {
            if handle.join().is_err() {
                tracing::warn!(task = %name, "task panicked");
                if outcome.is_ok() {
                    outcome = Err(Error::TaskPanicked { name });
                }
            }
        }
        outcome
    }
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group").field("tasks", &self.len()).finish()
    }
}
