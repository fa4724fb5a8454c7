//! Componentry: generic agents and concurrent queues built on recursive
//! collation.
//!
//! The framework is layered:
//! - [`agent`]: the [`Collator`], [`Sorter`], [`Generator`] and [`Cursor`]
//!   agents that work on values of any [`Collatable`] type
//! - [`queue`]: bounded [`Queue`]s and their fork, split and join relays
//!
//! This crate re-exports both layers and adds module-level constructors, a
//! combined [`FrameworkConfig`] and an [`Error`] that wraps every layer's
//! failures.
//!
//! # Example
//!
//! ```rust
//! use componentry::Rank;
//!
//! let group = componentry::group();
//! let input = componentry::queue_from_values([5i64, 3, 9, 1]);
//! input.close().unwrap();
//!
//! let branches = componentry::split(&group, &input, 2).unwrap();
//! let merged = componentry::join(&group, &branches).unwrap();
//! group.wait().unwrap();
//!
//! let mut values = merged.values();
//! componentry::sorter::<i64>().sort_values(&mut values).unwrap();
//! assert_eq!(values, [1, 3, 5, 9]);
//!
//! let collator = componentry::collator();
//! assert_eq!(collator.rank_values(&values[0], &values[1]).unwrap(), Rank::Lesser);
//! ```

mod config;
mod error;

pub use componentry_agent as agent;
pub use componentry_queue as queue;

pub use componentry_agent::{
    Collatable, Collator, CollatorConfig, Complex, Cursor, Generator, Kind, Rank, RankingFunction,
    Record, SecureGenerator, Shared, Sorter, Value,
};
pub use componentry_queue::{Group, Queue, QueueConfig};
pub use config::FrameworkConfig;
pub use error::{Error, Result};

/// A collator with the default maximum depth of 16.
pub fn collator() -> Collator {
    Collator::new()
}

/// A collator that fails once traversal goes deeper than `maximum_depth`.
pub fn collator_with_maximum_depth(maximum_depth: usize) -> Result<Collator> {
    Ok(Collator::with_maximum_depth(maximum_depth)?)
}

/// A sorter using the natural ranking of the default collator.
pub fn sorter<V: Collatable + 'static>() -> Sorter<V> {
    Sorter::new()
}

/// A sorter using a caller-supplied ranking function.
pub fn sorter_with_ranker<V, F>(ranker: F) -> Sorter<V>
where
    V: 'static,
    F: Fn(&V, &V) -> Rank + Send + Sync + 'static,
{
    Sorter::with_ranker(ranker)
}

pub fn generator() -> SecureGenerator {
    SecureGenerator::new()
}

pub fn cursor<V>(values: &[V]) -> Cursor<'_, V> {
    Cursor::new(values)
}

pub fn group() -> Group {
    Group::new()
}

/// An empty queue with the default capacity of 16.
pub fn queue<T>() -> Queue<T> {
    Queue::new()
}

pub fn queue_with_capacity<T>(capacity: usize) -> Result<Queue<T>> {
    Ok(Queue::with_capacity(capacity)?)
}

/// An open queue preloaded with `values`.
pub fn queue_from_values<T, I>(values: I) -> Queue<T>
where
    I: IntoIterator<Item = T>,
{
    Queue::from_values(values)
}

/// See [`Queue::fork`].
pub fn fork<T: Clone + Send + 'static>(
    group: &Group,
    input: &Queue<T>,
    count: usize,
) -> Result<Vec<Queue<T>>> {
    Ok(Queue::fork(group, input, count)?)
}

/// See [`Queue::split`].
pub fn split<T: Send + 'static>(
    group: &Group,
    input: &Queue<T>,
    count: usize,
) -> Result<Vec<Queue<T>>> {
    Ok(Queue::split(group, input, count)?)
}

/// See [`Queue::join`].
pub fn join<T: Send + 'static>(group: &Group, inputs: &[Queue<T>]) -> Result<Queue<T>> {
    Ok(Queue::join(group, inputs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_use_defaults() {
        assert_eq!(collator().maximum_depth(), 16);
        assert_eq!(queue::<u8>().capacity(), 16);
        assert!(group().is_empty());
    }

    #[test]
    fn constructor_failures_are_wrapped() {
        assert!(matches!(
            collator_with_maximum_depth(0),
            Err(Error::Agent(agent::Error::InvalidArgument { .. }))
        ));
        assert!(matches!(
            queue_with_capacity::<u8>(0),
            Err(Error::Queue(queue::Error::InvalidArgument { .. }))
        ));
        let group = group();
        assert!(matches!(
            fork(&group, &queue::<u8>(), 1),
            Err(Error::Queue(queue::Error::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn cursor_walks_slots() {
        let values = ["a", "b"];
        let mut cursor = cursor(&values);
        assert_eq!(cursor.next(), Some(&"a"));
        assert!(cursor.has_next());
    }
}
