//! Componentry queues: bounded, blocking, closable FIFO queues and the
//! relays that compose them.
//!
//! - [`Queue`]: a cloneable handle to a bounded buffer shared between threads
//! - [`Group`]: a wait group for the threads that feed and drain queues
//! - [`Queue::fork`], [`Queue::split`], [`Queue::join`]: fan-out and fan-in
//!
//! # Example
//!
//! ```rust
//! use componentry_queue::{Group, Queue};
//!
//! let group = Group::new();
//! let input = Queue::new();
//! let outputs = Queue::split(&group, &input, 2).unwrap();
//!
//! for value in 0..4 {
//!     input.add_value(value).unwrap();
//! }
//! input.close().unwrap();
//! group.wait().unwrap();
//!
//! assert_eq!(outputs[0].values(), [0, 2]);
//! assert_eq!(outputs[1].values(), [1, 3]);
//! ```

mod config;
mod error;
mod group;
mod queue;
mod relay;

pub use config::QueueConfig;
pub use error::{Error, Result};
pub use group::Group;
pub use queue::{Queue, DEFAULT_CAPACITY};
