//! Componentry agents: operations on values of any type.
//!
//! This layer holds the agents that collection types delegate to:
//! - `Collator`: recursive structural equality and ranking with a depth guard
//! - `Sorter`: stable sorting, reversal and shuffling with a pluggable ranker
//! - `Generator`: cryptographically secure random values
//! - `Cursor`: bidirectional iteration over the slots of a sequence
//!
//! Values reach the collator through the [`Collatable`] capability, which
//! describes them as a [`Value`] tree.
//!
//! # Example
//!
//! ```rust
//! use componentry_agent::{Collator, Rank, Sorter};
//!
//! let collator = Collator::new();
//! assert_eq!(collator.rank_values("first", "second").unwrap(), Rank::Lesser);
//! assert!(!collator.compare_values(&[1i64, 2, 3], &[1, 3, 2]).unwrap());
//!
//! let sorter = Sorter::with_fallible_ranker(collator.ranker::<i64>());
//! let mut values = vec![4, 3, 1, 5, 2];
//! sorter.sort_values(&mut values).unwrap();
//! assert_eq!(values, [1, 2, 3, 4, 5]);
//! ```

mod collatable;
mod collator;
mod config;
mod cursor;
mod error;
mod generator;
mod rank;
mod sorter;
mod value;

pub use collatable::Collatable;
pub use collator::{Collator, DEFAULT_MAXIMUM_DEPTH};
pub use config::CollatorConfig;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use generator::{Generator, SecureGenerator};
pub use rank::Rank;
pub use sorter::{RankingFunction, Sorter};
pub use value::{Complex, Kind, Record, Shared, Value};
