//! Recursive structural comparison and ranking.
//!
//! The collator walks two values side by side. Every descent into a
//! composite (array, map or record) increments a depth
//! counter, and crossing the configured maximum fails the whole call with
//! [`Error::MaximumDepthExceeded`]. Cyclic values therefore fail loudly
//! instead of recursing forever; values that are simply nested too deeply
//! fail the same way.
//!
//! # Ranking rules
//!
//! - Values of different [`Kind`]s rank by kind, in the order the kinds are
//!   declared (`Null` lowest, `Record` highest). They are never equal.
//! - Primitives use their natural order. Floats are equal when `==` holds or
//!   their bits are identical, so a NaN equals only a bit-identical NaN;
//!   otherwise unordered pairs fall back to IEEE total ordering. Complex
//!   numbers rank by real part, then imaginary part.
//! - Arrays rank element by element; a strict prefix ranks lesser.
//! - Maps with fewer entries rank lesser. Equal-size maps are sorted by key
//!   rank, then value rank, and compared entry by entry, key first, so
//!   insertion order never matters, even with duplicate keys.
//! - Records rank by type name, then field by field in declaration order.
//! - A `Reference` is ranked as its target; two references to the same
//!   allocation are equal without descending. A `Shared` container is
//!   ranked as its current content and is always traversed. Dereferencing
//!   is free unless the content is another indirection, which counts as
//!   one level.

use std::sync::Arc;

use crate::collatable::Collatable;
use crate::config::CollatorConfig;
use crate::error::{Error, Result};
use crate::rank::Rank;
use crate::sorter::ranked_permutation;
use crate::value::{Complex, Record, Shared, Value};

/// Maximum traversal depth used by [`Collator::new`].
pub const DEFAULT_MAXIMUM_DEPTH: usize = 16;

/// Compares and ranks values recursively.
///
/// A collator holds no mutable state, so one instance can be shared freely
/// between threads.
///
/// # Example
///
/// ```rust
/// use componentry_agent::{Collator, Rank};
///
/// let collator = Collator::new();
/// let a1 = vec!["Hello", "World"];
/// let a2 = vec!["Hello", "Universe"];
///
/// assert!(!collator.compare_values(&a1, &a2).unwrap());
/// assert_eq!(collator.rank_values(&a2, &a1).unwrap(), Rank::Lesser);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collator {
    maximum_depth: usize,
}

impl Collator {
    /// Create a collator with the default maximum depth of 16.
    pub fn new() -> Self {
        Self {
            maximum_depth: DEFAULT_MAXIMUM_DEPTH,
        }
    }

    /// Create a collator with an explicit maximum depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `maximum_depth` is zero.
    pub fn with_maximum_depth(maximum_depth: usize) -> Result<Self> {
        if maximum_depth == 0 {
            return Err(Error::invalid_argument(
                "the maximum depth must be a positive integer",
            ));
        }
        Ok(Self { maximum_depth })
    }

    /// Create a collator from configuration.
    pub fn from_config(config: &CollatorConfig) -> Result<Self> {
        Self::with_maximum_depth(config.maximum_depth)
    }

    pub fn maximum_depth(&self) -> usize {
        self.maximum_depth
    }

    /// Decide whether two values are structurally equal.
    ///
    /// Agrees with [`rank_values`](Self::rank_values): the result is `true`
    /// exactly when the rank is [`Rank::Equal`].
    pub fn compare_values<V: Collatable + ?Sized>(&self, first: &V, second: &V) -> Result<bool> {
        self.rank_values(first, second).map(Rank::is_equal)
    }

    /// Rank `first` relative to `second`.
    pub fn rank_values<V: Collatable + ?Sized>(&self, first: &V, second: &V) -> Result<Rank> {
        self.rank(&first.as_value(), &second.as_value(), 0)
    }

    /// A ranking function bound to this collator, for use with a
    /// [`Sorter`](crate::Sorter).
    pub fn ranker<V: Collatable + ?Sized + 'static>(
        &self,
    ) -> impl Fn(&V, &V) -> Result<Rank> + Clone + Send + Sync + 'static {
        let collator = *self;
        move |first: &V, second: &V| collator.rank_values(first, second)
    }

    fn descend(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.maximum_depth {
            tracing::debug!(
                maximum_depth = self.maximum_depth,
                "collation exceeded the maximum traversal depth"
            );
            return Err(Error::MaximumDepthExceeded {
                maximum_depth: self.maximum_depth,
            });
        }
        Ok(depth)
    }

    /// Snapshot the content of a shared container.
    ///
    /// A composite content pays for its own descent, so only content that is
    /// itself an indirection counts as a level. That bounds pointer loops
    /// such as a container holding itself.
    fn dereference(&self, shared: &Shared, depth: usize) -> Result<(Value, usize)> {
        let content = shared.get();
        let depth = match content {
            Value::Shared(_) | Value::Reference(_) => self.descend(depth)?,
            _ => depth,
        };
        Ok((content, depth))
    }

    fn rank(&self, first: &Value, second: &Value, depth: usize) -> Result<Rank> {
        // Resolve indirections before looking at kinds.
        match (first, second) {
            (Value::Reference(a), Value::Reference(b)) if Arc::ptr_eq(a, b) => {
                return Ok(Rank::Equal);
            }
            (Value::Reference(a), _) => return self.rank(a, second, depth),
            (_, Value::Reference(b)) => return self.rank(first, b, depth),
            (Value::Shared(a), _) => {
                let (a, depth) = self.dereference(a, depth)?;
                return self.rank(&a, second, depth);
            }
            (_, Value::Shared(b)) => {
                let (b, depth) = self.dereference(b, depth)?;
                return self.rank(first, &b, depth);
            }
            _ => {}
        }

        let rank = match (first, second) {
            (Value::Null, Value::Null) => Rank::Equal,
            (Value::Bool(a), Value::Bool(b)) => Rank::of(a, b),
            (Value::Byte(a), Value::Byte(b)) => Rank::of(a, b),
            (Value::Integer(a), Value::Integer(b)) => Rank::of(a, b),
            (Value::Float(a), Value::Float(b)) => rank_floats(*a, *b),
            (Value::Complex(a), Value::Complex(b)) => rank_complexes(a, b),
            (Value::Char(a), Value::Char(b)) => Rank::of(a, b),
            (Value::String(a), Value::String(b)) => Rank::of(a.as_str(), b.as_str()),
            (Value::Array(a), Value::Array(b)) => self.rank_arrays(a, b, depth)?,
            (Value::Map(a), Value::Map(b)) => self.rank_maps(a, b, depth)?,
            (Value::Record(a), Value::Record(b)) => self.rank_records(a, b, depth)?,
            _ => Rank::of(&first.kind(), &second.kind()),
        };
        Ok(rank)
    }

    fn rank_arrays(&self, first: &[Value], second: &[Value], depth: usize) -> Result<Rank> {
        let depth = self.descend(depth)?;
        for (a, b) in first.iter().zip(second) {
            let rank = self.rank(a, b, depth)?;
            if rank != Rank::Equal {
                return Ok(rank);
            }
        }
        Ok(Rank::of(&first.len(), &second.len()))
    }

    fn rank_maps(
        &self,
        first: &[(Value, Value)],
        second: &[(Value, Value)],
        depth: usize,
    ) -> Result<Rank> {
        let depth = self.descend(depth)?;
        let size = Rank::of(&first.len(), &second.len());
        if size != Rank::Equal {
            return Ok(size);
        }

        // Duplicate keys are legal, so ties on the key fall back to the value.
        let rank_entries = |a: &(Value, Value), b: &(Value, Value)| -> Result<Rank> {
            let rank = self.rank(&a.0, &b.0, depth)?;
            if rank != Rank::Equal {
                return Ok(rank);
            }
            self.rank(&a.1, &b.1, depth)
        };
        let first_order = ranked_permutation(first, rank_entries)?;
        let second_order = ranked_permutation(second, rank_entries)?;

        for (&i, &j) in first_order.iter().zip(&second_order) {
            let (first_key, first_value) = &first[i];
            let (second_key, second_value) = &second[j];
            let mut rank = self.rank(first_key, second_key, depth)?;
            if rank == Rank::Equal {
                rank = self.rank(first_value, second_value, depth)?;
            }
            if rank != Rank::Equal {
                return Ok(rank);
            }
        }
        Ok(Rank::Equal)
    }

    fn rank_records(&self, first: &Record, second: &Record, depth: usize) -> Result<Rank> {
        let depth = self.descend(depth)?;
        let name = Rank::of(first.name(), second.name());
        if name != Rank::Equal {
            return Ok(name);
        }
        for ((first_name, first_value), (second_name, second_value)) in
            first.fields().iter().zip(second.fields())
        {
            let mut rank = Rank::of(first_name.as_str(), second_name.as_str());
            if rank == Rank::Equal {
                rank = self.rank(first_value, second_value, depth)?;
            }
            if rank != Rank::Equal {
                return Ok(rank);
            }
        }
        Ok(Rank::of(&first.fields().len(), &second.fields().len()))
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::new()
    }
}

fn rank_floats(first: f64, second: f64) -> Rank {
    if first == second || first.to_bits() == second.to_bits() {
        return Rank::Equal;
    }
    match first.partial_cmp(&second) {
        Some(ordering) => ordering.into(),
        None => first.total_cmp(&second).into(),
    }
}

fn rank_complexes(first: &Complex, second: &Complex) -> Rank {
    rank_floats(first.real, second.real).then(rank_floats(first.imaginary, second.imaginary))
}
