//! Sorting, reversing and shuffling sequences in place.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::collatable::Collatable;
use crate::collator::Collator;
use crate::error::Result;
use crate::generator::{Generator, SecureGenerator};
use crate::rank::Rank;

/// A function that ranks two values.
///
/// Rankers must be transitive; a ranker that is not leaves the resulting
/// order unspecified.
pub type RankingFunction<V> = Arc<dyn Fn(&V, &V) -> Result<Rank> + Send + Sync>;

/// Reorders sequences according to a ranking function.
///
/// # Example
///
/// ```rust
/// use componentry_agent::{Rank, Sorter};
///
/// let sorter = Sorter::<String>::new();
/// let mut values: Vec<String> = ["alpha", "beta", "gamma", "delta"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
///
/// sorter.sort_values(&mut values).unwrap();
/// assert_eq!(values, ["alpha", "beta", "delta", "gamma"]);
///
/// let descending = Sorter::with_ranker(|a: &String, b: &String| Rank::from(b.cmp(a)));
/// descending.sort_values(&mut values).unwrap();
/// assert_eq!(values, ["gamma", "delta", "beta", "alpha"]);
/// ```
pub struct Sorter<V> {
    ranker: RankingFunction<V>,
    generator: Arc<dyn Generator>,
}

impl<V: Collatable + 'static> Sorter<V> {
    /// Create a sorter using the natural ranking of a default [`Collator`].
    pub fn new() -> Self {
        Self::with_fallible_ranker(Collator::new().ranker())
    }
}

impl<V: Collatable + 'static> Default for Sorter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> Sorter<V> {
    /// Create a sorter using a caller-supplied ranking function.
    pub fn with_ranker<F>(ranker: F) -> Self
    where
        F: Fn(&V, &V) -> Rank + Send + Sync + 'static,
    {
        Self::with_fallible_ranker(move |first: &V, second: &V| Ok(ranker(first, second)))
    }

    /// Create a sorter using a ranking function that may fail, such as
    /// [`Collator::ranker`].
    pub fn with_fallible_ranker<F>(ranker: F) -> Self
    where
        F: Fn(&V, &V) -> Result<Rank> + Send + Sync + 'static,
    {
        Self {
            ranker: Arc::new(ranker),
            generator: Arc::new(SecureGenerator::new()),
        }
    }
}

impl<V> Sorter<V> {
    /// Replace the random source used by [`shuffle_values`](Self::shuffle_values).
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn ranker(&self) -> RankingFunction<V> {
        Arc::clone(&self.ranker)
    }

    /// Stable ascending sort.
    ///
    /// The new order is computed before anything moves, so if the ranker
    /// fails the sequence is left exactly as it was.
    pub fn sort_values(&self, values: &mut [V]) -> Result<()> {
        if values.len() < 2 {
            return Ok(());
        }
        let order = ranked_permutation(values, |a, b| (self.ranker)(a, b))?;
        apply_permutation(values, order);
        Ok(())
    }

    pub fn reverse_values(&self, values: &mut [V]) {
        values.reverse();
    }

    /// Uniformly random permutation (Fisher-Yates).
    pub fn shuffle_values(&self, values: &mut [V]) {
        for index in (1..values.len()).rev() {
            let Some(maximum) = NonZeroUsize::new(index + 1) else {
                continue;
            };
            let other = self.generator.random_ordinal(maximum) - 1;
            values.swap(index, other);
        }
    }
}

impl<V> Clone for Sorter<V> {
    fn clone(&self) -> Self {
        Self {
            ranker: Arc::clone(&self.ranker),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<V> std::fmt::Debug for Sorter<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sorter").finish_non_exhaustive()
    }
}

/// Compute the stable ascending order of `values` as a list of source
/// indices, using a bottom-up merge sort.
///
/// Position `k` of the result holds the index of the value that belongs at
/// `k`. The first ranking failure aborts the sort.
pub(crate) fn ranked_permutation<T, F>(values: &[T], mut rank: F) -> Result<Vec<usize>>
where
    F: FnMut(&T, &T) -> Result<Rank>,
{
    let length = values.len();
    let mut order: Vec<usize> = (0..length).collect();
    let mut merged = order.clone();
    let mut width = 1;
    while width < length {
        let mut start = 0;
        while start < length {
            let middle = (start + width).min(length);
            let end = (start + 2 * width).min(length);
            let (mut left, mut right) = (start, middle);
            for slot in merged[start..end].iter_mut() {
                let take_left = right >= end
                    || (left < middle
                        && rank(&values[order[left]], &values[order[right]])? != Rank::Greater);
                if take_left {
                    *slot = order[left];
                    left += 1;
                } else {
                    *slot = order[right];
                    right += 1;
                }
            }
            start = end;
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }
    Ok(order)
}

/// Rearrange `values` so that `values[k]` becomes the old `values[order[k]]`.
fn apply_permutation<T>(values: &mut [T], order: Vec<usize>) {
    let mut placed = vec![false; values.len()];
    for start in 0..values.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let source = order[current];
            if source == start {
                break;
            }
            values.swap(current, source);
            current = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::Error;
    use crate::value::{Shared, Value};

    /// Always picks the largest ordinal, which makes Fisher-Yates a no-op.
    struct MaximumGenerator;

    impl Generator for MaximumGenerator {
        fn random_boolean(&self) -> bool {
            true
        }

        fn random_ordinal(&self, maximum: NonZeroUsize) -> usize {
            maximum.get()
        }

        fn random_probability(&self) -> f64 {
            1.0
        }

        fn random_bytes(&self, size: usize) -> Vec<u8> {
            vec![0xff; size]
        }
    }

    #[test]
    fn sorting_integers() {
        let sorter = Sorter::<i64>::new();
        let mut values = vec![4, 3, 1, 5, 2];
        sorter.sort_values(&mut values).unwrap();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sorting_strings_with_collator_ranker() {
        let sorter = Sorter::with_fallible_ranker(Collator::new().ranker::<&str>());
        let mut values = vec!["alpha", "beta", "gamma", "delta"];
        sorter.sort_values(&mut values).unwrap();
        assert_eq!(values, vec!["alpha", "beta", "delta", "gamma"]);
    }

    #[test]
    fn sorting_empty_and_single() {
        let sorter = Sorter::<Value>::new();
        let mut empty: Vec<Value> = Vec::new();
        sorter.sort_values(&mut empty).unwrap();
        assert!(empty.is_empty());

        let mut single = vec![Value::from("only")];
        sorter.sort_values(&mut single).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn sorting_is_stable() {
        let sorter = Sorter::with_ranker(|a: &(i64, char), b: &(i64, char)| Rank::of(&a.0, &b.0));
        let mut values = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e'), (2, 'f')];
        sorter.sort_values(&mut values).unwrap();
        assert_eq!(
            values,
            vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'f')]
        );
    }

    #[test]
    fn custom_ranker_reverses_order() {
        let sorter = Sorter::with_ranker(|a: &i64, b: &i64| Rank::of(b, a));
        let mut values = vec![1, 5, 3, 2, 4];
        sorter.sort_values(&mut values).unwrap();
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn failed_sort_leaves_values_untouched() {
        let cycle = Shared::new(Value::Null);
        cycle.set(Value::Array(vec![Value::Shared(cycle.clone())]));

        let sorter = Sorter::<Value>::new();
        let mut values = vec![
            Value::from(3i64),
            Value::Shared(cycle.clone()),
            Value::from(1i64),
            Value::Shared(cycle),
        ];
        let result = sorter.sort_values(&mut values);
        assert_eq!(result, Err(Error::MaximumDepthExceeded { maximum_depth: 16 }));
        assert!(matches!(values[0], Value::Integer(3)));
        assert!(matches!(values[2], Value::Integer(1)));
    }

    #[test]
    fn reverse_is_independent_of_ranker() {
        let sorter = Sorter::with_ranker(|_: &i64, _: &i64| Rank::Equal);
        let mut values = vec![1, 2, 3];
        sorter.reverse_values(&mut values);
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let sorter = Sorter::<i64>::new();
        let mut values: Vec<i64> = (0..50).collect();
        sorter.shuffle_values(&mut values);
        assert_eq!(values.len(), 50);
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<i64>>());
    }

    #[test]
    fn shuffle_uses_injected_generator() {
        let sorter = Sorter::<i64>::new().with_generator(Arc::new(MaximumGenerator));
        let mut values = vec![1, 2, 3, 4];
        sorter.shuffle_values(&mut values);
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn ranker_is_shared() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sorter = Sorter::with_ranker(move |a: &i64, b: &i64| {
            counter.fetch_add(1, Ordering::SeqCst);
            Rank::of(a, b)
        });
        let ranker = sorter.ranker();
        assert_eq!(ranker(&1, &2), Ok(Rank::Lesser));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn permutation_application() {
        let mut values = vec!['a', 'b', 'c', 'd'];
        apply_permutation(&mut values, vec![2, 0, 3, 1]);
        assert_eq!(values, vec!['c', 'a', 'd', 'b']);
    }
}
