//! The three-valued ranking primitive.

use std::cmp::Ordering;

/// The relative order of two values.
///
/// Variants are declared in ascending order so that `Rank` itself orders
/// `Lesser < Equal < Greater`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Lesser,
    Equal,
    Greater,
}

impl Rank {
    /// The rank of `second` relative to `first` when this is the rank of
    /// `first` relative to `second`.
    pub fn reverse(self) -> Self {
        match self {
            Rank::Lesser => Rank::Greater,
            Rank::Equal => Rank::Equal,
            Rank::Greater => Rank::Lesser,
        }
    }

    pub fn is_equal(self) -> bool {
        self == Rank::Equal
    }

    /// Chain a tie-breaker: keep `self` unless it is `Equal`.
    pub fn then(self, other: Rank) -> Rank {
        match self {
            Rank::Equal => other,
            rank => rank,
        }
    }

    /// Rank two naturally ordered values.
    pub fn of<T: Ord + ?Sized>(first: &T, second: &T) -> Self {
        first.cmp(second).into()
    }
}

impl From<Ordering> for Rank {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Rank::Lesser,
            Ordering::Equal => Rank::Equal,
            Ordering::Greater => Rank::Greater,
        }
    }
}

impl From<Rank> for Ordering {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Lesser => Ordering::Less,
            Rank::Equal => Ordering::Equal,
            Rank::Greater => Ordering::Greater,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Lesser => write!(f, "lesser"),
            Rank::Equal => write!(f, "equal"),
            Rank::Greater => write!(f, "greater"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_conversions() {
        assert_eq!(Rank::from(Ordering::Less), Rank::Lesser);
        assert_eq!(Ordering::from(Rank::Greater), Ordering::Greater);
        assert_eq!(Rank::of("alpha", "beta"), Rank::Lesser);
    }

    #[test]
    fn reverse_and_then() {
        assert_eq!(Rank::Lesser.reverse(), Rank::Greater);
        assert_eq!(Rank::Equal.reverse(), Rank::Equal);
        assert_eq!(Rank::Equal.then(Rank::Greater), Rank::Greater);
        assert_eq!(Rank::Lesser.then(Rank::Greater), Rank::Lesser);
    }

    #[test]
    fn rank_display() {
        assert_eq!(Rank::Lesser.to_string(), "lesser");
        assert_eq!(Rank::Equal.to_string(), "equal");
        assert_eq!(Rank::Greater.to_string(), "greater");
    }
}
