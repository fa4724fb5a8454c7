//! The capability of presenting a value to the collator.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::value::{Complex, Record, Shared, Value};

/// Types that the [`Collator`](crate::Collator) can compare and rank.
///
/// Implementations describe themselves as a [`Value`]. Record-like types
/// should produce a [`Record`] whose fields follow declaration order, since
/// that order breaks ties when ranking.
///
/// # Example
///
/// ```rust
/// use componentry_agent::{Collatable, Collator, Rank, Record, Value};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Collatable for Point {
///     fn to_value(&self) -> Value {
///         Record::new("Point").field("x", self.x).field("y", self.y).into()
///     }
/// }
///
/// let collator = Collator::new();
/// let rank = collator
///     .rank_values(&Point { x: 1, y: 9 }, &Point { x: 2, y: 0 })
///     .unwrap();
/// assert_eq!(rank, Rank::Lesser);
/// ```
pub trait Collatable {
    /// Describe this value for collation.
    fn to_value(&self) -> Value;

    /// Borrow or build the description.
    ///
    /// Only [`Value`] overrides this, to avoid cloning.
    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Owned(self.to_value())
    }
}

impl Collatable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

impl<T: Collatable + ?Sized> Collatable for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn as_value(&self) -> Cow<'_, Value> {
        (**self).as_value()
    }
}

impl<T: Collatable + ?Sized> Collatable for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn as_value(&self) -> Cow<'_, Value> {
        (**self).as_value()
    }
}

macro_rules! collatable_via_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Collatable for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

collatable_via_from!(bool, u8, i8, i16, u16, i32, u32, i64, f32, f64, char, Complex);

impl Collatable for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Collatable for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Collatable for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Collatable for Shared {
    fn to_value(&self) -> Value {
        Value::Shared(self.clone())
    }
}

// Keeps the pointer identity so identical references short-circuit.
impl Collatable for Arc<Value> {
    fn to_value(&self) -> Value {
        Value::Reference(Arc::clone(self))
    }
}

impl<T: Collatable> Collatable for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Collatable::to_value)
    }
}

impl<T: Collatable> Collatable for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Collatable::to_value).collect())
    }
}

impl<T: Collatable, const N: usize> Collatable for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Collatable> Collatable for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<K: Collatable, V: Collatable> Collatable for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: Collatable, V: Collatable, S> Collatable for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}
