//! The Value type - the collator's view of any value.
//!
//! A `Value` is a closed, dynamically-typed tree covering every kind of value
//! the collator knows how to compare: primitives, sequences, mappings and
//! records, plus two kinds of indirection. Anything else reaches the collator
//! by implementing [`Collatable`](crate::Collatable).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/// A value that can be compared and ranked by a [`Collator`](crate::Collator).
///
/// # Design Notes
///
/// - Absence is `Null`. There is no separate "nil array" or "nil map": a
///   missing sequence is `Null`, which ranks below every present value,
///   including an empty `Array` or `Map`.
/// - `Map` is an association list. Insertion order is kept, but the collator
///   ignores it and canonicalizes entries by key rank.
/// - `Reference` is an immutable pointer and cannot form a cycle.
/// - `Shared` is a mutable shared container and is the only way to build a
///   cyclic value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Unsigned byte.
    Byte(u8),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Complex number as a (real, imaginary) pair.
    Complex(Complex),
    /// Unicode scalar value.
    Char(char),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value associations with arbitrary keys.
    Map(Vec<(Value, Value)>),
    /// Named fields in declaration order.
    Record(Record),
    /// Immutable pointer to another value.
    Reference(Arc<Value>),
    /// Mutable container shared between owners.
    Shared(Shared),
}

/// The fundamental kind of a value, in cross-kind rank order.
///
/// Two values of different kinds are never equal; the lesser kind ranks
/// first. Indirections have no kind of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null,
    Bool,
    Byte,
    Integer,
    Float,
    Complex,
    Char,
    String,
    Array,
    Map,
    Record,
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Vec::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Wrap a value in an immutable reference.
    pub fn reference(value: Value) -> Self {
        Value::Reference(Arc::new(value))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The kind of this value, or `None` for an indirection.
    pub fn kind(&self) -> Option<Kind> {
        let kind = match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Byte(_) => Kind::Byte,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Complex(_) => Kind::Complex,
            Value::Char(_) => Kind::Char,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Reference(_) | Value::Shared(_) => return None,
        };
        Some(kind)
    }

    /// Look up a map entry by string key.
    ///
    /// Only `String` keys match. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                Value::String(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Get an array element by zero-based index.
    pub fn index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(values) => values.get(index),
            _ => None,
        }
    }
}

/// A complex number.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imaginary: f64,
}

impl Complex {
    pub fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }
}

/// A record: a type name plus named fields in declaration order.
///
/// Field order is the tie-break order used when ranking two records, so it
/// must match the order in which the fields are declared on the type being
/// described.
///
/// # Example
///
/// ```rust
/// use componentry_agent::{Record, Value};
///
/// let user = Record::new("User")
///     .field("id", 7i64)
///     .field("name", "Ada");
/// assert_eq!(user.fields().len(), 2);
/// assert!(matches!(user.get("name"), Some(Value::String(_))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }
}

/// A mutable value shared between owners.
///
/// Cloning a `Shared` clones the handle, not the content. Because the
/// content can hold a handle to itself, cyclic values are possible; the
/// collator traverses shared content every time it meets it, so a cycle
/// ends in [`Error::MaximumDepthExceeded`](crate::Error::MaximumDepthExceeded).
///
/// # Example
///
/// ```rust
/// use componentry_agent::{Collator, Error, Shared, Value};
///
/// let list = Shared::new(Value::array());
/// list.set(Value::Array(vec![Value::Integer(0), Value::Shared(list.clone())]));
///
/// let collator = Collator::new();
/// assert_eq!(
///     collator.compare_values(&list, &list),
///     Err(Error::MaximumDepthExceeded { maximum_depth: 16 })
/// );
/// ```
#[derive(Clone, Default)]
pub struct Shared(Arc<RwLock<Value>>);

impl Shared {
    pub fn new(value: Value) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Snapshot the current content.
    ///
    /// Nested `Shared` handles are cloned as handles, so the snapshot is
    /// shallow with respect to other shared containers.
    pub fn get(&self) -> Value {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the content, returning the previous content.
    pub fn set(&self, value: Value) -> Value {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, value)
    }

    /// Modify the content in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut Value) -> R) -> R {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Check whether two handles share the same container.
    pub fn ptr_eq(&self, other: &Shared) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// The content may contain this very handle, so never format it.
impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shared({:p})", Arc::as_ptr(&self.0))
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Value::Complex(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Shared> for Value {
    fn from(v: Shared) -> Self {
        Value::Shared(v)
    }
}

impl From<Arc<Value>> for Value {
    fn from(v: Arc<Value>) -> Self {
        Value::Reference(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_declaration_order() {
        assert!(Kind::Null < Kind::Bool);
        assert!(Kind::Integer < Kind::Float);
        assert!(Kind::String < Kind::Array);
        assert!(Kind::Map < Kind::Record);
        assert_eq!(Value::from("a").kind(), Some(Kind::String));
        assert_eq!(Value::reference(Value::Null).kind(), None);
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<i64> = None;
        assert!(Value::from(none).is_null());
        assert!(matches!(Value::from(Some(3i64)), Value::Integer(3)));
    }

    #[test]
    fn map_lookup_by_string_key() {
        let mut map = BTreeMap::new();
        map.insert("alpha", 1i64);
        map.insert("beta", 2i64);
        let value = Value::from(map);
        assert!(value.is_map());
        assert!(matches!(value.get("beta"), Some(Value::Integer(2))));
        assert!(value.get("gamma").is_none());
    }

    #[test]
    fn array_index() {
        let value = Value::from(vec!["a", "b"]);
        assert!(value.is_array());
        assert!(matches!(value.index(1), Some(Value::String(s)) if s == "b"));
        assert!(value.index(2).is_none());
    }

    #[test]
    fn record_fields_keep_declaration_order() {
        let record = Record::new("Fuz").field("bar", "two").field("baz", 3i64);
        assert_eq!(record.name(), "Fuz");
        let names: Vec<&str> = record.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["bar", "baz"]);
        assert!(record.get("qux").is_none());
    }

    #[test]
    fn shared_handles_share_content() {
        let shared = Shared::new(Value::array());
        let alias = shared.clone();
        alias.update(|value| {
            if let Value::Array(values) = value {
                values.push(Value::Integer(1));
            }
        });
        assert!(shared.ptr_eq(&alias));
        assert!(matches!(shared.get().index(0), Some(Value::Integer(1))));

        let previous = shared.set(Value::Null);
        assert!(previous.is_array());
        assert!(alias.get().is_null());
    }

    #[test]
    fn cyclic_shared_debug_terminates() {
        let shared = Shared::new(Value::Null);
        shared.set(Value::Array(vec![Value::Shared(shared.clone())]));
        let debug = format!("{:?}", shared.get());
        assert!(debug.contains("Shared("));
    }
}
