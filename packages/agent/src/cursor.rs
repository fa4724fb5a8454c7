//! Bidirectional iteration over the slots of a sequence.
//!
//! A cursor sits on the slots between values rather than on the values
//! themselves:
//!
//! ```text
//!   . [value 1] . [value 2] . [value 3] ... [value N] .
//!   ^           ^           ^                         ^
//! slot 0      slot 1      slot 2                    slot N
//! ```
//!
//! At each slot the value before it (if any) is the previous value and the
//! value after it (if any) is the next value.

/// A cursor over a borrowed sequence.
///
/// # Example
///
/// ```rust
/// use componentry_agent::Cursor;
///
/// let values = ["foo", "bar", "baz"];
/// let mut cursor = Cursor::new(&values);
///
/// cursor.set_slot(2);
/// assert_eq!(cursor.previous(), Some(&"bar"));
///
/// cursor.to_end();
/// let reversed: Vec<&str> = std::iter::from_fn(|| cursor.previous().copied()).collect();
/// assert_eq!(reversed, ["baz", "bar", "foo"]);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a, V> {
    values: &'a [V],
    slot: usize,
}

impl<'a, V> Cursor<'a, V> {
    /// Create a cursor at slot 0.
    pub fn new(values: &'a [V]) -> Self {
        Self { values, slot: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Move to a slot, clamped to the last slot.
    pub fn set_slot(&mut self, slot: usize) {
        self.slot = slot.min(self.values.len());
    }

    pub fn to_start(&mut self) {
        self.slot = 0;
    }

    pub fn to_end(&mut self) {
        self.slot = self.values.len();
    }

    pub fn has_previous(&self) -> bool {
        self.slot > 0
    }

    /// Return the previous value and move back one slot.
    pub fn previous(&mut self) -> Option<&'a V> {
        if !self.has_previous() {
            return None;
        }
        self.slot -= 1;
        self.values.get(self.slot)
    }

    pub fn has_next(&self) -> bool {
        self.slot < self.values.len()
    }
}

impl<'a, V> Iterator for Cursor<'a, V> {
    type Item = &'a V;

    /// Return the next value and move forward one slot.
    fn next(&mut self) -> Option<&'a V> {
        let value = self.values.get(self.slot)?;
        self.slot += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.slot;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for Cursor<'_, V> {}
