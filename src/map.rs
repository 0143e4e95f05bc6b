//! Ordered keyed container.
//!
//! This module provides [`KeyedArray`], the one collection type of the value model. It plays
//! the role of both a list and a map: whether it describes as `array<...>` or `array{...}`
//! depends only on its keys (see [`KeyedArray::is_list`]).
//!
//! Entries are kept in insertion order in an [`IndexMap`], so a container always describes its
//! entries in the order they were added.
//!
//! ## Examples
//!
//! ```rust
//! use var_type::{Key, KeyedArray, Value};
//!
//! let mut list = KeyedArray::new();
//! list.push(Value::from(1)).unwrap();
//! list.push(Value::from("two")).unwrap();
//! assert!(list.is_list());
//!
//! let mut map = KeyedArray::new();
//! map.insert(Key::from("name"), Value::from("Alice"));
//! assert!(!map.is_list());
//! ```

use crate::{Error, Value};
use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A key of a [`KeyedArray`]: an integer index or a text name.
///
/// Text keys holding the canonical decimal form of an integer (`"0"`, `"42"`, `"-7"`) stand for
/// that integer: [`Key::as_index`] reads them as one, and a [`KeyedArray`] stores them as one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// Returns the integer this key stands for, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use var_type::Key;
    ///
    /// assert_eq!(Key::Index(3).as_index(), Some(3));
    /// assert_eq!(Key::from("3").as_index(), Some(3));
    /// assert_eq!(Key::from("03").as_index(), None);
    /// assert_eq!(Key::from("name").as_index(), None);
    /// ```
    #[must_use]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) => parse_canonical_index(name),
        }
    }

    /// Returns `true` for text keys.
    #[inline]
    #[must_use]
    pub const fn is_name(&self) -> bool {
        matches!(self, Key::Name(_))
    }
}

/// Parses `s` only if it is exactly how an `i64` prints: no sign on zero, no leading zeros,
/// no whitespace or `+`.
fn parse_canonical_index(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let bytes = digits.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes[0] == b'0' && (bytes.len() > 1 || digits.len() != s.len()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => f.write_str(name),
        }
    }
}

macro_rules! key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::Index(value as i64)
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Key::Index(i) => serializer.serialize_i64(*i),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or string key")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Key, E> {
                Ok(Key::Index(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Key, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Key::Index)
                    .map_err(|_| E::custom(format!("key {} is out of range", value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Key, E> {
                Ok(Key::Name(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Key, E> {
                Ok(Key::Name(value))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// An ordered container of [`Key`] to [`Value`] entries.
///
/// Keys that stand for an integer share one slot: `Key::Name("0")` and `Key::Index(0)` address
/// the same entry, which is stored under `Key::Index(0)`.
///
/// Equality is order-sensitive: two containers with the same entries in a different order
/// describe differently, so they are not equal.
#[derive(Debug, Clone)]
pub struct KeyedArray {
    entries: IndexMap<Key, Value>,
    // `None` once `i64::MAX` is taken
    next_index: Option<i64>,
}

impl KeyedArray {
    /// Creates an empty `KeyedArray`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty `KeyedArray` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        KeyedArray {
            entries: IndexMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Appends a value under the next free integer index.
    ///
    /// The next index is one past the largest non-negative integer key inserted so far, or
    /// `0` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NextIndexOccupied`] when the container already holds `i64::MAX`; the
    /// value is not stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use var_type::{Key, KeyedArray, Value};
    ///
    /// let mut array = KeyedArray::new();
    /// array.insert(Key::Index(5), Value::from(1));
    /// array.push(Value::from(2)).unwrap();
    /// assert!(array.get(&Key::Index(6)).is_some());
    ///
    /// array.insert(Key::Index(i64::MAX), Value::from(3));
    /// assert!(array.push(Value::from(4)).is_err());
    /// ```
    pub fn push(&mut self, value: Value) -> crate::Result<()> {
        let index = self.next_index.ok_or_else(Error::next_index_occupied)?;
        self.insert(Key::Index(index), value);
        Ok(())
    }

    /// Inserts a key-value pair.
    ///
    /// Text keys that spell an integer are stored as that integer. If the key is already
    /// present its value is replaced in place, keeping its position, and the old value is
    /// returned.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        let key = match key.as_index() {
            Some(index) => {
                if matches!(self.next_index, Some(next) if index >= next) {
                    self.next_index = index.checked_add(1);
                }
                Key::Index(index)
            }
            None => key,
        };
        self.entries.insert(key, value)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// ```rust
    /// use var_type::{Key, KeyedArray, Value};
    ///
    /// let array: KeyedArray = [(Key::from("0"), Value::from("a"))].into_iter().collect();
    /// assert_eq!(array.get(&Key::Index(0)), Some(&Value::from("a")));
    /// ```
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match key.as_index() {
            Some(index) => self.entries.get(&Key::Index(index)),
            None => self.entries.get(key),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the container has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the keys are exactly `0, 1, ..., n - 1` in that order.
    ///
    /// An empty container is not a list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use var_type::{Key, KeyedArray, Value};
    ///
    /// let list: KeyedArray = vec![Value::from(1), Value::from(2)].into();
    /// assert!(list.is_list());
    ///
    /// let sparse: KeyedArray = [(Key::Index(1), Value::from("a")), (Key::Index(3), Value::from("b"))]
    ///     .into_iter()
    ///     .collect();
    /// assert!(!sparse.is_list());
    /// assert!(!KeyedArray::new().is_list());
    /// ```
    #[must_use]
    pub fn is_list(&self) -> bool {
        !self.is_empty()
            && self.keys().enumerate().all(|(position, key)| {
                matches!(key.as_index(), Some(index) if usize::try_from(index) == Ok(position))
            })
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }
}

impl Default for KeyedArray {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for KeyedArray {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl From<Vec<Value>> for KeyedArray {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<Value> for KeyedArray {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        iter.into_iter()
            .zip(0i64..)
            .map(|(value, index)| (Key::Index(index), value))
            .collect()
    }
}

impl FromIterator<(Key, Value)> for KeyedArray {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut array = KeyedArray::new();
        for (key, value) in iter {
            array.insert(key, value);
        }
        array
    }
}

impl IntoIterator for KeyedArray {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyedArray {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for KeyedArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_empty() || self.is_list() {
            use serde::ser::SerializeSeq;
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            use serde::ser::SerializeMap;
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_index_parsing() {
        assert_eq!(parse_canonical_index("0"), Some(0));
        assert_eq!(parse_canonical_index("42"), Some(42));
        assert_eq!(parse_canonical_index("-7"), Some(-7));
        assert_eq!(parse_canonical_index("-0"), None);
        assert_eq!(parse_canonical_index("007"), None);
        assert_eq!(parse_canonical_index("+1"), None);
        assert_eq!(parse_canonical_index(" 1"), None);
        assert_eq!(parse_canonical_index("1.0"), None);
        assert_eq!(parse_canonical_index(""), None);
        assert_eq!(parse_canonical_index("-"), None);
        assert_eq!(parse_canonical_index("99999999999999999999"), None);
    }

    #[test]
    fn test_is_list_boundaries() {
        let single_zero: KeyedArray = [(Key::Index(0), Value::from("x"))].into_iter().collect();
        assert!(single_zero.is_list());

        let single_one: KeyedArray = [(Key::Index(1), Value::from("x"))].into_iter().collect();
        assert!(!single_one.is_list());

        let text_indexes: KeyedArray = [
            (Key::from("0"), Value::from("a")),
            (Key::from("1"), Value::from("b")),
            (Key::from("2"), Value::from("c")),
        ]
        .into_iter()
        .collect();
        assert!(text_indexes.is_list());

        let out_of_order: KeyedArray = [
            (Key::Index(1), Value::from("a")),
            (Key::Index(0), Value::from("b")),
        ]
        .into_iter()
        .collect();
        assert!(!out_of_order.is_list());

        let negative: KeyedArray = [(Key::Index(-1), Value::from("a"))].into_iter().collect();
        assert!(!negative.is_list());
    }

    #[test]
    fn test_push_follows_largest_index() {
        let mut array = KeyedArray::new();
        array.push(Value::from(1)).unwrap();
        array.insert(Key::from("name"), Value::from(2));
        array.insert(Key::Index(10), Value::from(3));
        array.push(Value::from(4)).unwrap();

        let keys: Vec<_> = array.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::Index(0), Key::from("name"), Key::Index(10), Key::Index(11)]
        );
    }

    #[test]
    fn test_push_after_max_index_is_refused() {
        let mut array = KeyedArray::new();
        array.insert(Key::Index(i64::MAX), Value::from("last"));

        assert_eq!(array.push(Value::from("next")), Err(Error::NextIndexOccupied));
        assert_eq!(array.len(), 1);
        assert_eq!(array.get(&Key::Index(i64::MAX)), Some(&Value::from("last")));

        // Lower keys can still be inserted explicitly
        array.insert(Key::Index(0), Value::from("first"));
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_text_and_integer_keys_share_a_slot() {
        let value = crate::value!({0: "a", "0": "b"});
        let array = value.as_array().unwrap();

        assert_eq!(array.len(), 1);
        assert_eq!(array.get(&Key::Index(0)), Some(&Value::from("b")));
        assert_eq!(array.get(&Key::from("0")), Some(&Value::from("b")));
        assert_eq!(crate::describe(&value), "array<string>");
    }

    #[test]
    fn test_text_key_replaces_list_entry() {
        let mut array: KeyedArray = vec![Value::from("a"), Value::from("b")].into();
        let old = array.insert(Key::from("1"), Value::from(3));

        assert_eq!(old, Some(Value::from("b")));
        assert_eq!(array.len(), 2);
        assert!(array.is_list());
        assert_eq!(crate::describe(&Value::from(array)), "array<string|int>");
    }

    #[test]
    fn test_text_index_keys_are_stored_as_integers() {
        let array: KeyedArray = [
            (Key::from("0"), Value::from("a")),
            (Key::from("name"), Value::from("b")),
            (Key::from("07"), Value::from("c")),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = array.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::Index(0), Key::from("name"), Key::from("07")]
        );

        let mut array = array;
        array.push(Value::from("d")).unwrap();
        assert_eq!(array.get(&Key::from("1")), Some(&Value::from("d")));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut array: KeyedArray = vec![Value::from(1), Value::from(2)].into();
        let old = array.insert(Key::Index(0), Value::from("one"));

        assert_eq!(old, Some(Value::from(1)));
        assert_eq!(array.len(), 2);
        assert_eq!(array.keys().next(), Some(&Key::Index(0)));
        assert!(array.is_list());
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: KeyedArray = [
            (Key::from("a"), Value::from(1)),
            (Key::from("b"), Value::from(2)),
        ]
        .into_iter()
        .collect();
        let ba: KeyedArray = [
            (Key::from("b"), Value::from(2)),
            (Key::from("a"), Value::from(1)),
        ]
        .into_iter()
        .collect();

        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_key_display_is_literal() {
        assert_eq!(Key::Index(12).to_string(), "12");
        assert_eq!(Key::from("with space").to_string(), "with space");
        assert_eq!(Key::from("a\"b").to_string(), "a\"b");
    }
}
