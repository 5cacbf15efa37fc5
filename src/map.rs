//! Ordered map type for SIN objects.
//!
//! [`SinMap`] wraps [`IndexMap`] so that object members keep their insertion
//! order. The serializer walks members in that order, which makes rendering
//! deterministic: parsing a document and rendering it again yields the same text.
//!
//! ## Examples
//!
//! ```rust
//! use sin::{SinMap, Value};
//!
//! let mut map = SinMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30u8));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str().ok()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to SIN values.
///
/// # Examples
///
/// ```rust
/// use sin::{SinMap, Value};
///
/// let mut map = SinMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SinMap(IndexMap<String, Value>);

impl SinMap {
    #[must_use]
    pub fn new() -> Self {
        SinMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SinMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and the
    /// key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sin::{SinMap, Value};
    ///
    /// let mut map = SinMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value at `key`, inserting an empty Object first if it is absent.
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut Value {
        self.0.entry(key.to_string()).or_default()
    }

    /// Removes a key, shifting later members down so order is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl Default for SinMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, Value>> for SinMap {
    fn from(map: HashMap<String, Value>) -> Self {
        SinMap(map.into_iter().collect())
    }
}

impl From<SinMap> for HashMap<String, Value> {
    fn from(map: SinMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for SinMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SinMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for SinMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        SinMap(IndexMap::from_iter(iter))
    }
}
