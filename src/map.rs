//! Ordered map type for KVP records.
//!
//! This module provides [`KvpMap`], a wrapper around [`IndexMap`] that keeps
//! keys in the order they were first seen. The writer emits entries in map
//! order, so a parsed file writes back with its lines in the original order
//! even when later lines overwrote earlier values.
//!
//! ## Why IndexMap?
//!
//! - **First-seen order**: `insert` on an existing key replaces the value
//!   but keeps the key's position.
//! - **Deterministic output**: the writer produces the same text for the
//!   same map, every time.
//!
//! ## Examples
//!
//! ```rust
//! use kvp_text::{KvpMap, Value};
//!
//! let mut map = KvpMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::Value;

/// An ordered map of string keys to KVP values.
///
/// Keys are unique; re-inserting a key overwrites its value in place, so
/// iteration order is the order keys were first seen.
///
/// # Examples
///
/// ```rust
/// use kvp_text::{KvpMap, Value};
///
/// let mut map = KvpMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
/// map.insert("first".to_string(), Value::from(3));
///
/// let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
/// assert_eq!(entries, vec![("first", Value::Int(3)), ("second", Value::Int(2))]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KvpMap(IndexMap<String, Value>);

impl KvpMap {
    /// Creates an empty `KvpMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvp_text::KvpMap;
    ///
    /// let map = KvpMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        KvpMap(IndexMap::new())
    }

    /// Creates an empty `KvpMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        KvpMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvp_text::{KvpMap, Value};
    ///
    /// let mut map = KvpMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in first-seen order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in first-seen order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in first-seen order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for KvpMap {
    fn from(map: HashMap<String, Value>) -> Self {
        KvpMap(map.into_iter().collect())
    }
}

impl From<KvpMap> for HashMap<String, Value> {
    fn from(map: KvpMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for KvpMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KvpMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for KvpMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        KvpMap(IndexMap::from_iter(iter))
    }
}

impl Serialize for KvpMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KvpMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KvpMapVisitor;

        impl<'de> Visitor<'de> for KvpMapVisitor {
            type Value = KvpMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of string keys to KVP values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = KvpMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(KvpMapVisitor)
    }
}
