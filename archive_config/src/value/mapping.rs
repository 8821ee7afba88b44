//! Insertion-ordered map with unique string keys.

use super::Value;

/// Ordered mapping from unique keys to values.
///
/// Lookups ignore order; iteration and serialization follow insertion order,
/// and replacing an existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// An empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style insert, convenient for assembling documents in code.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_config::{Mapping, Value};
    ///
    /// let tenant = Mapping::new().with("name", "INFOARCHIVE").with("default", true);
    /// assert_eq!(tenant.get("name").and_then(Value::as_str), Some("INFOARCHIVE"));
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `key` is present, whatever its value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Borrows the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(candidate, value)| (candidate == key).then_some(value))
    }

    /// Mutably borrows the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find_map(|(candidate, value)| (candidate == key).then_some(value))
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let name = key.into();
        if let Some(slot) = self.get_mut(&name) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Stores `value` under `key` as the first entry, replacing any existing one.
    pub fn insert_first(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let name = key.into();
        let previous = self.remove(&name);
        self.entries.insert(0, (name, value));
        previous
    }

    /// Returns the value under `key`, inserting `make()` first when absent.
    #[expect(
        clippy::indexing_slicing,
        reason = "index comes from position() or the entry just pushed"
    )]
    pub fn entry_or_insert_with(
        &mut self,
        key: impl Into<String>,
        make: impl FnOnce() -> Value,
    ) -> &mut Value {
        let name = key.into();
        let index = self.position(&name).unwrap_or_else(|| {
            self.entries.push((name, make()));
            self.entries.len() - 1
        });
        &mut self.entries[index].1
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates mutably over entries in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries
            .iter_mut()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(candidate, _)| candidate == key)
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
