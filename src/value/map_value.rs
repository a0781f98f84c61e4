//! Shared, insertion-ordered mapping value.

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::Value;

/// Insertion-ordered mapping keyed by structural value equality.
///
/// Entries are kept as an ordered association list: maps shuffled between
/// workers are carried through rather than queried in hot paths, and the
/// list form supports re-keying a slot when a placeholder key resolves.
pub struct MapValue {
  entries: RwLock<Vec<(Value, Value)>>,
}

impl MapValue {
  /// Creates an empty map.
  #[must_use]
  pub fn new() -> Self {
    Self { entries: RwLock::new(Vec::new()) }
  }

  /// Creates a shared handle around an empty map.
  #[must_use]
  pub fn shared() -> Arc<Self> {
    Arc::new(Self::new())
  }

  /// Creates a map from key/value pairs, later duplicates replacing earlier ones.
  #[must_use]
  pub fn from_pairs<I>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (Value, Value)>, {
    let map = Self::new();
    for (key, value) in pairs {
      map.insert(key, value);
    }
    map
  }

  /// Creates a map from entries already known to have distinct keys.
  pub(crate) fn from_entries(entries: Vec<(Value, Value)>) -> Self {
    Self { entries: RwLock::new(entries) }
  }

  /// Inserts or replaces the entry for `key`, returning any previous value.
  pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
    let mut entries = self.entries.write();
    for (existing_key, existing_value) in entries.iter_mut() {
      if *existing_key == key {
        return Some(core::mem::replace(existing_value, value));
      }
    }
    entries.push((key, value));
    None
  }

  /// Returns a clone of the value stored under `key`.
  #[must_use]
  pub fn get(&self, key: &Value) -> Option<Value> {
    self
      .entries
      .read()
      .iter()
      .find(|(existing_key, _)| existing_key == key)
      .map(|(_, value)| value.clone())
  }

  /// Removes the entry for `key`, returning its value.
  pub fn remove(&self, key: &Value) -> Option<Value> {
    let mut entries = self.entries.write();
    let index = entries.iter().position(|(existing_key, _)| existing_key == key)?;
    Some(entries.remove(index).1)
  }

  /// Returns the number of entries.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  /// Returns `true` when the map has no entries.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }

  /// Returns a point-in-time clone of the entries in insertion order.
  #[must_use]
  pub fn entries(&self) -> Vec<(Value, Value)> {
    self.entries.read().clone()
  }

  /// Re-keys the entry at `index`; used when a placeholder key resolves.
  pub(crate) fn replace_key_at(&self, index: usize, key: Value) {
    if let Some((slot, _)) = self.entries.write().get_mut(index) {
      *slot = key;
    }
  }

  /// Overwrites the value at `index`; used when a placeholder value resolves.
  pub(crate) fn replace_value_at(&self, index: usize, value: Value) {
    if let Some((_, slot)) = self.entries.write().get_mut(index) {
      *slot = value;
    }
  }
}

impl Default for MapValue {
  fn default() -> Self {
    Self::new()
  }
}

impl PartialEq for MapValue {
  fn eq(&self, other: &Self) -> bool {
    let ours = self.entries.read();
    let theirs = other.entries.read();
    if ours.len() != theirs.len() {
      return false;
    }
    // Order-insensitive: two maps with the same entries in different
    // insertion order compare equal.
    ours
      .iter()
      .all(|(key, value)| theirs.iter().any(|(other_key, other_value)| key == other_key && value == other_value))
  }
}

impl fmt::Debug for MapValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Shallow on purpose: maps may be self-referential.
    f.debug_struct("MapValue").field("len", &self.len()).finish()
  }
}
