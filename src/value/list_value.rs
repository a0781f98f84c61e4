//! Shared, growable list value.

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::Value;

/// Ordered sequence of values behind a shared handle.
///
/// Elements sit behind an interior lock so that placeholder fixups can write
/// into a list that has already materialized; this is also what makes
/// self-referential lists constructible.
pub struct ListValue {
  items: RwLock<Vec<Value>>,
}

impl ListValue {
  /// Creates a list from the provided elements.
  #[must_use]
  pub fn new(items: Vec<Value>) -> Self {
    Self { items: RwLock::new(items) }
  }

  /// Creates a shared handle around a new list.
  #[must_use]
  pub fn shared(items: Vec<Value>) -> Arc<Self> {
    Arc::new(Self::new(items))
  }

  /// Appends an element.
  pub fn push(&self, value: Value) {
    self.items.write().push(value);
  }

  /// Returns a clone of the element at `index`.
  #[must_use]
  pub fn get(&self, index: usize) -> Option<Value> {
    self.items.read().get(index).cloned()
  }

  /// Overwrites the element at `index`; out-of-range writes are ignored.
  pub fn set(&self, index: usize, value: Value) {
    if let Some(slot) = self.items.write().get_mut(index) {
      *slot = value;
    }
  }

  /// Returns the number of elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  /// Returns `true` when the list has no elements.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }

  /// Returns a point-in-time clone of the elements.
  #[must_use]
  pub fn snapshot(&self) -> Vec<Value> {
    self.items.read().clone()
  }
}

impl PartialEq for ListValue {
  fn eq(&self, other: &Self) -> bool {
    *self.items.read() == *other.items.read()
  }
}

impl fmt::Debug for ListValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Shallow on purpose: lists may be self-referential.
    f.debug_struct("ListValue").field("len", &self.len()).finish()
  }
}
