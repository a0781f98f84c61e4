//! Fixed-shape tuple value, plain or named.

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::record_type::RecordType;
use crate::value::Value;

/// Ordered, fixed-arity sequence, optionally carrying a record descriptor.
///
/// Elements are conceptually immutable; the interior lock exists only so a
/// placeholder slot can be patched while a decoded graph is still resolving
/// forward references.
pub struct TupleValue {
  record: Option<Arc<RecordType>>,
  items:  RwLock<Vec<Value>>,
}

impl TupleValue {
  /// Creates a plain tuple.
  #[must_use]
  pub fn new(items: Vec<Value>) -> Self {
    Self { record: None, items: RwLock::new(items) }
  }

  /// Creates a shared handle around a plain tuple.
  #[must_use]
  pub fn shared(items: Vec<Value>) -> Arc<Self> {
    Arc::new(Self::new(items))
  }

  /// Creates a named tuple bound to `record`.
  #[must_use]
  pub fn record(record: Arc<RecordType>, items: Vec<Value>) -> Self {
    Self { record: Some(record), items: RwLock::new(items) }
  }

  /// Creates a shared handle around a named tuple.
  #[must_use]
  pub fn shared_record(record: Arc<RecordType>, items: Vec<Value>) -> Arc<Self> {
    Arc::new(Self::record(record, items))
  }

  /// Returns the record descriptor for named tuples.
  #[must_use]
  pub const fn record_type(&self) -> Option<&Arc<RecordType>> {
    self.record.as_ref()
  }

  /// Returns a clone of the element at `index`.
  #[must_use]
  pub fn get(&self, index: usize) -> Option<Value> {
    self.items.read().get(index).cloned()
  }

  /// Returns a clone of the element behind a declared field name.
  #[must_use]
  pub fn field(&self, name: &str) -> Option<Value> {
    let index = self.record.as_ref()?.index_of(name)?;
    self.get(index)
  }

  /// Overwrites the element at `index`; reserved for decode-time fixups.
  pub(crate) fn set(&self, index: usize, value: Value) {
    if let Some(slot) = self.items.write().get_mut(index) {
      *slot = value;
    }
  }

  /// Returns the arity.
  #[must_use]
  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  /// Returns `true` for the empty tuple.
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

impl PartialEq for TupleValue {
  fn eq(&self, other: &Self) -> bool {
    self.record == other.record && *self.items.read() == *other.items.read()
  }
}

impl fmt::Debug for TupleValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut out = f.debug_struct("TupleValue");
    if let Some(record) = &self.record {
      out.field("record", &record.name());
    }
    out.field("len", &self.len()).finish()
  }
}
