//! Per-call identity contexts for both traversal directions.


use std::sync::Arc;

use hashbrown::HashMap;

use crate::engine_config::DEFAULT_INLINE_LIMIT;
use crate::obj_id::ObjId;
use crate::placeholder::Placeholder;
use crate::value::Value;

/// Tracks every identity serialized so far within one call.
///
/// Holding a clone of each value also pins its allocation, which is what
/// keeps truncated addresses stable for the duration of the call.
pub struct SerializeContext {
  seen:         HashMap<ObjId, Value>,
  inline_limit: usize,
}

impl SerializeContext {
  /// Creates an empty context with the default inlining threshold.
  #[must_use]
  pub fn new() -> Self {
    Self { seen: HashMap::new(), inline_limit: DEFAULT_INLINE_LIMIT }
  }

  /// Records `value` unless its identity was already seen.
  ///
  /// Returns a placeholder standing in for the earlier occurrence on a
  /// repeat, `None` the first time (and always for identity-less values).
  pub fn intern(&mut self, value: &Value) -> Option<Arc<Placeholder>> {
    let id = value.obj_id();
    if id.is_none() {
      return None;
    }
    if self.seen.contains_key(&id) {
      return Some(Placeholder::shared(id));
    }
    self.seen.insert(id, value.clone());
    None
  }

  /// Returns `true` when `id` was already serialized in this call.
  #[must_use]
  pub fn contains(&self, id: ObjId) -> bool {
    self.seen.contains_key(&id)
  }

  /// Returns the number of tracked identities.
  #[must_use]
  pub fn len(&self) -> usize {
    self.seen.len()
  }

  /// Returns `true` when no identity has been tracked yet.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.seen.is_empty()
  }

  /// Returns the threshold under which byte/text elements inline.
  #[must_use]
  pub const fn inline_limit(&self) -> usize {
    self.inline_limit
  }

  pub(crate) fn set_inline_limit(&mut self, inline_limit: usize) {
    self.inline_limit = inline_limit;
  }
}

impl Default for SerializeContext {
  fn default() -> Self {
    Self::new()
  }
}

/// Maps identities to their reconstructions during one deserialize call.
///
/// A slot may temporarily hold a placeholder; recording the real value
/// fires the placeholder's accumulated fixups before overwriting the slot.
pub struct DeserializeContext {
  objects: HashMap<ObjId, Value>,
}

impl DeserializeContext {
  /// Creates an empty context.
  #[must_use]
  pub fn new() -> Self {
    Self { objects: HashMap::new() }
  }

  /// Returns the value currently recorded for `id`.
  #[must_use]
  pub fn lookup(&self, id: ObjId) -> Option<&Value> {
    self.objects.get(&id)
  }

  /// Inserts without firing fixups; used to publish a fresh placeholder.
  pub(crate) fn insert_raw(&mut self, id: ObjId, value: Value) {
    self.objects.insert(id, value);
  }

  /// Records a reconstruction, resolving any placeholder that held the slot.
  pub fn record(&mut self, id: ObjId, value: Value) {
    if id.is_none() {
      return;
    }
    match self.objects.get(&id) {
      | Some(Value::Placeholder(existing)) => {
        let is_same_placeholder = matches!(&value, Value::Placeholder(incoming) if Arc::ptr_eq(existing, incoming));
        if is_same_placeholder {
          return;
        }
        existing.resolve(&value);
      },
      | Some(existing) => {
        // Re-recording the same reconstruction (e.g. after a resolved
        // placeholder node) is routine; anything else smells like a
        // truncated-id collision.
        if existing.obj_id() == value.obj_id() {
          return;
        }
        tracing::warn!(id = id.value(), "decode overwrote a live identity; truncated-id collision suspected");
      },
      | None => {},
    }
    self.objects.insert(id, value);
  }

  /// Returns the number of recorded identities.
  #[must_use]
  pub fn len(&self) -> usize {
    self.objects.len()
  }

  /// Returns `true` when nothing has been recorded yet.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }
}

impl Default for DeserializeContext {
  fn default() -> Self {
    Self::new()
  }
}
