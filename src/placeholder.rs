//! Stand-in for the repeated occurrence of a shared identity.

#[cfg(test)]
mod tests;

use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::obj_id::ObjId;
use crate::value::Value;

/// Callback fired with the real value once a forward reference resolves.
pub type Fixup = Box<dyn FnOnce(Value) + Send>;

/// Marks the second and later occurrences of an identity within one call.
///
/// During serialization a placeholder only carries the identity. During
/// deserialization, parents that had to embed an unresolved placeholder
/// register fixups here; when the real value materializes the fixups fire
/// and patch those parents in place.
pub struct Placeholder {
  id:     ObjId,
  fixups: Mutex<Vec<Fixup>>,
}

impl Placeholder {
  /// Creates a placeholder for `id`.
  #[must_use]
  pub fn new(id: ObjId) -> Self {
    Self { id, fixups: Mutex::new(Vec::new()) }
  }

  /// Creates a shared handle around a new placeholder.
  #[must_use]
  pub fn shared(id: ObjId) -> Arc<Self> {
    Arc::new(Self::new(id))
  }

  /// Returns the identity this placeholder stands in for.
  #[must_use]
  pub const fn id(&self) -> ObjId {
    self.id
  }

  /// Registers a callback to run when the real value materializes.
  pub fn on_resolve(&self, fixup: Fixup) {
    self.fixups.lock().push(fixup);
  }

  /// Fires all accumulated fixups with the resolved value.
  pub fn resolve(&self, value: &Value) {
    let drained = core::mem::take(&mut *self.fixups.lock());
    for fixup in drained {
      fixup(value.clone());
    }
  }

  /// Returns the number of fixups still waiting.
  #[must_use]
  pub fn pending_fixups(&self) -> usize {
    self.fixups.lock().len()
  }
}

impl fmt::Debug for Placeholder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Placeholder").field("id", &self.id).field("pending", &self.pending_fixups()).finish()
  }
}
