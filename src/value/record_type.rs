//! Interned record (named tuple) descriptors.

#[cfg(test)]
mod tests;

use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::RwLock;

fn interned() -> &'static RwLock<HashMap<String, Arc<RecordType>>> {
  static TYPES: OnceLock<RwLock<HashMap<String, Arc<RecordType>>>> = OnceLock::new();
  TYPES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Descriptor of a named tuple: a type name plus ordered field names.
///
/// Descriptors are interned process-wide, so defining (or decoding) the same
/// name with the same fields always yields the same `Arc` and pointer
/// comparison identifies the type within one process.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordType {
  name:   String,
  fields: Vec<String>,
}

impl RecordType {
  /// Defines (or re-resolves) the descriptor for `name`.
  ///
  /// When a descriptor with the same name and fields already exists, the
  /// existing `Arc` is returned; a redefinition with different fields
  /// replaces the interned entry.
  pub fn define<N, F, I>(name: N, fields: I) -> Arc<Self>
  where
    N: Into<String>,
    F: Into<String>,
    I: IntoIterator<Item = F>, {
    let name = name.into();
    let fields = fields.into_iter().map(Into::into).collect::<Vec<_>>();
    let mut table = interned().write();
    if let Some(existing) = table.get(&name) {
      if existing.fields == fields {
        return existing.clone();
      }
    }
    let descriptor = Arc::new(Self { name: name.clone(), fields });
    table.insert(name, descriptor.clone());
    descriptor
  }

  /// Looks up an interned descriptor by name.
  #[must_use]
  pub fn lookup(name: &str) -> Option<Arc<Self>> {
    interned().read().get(name).cloned()
  }

  /// Returns the type name.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Returns the ordered field names.
  #[must_use]
  pub fn fields(&self) -> &[String] {
    &self.fields
  }

  /// Returns the position of `field`, if declared.
  #[must_use]
  pub fn index_of(&self, field: &str) -> Option<usize> {
    self.fields.iter().position(|candidate| candidate == field)
  }
}
