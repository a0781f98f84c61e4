//! Named builtin-function primitive.


use core::fmt;
use std::sync::OnceLock;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::error::CodecError;
use crate::value::Value;

/// Signature shared by all registered builtin functions.
pub type NativeFnPtr = fn(&[Value]) -> Result<Value, CodecError>;

fn table() -> &'static RwLock<HashMap<&'static str, NativeFn>> {
  static TABLE: OnceLock<RwLock<HashMap<&'static str, NativeFn>>> = OnceLock::new();
  TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Reference to a well-known host function, carried by name.
///
/// Only functions registered in the process-wide table round-trip; this is
/// deliberately not generalized to arbitrary callables.
#[derive(Clone, Copy)]
pub struct NativeFn {
  name: &'static str,
  func: NativeFnPtr,
}

impl NativeFn {
  /// Registers a function under a stable name and returns its descriptor.
  ///
  /// Re-registering a name replaces the previous entry.
  pub fn register(name: &'static str, func: NativeFnPtr) -> Self {
    let descriptor = Self { name, func };
    table().write().insert(name, descriptor);
    descriptor
  }

  /// Resolves a wire name against the process-wide table.
  #[must_use]
  pub fn resolve(name: &str) -> Option<Self> {
    table().read().get(name).copied()
  }

  /// Returns the stable name of the function.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.name
  }

  /// Invokes the underlying function.
  ///
  /// # Errors
  ///
  /// Propagates whatever the registered function returns.
  pub fn call(&self, args: &[Value]) -> Result<Value, CodecError> {
    (self.func)(args)
  }
}

impl PartialEq for NativeFn {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Eq for NativeFn {}

impl fmt::Debug for NativeFn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("NativeFn").field(&self.name).finish()
  }
}
