//! Object identity newtype used for shared-reference deduplication.


use core::fmt;

/// 32-bit truncation of a value's in-memory identity.
///
/// Identity is taken from the address behind the value's shared handle, so
/// it is stable for as long as the handle is alive. Two live objects may
/// truncate to the same id; callers tolerate that per the wire contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ObjId(u32);

impl ObjId {
  /// Sentinel for values that carry no identity (primitives).
  pub const NONE: Self = Self(0);

  /// Returns the underlying numeric identity.
  #[must_use]
  pub const fn value(self) -> u32 {
    self.0
  }

  /// Creates an id from a raw 32-bit identity.
  #[must_use]
  pub const fn from_raw(value: u32) -> Self {
    Self(value)
  }

  /// Truncates a host address into an identity.
  #[must_use]
  pub fn from_addr(addr: usize) -> Self {
    Self(addr as u32)
  }

  /// Returns `true` when the id marks an identity-less value.
  #[must_use]
  pub const fn is_none(self) -> bool {
    self.0 == 0
  }
}

impl fmt::Debug for ObjId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("ObjId").field(&self.0).finish()
  }
}
