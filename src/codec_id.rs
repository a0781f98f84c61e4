//! Codec identifier newtype.


use core::fmt;

use crate::registry_error::RegistryError;

/// Identifiers 0..=31 are reserved for the builtin codecs.
pub const RESERVED_MAX: u32 = 31;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable 31-bit identifier assigned to a codec implementation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct CodecId(u32);

impl CodecId {
  /// Returns the underlying numeric identifier.
  #[must_use]
  pub const fn value(self) -> u32 {
    self.0
  }

  /// Creates a codec id without performing range validation.
  #[must_use]
  pub(crate) const fn from_raw(value: u32) -> Self {
    Self(value)
  }

  /// Derives a deterministic identifier from a codec's fully-qualified name.
  ///
  /// The FNV-1a hash of the name is folded into the non-reserved 31-bit
  /// range, so the same name always yields the same identifier on every
  /// host. Distinct names may still collide; registration detects that.
  #[must_use]
  pub fn from_name(name: &str) -> Self {
    let mut hash = FNV_OFFSET;
    for byte in name.as_bytes() {
      hash ^= u64::from(*byte);
      hash = hash.wrapping_mul(FNV_PRIME);
    }
    let span = (1_u64 << 31) - u64::from(RESERVED_MAX) - 1;
    let folded = RESERVED_MAX + 1 + u32::try_from(hash % span).unwrap_or(0);
    Self(folded)
  }
}

impl fmt::Debug for CodecId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("CodecId").field(&self.0).finish()
  }
}

impl TryFrom<u32> for CodecId {
  type Error = RegistryError;

  fn try_from(value: u32) -> Result<Self, Self::Error> {
    if value <= RESERVED_MAX {
      return Err(RegistryError::ReservedId(value));
    }
    if value > i32::MAX as u32 {
      return Err(RegistryError::InvalidId(value));
    }
    Ok(Self(value))
  }
}
