//! Errors raised while mutating the codec registry.

use core::fmt;

/// Errors originating from codec registration and binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
  /// Codec identifier is already registered.
  DuplicateId(u32),
  /// Codec identifier falls inside the builtin reserved range.
  ReservedId(u32),
  /// Codec identifier does not fit the 31-bit wire range.
  InvalidId(u32),
  /// Codec identifier is not registered.
  UnknownCodec(u32),
}

impl fmt::Display for RegistryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::DuplicateId(id) => write!(f, "codec id {id} already registered"),
      | Self::ReservedId(id) => write!(f, "codec id {id} is reserved for builtin codecs"),
      | Self::InvalidId(id) => write!(f, "codec id {id} does not fit the 31-bit range"),
      | Self::UnknownCodec(id) => write!(f, "codec id {id} is not registered"),
    }
  }
}

impl std::error::Error for RegistryError {}
