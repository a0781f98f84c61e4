//! Subcomponents handed to codec `decode`.

use bytes::Bytes;

use crate::error::CodecError;
use crate::value::Value;

/// Subcomponents of the node being decoded.
pub enum Subs {
  /// Raw buffers split off the flat buffer list (final node).
  Buffers(Vec<Bytes>),
  /// Already-deserialized child values (non-final node).
  Values(Vec<Value>),
}

impl Subs {
  /// Unwraps buffer subcomponents.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::MalformedHeader`] when the node carried child
  /// values instead.
  pub fn into_buffers(self) -> Result<Vec<Bytes>, CodecError> {
    match self {
      | Self::Buffers(buffers) => Ok(buffers),
      | Self::Values(_) => Err(CodecError::malformed("expected buffer subcomponents")),
    }
  }

  /// Unwraps child-value subcomponents.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::MalformedHeader`] when the node carried raw
  /// buffers instead.
  pub fn into_values(self) -> Result<Vec<Value>, CodecError> {
    match self {
      | Self::Values(values) => Ok(values),
      | Self::Buffers(_) => Err(CodecError::malformed("expected child-value subcomponents")),
    }
  }
}
