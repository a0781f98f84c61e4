//! Errors surfaced by serialization and deserialization.

use core::fmt;

/// Errors originating from the serialization engine and its codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
  /// No codec is registered for the value's dispatch type and no fallback applies.
  NoHandler(&'static str),
  /// Codec identifier on the wire could not be resolved.
  UnknownCodecId(u32),
  /// Header tail does not match the shape the codec expects.
  MalformedHeader(String),
  /// Buffer list does not carry the number of buffers the header promises.
  BufferCountMismatch {
    /// Number of buffers the current node requires.
    expected:  usize,
    /// Number of buffers still available at the cursor.
    available: usize,
  },
  /// Traversal frame stack exceeded the configured bound.
  DepthExceeded(usize),
  /// Builtin-function name on the wire has no process-wide registration.
  UnknownNativeFn(String),
  /// The opaque object codec failed while encoding.
  ObjectEncode(String),
  /// The opaque object codec failed while decoding.
  ObjectDecode(String),
  /// Internal invariant violation; indicates a bug in the engine or a codec.
  Internal(&'static str),
}

impl CodecError {
  /// Builds a [`CodecError::MalformedHeader`] from any displayable reason.
  #[must_use]
  pub fn malformed(reason: impl Into<String>) -> Self {
    Self::MalformedHeader(reason.into())
  }
}

impl fmt::Display for CodecError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::NoHandler(kind) => write!(f, "no codec registered for {kind}"),
      | Self::UnknownCodecId(id) => write!(f, "unknown codec id {id}"),
      | Self::MalformedHeader(reason) => write!(f, "malformed header: {reason}"),
      | Self::BufferCountMismatch { expected, available } => {
        write!(f, "buffer count mismatch; node requires {expected} but {available} remain")
      },
      | Self::DepthExceeded(limit) => write!(f, "traversal depth exceeded the configured bound of {limit}"),
      | Self::UnknownNativeFn(name) => write!(f, "native function '{name}' is not registered"),
      | Self::ObjectEncode(reason) => write!(f, "opaque object encode failed: {reason}"),
      | Self::ObjectDecode(reason) => write!(f, "opaque object decode failed: {reason}"),
      | Self::Internal(reason) => write!(f, "internal invariant violated: {reason}"),
    }
  }
}

impl std::error::Error for CodecError {}
