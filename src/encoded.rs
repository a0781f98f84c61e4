//! Intermediate serialized form returned by codec `encode`.

use std::sync::Arc;

use bytes::Bytes;

use crate::placeholder::Placeholder;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Result of one codec `encode` step.
pub enum Encoded {
  /// The value's identity was already serialized in this call.
  Placeholder(Arc<Placeholder>),
  /// A serialized node: codec-specific header tail plus subcomponents.
  Node {
    /// Codec-specific header portion.
    tail:     Vec<HeaderValue>,
    /// Subcomponents; their shape decides whether the node is final.
    children: Children,
  },
}

impl Encoded {
  /// Builds a final node whose subcomponents are transport buffers.
  #[must_use]
  pub fn final_node(tail: Vec<HeaderValue>, buffers: Vec<Bytes>) -> Self {
    Self::Node { tail, children: Children::Buffers(buffers) }
  }

  /// Builds a non-final node whose subcomponents recurse.
  #[must_use]
  pub fn recurse(tail: Vec<HeaderValue>, values: Vec<Value>) -> Self {
    Self::Node { tail, children: Children::Values(values) }
  }
}

/// Subcomponents of a serialized node.
pub enum Children {
  /// Contiguous byte regions written verbatim by the transport (final).
  Buffers(Vec<Bytes>),
  /// Values still requiring recursive serialization (non-final).
  Values(Vec<Value>),
}

impl Children {
  /// Returns `true` when the node is final.
  #[must_use]
  pub const fn is_final(&self) -> bool {
    matches!(self, Self::Buffers(_))
  }

  /// Returns the number of subcomponents.
  #[must_use]
  pub fn len(&self) -> usize {
    match self {
      | Self::Buffers(buffers) => buffers.len(),
      | Self::Values(values) => values.len(),
    }
  }

  /// Returns `true` when the node has no subcomponents.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
