//! Top-level serialized output.

use std::collections::BTreeMap;

use crate::wire::header_node::HeaderNode;
use crate::wire::header_value::HeaderValue;

/// Complete header side of a serialized value: the reserved auxiliary
/// metadata map plus the root node tree. The companion buffer list travels
/// separately so transports can scatter/gather it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerializedGraph {
  meta: BTreeMap<String, HeaderValue>,
  root: HeaderNode,
}

impl SerializedGraph {
  /// Wraps a root node with an empty metadata map.
  #[must_use]
  pub fn new(root: HeaderNode) -> Self {
    Self { meta: BTreeMap::new(), root }
  }

  /// Returns the auxiliary metadata map (reserved, empty today).
  #[must_use]
  pub const fn meta(&self) -> &BTreeMap<String, HeaderValue> {
    &self.meta
  }

  /// Returns the root node.
  #[must_use]
  pub const fn root(&self) -> &HeaderNode {
    &self.root
  }
}
