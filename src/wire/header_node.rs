//! Header tree node.

use crate::codec_id::CodecId;
use crate::obj_id::ObjId;
use crate::wire::header_value::HeaderValue;

/// One serialized node: the common prefix, the codec tail, and (for
/// non-final nodes) the child node headers.
///
/// For a final node `sub_count` counts buffers in the flat buffer list;
/// otherwise it counts entries in `children`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeaderNode {
  codec_id:  CodecId,
  obj_id:    ObjId,
  sub_count: u32,
  is_final:  bool,
  tail:      Vec<HeaderValue>,
  children:  Vec<HeaderNode>,
}

impl HeaderNode {
  /// Builds a childless node (final, or non-final with no subcomponents).
  #[must_use]
  pub fn leaf(codec_id: CodecId, obj_id: ObjId, sub_count: u32, is_final: bool, tail: Vec<HeaderValue>) -> Self {
    Self { codec_id, obj_id, sub_count, is_final, tail, children: Vec::new() }
  }

  /// Builds a non-final node over already-folded child headers.
  #[must_use]
  pub fn parent(codec_id: CodecId, obj_id: ObjId, tail: Vec<HeaderValue>, children: Vec<HeaderNode>) -> Self {
    let sub_count = children.len() as u32;
    Self { codec_id, obj_id, sub_count, is_final: false, tail, children }
  }

  /// Returns the codec that produced this node.
  #[must_use]
  pub const fn codec_id(&self) -> CodecId {
    self.codec_id
  }

  /// Returns the identity recorded for this node.
  #[must_use]
  pub const fn obj_id(&self) -> ObjId {
    self.obj_id
  }

  /// Returns the number of subcomponents (buffers or children).
  #[must_use]
  pub const fn sub_count(&self) -> u32 {
    self.sub_count
  }

  /// Returns `true` when the subcomponents are buffers.
  #[must_use]
  pub const fn is_final(&self) -> bool {
    self.is_final
  }

  /// Returns the codec-specific header tail.
  #[must_use]
  pub fn tail(&self) -> &[HeaderValue] {
    &self.tail
  }

  /// Returns the child node headers (empty for final nodes).
  #[must_use]
  pub fn children(&self) -> &[HeaderNode] {
    &self.children
  }
}
