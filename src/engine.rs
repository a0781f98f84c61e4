//! Explicit-stack serialization and deserialization driver.
//!
//! Both directions run an iterative depth-first traversal over explicit
//! frame stacks; the host call stack never recurses, so inputs may be
//! nested arbitrarily deep (up to the configured frame bound).

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use bytes::Bytes;

use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::defaults;
use crate::encoded::{Children, Encoded};
use crate::engine_config::EngineConfig;
use crate::error::CodecError;
use crate::obj_id::ObjId;
use crate::registry::CodecRegistry;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::{HeaderNode, HeaderValue, SerializedGraph};

/// Serializes a value against the process-wide default registry.
///
/// # Errors
///
/// Returns [`CodecError`] when dispatch or a codec fails.
pub fn serialize(value: &Value) -> Result<(SerializedGraph, Vec<Bytes>), CodecError> {
  let mut ctx = SerializeContext::new();
  serialize_with(&defaults::default_registry(), value, &mut ctx, &EngineConfig::new())
}

/// Serializes a value with an explicit registry, context, and config.
///
/// Emitted buffers are reference-counted views into memory reachable from
/// `value`; callers must not mutate the sources until transport completes.
///
/// # Errors
///
/// Returns [`CodecError`] when dispatch or a codec fails, or when the
/// traversal exceeds the configured depth bound.
pub fn serialize_with(
  registry: &CodecRegistry,
  value: &Value,
  ctx: &mut SerializeContext,
  config: &EngineConfig,
) -> Result<(SerializedGraph, Vec<Bytes>), CodecError> {
  ctx.set_inline_limit(config.inline_limit());
  let mut buffers: Vec<Bytes> = Vec::new();
  let mut stack: Vec<EncodeFrame> = Vec::new();
  let mut current = value.clone();

  let root = 'next_value: loop {
    let mut node = match encode_step(registry, ctx, config, &mut stack, &mut buffers, &current)? {
      | EncodeOutcome::Complete(node) => node,
      | EncodeOutcome::Descend(child) => {
        current = child;
        continue 'next_value;
      },
    };
    // Fold completed nodes upward until a frame still has pending children.
    loop {
      let Some(top) = stack.last_mut() else { break 'next_value node };
      top.done.push(node);
      if let Some(next) = top.pending.pop_front() {
        current = next;
        continue 'next_value;
      }
      let Some(frame) = stack.pop() else {
        return Err(CodecError::Internal("encode stack underflow"));
      };
      node = HeaderNode::parent(frame.codec_id, frame.obj_id, frame.tail, frame.done);
    }
  };

  tracing::trace!(buffers = buffers.len(), tracked = ctx.len(), "serialized value graph");
  Ok((SerializedGraph::new(root), buffers))
}

/// Deserializes a graph against the process-wide default registry.
///
/// # Errors
///
/// Returns [`CodecError`] when the header is malformed, a codec id is
/// unknown, or the buffer list does not line up with the header.
pub fn deserialize(graph: &SerializedGraph, buffers: &[Bytes]) -> Result<Value, CodecError> {
  let mut ctx = DeserializeContext::new();
  deserialize_with(&defaults::default_registry(), graph, buffers, &mut ctx, &EngineConfig::new())
}

/// Deserializes a graph with an explicit registry, context, and config.
///
/// Buffers may be borrowed views of the transport's receive buffer; the
/// engine consumes them through a single forward-running cursor and
/// requires the list to be exhausted exactly.
///
/// # Errors
///
/// Returns [`CodecError`] when the header is malformed, a codec id is
/// unknown, the buffer list does not line up with the header, or the
/// traversal exceeds the configured depth bound.
pub fn deserialize_with(
  registry: &CodecRegistry,
  graph: &SerializedGraph,
  buffers: &[Bytes],
  ctx: &mut DeserializeContext,
  config: &EngineConfig,
) -> Result<Value, CodecError> {
  let mut cursor = 0_usize;
  let mut stack: Vec<DecodeFrame<'_>> = Vec::new();
  let mut current = graph.root();

  let value = 'next_node: loop {
    let mut value = match decode_step(registry, ctx, config, &mut stack, buffers, &mut cursor, current)? {
      | DecodeOutcome::Complete(value) => value,
      | DecodeOutcome::Descend(child) => {
        current = child;
        continue 'next_node;
      },
    };
    // Feed completed children upward, materializing frames as they fill.
    loop {
      let Some(top) = stack.last_mut() else { break 'next_node value };
      top.done.push(value);
      if top.next_child < top.children.len() {
        let children = top.children;
        current = &children[top.next_child];
        top.next_child += 1;
        continue 'next_node;
      }
      let Some(frame) = stack.pop() else {
        return Err(CodecError::Internal("decode stack underflow"));
      };
      let codec = registry.codec_by_id(frame.codec_id)?;
      let folded = codec.decode(frame.tail, ctx, Subs::Values(frame.done))?;
      ctx.record(frame.obj_id, folded.clone());
      value = folded;
    }
  };

  if cursor != buffers.len() {
    return Err(CodecError::BufferCountMismatch { expected: cursor, available: buffers.len() });
  }
  tracing::trace!(buffers = buffers.len(), recorded = ctx.len(), "deserialized value graph");
  Ok(value)
}

struct EncodeFrame {
  codec_id: CodecId,
  obj_id:   ObjId,
  tail:     Vec<HeaderValue>,
  pending:  VecDeque<Value>,
  done:     Vec<HeaderNode>,
}

enum EncodeOutcome {
  Complete(HeaderNode),
  Descend(Value),
}

fn encode_step(
  registry: &CodecRegistry,
  ctx: &mut SerializeContext,
  config: &EngineConfig,
  stack: &mut Vec<EncodeFrame>,
  buffers: &mut Vec<Bytes>,
  value: &Value,
) -> Result<EncodeOutcome, CodecError> {
  let codec = registry.codec_for_value(value)?;
  let mut codec_id = codec.codec_id();
  let mut obj_id = value.obj_id();
  let mut encoded = codec.encode(value, ctx)?;

  // A dedup hit re-dispatches on the placeholder, which yields a final node.
  if let Encoded::Placeholder(placeholder) = encoded {
    let stand_in = Value::Placeholder(placeholder);
    let placeholder_codec = registry.codec_for_value(&stand_in)?;
    codec_id = placeholder_codec.codec_id();
    obj_id = stand_in.obj_id();
    encoded = placeholder_codec.encode(&stand_in, ctx)?;
  }

  match encoded {
    | Encoded::Placeholder(_) => Err(CodecError::Internal("placeholder codec returned another placeholder")),
    | Encoded::Node { tail, children: Children::Buffers(emitted) } => {
      let node = HeaderNode::leaf(codec_id, obj_id, emitted.len() as u32, true, tail);
      buffers.extend(emitted);
      Ok(EncodeOutcome::Complete(node))
    },
    | Encoded::Node { tail, children: Children::Values(values) } => {
      let mut pending = VecDeque::from(values);
      match pending.pop_front() {
        | None => Ok(EncodeOutcome::Complete(HeaderNode::leaf(codec_id, obj_id, 0, false, tail))),
        | Some(first) => {
          if stack.len() >= config.max_depth() {
            return Err(CodecError::DepthExceeded(config.max_depth()));
          }
          stack.push(EncodeFrame { codec_id, obj_id, tail, pending, done: Vec::new() });
          Ok(EncodeOutcome::Descend(first))
        },
      }
    },
  }
}

struct DecodeFrame<'a> {
  codec_id:   CodecId,
  obj_id:     ObjId,
  tail:       &'a [HeaderValue],
  children:   &'a [HeaderNode],
  next_child: usize,
  done:       Vec<Value>,
}

enum DecodeOutcome<'a> {
  Complete(Value),
  Descend(&'a HeaderNode),
}

fn decode_step<'a>(
  registry: &CodecRegistry,
  ctx: &mut DeserializeContext,
  config: &EngineConfig,
  stack: &mut Vec<DecodeFrame<'a>>,
  buffers: &[Bytes],
  cursor: &mut usize,
  node: &'a HeaderNode,
) -> Result<DecodeOutcome<'a>, CodecError> {
  let codec = registry.codec_by_id(node.codec_id())?;
  let sub_count = node.sub_count() as usize;

  if node.is_final() {
    if !node.children().is_empty() {
      return Err(CodecError::malformed("final node carries child headers"));
    }
    let available = buffers.len() - *cursor;
    if sub_count > available {
      return Err(CodecError::BufferCountMismatch { expected: sub_count, available });
    }
    let split = buffers[*cursor..*cursor + sub_count].to_vec();
    *cursor += sub_count;
    let value = codec.decode(node.tail(), ctx, Subs::Buffers(split))?;
    ctx.record(node.obj_id(), value.clone());
    return Ok(DecodeOutcome::Complete(value));
  }

  if node.children().len() != sub_count {
    return Err(CodecError::malformed("child header count does not match the node's sub count"));
  }
  if sub_count == 0 {
    let value = codec.decode(node.tail(), ctx, Subs::Values(Vec::new()))?;
    ctx.record(node.obj_id(), value.clone());
    return Ok(DecodeOutcome::Complete(value));
  }
  if stack.len() >= config.max_depth() {
    return Err(CodecError::DepthExceeded(config.max_depth()));
  }
  stack.push(DecodeFrame {
    codec_id:   node.codec_id(),
    obj_id:     node.obj_id(),
    tail:       node.tail(),
    children:   node.children(),
    next_child: 1,
    done:       Vec::new(),
  });
  Ok(DecodeOutcome::Descend(&node.children()[0]))
}
