//! Builtin codec for mappings.

use std::sync::Arc;

use crate::builtin::collection::{parse_indices, scatter, split_elements};
use crate::builtin::MAP_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::{MapValue, Value};
use crate::wire::HeaderValue;

/// Serializes mappings as two partitioned sequences, keys then values.
///
/// Tail layout: key residual, key indices, value residual, value indices,
/// key child count, type slot. Subcomponents are the propagated keys
/// followed by the propagated values.
pub struct MapCodec;

impl Codec for MapCodec {
  fn codec_id(&self) -> CodecId {
    MAP_ID
  }

  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::Map(map) = value else {
      return Err(CodecError::Internal("map codec dispatched on a non-map value"));
    };
    if let Some(placeholder) = ctx.intern(value) {
      return Ok(Encoded::Placeholder(placeholder));
    }
    let entries = map.entries();
    let (keys, values): (Vec<Value>, Vec<Value>) = entries.into_iter().unzip();
    let key_split = split_elements(&keys, ctx.inline_limit());
    let value_split = split_elements(&values, ctx.inline_limit());
    let (key_residual, key_indices) = key_split.tail_elements();
    let (value_residual, value_indices) = value_split.tail_elements();
    let tail = vec![
      key_residual,
      key_indices,
      value_residual,
      value_indices,
      HeaderValue::Int(key_split.children.len() as i64),
      HeaderValue::Null,
    ];
    let mut children = key_split.children;
    children.extend(value_split.children);
    Ok(Encoded::recurse(tail, children))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    let [key_residual, key_indices, value_residual, value_indices, key_child_count, type_slot] = tail else {
      return Err(CodecError::malformed("map header carries six elements"));
    };
    if *type_slot != HeaderValue::Null {
      return Err(CodecError::malformed("unsupported map subtype"));
    }
    let children = subs.into_values()?;
    let key_count = usize::try_from(key_child_count.as_int()?)
      .map_err(|_| CodecError::malformed("negative key child count"))?;
    if key_count > children.len() {
      return Err(CodecError::malformed("key child count exceeds subcomponents"));
    }
    let (key_children, value_children) = children.split_at(key_count);
    let keys = scatter(key_residual.as_seq()?, &parse_indices(key_indices)?, key_children)?;
    let values = scatter(value_residual.as_seq()?, &parse_indices(value_indices)?, value_children)?;
    if keys.items.len() != values.items.len() {
      return Err(CodecError::malformed("key and value sequences differ in length"));
    }

    let entries = keys.items.into_iter().zip(values.items).collect::<Vec<_>>();
    let map = Arc::new(MapValue::from_entries(entries));
    for (slot, placeholder) in keys.placeholders {
      let target = map.clone();
      placeholder.on_resolve(Box::new(move |resolved| target.replace_key_at(slot, resolved)));
    }
    for (slot, placeholder) in values.placeholders {
      let target = map.clone();
      placeholder.on_resolve(Box::new(move |resolved| target.replace_value_at(slot, resolved)));
    }
    Ok(Value::Map(map))
  }
}
