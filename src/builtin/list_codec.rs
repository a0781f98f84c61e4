//! Builtin codec for lists.

use crate::builtin::collection::{parse_indices, scatter, split_elements};
use crate::builtin::LIST_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::{ListValue, Value};
use crate::wire::HeaderValue;

/// Serializes lists with short elements inlined into the header.
///
/// Tail layout: residual sequence, propagated indices, type slot. The type
/// slot is always null here; it exists so container headers stay uniform
/// with named tuples.
pub struct ListCodec;

impl Codec for ListCodec {
  fn codec_id(&self) -> CodecId {
    LIST_ID
  }

  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::List(list) = value else {
      return Err(CodecError::Internal("list codec dispatched on a non-list value"));
    };
    if let Some(placeholder) = ctx.intern(value) {
      return Ok(Encoded::Placeholder(placeholder));
    }
    let elements = list.snapshot();
    let split = split_elements(&elements, ctx.inline_limit());
    let (residual, indices) = split.tail_elements();
    Ok(Encoded::recurse(vec![residual, indices, HeaderValue::Null], split.children))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    let [residual, indices, type_slot] = tail else {
      return Err(CodecError::malformed("list header carries three elements"));
    };
    if *type_slot != HeaderValue::Null {
      return Err(CodecError::malformed("unsupported list subtype"));
    }
    let children = subs.into_values()?;
    let scattered = scatter(residual.as_seq()?, &parse_indices(indices)?, &children)?;
    let list = ListValue::shared(scattered.items);
    for (slot, placeholder) in scattered.placeholders {
      let target = list.clone();
      placeholder.on_resolve(Box::new(move |resolved| target.set(slot, resolved)));
    }
    Ok(Value::List(list))
  }
}
