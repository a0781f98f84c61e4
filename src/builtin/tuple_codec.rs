//! Builtin codec for plain and named tuples.

use crate::builtin::collection::{parse_indices, scatter, split_elements};
use crate::builtin::TUPLE_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::{RecordType, TupleValue, Value};
use crate::wire::HeaderValue;

/// Serializes tuples like lists, with the record descriptor in the type
/// slot so named tuples reconstruct through the interned constructor.
pub struct TupleCodec;

impl Codec for TupleCodec {
  fn codec_id(&self) -> CodecId {
    TUPLE_ID
  }

  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::Tuple(tuple) = value else {
      return Err(CodecError::Internal("tuple codec dispatched on a non-tuple value"));
    };
    if let Some(placeholder) = ctx.intern(value) {
      return Ok(Encoded::Placeholder(placeholder));
    }
    let elements = tuple.snapshot();
    let split = split_elements(&elements, ctx.inline_limit());
    let (residual, indices) = split.tail_elements();
    let type_slot = match tuple.record_type() {
      | None => HeaderValue::Null,
      | Some(record) => HeaderValue::Seq(vec![
        HeaderValue::Str(record.name().to_string()),
        HeaderValue::Seq(record.fields().iter().map(|field| HeaderValue::Str(field.clone())).collect()),
      ]),
    };
    Ok(Encoded::recurse(vec![residual, indices, type_slot], split.children))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    let [residual, indices, type_slot] = tail else {
      return Err(CodecError::malformed("tuple header carries three elements"));
    };
    let children = subs.into_values()?;
    let scattered = scatter(residual.as_seq()?, &parse_indices(indices)?, &children)?;
    let tuple = match type_slot {
      | HeaderValue::Null => TupleValue::shared(scattered.items),
      | descriptor => {
        let parts = descriptor.as_seq()?;
        let [name, fields] = parts else {
          return Err(CodecError::malformed("record descriptor carries a name and field list"));
        };
        let fields = fields.as_seq()?.iter().map(HeaderValue::as_str).collect::<Result<Vec<_>, _>>()?;
        let record = RecordType::define(name.as_str()?, fields);
        TupleValue::shared_record(record, scattered.items)
      },
    };
    for (slot, placeholder) in scattered.placeholders {
      let target = tuple.clone();
      placeholder.on_resolve(Box::new(move |resolved| target.set(slot, resolved)));
    }
    Ok(Value::Tuple(tuple))
  }
}
