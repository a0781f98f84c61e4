//! Builtin codec for shared-reference placeholders.

use crate::builtin::PLACEHOLDER_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::obj_id::ObjId;
use crate::placeholder::Placeholder;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Serializes a placeholder as its bare identity.
///
/// On decode the identity either resolves against the context or yields a
/// fresh placeholder that parents register fixups on.
pub struct PlaceholderCodec;

impl Codec for PlaceholderCodec {
  fn codec_id(&self) -> CodecId {
    PLACEHOLDER_ID
  }

  fn encode(&self, value: &Value, _ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::Placeholder(placeholder) = value else {
      return Err(CodecError::Internal("placeholder codec dispatched on a non-placeholder value"));
    };
    let tail = vec![HeaderValue::Int(i64::from(placeholder.id().value()))];
    Ok(Encoded::final_node(tail, Vec::new()))
  }

  fn decode(&self, tail: &[HeaderValue], ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    subs.into_buffers()?;
    let [id_element] = tail else {
      return Err(CodecError::malformed("placeholder header carries exactly one element"));
    };
    let id = u32::try_from(id_element.as_int()?).map_err(|_| CodecError::malformed("placeholder id out of range"))?;
    let id = ObjId::from_raw(id);
    if let Some(resolved) = ctx.lookup(id) {
      return Ok(resolved.clone());
    }
    let value = Value::Placeholder(Placeholder::shared(id));
    ctx.insert_raw(id, value.clone());
    Ok(value)
  }
}
