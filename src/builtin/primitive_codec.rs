//! Builtin codec for the primitive value set.

use crate::builtin::PRIMITIVE_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Carries primitives entirely inside the header; no buffers, no identity.
pub struct PrimitiveCodec;

impl Codec for PrimitiveCodec {
  fn codec_id(&self) -> CodecId {
    PRIMITIVE_ID
  }

  fn encode(&self, value: &Value, _ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Some(header) = HeaderValue::from_primitive(value) else {
      return Err(CodecError::Internal("primitive codec dispatched on a non-primitive value"));
    };
    Ok(Encoded::final_node(vec![header], Vec::new()))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    subs.into_buffers()?;
    let [element] = tail else {
      return Err(CodecError::malformed("primitive header carries exactly one element"));
    };
    element.to_value()
  }
}
