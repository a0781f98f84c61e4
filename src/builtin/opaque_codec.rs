//! Builtin fallback codec delegating to the external object codec.

use std::sync::Arc;

use crate::builtin::OPAQUE_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::opaque::ObjectCodec;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Routes values without a dedicated codec through the opaque fallback.
///
/// The first buffer is the object codec's self-describing prefix; any
/// further buffers are the extras it emitted, in order.
pub struct OpaqueCodec {
  object_codec: Arc<dyn ObjectCodec>,
}

impl OpaqueCodec {
  /// Creates the fallback around an external object codec.
  #[must_use]
  pub fn new(object_codec: Arc<dyn ObjectCodec>) -> Self {
    Self { object_codec }
  }
}

impl Codec for OpaqueCodec {
  fn codec_id(&self) -> CodecId {
    OPAQUE_ID
  }

  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::Opaque(object) = value else {
      return Err(CodecError::NoHandler(value.kind_name()));
    };
    if let Some(placeholder) = ctx.intern(value) {
      return Ok(Encoded::Placeholder(placeholder));
    }
    let (prefix, extras) = self.object_codec.encode(object)?;
    let mut buffers = Vec::with_capacity(1 + extras.len());
    buffers.push(prefix);
    buffers.extend(extras);
    Ok(Encoded::final_node(Vec::new(), buffers))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    if !tail.is_empty() {
      return Err(CodecError::malformed("opaque header carries no tail"));
    }
    let buffers = subs.into_buffers()?;
    let Some((prefix, extras)) = buffers.split_first() else {
      return Err(CodecError::BufferCountMismatch { expected: 1, available: 0 });
    };
    let object = self.object_codec.decode(prefix, extras)?;
    Ok(Value::Opaque(object))
  }
}
