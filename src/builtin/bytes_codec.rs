//! Builtin codec for byte payloads.

use crate::builtin::BYTES_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Passes byte payloads through as a single zero-copy buffer.
pub struct BytesCodec;

impl Codec for BytesCodec {
  fn codec_id(&self) -> CodecId {
    BYTES_ID
  }

  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::Bytes(payload) = value else {
      return Err(CodecError::Internal("bytes codec dispatched on a non-bytes value"));
    };
    if let Some(placeholder) = ctx.intern(value) {
      return Ok(Encoded::Placeholder(placeholder));
    }
    Ok(Encoded::final_node(Vec::new(), vec![payload.clone()]))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    if !tail.is_empty() {
      return Err(CodecError::malformed("bytes header carries no tail"));
    }
    let buffers = subs.into_buffers()?;
    let [buffer] = buffers.as_slice() else {
      return Err(CodecError::BufferCountMismatch { expected: 1, available: buffers.len() });
    };
    Ok(Value::Bytes(buffer.clone()))
  }
}
