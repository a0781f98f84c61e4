//! Builtin codec for unicode text.

use std::sync::Arc;

use bytes::Bytes;

use crate::builtin::TEXT_ID;
use crate::codec::Codec;
use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Lets `Bytes` borrow the utf-8 payload straight out of the shared text.
struct TextBuffer(Arc<str>);

impl AsRef<[u8]> for TextBuffer {
  fn as_ref(&self) -> &[u8] {
    self.0.as_bytes()
  }
}

/// Ships text as one utf-8 buffer, borrowed zero-copy from the value.
pub struct TextCodec;

impl Codec for TextCodec {
  fn codec_id(&self) -> CodecId {
    TEXT_ID
  }

  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError> {
    let Value::Text(text) = value else {
      return Err(CodecError::Internal("text codec dispatched on a non-text value"));
    };
    if let Some(placeholder) = ctx.intern(value) {
      return Ok(Encoded::Placeholder(placeholder));
    }
    let buffer = Bytes::from_owner(TextBuffer(text.clone()));
    Ok(Encoded::final_node(Vec::new(), vec![buffer]))
  }

  fn decode(&self, tail: &[HeaderValue], _ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError> {
    if !tail.is_empty() {
      return Err(CodecError::malformed("text header carries no tail"));
    }
    let buffers = subs.into_buffers()?;
    let [buffer] = buffers.as_slice() else {
      return Err(CodecError::BufferCountMismatch { expected: 1, available: buffers.len() });
    };
    let decoded =
      core::str::from_utf8(buffer).map_err(|_| CodecError::malformed("text buffer is not valid utf-8"))?;
    Ok(Value::Text(Arc::from(decoded)))
  }
}
