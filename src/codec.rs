//! Core codec trait.

use core::fmt;

use crate::codec_id::CodecId;
use crate::context::{DeserializeContext, SerializeContext};
use crate::encoded::Encoded;
use crate::error::CodecError;
use crate::subs::Subs;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Stateless two-operation codec for one class of values.
pub trait Codec: Send + Sync {
  /// Returns the stable identifier of the codec.
  fn codec_id(&self) -> CodecId;

  /// Converts a value into its intermediate serialized form.
  ///
  /// Identity-bearing codecs start by interning the value in `ctx` and
  /// return [`Encoded::Placeholder`] on a repeat occurrence.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError`] if the value cannot be encoded.
  fn encode(&self, value: &Value, ctx: &mut SerializeContext) -> Result<Encoded, CodecError>;

  /// Materializes a value from its codec-specific header tail and subcomponents.
  ///
  /// `subs` holds raw buffers for final nodes and already-deserialized
  /// child values otherwise.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError`] if the header or subcomponents are malformed.
  fn decode(&self, tail: &[HeaderValue], ctx: &mut DeserializeContext, subs: Subs) -> Result<Value, CodecError>;
}

impl fmt::Debug for dyn Codec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Codec").field("codec_id", &self.codec_id()).finish()
  }
}
