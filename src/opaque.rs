//! Opaque fallback seam: user objects and the external object codec.


use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::error::CodecError;

/// User-defined value carried through the serializer as a black box.
pub trait OpaqueObject: fmt::Debug + Send + Sync {
  /// Provides access to the dynamic type used for downcasting.
  fn as_any(&self) -> &(dyn Any + Send + Sync);

  /// Structural equality against another opaque object.
  fn opaque_eq(&self, other: &dyn OpaqueObject) -> bool;
}

/// Shared handle to an opaque object.
pub type SharedOpaque = Arc<dyn OpaqueObject>;

/// External codec the engine delegates otherwise-unhandled values to.
///
/// `encode` produces a self-describing prefix buffer plus ordered extra
/// buffers; `decode` accepts the same shapes and reconstructs the object.
/// The engine never looks inside either.
pub trait ObjectCodec: Send + Sync {
  /// Encodes an opaque object into a prefix buffer and extra buffers.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::ObjectEncode`] when the object cannot be encoded.
  fn encode(&self, object: &SharedOpaque) -> Result<(Bytes, Vec<Bytes>), CodecError>;

  /// Reconstructs an opaque object from its prefix and extra buffers.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::ObjectDecode`] when the payload cannot be decoded.
  fn decode(&self, prefix: &[u8], extras: &[Bytes]) -> Result<SharedOpaque, CodecError>;
}

type EncodeFn = Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Result<(Bytes, Vec<Bytes>), CodecError> + Send + Sync>;
type DecodeFn = Arc<dyn Fn(&[u8], &[Bytes]) -> Result<SharedOpaque, CodecError> + Send + Sync>;

struct TaggedEncoder {
  tag:    String,
  encode: EncodeFn,
}

/// Default [`ObjectCodec`]: a tag-routed table of per-type functions.
///
/// The prefix encoding is self-describing: a little-endian length-prefixed
/// tag followed by the registered encoder's own payload. Applications
/// register every opaque type they intend to shuffle.
pub struct TaggedObjectCodec {
  encoders: RwLock<HashMap<TypeId, TaggedEncoder>>,
  decoders: RwLock<HashMap<String, DecodeFn>>,
}

impl TaggedObjectCodec {
  /// Creates an empty codec with no registered types.
  #[must_use]
  pub fn new() -> Self {
    Self { encoders: RwLock::new(HashMap::new()), decoders: RwLock::new(HashMap::new()) }
  }

  /// Registers encode/decode functions for `T` under a stable tag.
  ///
  /// Re-registering a type or tag replaces the previous functions.
  pub fn register<T, E, D>(&self, tag: impl Into<String>, encode: E, decode: D)
  where
    T: OpaqueObject + 'static,
    E: Fn(&T) -> Result<(Bytes, Vec<Bytes>), CodecError> + Send + Sync + 'static,
    D: Fn(&[u8], &[Bytes]) -> Result<T, CodecError> + Send + Sync + 'static, {
    let tag = tag.into();
    let encode_tag = tag.clone();
    let encode_fn: EncodeFn = Arc::new(move |any| {
      let object = any
        .downcast_ref::<T>()
        .ok_or_else(|| CodecError::ObjectEncode(format!("tag '{encode_tag}' bound to a different type")))?;
      encode(object)
    });
    let decode_fn: DecodeFn = Arc::new(move |prefix, extras| {
      decode(prefix, extras).map(|object| Arc::new(object) as SharedOpaque)
    });
    self.encoders.write().insert(TypeId::of::<T>(), TaggedEncoder { tag: tag.clone(), encode: encode_fn });
    self.decoders.write().insert(tag, decode_fn);
  }

  /// Returns `true` when `type_id` has a registered encoder.
  #[must_use]
  pub fn is_registered(&self, type_id: TypeId) -> bool {
    self.encoders.read().contains_key(&type_id)
  }
}

impl Default for TaggedObjectCodec {
  fn default() -> Self {
    Self::new()
  }
}

impl ObjectCodec for TaggedObjectCodec {
  fn encode(&self, object: &SharedOpaque) -> Result<(Bytes, Vec<Bytes>), CodecError> {
    let any = object.as_any();
    let encoders = self.encoders.read();
    let Some(entry) = encoders.get(&any.type_id()) else {
      return Err(CodecError::ObjectEncode(format!("no opaque encoder registered for {object:?}")));
    };
    let (payload, extras) = (entry.encode)(any)?;
    let mut prefix = BytesMut::with_capacity(4 + entry.tag.len() + payload.len());
    prefix.put_u32_le(entry.tag.len() as u32);
    prefix.put_slice(entry.tag.as_bytes());
    prefix.put_slice(&payload);
    Ok((prefix.freeze(), extras))
  }

  fn decode(&self, prefix: &[u8], extras: &[Bytes]) -> Result<SharedOpaque, CodecError> {
    if prefix.len() < 4 {
      return Err(CodecError::ObjectDecode("truncated prefix".into()));
    }
    let tag_len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
    let rest = &prefix[4..];
    if rest.len() < tag_len {
      return Err(CodecError::ObjectDecode("truncated tag".into()));
    }
    let tag = core::str::from_utf8(&rest[..tag_len])
      .map_err(|_| CodecError::ObjectDecode("tag is not valid utf-8".into()))?;
    let decoder = self
      .decoders
      .read()
      .get(tag)
      .cloned()
      .ok_or_else(|| CodecError::ObjectDecode(format!("unknown opaque tag '{tag}'")))?;
    decoder(&rest[tag_len..], extras)
  }
}
