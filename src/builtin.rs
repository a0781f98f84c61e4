//! Builtin codec implementations installed by the bootstrap.

/// Byte payload codec.
pub mod bytes_codec;
pub(crate) mod collection;
/// List codec.
pub mod list_codec;
/// Mapping codec.
pub mod map_codec;
/// Opaque fallback codec.
pub mod opaque_codec;
/// Placeholder codec.
pub mod placeholder_codec;
/// Primitive codec.
pub mod primitive_codec;
/// Text codec.
pub mod text_codec;
/// Tuple codec.
pub mod tuple_codec;

use core::any::TypeId;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

pub use bytes_codec::BytesCodec;
pub use list_codec::ListCodec;
pub use map_codec::MapCodec;
pub use opaque_codec::OpaqueCodec;
pub use placeholder_codec::PlaceholderCodec;
pub use primitive_codec::PrimitiveCodec;
pub use text_codec::TextCodec;
pub use tuple_codec::TupleCodec;

use crate::codec_id::CodecId;
use crate::opaque::ObjectCodec;
use crate::placeholder::Placeholder;
use crate::registry::CodecRegistry;
use crate::value::{Complex64, ListValue, MapValue, NativeFn, NumberKind, TupleValue};

/// Identifier of the opaque fallback codec.
pub const OPAQUE_ID: CodecId = CodecId::from_raw(0);
/// Identifier of the primitive codec.
pub const PRIMITIVE_ID: CodecId = CodecId::from_raw(1);
/// Identifier of the bytes codec.
pub const BYTES_ID: CodecId = CodecId::from_raw(2);
/// Identifier of the text codec.
pub const TEXT_ID: CodecId = CodecId::from_raw(3);
/// Identifier of the tuple codec.
pub const TUPLE_ID: CodecId = CodecId::from_raw(4);
/// Identifier of the list codec.
pub const LIST_ID: CodecId = CodecId::from_raw(5);
/// Identifier of the map codec.
pub const MAP_ID: CodecId = CodecId::from_raw(6);
/// Identifier of the placeholder codec.
pub const PLACEHOLDER_ID: CodecId = CodecId::from_raw(7);

/// Installs the builtin codecs and their type bindings.
///
/// The opaque fallback wraps the provided external object codec; it stays
/// the registry fallback, so every otherwise-unbound type routes to it.
pub fn register_defaults(registry: &CodecRegistry, object_codec: Arc<dyn ObjectCodec>) {
  registry.register_builtin(Arc::new(OpaqueCodec::new(object_codec)));
  registry.register_builtin(Arc::new(PrimitiveCodec));
  registry.register_builtin(Arc::new(BytesCodec));
  registry.register_builtin(Arc::new(TextCodec));
  registry.register_builtin(Arc::new(TupleCodec));
  registry.register_builtin(Arc::new(ListCodec));
  registry.register_builtin(Arc::new(MapCodec));
  registry.register_builtin(Arc::new(PlaceholderCodec));

  for marker in [
    TypeId::of::<()>(),
    TypeId::of::<bool>(),
    TypeId::of::<i64>(),
    TypeId::of::<f64>(),
    TypeId::of::<Complex64>(),
    TypeId::of::<NaiveDate>(),
    TypeId::of::<DateTime<Utc>>(),
    TypeId::of::<TimeDelta>(),
    TypeId::of::<NumberKind>(),
    TypeId::of::<NativeFn>(),
  ] {
    registry.bind_unchecked(marker, PRIMITIVE_ID);
  }
  registry.bind_unchecked(TypeId::of::<Bytes>(), BYTES_ID);
  registry.bind_unchecked(TypeId::of::<str>(), TEXT_ID);
  registry.bind_unchecked(TypeId::of::<TupleValue>(), TUPLE_ID);
  registry.bind_unchecked(TypeId::of::<ListValue>(), LIST_ID);
  registry.bind_unchecked(TypeId::of::<MapValue>(), MAP_ID);
  registry.bind_unchecked(TypeId::of::<Placeholder>(), PLACEHOLDER_ID);
}
