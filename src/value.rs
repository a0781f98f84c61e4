//! Runtime value model serialized by the engine.

#[cfg(test)]
mod tests;

/// Complex number primitive.
pub mod complex;
/// Shared list container.
pub mod list_value;
/// Shared insertion-ordered mapping container.
pub mod map_value;
/// Named builtin-function primitive and its process-wide table.
pub mod native_fn;
/// Numeric type descriptor primitive.
pub mod number_kind;
/// Interned named-tuple descriptors.
pub mod record_type;
/// Fixed-shape tuple container.
pub mod tuple_value;

use core::any::TypeId;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

pub use complex::Complex64;
pub use list_value::ListValue;
pub use map_value::MapValue;
pub use native_fn::{NativeFn, NativeFnPtr};
pub use number_kind::NumberKind;
pub use record_type::RecordType;
pub use tuple_value::TupleValue;

use crate::obj_id::ObjId;
use crate::opaque::{OpaqueObject, SharedOpaque};
use crate::placeholder::Placeholder;

/// Any value the engine can serialize.
///
/// Primitive arms carry their payload inline and have no identity; the
/// remaining arms are shared handles whose address provides the identity
/// used for deduplication.
#[derive(Clone, Debug)]
pub enum Value {
  /// Absent value.
  Null,
  /// Boolean primitive.
  Bool(bool),
  /// Signed integer primitive.
  Int(i64),
  /// Floating point primitive.
  Float(f64),
  /// Complex number primitive.
  Complex(Complex64),
  /// Calendar date primitive.
  Date(NaiveDate),
  /// UTC timestamp primitive.
  DateTime(DateTime<Utc>),
  /// Signed duration primitive.
  Duration(TimeDelta),
  /// Numeric type descriptor primitive.
  NumberKind(NumberKind),
  /// Named builtin-function primitive.
  NativeFn(NativeFn),
  /// Byte payload carried zero-copy.
  Bytes(Bytes),
  /// Unicode text.
  Text(Arc<str>),
  /// Plain or named tuple.
  Tuple(Arc<TupleValue>),
  /// Growable list.
  List(Arc<ListValue>),
  /// Insertion-ordered mapping.
  Map(Arc<MapValue>),
  /// User-defined object handled by the opaque fallback.
  Opaque(SharedOpaque),
  /// Unresolved shared-reference stand-in.
  Placeholder(Arc<Placeholder>),
}

impl Value {
  /// Creates a text value.
  #[must_use]
  pub fn text(text: impl Into<Arc<str>>) -> Self {
    Self::Text(text.into())
  }

  /// Creates a byte payload value.
  #[must_use]
  pub fn bytes(bytes: impl Into<Bytes>) -> Self {
    Self::Bytes(bytes.into())
  }

  /// Creates a shared list value.
  #[must_use]
  pub fn list(items: Vec<Self>) -> Self {
    Self::List(ListValue::shared(items))
  }

  /// Creates a shared map value from key/value pairs.
  #[must_use]
  pub fn map<I>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (Self, Self)>, {
    Self::Map(Arc::new(MapValue::from_pairs(pairs)))
  }

  /// Creates a plain tuple value.
  #[must_use]
  pub fn tuple(items: Vec<Self>) -> Self {
    Self::Tuple(TupleValue::shared(items))
  }

  /// Creates a named tuple value.
  #[must_use]
  pub fn record(record: Arc<RecordType>, items: Vec<Self>) -> Self {
    Self::Tuple(TupleValue::shared_record(record, items))
  }

  /// Wraps a user object for the opaque fallback.
  #[must_use]
  pub fn opaque(object: impl OpaqueObject + 'static) -> Self {
    Self::Opaque(Arc::new(object))
  }

  /// Returns `true` for arms in the primitive set.
  #[must_use]
  pub const fn is_primitive(&self) -> bool {
    matches!(
      self,
      Self::Null
        | Self::Bool(_)
        | Self::Int(_)
        | Self::Float(_)
        | Self::Complex(_)
        | Self::Date(_)
        | Self::DateTime(_)
        | Self::Duration(_)
        | Self::NumberKind(_)
        | Self::NativeFn(_)
    )
  }

  /// Returns a short name of the value's shape, for diagnostics.
  #[must_use]
  pub const fn kind_name(&self) -> &'static str {
    match self {
      | Self::Null => "null",
      | Self::Bool(_) => "bool",
      | Self::Int(_) => "int",
      | Self::Float(_) => "float",
      | Self::Complex(_) => "complex",
      | Self::Date(_) => "date",
      | Self::DateTime(_) => "datetime",
      | Self::Duration(_) => "duration",
      | Self::NumberKind(_) => "number-kind",
      | Self::NativeFn(_) => "native-fn",
      | Self::Bytes(_) => "bytes",
      | Self::Text(_) => "text",
      | Self::Tuple(_) => "tuple",
      | Self::List(_) => "list",
      | Self::Map(_) => "map",
      | Self::Opaque(_) => "opaque",
      | Self::Placeholder(_) => "placeholder",
    }
  }

  /// Returns the truncated identity used for deduplication.
  ///
  /// Primitives report [`ObjId::NONE`]; shared arms truncate the address
  /// behind their handle; placeholders report the identity they stand in
  /// for.
  #[must_use]
  pub fn obj_id(&self) -> ObjId {
    match self {
      | Self::Null
      | Self::Bool(_)
      | Self::Int(_)
      | Self::Float(_)
      | Self::Complex(_)
      | Self::Date(_)
      | Self::DateTime(_)
      | Self::Duration(_)
      | Self::NumberKind(_)
      | Self::NativeFn(_) => ObjId::NONE,
      | Self::Bytes(bytes) => ObjId::from_addr(bytes.as_ptr() as usize),
      | Self::Text(text) => ObjId::from_addr(Arc::as_ptr(text).cast::<u8>() as usize),
      | Self::Tuple(tuple) => ObjId::from_addr(Arc::as_ptr(tuple) as usize),
      | Self::List(list) => ObjId::from_addr(Arc::as_ptr(list) as usize),
      | Self::Map(map) => ObjId::from_addr(Arc::as_ptr(map) as usize),
      | Self::Opaque(object) => ObjId::from_addr(Arc::as_ptr(object).cast::<u8>() as usize),
      | Self::Placeholder(placeholder) => placeholder.id(),
    }
  }

  /// Returns the `TypeId` the dispatcher resolves this value with.
  ///
  /// Builtin arms map to fixed marker types; opaque values expose their
  /// payload's concrete type so user-registered codecs take precedence
  /// over the fallback.
  #[must_use]
  pub fn dispatch_type(&self) -> TypeId {
    match self {
      | Self::Null => TypeId::of::<()>(),
      | Self::Bool(_) => TypeId::of::<bool>(),
      | Self::Int(_) => TypeId::of::<i64>(),
      | Self::Float(_) => TypeId::of::<f64>(),
      | Self::Complex(_) => TypeId::of::<Complex64>(),
      | Self::Date(_) => TypeId::of::<NaiveDate>(),
      | Self::DateTime(_) => TypeId::of::<DateTime<Utc>>(),
      | Self::Duration(_) => TypeId::of::<TimeDelta>(),
      | Self::NumberKind(_) => TypeId::of::<NumberKind>(),
      | Self::NativeFn(_) => TypeId::of::<NativeFn>(),
      | Self::Bytes(_) => TypeId::of::<Bytes>(),
      | Self::Text(_) => TypeId::of::<str>(),
      | Self::Tuple(_) => TypeId::of::<TupleValue>(),
      | Self::List(_) => TypeId::of::<ListValue>(),
      | Self::Map(_) => TypeId::of::<MapValue>(),
      | Self::Opaque(object) => object.as_any().type_id(),
      | Self::Placeholder(_) => TypeId::of::<Placeholder>(),
    }
  }
}

impl PartialEq for Value {
  /// Structural equality with a pointer-identity fast path on shared arms.
  ///
  /// The fast path is what keeps comparison of self-referential values
  /// from diverging; comparing two *distinct* cyclic structures recurses.
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      | (Self::Null, Self::Null) => true,
      | (Self::Bool(a), Self::Bool(b)) => a == b,
      | (Self::Int(a), Self::Int(b)) => a == b,
      | (Self::Float(a), Self::Float(b)) => a == b,
      | (Self::Complex(a), Self::Complex(b)) => a == b,
      | (Self::Date(a), Self::Date(b)) => a == b,
      | (Self::DateTime(a), Self::DateTime(b)) => a == b,
      | (Self::Duration(a), Self::Duration(b)) => a == b,
      | (Self::NumberKind(a), Self::NumberKind(b)) => a == b,
      | (Self::NativeFn(a), Self::NativeFn(b)) => a == b,
      | (Self::Bytes(a), Self::Bytes(b)) => a == b,
      | (Self::Text(a), Self::Text(b)) => Arc::ptr_eq(a, b) || a == b,
      | (Self::Tuple(a), Self::Tuple(b)) => Arc::ptr_eq(a, b) || a == b,
      | (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b) || a == b,
      | (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b) || a == b,
      | (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b) || a.opaque_eq(b.as_ref()),
      | (Self::Placeholder(a), Self::Placeholder(b)) => Arc::ptr_eq(a, b) || a.id() == b.id(),
      | _ => false,
    }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Self::text(value)
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Self::text(value)
  }
}

impl From<Bytes> for Value {
  fn from(value: Bytes) -> Self {
    Self::Bytes(value)
  }
}
