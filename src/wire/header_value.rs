//! Transport-encodable header primitive.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::error::CodecError;
use crate::value::{Complex64, NativeFn, NumberKind, Value};

/// One element of a header: a primitive, an inlined short string, or a
/// nested sequence. Headers are buffer-free and transport-encodable.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HeaderValue {
  /// Absent value or propagated-slot marker inside residual sequences.
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
  /// Signed duration primitive, canonicalized to non-negative nanos.
  Duration {
    /// Whole seconds; may be negative.
    secs:  i64,
    /// Nanoseconds in `0..1_000_000_000`.
    nanos: u32,
  },
  /// Numeric type descriptor primitive.
  NumberKind(NumberKind),
  /// Builtin-function reference, carried by name.
  NativeFn(String),
  /// Inlined short text.
  Str(String),
  /// Inlined short byte string.
  Bytes(Vec<u8>),
  /// Nested sequence.
  Seq(Vec<HeaderValue>),
}

impl HeaderValue {
  /// Converts a primitive value into its header form.
  ///
  /// Returns `None` for non-primitive values.
  #[must_use]
  pub fn from_primitive(value: &Value) -> Option<Self> {
    match value {
      | Value::Null => Some(Self::Null),
      | Value::Bool(flag) => Some(Self::Bool(*flag)),
      | Value::Int(number) => Some(Self::Int(*number)),
      | Value::Float(number) => Some(Self::Float(*number)),
      | Value::Complex(complex) => Some(Self::Complex(*complex)),
      | Value::Date(date) => Some(Self::Date(*date)),
      | Value::DateTime(timestamp) => Some(Self::DateTime(*timestamp)),
      | Value::Duration(delta) => {
        let (secs, nanos) = split_delta(*delta);
        Some(Self::Duration { secs, nanos })
      },
      | Value::NumberKind(kind) => Some(Self::NumberKind(*kind)),
      | Value::NativeFn(function) => Some(Self::NativeFn(function.name().to_string())),
      | _ => None,
    }
  }

  /// Converts a header element back into a value.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::UnknownNativeFn`] for an unregistered function
  /// name and [`CodecError::MalformedHeader`] for shapes that do not stand
  /// alone as values (nested sequences, out-of-range durations).
  pub fn to_value(&self) -> Result<Value, CodecError> {
    match self {
      | Self::Null => Ok(Value::Null),
      | Self::Bool(flag) => Ok(Value::Bool(*flag)),
      | Self::Int(number) => Ok(Value::Int(*number)),
      | Self::Float(number) => Ok(Value::Float(*number)),
      | Self::Complex(complex) => Ok(Value::Complex(*complex)),
      | Self::Date(date) => Ok(Value::Date(*date)),
      | Self::DateTime(timestamp) => Ok(Value::DateTime(*timestamp)),
      | Self::Duration { secs, nanos } => TimeDelta::new(*secs, *nanos)
        .map(Value::Duration)
        .ok_or_else(|| CodecError::malformed("duration out of range")),
      | Self::NumberKind(kind) => Ok(Value::NumberKind(*kind)),
      | Self::NativeFn(name) => NativeFn::resolve(name)
        .map(Value::NativeFn)
        .ok_or_else(|| CodecError::UnknownNativeFn(name.clone())),
      | Self::Str(text) => Ok(Value::text(text.as_str())),
      | Self::Bytes(bytes) => Ok(Value::bytes(bytes.clone())),
      | Self::Seq(_) => Err(CodecError::malformed("sequence is not a standalone value")),
    }
  }

  /// Reads the element as an integer.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::MalformedHeader`] for any other shape.
  pub fn as_int(&self) -> Result<i64, CodecError> {
    match self {
      | Self::Int(number) => Ok(*number),
      | _ => Err(CodecError::malformed("expected an integer header element")),
    }
  }

  /// Reads the element as a string slice.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::MalformedHeader`] for any other shape.
  pub fn as_str(&self) -> Result<&str, CodecError> {
    match self {
      | Self::Str(text) => Ok(text),
      | _ => Err(CodecError::malformed("expected a string header element")),
    }
  }

  /// Reads the element as a nested sequence.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::MalformedHeader`] for any other shape.
  pub fn as_seq(&self) -> Result<&[HeaderValue], CodecError> {
    match self {
      | Self::Seq(elements) => Ok(elements),
      | _ => Err(CodecError::malformed("expected a sequence header element")),
    }
  }
}

/// Splits a delta into whole seconds plus non-negative subsecond nanos.
fn split_delta(delta: TimeDelta) -> (i64, u32) {
  let secs = delta.num_seconds();
  let nanos = delta.subsec_nanos();
  if nanos < 0 {
    (secs - 1, (nanos + 1_000_000_000) as u32)
  } else {
    (secs, nanos as u32)
  }
}
