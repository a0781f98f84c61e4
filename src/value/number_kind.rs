//! Numeric type descriptor primitive.

use core::fmt;

/// Machine numeric type named by a compute framework when it schedules
/// array work; travels as a primitive value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum NumberKind {
  Bool,
  I8,
  I16,
  I32,
  I64,
  U8,
  U16,
  U32,
  U64,
  F32,
  F64,
  Complex64,
  Complex128,
}

impl NumberKind {
  /// Returns the stable wire name of the descriptor.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      | Self::Bool => "bool",
      | Self::I8 => "i8",
      | Self::I16 => "i16",
      | Self::I32 => "i32",
      | Self::I64 => "i64",
      | Self::U8 => "u8",
      | Self::U16 => "u16",
      | Self::U32 => "u32",
      | Self::U64 => "u64",
      | Self::F32 => "f32",
      | Self::F64 => "f64",
      | Self::Complex64 => "c64",
      | Self::Complex128 => "c128",
    }
  }

  /// Resolves a wire name back into a descriptor.
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    [
      Self::Bool,
      Self::I8,
      Self::I16,
      Self::I32,
      Self::I64,
      Self::U8,
      Self::U16,
      Self::U32,
      Self::U64,
      Self::F32,
      Self::F64,
      Self::Complex64,
      Self::Complex128,
    ]
    .into_iter()
    .find(|kind| kind.name() == name)
  }
}

impl fmt::Display for NumberKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
