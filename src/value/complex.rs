//! Complex number primitive.

use core::fmt;

/// Double-precision complex number carried as a primitive value.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Complex64 {
  /// Real part.
  pub re: f64,
  /// Imaginary part.
  pub im: f64,
}

impl Complex64 {
  /// Creates a complex number from its real and imaginary parts.
  #[must_use]
  pub const fn new(re: f64, im: f64) -> Self {
    Self { re, im }
  }
}

impl fmt::Debug for Complex64 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}+{}i", self.re, self.im)
  }
}
