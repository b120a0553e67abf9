use std::ops::Mul;

use super::Vector;

// Scaling rounds back onto the grid.
impl Mul<f64> for Vector {
  type Output = Vector;

  fn mul(self, other: f64) -> Self::Output {
    Vector([
      (self.0[0] as f64 * other).round() as i64,
      (self.0[1] as f64 * other).round() as i64,
    ])
  }
}

impl Mul<f64> for &Vector {
  type Output = Vector;

  fn mul(self, other: f64) -> Self::Output {
    *self * other
  }
}
