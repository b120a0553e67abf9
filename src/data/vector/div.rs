use std::ops::Div;

use super::Vector;

impl Div<f64> for Vector {
  type Output = Vector;

  fn div(self, other: f64) -> Self::Output {
    Vector([
      (self.0[0] as f64 / other).round() as i64,
      (self.0[1] as f64 / other).round() as i64,
    ])
  }
}

impl Div<f64> for &Vector {
  type Output = Vector;

  fn div(self, other: f64) -> Self::Output {
    *self / other
  }
}
