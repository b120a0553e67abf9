use std::ops::Sub;

use super::Vector;

impl Sub<Vector> for Vector {
  type Output = Vector;

  fn sub(self, other: Vector) -> Self::Output {
    Vector([self.0[0] - other.0[0], self.0[1] - other.0[1]])
  }
}

impl<'a, 'b> Sub<&'b Vector> for &'a Vector {
  type Output = Vector;

  fn sub(self, other: &Vector) -> Self::Output {
    Vector([self.0[0] - other.0[0], self.0[1] - other.0[1]])
  }
}
