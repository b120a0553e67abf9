use std::ops::Add;

use super::Vector;

impl Add<Vector> for Vector {
  type Output = Vector;

  fn add(self, other: Vector) -> Self::Output {
    Vector([self.0[0] + other.0[0], self.0[1] + other.0[1]])
  }
}

impl<'a, 'b> Add<&'b Vector> for &'a Vector {
  type Output = Vector;

  fn add(self, other: &Vector) -> Self::Output {
    Vector([self.0[0] + other.0[0], self.0[1] + other.0[1]])
  }
}
