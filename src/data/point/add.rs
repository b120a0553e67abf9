use std::ops::Add;

use super::Point;
use super::Vector;

// point + vector = point
impl Add<Vector> for Point {
  type Output = Point;

  fn add(self, other: Vector) -> Self::Output {
    Point::new([self.array[0] + other.0[0], self.array[1] + other.0[1]])
  }
}

impl<'a, 'b> Add<&'b Vector> for &'a Point {
  type Output = Point;

  fn add(self, other: &Vector) -> Self::Output {
    Point::new([self.array[0] + other.0[0], self.array[1] + other.0[1]])
  }
}
