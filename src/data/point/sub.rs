use std::ops::Sub;

use super::Point;
use super::Vector;

// point - point = vector
impl Sub<Point> for Point {
  type Output = Vector;

  fn sub(self, other: Point) -> Self::Output {
    Vector([self.array[0] - other.array[0], self.array[1] - other.array[1]])
  }
}

impl<'a, 'b> Sub<&'a Point> for &'b Point {
  type Output = Vector;

  fn sub(self, other: &Point) -> Self::Output {
    Vector([self.array[0] - other.array[0], self.array[1] - other.array[1]])
  }
}

// point - vector = point
impl Sub<Vector> for Point {
  type Output = Point;

  fn sub(self, other: Vector) -> Self::Output {
    Point::new([self.array[0] - other.0[0], self.array[1] - other.0[1]])
  }
}

impl<'a, 'b> Sub<&'a Vector> for &'b Point {
  type Output = Point;

  fn sub(self, other: &Vector) -> Self::Output {
    Point::new([self.array[0] - other.0[0], self.array[1] - other.0[1]])
  }
}
