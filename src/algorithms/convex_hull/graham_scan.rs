use std::cmp::Ordering;

use crate::data::{Orientation, Point};
use crate::Error;

// https://en.wikipedia.org/wiki/Graham_scan

/// O(n log n) convex hull over a set of grid points.
///
/// Returns the hull vertices in counter-clockwise order, without a
/// closing duplicate. Duplicate input points are welcome; fewer than
/// three distinct non-collinear points is an error.
pub fn convex_hull(mut pts: Vec<Point>) -> Result<Vec<Point>, Error> {
  pts.sort_unstable();
  pts.dedup();
  if pts.len() < 3 {
    return Err(Error::InsufficientVertices);
  }
  let smallest = smallest_point(&pts);
  pts.sort_unstable_by(|a, b| {
    ccw_cmp_around(&smallest, a, b).then_with(|| smallest.cmp_distance_to(a, b))
  });
  let mut known_good = 2;
  let mut at = 2;
  while at < pts.len() {
    if at != known_good {
      pts.swap(at, known_good);
    }
    let p1 = &pts[known_good];
    let p2 = &pts[known_good - 1];
    let p3 = &pts[known_good - 2];
    match Point::orient(p3, p2, p1) {
      Orientation::CounterClockWise => {
        at += 1;
        known_good += 1;
      }
      Orientation::ClockWise | Orientation::CoLinear => {
        pts.swap(at, known_good - 1);
        at += 1;
      }
    }
  }
  pts.truncate(known_good);
  if pts.len() < 3 {
    return Err(Error::InsufficientVertices);
  }
  Ok(pts)
}

// Lowest point, leftmost on ties. Every other point is in the upper
// half-plane around it, so orientation alone sorts by angle.
fn smallest_point(pts: &[Point]) -> Point {
  *pts
    .iter()
    .min_by(|a, b| {
      a.y_coord()
        .cmp(&b.y_coord())
        .then_with(|| a.x_coord().cmp(&b.x_coord()))
    })
    .expect("convex_hull rejects empty input")
}

fn ccw_cmp_around(origin: &Point, a: &Point, b: &Point) -> Ordering {
  if a == b {
    return Ordering::Equal;
  }
  if a == origin {
    return Ordering::Less;
  }
  if b == origin {
    return Ordering::Greater;
  }
  match Point::orient(origin, a, b) {
    Orientation::CounterClockWise => Ordering::Less,
    Orientation::ClockWise => Ordering::Greater,
    Orientation::CoLinear => Ordering::Equal,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use claims::{assert_err, assert_ok};

  fn pt(x: i64, y: i64) -> Point {
    Point::new([x, y])
  }

  #[test]
  fn unit_1() {
    let input = vec![pt(0, 0), pt(2, 0), pt(2, 2), pt(1, 1), pt(0, 2)];
    let hull = assert_ok!(convex_hull(input));
    assert_eq!(hull, vec![pt(0, 0), pt(2, 0), pt(2, 2), pt(0, 2)]);
  }

  #[test]
  fn unit_2() {
    // Collinear edge points are dropped.
    let input = vec![
      pt(0, 0),
      pt(1, 0),
      pt(2, 0),
      pt(2, 1),
      pt(2, 2),
      pt(1, 2),
      pt(0, 2),
      pt(0, 1),
    ];
    let hull = assert_ok!(convex_hull(input));
    assert_eq!(hull, vec![pt(0, 0), pt(2, 0), pt(2, 2), pt(0, 2)]);
  }

  #[test]
  fn hull_is_ccw() {
    let input = vec![pt(3, -1), pt(0, 4), pt(-2, 1), pt(1, 1), pt(2, 3)];
    let hull = assert_ok!(convex_hull(input));
    for i in 0..hull.len() {
      let p1 = &hull[i];
      let p2 = &hull[(i + 1) % hull.len()];
      let p3 = &hull[(i + 2) % hull.len()];
      assert_eq!(Point::orient(p1, p2, p3), Orientation::CounterClockWise);
    }
  }

  #[test]
  fn duplicates_are_harmless() {
    let input = vec![pt(0, 0), pt(0, 0), pt(2, 0), pt(2, 2), pt(2, 2)];
    let hull = assert_ok!(convex_hull(input));
    assert_eq!(hull.len(), 3);
  }

  #[test]
  fn degenerate_input() {
    assert_err!(convex_hull(vec![]));
    assert_err!(convex_hull(vec![pt(0, 0), pt(1, 1)]));
    // All collinear.
    assert_err!(convex_hull(vec![pt(0, 0), pt(1, 1), pt(2, 2), pt(3, 3)]));
  }
}
