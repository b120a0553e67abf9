use std::ops::{Add, Neg, Sub};

use super::{Line, Point, Vector};
use crate::Error;

/// Orientation tag of a segment.
///
/// A closed segment bounds area: counter-clockwise rings are solids,
/// clockwise rings are holes. Anything that does not close (or closes
/// with fewer than three distinct vertices) is `Open` and carries no
/// area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
  Solid,
  Hole,
  Open,
}

/// A polyline of one or more connected lines.
///
/// Closed segments are normalized on construction: the vertex list is
/// rotated so the lexicographically smallest vertex sits at index 0
/// (and again at the end), and the orientation tag is computed from the
/// turn at that vertex. The vertex list is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
  points: Vec<Point>,
  kind: Kind,
}

impl Segment {
  pub fn new(points: Vec<Point>) -> Result<Segment, Error> {
    if points.is_empty() {
      return Err(Error::InsufficientVertices);
    }
    Ok(Segment::from_path(points))
  }

  /// Build a segment and force its orientation: reverse the path when
  /// the computed tag contradicts the requested one. Open segments are
  /// left alone.
  pub fn with_hole(points: Vec<Point>, hole: bool) -> Result<Segment, Error> {
    let seg = Segment::new(points)?;
    let wanted = if hole { Kind::Hole } else { Kind::Solid };
    if seg.kind == Kind::Open || seg.kind == wanted {
      return Ok(seg);
    }
    let mut points = seg.points;
    points.reverse();
    Ok(Segment::from_path(points))
  }

  /// Build a segment from consecutive lines; each line must start where
  /// the previous one ended.
  pub fn from_lines(lines: &[Line]) -> Result<Segment, Error> {
    let first = lines.first().ok_or(Error::InsufficientVertices)?;
    let mut points = vec![first.0[0], first.0[1]];
    for line in &lines[1..] {
      if line.0[0] != points[points.len() - 1] {
        return Err(Error::DisconnectedLines);
      }
      points.push(line.0[1]);
    }
    Ok(Segment::from_path(points))
  }

  pub(crate) fn from_path(mut points: Vec<Point>) -> Segment {
    debug_assert!(!points.is_empty());
    let kind = classify(&mut points);
    Segment { points, kind }
  }

  pub fn kind(&self) -> Kind {
    self.kind
  }

  pub fn is_closed(&self) -> bool {
    self.kind != Kind::Open
  }

  pub fn points(&self) -> &[Point] {
    &self.points
  }

  /// Number of lines in the segment.
  pub fn line_count(&self) -> usize {
    self.points.len() - 1
  }

  pub fn line(&self, idx: usize) -> Line {
    Line::new(self.points[idx], self.points[idx + 1])
  }

  pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
    self.points.windows(2).map(|w| Line::new(w[0], w[1]))
  }

  pub fn scale(&self, c: f64, about: &Point) -> Segment {
    self.map_points(|p| *about + (p - *about) * c)
  }

  pub fn rotate(&self, degrees: f64, about: &Point) -> Segment {
    self.map_points(|p| p.rotate(degrees, about))
  }

  /// Reflect across the y axis. The path is reversed as well, so a
  /// solid mirrors to a solid.
  pub fn mirror(&self) -> Segment {
    Segment::from_path(
      self
        .points
        .iter()
        .rev()
        .map(|p| Point::new([-p.array[0], p.array[1]]))
        .collect(),
    )
  }

  fn map_points<F>(&self, f: F) -> Segment
  where
    F: Fn(Point) -> Point,
  {
    Segment::from_path(self.points.iter().copied().map(f).collect())
  }

  /// Winding-number containment test.
  ///
  /// Vertices count as contained. The answer is undefined for points on
  /// an edge interior; the nesting analysis never asks about those.
  pub fn contains(&self, p: &Point) -> bool {
    if self.points.contains(p) {
      return true;
    }
    let mut total = 0.0;
    for line in self.lines() {
      let a = (line.0[0] - *p).direction();
      let b = (line.0[1] - *p).direction();
      total += (b - a + 180.0).rem_euclid(360.0) - 180.0;
    }
    let winding = (total / 360.0).round();
    debug_assert!(
      (total - winding * 360.0).abs() < 1.0,
      "winding total {total} not near a multiple of 360; point on edge?"
    );
    debug_assert!(winding.abs() <= 1.0);
    winding != 0.0
  }

  /// Displace every vertex by `c` grid units along its angle bisector,
  /// outward for positive `c` on a solid.
  ///
  /// The result can self-intersect when shrinking pinches the shape; the
  /// part-level offset runs a union pass afterwards to heal that. Open
  /// segments come back unchanged.
  pub fn offset(&self, c: f64) -> Segment {
    if self.kind == Kind::Open {
      return self.clone();
    }
    let pts = &self.points;
    let n = pts.len();
    let mut result: Vec<Point> = Vec::with_capacity(n);
    let mut last = pts[n - 2];
    for i in 0..n - 1 {
      let point = pts[i];
      let mut v_to = point - last;
      let mut v_from = pts[i + 1] - point;
      let to_len = v_to.length();
      let from_len = v_from.length();
      // Stretch the shorter leg so the bisector is symmetric regardless
      // of edge length.
      if to_len > from_len && from_len > 0.0 {
        v_from = v_from * (to_len / from_len);
      } else if from_len > to_len && to_len > 0.0 {
        v_to = v_to * (from_len / to_len);
      }
      let v_offset = v_from - v_to;
      if v_offset.is_zero() {
        // Straight-through vertex: displace perpendicular to the edge.
        let perp = Vector::new([v_from.0[1], -v_from.0[0]]);
        let len = perp.length();
        if len == 0.0 {
          result.push(point);
        } else {
          result.push(point + perp * (c / len));
        }
      } else {
        let mut factor = c / v_offset.length();
        let turn = (v_from.direction() - v_to.direction()).rem_euclid(360.0);
        let alpha = (turn - 180.0) / 2.0;
        let sin_alpha = alpha.to_radians().sin();
        if sin_alpha != 0.0 {
          factor /= sin_alpha;
        }
        result.push(point + v_offset * factor);
      }
      last = point;
    }
    let closing = result[0];
    result.push(closing);
    Segment::from_path(result)
  }
}

// Compute the orientation tag; closed paths are rotated so the
// lexicographically smallest vertex comes first.
fn classify(points: &mut Vec<Point>) -> Kind {
  let n = points.len();
  if n < 4 || points[0] != points[n - 1] {
    return Kind::Open;
  }
  let idx = points[..n - 1]
    .iter()
    .enumerate()
    .min_by_key(|&(_, p)| *p)
    .map(|(i, _)| i)
    .unwrap_or(0);
  if idx != 0 {
    points.pop();
    points.rotate_left(idx);
    let first = points[0];
    points.push(first);
  }
  let v1 = points[1] - points[0];
  let v2 = points[n - 2] - points[n - 1];
  if v1.direction() < v2.direction() {
    Kind::Solid
  } else {
    Kind::Hole
  }
}

impl Neg for &Segment {
  type Output = Segment;
  fn neg(self) -> Segment {
    Segment::from_path(self.points.iter().rev().copied().collect())
  }
}

impl Neg for Segment {
  type Output = Segment;
  fn neg(self) -> Segment {
    -&self
  }
}

impl Add<Vector> for &Segment {
  type Output = Segment;
  fn add(self, other: Vector) -> Segment {
    self.map_points(|p| p + other)
  }
}

impl Add<Vector> for Segment {
  type Output = Segment;
  fn add(self, other: Vector) -> Segment {
    &self + other
  }
}

impl Sub<Vector> for &Segment {
  type Output = Segment;
  fn sub(self, other: Vector) -> Segment {
    self.map_points(|p| p - other)
  }
}

impl Sub<Vector> for Segment {
  type Output = Segment;
  fn sub(self, other: Vector) -> Segment {
    &self - other
  }
}
