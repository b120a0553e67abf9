use std::ops::{Add, Index, Mul, Neg, Sub};
use std::str::FromStr;

use super::{Point, Segment, Vector};
use crate::algorithms::boolean::combine;
use crate::algorithms::convex_hull::graham_scan;
use crate::{Error, UNIT};

/// An unordered collection of segments; the public entry for boolean
/// combination, transforms and offsetting.
///
/// `+` is union, `-` difference, `*` intersection and unary `-` flips
/// every segment's orientation. Adding or subtracting a [`Vector`]
/// translates. All operations allocate a fresh part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Part {
  segments: Vec<Segment>,
}

/// Vertical alignment selector for [`Part::align`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
  Top,
  Center,
  Bottom,
}

/// Horizontal alignment selector for [`Part::align`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
  Left,
  Center,
  Right,
}

impl FromStr for VAlign {
  type Err = Error;
  fn from_str(s: &str) -> Result<VAlign, Error> {
    match s {
      "t" => Ok(VAlign::Top),
      "c" => Ok(VAlign::Center),
      "b" => Ok(VAlign::Bottom),
      _ => Err(Error::InvalidAlignment),
    }
  }
}

impl FromStr for HAlign {
  type Err = Error;
  fn from_str(s: &str) -> Result<HAlign, Error> {
    match s {
      "l" => Ok(HAlign::Left),
      "c" => Ok(HAlign::Center),
      "r" => Ok(HAlign::Right),
      _ => Err(Error::InvalidAlignment),
    }
  }
}

impl Part {
  pub fn new(segments: Vec<Segment>) -> Part {
    Part { segments }
  }

  pub fn empty() -> Part {
    Part::default()
  }

  pub fn segments(&self) -> &[Segment] {
    &self.segments
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  pub fn scale(&self, c: f64, about: &Point) -> Part {
    self.map_segments(|s| s.scale(c, about))
  }

  pub fn rotate(&self, degrees: f64, about: &Point) -> Part {
    self.map_segments(|s| s.rotate(degrees, about))
  }

  pub fn mirror(&self) -> Part {
    self.map_segments(Segment::mirror)
  }

  fn map_segments<F>(&self, f: F) -> Part
  where
    F: Fn(&Segment) -> Segment,
  {
    Part::new(self.segments.iter().map(f).collect())
  }

  /// Bounding box `[min_x, min_y, max_x, max_y]` in grid units, or
  /// `None` for a part with no points.
  pub fn bbox_raw(&self) -> Option<[i64; 4]> {
    let mut bb: Option<[i64; 4]> = None;
    for seg in &self.segments {
      for p in seg.points() {
        let [x, y] = p.array;
        bb = Some(match bb {
          None => [x, y, x, y],
          Some([x0, y0, x1, y1]) => [x0.min(x), y0.min(y), x1.max(x), y1.max(y)],
        });
      }
    }
    bb
  }

  /// Bounding box in user units.
  pub fn bbox(&self) -> Option<[f64; 4]> {
    self
      .bbox_raw()
      .map(|bb| bb.map(|c| c as f64 / UNIT as f64))
  }

  /// Translate so the bounding box lines up with the requested edge or
  /// center, offset by the box size.
  pub fn align(&self, vert: VAlign, horiz: HAlign) -> Part {
    let Some(bb) = self.bbox_raw() else {
      return self.clone();
    };
    let y = match vert {
      VAlign::Top => bb[3],
      VAlign::Center => 0,
      VAlign::Bottom => bb[1],
    };
    let x = match horiz {
      HAlign::Left => bb[0],
      HAlign::Center => 0,
      HAlign::Right => bb[2],
    };
    let cc = [bb[2] - bb[0], bb[3] - bb[1]];
    self - Vector::new([x - cc[0], y - cc[1]])
  }

  /// Inflate (`c > 0`) or shrink (`c < 0`) by `c` user units.
  ///
  /// Each closed segment is offset along its vertex bisectors, then the
  /// result runs through a union pass so pinched-off geometry comes
  /// back as a well-formed boundary.
  pub fn offset(&self, c: f64) -> Part {
    let grid = c * UNIT as f64;
    let moved = self.map_segments(|s| s.offset(grid));
    combine(&moved, &Part::empty(), 1)
  }

  /// Convex hull over every vertex of the part, as a single solid.
  pub fn hull(&self) -> Result<Part, Error> {
    let pts: Vec<Point> = self
      .segments
      .iter()
      .flat_map(|s| s.points().iter().copied())
      .collect();
    let mut hull = graham_scan::convex_hull(pts)?;
    let first = hull[0];
    hull.push(first);
    Ok(Part::new(vec![Segment::from_path(hull)]))
  }

  /// A solid (or hole, by winding) from a closed point sequence in user
  /// units; an unclosed sequence stays an open polyline.
  pub fn polygon(points: &[(f64, f64)]) -> Result<Part, Error> {
    let pts = points
      .iter()
      .map(|&(x, y)| Point::from_units(x, y))
      .collect();
    Ok(Part::new(vec![Segment::new(pts)?]))
  }

  /// A `w` by `h` solid rectangle centered on the origin.
  pub fn rect(w: f64, h: f64) -> Part {
    let w = w / 2.0;
    let h = h / 2.0;
    Part::new(vec![Segment::from_path(vec![
      Point::from_units(-w, -h),
      Point::from_units(w, -h),
      Point::from_units(w, h),
      Point::from_units(-w, h),
      Point::from_units(-w, -h),
    ])])
  }

  /// A solid `sides`-gon approximating a circle of radius `r` centered
  /// on the origin.
  pub fn circle(r: f64, sides: usize) -> Part {
    let sides = sides.max(3);
    let mut pts: Vec<Point> = (0..sides)
      .map(|i| {
        let angle = i as f64 * std::f64::consts::TAU / sides as f64;
        Point::from_units(r * angle.cos(), r * angle.sin())
      })
      .collect();
    let first = pts[0];
    pts.push(first);
    Part::new(vec![Segment::from_path(pts)])
  }

  /// A single open segment from `a` to `b`; carries no area and passes
  /// through boolean operations unchanged.
  pub fn cut(a: (f64, f64), b: (f64, f64)) -> Part {
    Part::new(vec![Segment::from_path(vec![
      Point::from_units(a.0, a.1),
      Point::from_units(b.0, b.1),
    ])])
  }
}

impl Index<usize> for Part {
  type Output = Segment;
  fn index(&self, idx: usize) -> &Segment {
    self.segments.index(idx)
  }
}

// part + part = union
impl Add<&Part> for &Part {
  type Output = Part;
  fn add(self, other: &Part) -> Part {
    combine(self, other, 1)
  }
}

impl Add<Part> for Part {
  type Output = Part;
  fn add(self, other: Part) -> Part {
    &self + &other
  }
}

// part - part = difference
impl Sub<&Part> for &Part {
  type Output = Part;
  fn sub(self, other: &Part) -> Part {
    self + &-other
  }
}

impl Sub<Part> for Part {
  type Output = Part;
  fn sub(self, other: Part) -> Part {
    &self - &other
  }
}

// part * part = intersection
impl Mul<&Part> for &Part {
  type Output = Part;
  fn mul(self, other: &Part) -> Part {
    combine(self, other, 2)
  }
}

impl Mul<Part> for Part {
  type Output = Part;
  fn mul(self, other: Part) -> Part {
    &self * &other
  }
}

impl Neg for &Part {
  type Output = Part;
  fn neg(self) -> Part {
    self.map_segments(|s| -s)
  }
}

impl Neg for Part {
  type Output = Part;
  fn neg(self) -> Part {
    -&self
  }
}

// part + vector = translation
impl Add<Vector> for &Part {
  type Output = Part;
  fn add(self, other: Vector) -> Part {
    self.map_segments(|s| s + other)
  }
}

impl Add<Vector> for Part {
  type Output = Part;
  fn add(self, other: Vector) -> Part {
    &self + other
  }
}

impl Sub<Vector> for &Part {
  type Output = Part;
  fn sub(self, other: Vector) -> Part {
    self.map_segments(|s| s - other)
  }
}

impl Sub<Vector> for Part {
  type Output = Part;
  fn sub(self, other: Vector) -> Part {
    &self - other
  }
}
