//! SVG serialization.
//!
//! Each part becomes one or more `<path>` elements: a solid and the
//! holes that follow it share a single path, using the even-odd effect
//! of concatenated move-close subpaths. Coordinates are emitted in user
//! units with the y axis negated, so solids drawn counter-clockwise on
//! the grid come out the usual way up on screen.

use std::fs;
use std::io;
use std::path::Path;

use crate::data::{Kind, Part, Segment};
use crate::UNIT;

/// Rendering options. The defaults match the classic output: filled
/// green shapes with black outlines, parts laid out left to right five
/// user units apart.
#[derive(Debug, Clone)]
pub struct SvgOptions {
  /// CSS style applied to every shape path. Empty disables the
  /// attribute.
  pub style: String,
  /// Horizontal gap between parts, in user units.
  pub separation: f64,
}

impl Default for SvgOptions {
  fn default() -> SvgOptions {
    SvgOptions {
      style: "fill:green;stroke:black".to_string(),
      separation: 5.0,
    }
  }
}

impl SvgOptions {
  pub fn style(mut self, style: &str) -> SvgOptions {
    self.style = style.to_string();
    self
  }

  pub fn separation(mut self, separation: f64) -> SvgOptions {
    self.separation = separation;
    self
  }
}

fn units(v: i64) -> f64 {
  v as f64 / UNIT as f64
}

/// SVG path data for one segment, displaced by `offset` grid units.
/// Axis-aligned moves use `H`/`V`, duplicate consecutive points are
/// skipped, and a closed segment ends in `Z`.
pub fn path_data(seg: &Segment, offset: [i64; 2]) -> String {
  let pts = seg.points();
  let mut out = format!(
    "M{},{}",
    units(pts[0].array[0] + offset[0]),
    -units(pts[0].array[1] + offset[1])
  );
  let mut last = pts[0];
  for (i, p) in pts[1..].iter().enumerate() {
    if *p == last {
      continue;
    }
    if *p == pts[0] && i == pts.len() - 2 {
      out.push('Z');
    } else if p.array[0] == last.array[0] {
      out.push_str(&format!("V{}", -units(p.array[1] + offset[1])));
    } else if p.array[1] == last.array[1] {
      out.push_str(&format!("H{}", units(p.array[0] + offset[0])));
    } else {
      out.push_str(&format!(
        "L{},{}",
        units(p.array[0] + offset[0]),
        -units(p.array[1] + offset[1])
      ));
    }
    last = *p;
  }
  out
}

/// Serialize parts side by side into an SVG document.
pub fn svg(parts: &[Part], options: &SvgOptions) -> String {
  svg_with_overlays(parts, &[], options)
}

/// Like [`svg`], with extra parts drawn as unfilled red outlines on
/// top; handy for debugging intermediate geometry.
pub fn svg_with_overlays(parts: &[Part], overlays: &[Part], options: &SvgOptions) -> String {
  let sep = (options.separation * UNIT as f64).round() as i64;
  // Lay the parts out left to right, aligned on their bottom edges.
  let mut total: Option<[i64; 4]> = None;
  let mut offsets: Vec<[i64; 2]> = Vec::with_capacity(parts.len());
  for part in parts {
    let bb = part.bbox_raw().unwrap_or([0, 0, 0, 0]);
    if let Some(t) = &mut total {
      if bb[3] - bb[1] > t[3] - t[1] {
        t[3] = bb[3] - bb[1] + t[1];
      }
      offsets.push([t[2] + sep - bb[0], t[1] - bb[1]]);
      t[2] += sep + (bb[2] - bb[0]);
    } else {
      total = Some(bb);
      offsets.push([0, 0]);
    }
  }
  let t = total.unwrap_or([0, 0, 0, 0]);
  let w = units(t[2] - t[0] + 2 * sep);
  let h = units(t[3] - t[1] + 2 * sep);
  let mut out = format!(
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \
     \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n\
     <svg width='{}mm' height='{}mm' viewBox='{} {} {} {}' \
     xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
     xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
    w,
    h,
    units(t[0] - sep),
    -units(t[3] + sep),
    w,
    h
  );
  let style = if options.style.is_empty() {
    String::new()
  } else {
    format!(" style='{}'", options.style)
  };
  for (part, offset) in parts.iter().zip(offsets) {
    let mut current = String::new();
    for seg in part.segments() {
      if !current.is_empty() && seg.kind() == Kind::Solid {
        out.push_str(&format!("<path d=\"{}\"{}/>\n", current, style));
        current.clear();
      }
      current.push_str(&path_data(seg, offset));
    }
    if !current.is_empty() {
      out.push_str(&format!("<path d=\"{}\"{}/>\n", current, style));
    }
  }
  if !overlays.is_empty() {
    out.push_str("<g style='fill:none;stroke:red'>\n");
    for part in overlays {
      for seg in part.segments() {
        out.push_str(&format!("<path d=\"{}\"/>\n", path_data(seg, [0, 0])));
      }
    }
    out.push_str("</g>\n");
  }
  out.push_str("</svg>\n");
  out
}

/// Render straight to a file.
pub fn svg_to_file<P: AsRef<Path>>(
  path: P,
  parts: &[Part],
  options: &SvgOptions,
) -> io::Result<()> {
  fs::write(path, svg(parts, options))
}
