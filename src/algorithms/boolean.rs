//! Boolean combination of two parts.
//!
//! The pipeline: collect every edge of every closed segment, split all
//! pairwise intersections, cancel coincident opposed edges, rebuild
//! faces from the resulting planar graph by angle-sorted traversal,
//! recover the solid/hole containment forest, and keep the faces whose
//! nesting depth matches the requested operation. Open segments skip
//! all of this and ride along unchanged.

use std::collections::BTreeMap;

use log::trace;
use ordered_float::OrderedFloat;

use crate::data::{Kind, Line, Part, Point, Segment};

/// One face of the rebuilt planar subdivision, in its containment tree.
struct Face {
  segment: Segment,
  hole: bool,
  children: Vec<usize>,
}

/// Combine two parts. `min_stack` selects the operation: 1 keeps the
/// union's surface, 2 keeps the intersection's. Difference is union
/// with the negated subtrahend and has no code path of its own.
pub(crate) fn combine(a: &Part, b: &Part, min_stack: i32) -> Part {
  let mut lines = collect_edges(a, b);
  let collected = lines.len();
  split_all(&mut lines);
  trace!("split {} edges into {}", collected, lines.len());
  let lines = cancel_opposed(lines);
  trace!("{} edges after cancelling opposed pairs", lines.len());
  let (faces, roots) = extract_faces(lines);
  let mut segments = Vec::new();
  filter_depth(&faces, &roots, 0, min_stack, &mut segments);
  for part in [a, b] {
    for seg in part.segments() {
      if seg.kind() == Kind::Open {
        segments.push(seg.clone());
      }
    }
  }
  Part::new(segments)
}

fn collect_edges(a: &Part, b: &Part) -> Vec<Line> {
  let mut lines = Vec::new();
  for part in [a, b] {
    for seg in part.segments() {
      if seg.kind() == Kind::Open {
        continue;
      }
      lines.extend(seg.lines().filter(|l| !l.is_degenerate()));
    }
  }
  lines
}

// Split every pair of edges at their intersections. Replacing an edge
// keeps its first piece in place and appends the rest, so appended
// pieces are revisited by later outer iterations.
fn split_all(lines: &mut Vec<Line>) {
  let mut i = 0;
  while i + 1 < lines.len() {
    let mut j = i + 1;
    while j < lines.len() {
      let (si, sj) = lines[i].split_at(&lines[j]);
      splice(lines, i, &si);
      splice(lines, j, &sj);
      j += 1;
    }
    i += 1;
  }
}

fn splice(lines: &mut Vec<Line>, at: usize, split: &Segment) {
  if split.line_count() == 1 {
    return;
  }
  lines[at] = split.line(0);
  for k in 1..split.line_count() {
    lines.push(split.line(k));
  }
}

// Sort by the undirected endpoint pair and drop pairs of edges that
// traverse the same span in opposite directions; those lie between two
// interiors and belong to no boundary. Same-direction duplicates stay.
fn cancel_opposed(mut lines: Vec<Line>) -> Vec<Line> {
  lines.sort_by_key(|l| {
    if l.0[0] < l.0[1] {
      (l.0[0], l.0[1])
    } else {
      (l.0[1], l.0[0])
    }
  });
  let mut out: Vec<Line> = Vec::with_capacity(lines.len());
  for line in lines {
    match out.last() {
      Some(prev) if prev.0[0] == line.0[1] && prev.0[1] == line.0[0] => {
        out.pop();
      }
      _ => out.push(line),
    }
  }
  out
}

// Direction from `p` toward the far endpoint of an incident edge.
fn outgoing_direction(line: &Line, p: Point) -> f64 {
  ((line.0[1] - p) + (line.0[0] - p)).direction()
}

/// Rebuild oriented faces from the split edges and nest them into a
/// containment forest.
///
/// Pivots are taken in lexicographic order, which guarantees each new
/// face starts at its own lex-min vertex and that the face's container
/// (if any) is already on the nesting stack.
fn extract_faces(lines: Vec<Line>) -> (Vec<Face>, Vec<usize>) {
  let mut incidence: BTreeMap<Point, Vec<usize>> = BTreeMap::new();
  for (id, line) in lines.iter().enumerate() {
    incidence.entry(line.0[0]).or_default().push(id);
    incidence.entry(line.0[1]).or_default().push(id);
  }

  let mut faces: Vec<Face> = Vec::new();
  let mut roots: Vec<usize> = Vec::new();
  let mut stack: Vec<usize> = Vec::new();

  while let Some((&pivot, candidates)) = incidence.first_key_value() {
    // Start along the most counter-clockwise edge at the pivot. For a
    // solid boundary that edge enters the pivot; for a hole it leaves.
    let first_id = *candidates
      .iter()
      .max_by_key(|&&id| OrderedFloat(outgoing_direction(&lines[id], pivot)))
      .expect("incidence lists are never left empty");
    let first = lines[first_id];
    let entered = first.0[1] == pivot;
    // Walk against storage order when the start edge entered the pivot.
    let (from, to) = if entered { (1, 0) } else { (0, 1) };
    let mut polygon = vec![first.0[from], first.0[to]];
    remove_edge(&mut incidence, first.0[0], first_id);
    remove_edge(&mut incidence, first.0[1], first_id);

    let mut closed = true;
    while polygon[0] != polygon[polygon.len() - 1] {
      let p = polygon[polygon.len() - 1];
      let prev = polygon[polygon.len() - 2];
      let indir = (prev - p).direction();
      let Some(list) = incidence.get(&p) else {
        closed = false;
        break;
      };
      let mut cands: Vec<usize> = list.clone();
      cands.sort_by_key(|&id| {
        OrderedFloat((outgoing_direction(&lines[id], p) - indir).rem_euclid(360.0))
      });
      // Take the largest turn whose edge actually continues the walk,
      // treating stalled edges as opening and closing nesting levels.
      let mut t = cands.len();
      let mut depth = 0i32;
      let next_id = loop {
        if t == 0 {
          break None;
        }
        t -= 1;
        let cand = &lines[cands[t]];
        if cand.0[from] != p {
          depth += 1;
        } else if depth > 0 {
          depth -= 1;
        } else {
          break Some(cands[t]);
        }
      };
      let Some(id) = next_id else {
        closed = false;
        break;
      };
      let next = lines[id].0[to];
      polygon.push(next);
      remove_edge(&mut incidence, p, id);
      remove_edge(&mut incidence, next, id);
    }
    if !closed {
      // Arrangement did not close (degenerate input); drop the walk.
      trace!("dropping unclosed walk from {:?}", pivot);
      continue;
    }
    if entered {
      polygon.reverse();
    }
    let hole = !entered;
    trace!("face at {:?}, hole: {}", pivot, hole);

    // Pop containers until the top of the stack contains this face.
    let pd = (polygon[1] - polygon[0]).direction();
    while let Some(&top_idx) = stack.last() {
      let top = &faces[top_idx];
      let top_pts = top.segment.points();
      if top_pts[0] == polygon[0] {
        // Same lex-min vertex: contained, by the pivot scan order.
        break;
      }
      match top_pts.iter().position(|q| *q == polygon[0]) {
        None => {
          if top.segment.contains(&polygon[0]) {
            break;
          }
          stack.pop();
        }
        Some(idx) => {
          // Shared vertex: inside iff our first edge leaves within the
          // cone between the container's edges at that vertex. The
          // comparison is inclusive: a ring whose first edge rides a
          // surviving duplicate of the container's outgoing edge hugs
          // the boundary from the inside.
          let sd1 = (top_pts[idx - 1] - top_pts[idx]).direction();
          let sd2 = (top_pts[idx + 1] - top_pts[idx]).direction();
          let mut inside =
            (sd1 - pd).rem_euclid(360.0) <= (sd1 - sd2).rem_euclid(360.0);
          if top.hole {
            inside = !inside;
          }
          if inside {
            break;
          }
          stack.pop();
        }
      }
    }
    let face_idx = faces.len();
    match stack.last() {
      Some(&top_idx) => faces[top_idx].children.push(face_idx),
      None => roots.push(face_idx),
    }
    faces.push(Face {
      segment: Segment::from_path(polygon),
      hole,
      children: Vec::new(),
    });
    stack.push(face_idx);
  }
  (faces, roots)
}

fn remove_edge(incidence: &mut BTreeMap<Point, Vec<usize>>, at: Point, id: usize) {
  if let Some(list) = incidence.get_mut(&at) {
    if let Some(pos) = list.iter().position(|&e| e == id) {
      list.remove(pos);
    }
    if list.is_empty() {
      incidence.remove(&at);
    }
  }
}

// Pre-order walk of the containment forest. Depth counts up through
// solids and down through holes; a face survives when entering it
// crosses the operation's target depth. Pre-order keeps each solid
// directly ahead of its holes in the output.
fn filter_depth(
  faces: &[Face],
  ids: &[usize],
  depth: i32,
  min_stack: i32,
  out: &mut Vec<Segment>,
) {
  for &id in ids {
    let face = &faces[id];
    let entered = depth + if face.hole { -1 } else { 1 };
    if (entered == min_stack - 1 && face.hole) || (entered == min_stack && !face.hole) {
      out.push(face.segment.clone());
    } else {
      trace!(
        "skipping face at depth {} (hole: {})",
        entered,
        face.hole
      );
    }
    filter_depth(faces, &face.children, entered, min_stack, out);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Vector;

  fn pt(x: i64, y: i64) -> Point {
    Point::new([x, y])
  }

  fn square(origin: (i64, i64), size: i64) -> Segment {
    let (x, y) = origin;
    Segment::new(vec![
      pt(x, y),
      pt(x + size, y),
      pt(x + size, y + size),
      pt(x, y + size),
      pt(x, y),
    ])
    .unwrap()
  }

  #[test]
  fn cancel_opposed_removes_pairs() {
    let e = Line::new(pt(0, 0), pt(1, 0));
    let lines = vec![e, -e];
    assert!(cancel_opposed(lines).is_empty());
  }

  #[test]
  fn cancel_opposed_keeps_same_direction_duplicates() {
    let e = Line::new(pt(0, 0), pt(1, 0));
    let lines = vec![e, e];
    assert_eq!(cancel_opposed(lines).len(), 2);
  }

  #[test]
  fn cancel_opposed_handles_interleaved_groups() {
    let e = Line::new(pt(0, 0), pt(1, 0));
    let f = Line::new(pt(0, 0), pt(0, 1));
    let lines = vec![e, f, -f, -e];
    assert!(cancel_opposed(lines).is_empty());
  }

  #[test]
  fn extract_single_solid() {
    let sq = square((0, 0), 4);
    let lines: Vec<Line> = sq.lines().collect();
    let (faces, roots) = extract_faces(lines);
    assert_eq!(roots.len(), 1);
    let face = &faces[roots[0]];
    assert!(!face.hole);
    assert_eq!(face.segment.kind(), Kind::Solid);
    assert_eq!(face.segment.points(), sq.points());
  }

  #[test]
  fn extract_single_hole() {
    let ring = -&square((0, 0), 4);
    let lines: Vec<Line> = ring.lines().collect();
    let (faces, roots) = extract_faces(lines);
    assert_eq!(roots.len(), 1);
    let face = &faces[roots[0]];
    assert!(face.hole);
    assert_eq!(face.segment.kind(), Kind::Hole);
  }

  #[test]
  fn extract_nested_rings() {
    let outer = square((0, 0), 10);
    let inner = -&square((2, 2), 4);
    let mut lines: Vec<Line> = outer.lines().collect();
    lines.extend(inner.lines());
    let (faces, roots) = extract_faces(lines);
    assert_eq!(roots.len(), 1);
    let top = &faces[roots[0]];
    assert_eq!(top.children.len(), 1);
    assert!(faces[top.children[0]].hole);
  }

  #[test]
  fn extract_siblings() {
    let left = square((0, 0), 2);
    let right = square((5, 0), 2);
    let mut lines: Vec<Line> = left.lines().collect();
    lines.extend(right.lines());
    let (_, roots) = extract_faces(lines);
    assert_eq!(roots.len(), 2);
  }

  #[test]
  fn union_of_disjoint_squares() {
    let a = Part::new(vec![square((0, 0), 2)]);
    let b = Part::new(vec![square((5, 0), 2)]);
    let u = combine(&a, &b, 1);
    assert_eq!(u.segments().len(), 2);
    assert!(u.segments().iter().all(|s| s.kind() == Kind::Solid));
  }

  #[test]
  fn intersection_of_disjoint_squares_is_empty() {
    let a = Part::new(vec![square((0, 0), 2)]);
    let b = Part::new(vec![square((5, 0), 2)]);
    let i = combine(&a, &b, 2);
    assert!(i.segments().is_empty());
  }

  #[test]
  fn open_segments_ride_along() {
    let a = Part::new(vec![
      square((0, 0), 2),
      Segment::new(vec![pt(0, 0), pt(9, 9)]).unwrap(),
    ]);
    let u = combine(&a, &Part::new(vec![]), 1);
    assert_eq!(u.segments().len(), 2);
    assert_eq!(
      u.segments()
        .iter()
        .filter(|s| s.kind() == Kind::Open)
        .count(),
      1
    );
  }

  #[test]
  fn shared_edge_merges() {
    // Two squares sharing a full edge fuse into one ring.
    let a = Part::new(vec![square((0, 0), 2)]);
    let b = Part::new(vec![square((2, 0), 2)]);
    let u = combine(&a, &b, 1);
    assert_eq!(u.segments().len(), 1);
    let seg = &u.segments()[0];
    assert_eq!(seg.kind(), Kind::Solid);
    assert!(seg.contains(&pt(1, 1)));
    assert!(seg.contains(&pt(3, 1)));
  }

  #[test]
  fn difference_clears_identical_parts() {
    let a = Part::new(vec![square((0, 0), 4)]);
    let b = -&a;
    let d = combine(&a, &b, 1);
    assert!(d.segments().is_empty());
  }

  #[test]
  fn translate_invariance() {
    let a = Part::new(vec![square((0, 0), 4)]);
    let b = Part::new(vec![square((2, 2), 4)]);
    let u = combine(&a, &b, 1);
    let v = Vector([100, 100]);
    let shifted = combine(&(&a + v), &(&b + v), 1);
    let back = &shifted - v;
    assert_eq!(u, back);
  }
}
