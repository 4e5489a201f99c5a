//! Clipping of polylines and polygons against an axis aligned rectangle.
//!
//! Canvases never install a clip path: plotters clip their geometry with
//! these functions before stroking or filling.

use crate::geom::{Length, Point, Rectangle};

/// Tolerance under which a point just outside an edge still counts as inside
pub const SLOP: f64 = 3e-8;

#[derive(Debug, Clone, Copy)]
enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

const EDGES: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

#[derive(Debug, Clone, Copy)]
struct HalfPlane {
    edge: Edge,
    clip: Point,
    norm: Point,
}

impl HalfPlane {
    fn new(rect: &Rectangle, edge: Edge) -> Self {
        let (clip, norm) = match edge {
            Edge::Left => (rect.min, Point::pt(1.0, 0.0)),
            Edge::Right => (rect.max, Point::pt(-1.0, 0.0)),
            Edge::Bottom => (rect.min, Point::pt(0.0, 1.0)),
            Edge::Top => (rect.max, Point::pt(0.0, -1.0)),
        };
        HalfPlane { edge, clip, norm }
    }

    fn contains(&self, p: Point) -> bool {
        let slop = Length::pt(SLOP);
        match self.edge {
            Edge::Left => p.x >= self.clip.x - slop,
            Edge::Right => p.x <= self.clip.x + slop,
            Edge::Bottom => p.y >= self.clip.y - slop,
            Edge::Top => p.y <= self.clip.y + slop,
        }
    }

    /// Intersection of the segment `p0 → p1` with the clip line
    fn intersect(&self, p0: Point, p1: Point) -> Point {
        let t = (p0 - self.clip).dot(self.norm) / (p0 - p1).dot(self.norm);
        p0 + (p1 - p0).scale(t)
    }

    fn clip_line(&self, pts: &[Point], out: &mut Vec<Vec<Point>>) {
        let mut line = Vec::with_capacity(pts.len());
        for i in 1..pts.len() {
            let (cur, next) = (pts[i - 1], pts[i]);
            let (cur_in, next_in) = (self.contains(cur), self.contains(next));
            match (cur_in, next_in) {
                (true, true) => line.push(cur),
                (true, false) => {
                    line.push(cur);
                    line.push(self.intersect(cur, next));
                    out.push(std::mem::take(&mut line));
                }
                (false, false) => (),
                (false, true) => line.push(self.intersect(cur, next)),
            }
            if next_in && i == pts.len() - 1 {
                line.push(next);
            }
        }
        if line.len() > 1 {
            out.push(line);
        }
    }

    fn clip_polygon(&self, pts: &[Point]) -> Vec<Point> {
        let mut out = Vec::with_capacity(pts.len() + 2);
        for i in 0..pts.len() {
            let cur = pts[i];
            let next = pts[(i + 1) % pts.len()];
            match (self.contains(cur), self.contains(next)) {
                (true, true) => out.push(cur),
                (true, false) => {
                    out.push(cur);
                    out.push(self.intersect(cur, next));
                }
                (false, false) => (),
                (false, true) => out.push(self.intersect(cur, next)),
            }
        }
        out
    }
}

/// Clips each polyline against `rect`.
///
/// A polyline crossing the boundary is split in several sub-lines.
/// Polylines lying entirely inside are returned unchanged.
pub fn clip_lines(rect: &Rectangle, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
    let mut current: Vec<Vec<Point>> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.len() == 1 {
            if EDGES
                .iter()
                .all(|e| HalfPlane::new(rect, *e).contains(line[0]))
            {
                current.push(line.clone());
            }
        } else if line.len() > 1 {
            current.push(line.clone());
        }
    }
    for edge in EDGES {
        let plane = HalfPlane::new(rect, edge);
        let mut next = Vec::with_capacity(current.len());
        for line in &current {
            if line.len() == 1 {
                next.push(line.clone());
            } else {
                plane.clip_line(line, &mut next);
            }
        }
        current = next;
    }
    current
}

/// Clips a polygon against `rect` with the Sutherland-Hodgman algorithm.
///
/// The last vertex is implicitly connected to the first.
pub fn clip_polygon(rect: &Rectangle, pts: &[Point]) -> Vec<Point> {
    let mut current = pts.to_vec();
    for edge in EDGES {
        if current.is_empty() {
            break;
        }
        current = HalfPlane::new(rect, edge).clip_polygon(&current);
    }
    current
}
