//! Lengths, points, rectangles, affine transforms and paths.

use std::{f64::consts::FRAC_PI_2, fmt, iter, ops};

use strict_num::PositiveF64;

/// Number of points in one inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// One point
pub const POINT: Length = Length(1.0);
/// One inch
pub const INCH: Length = Length(POINTS_PER_INCH);
/// One millimeter
pub const MILLIMETER: Length = Length(POINTS_PER_INCH / 25.4);
/// One centimeter
pub const CENTIMETER: Length = Length(10.0 * POINTS_PER_INCH / 25.4);

/// A device independent length, stored in points.
///
/// Negative lengths are fine for offsets. Extents are kept positive by
/// [`Size`].
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub const fn pt(points: f64) -> Self {
        Length(points)
    }

    pub fn inches(inches: f64) -> Self {
        Length(inches * POINTS_PER_INCH)
    }

    pub fn mm(mm: f64) -> Self {
        Length(mm * MILLIMETER.0)
    }

    pub fn cm(cm: f64) -> Self {
        Length(cm * CENTIMETER.0)
    }

    /// Length covered by `px` pixels at the given resolution
    pub fn pixels(px: f64, dpi: f64) -> Self {
        Length(px * POINTS_PER_INCH / dpi)
    }

    pub const fn points(self) -> f64 {
        self.0
    }

    pub fn to_inches(self) -> f64 {
        self.0 / POINTS_PER_INCH
    }

    pub fn to_mm(self) -> f64 {
        self.0 / MILLIMETER.0
    }

    pub fn to_cm(self) -> f64 {
        self.0 / CENTIMETER.0
    }

    /// Number of pixels covering this length at the given resolution
    pub fn to_pixels(self, dpi: f64) -> f64 {
        self.0 * dpi / POINTS_PER_INCH
    }

    pub fn abs(self) -> Self {
        Length(self.0.abs())
    }

    pub fn min(self, other: Length) -> Self {
        Length(self.0.min(other.0))
    }

    pub fn max(self, other: Length) -> Self {
        Length(self.0.max(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

impl ops::Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl ops::Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl ops::Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl ops::Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl ops::Mul<Length> for f64 {
    type Output = Length;
    fn mul(self, rhs: Length) -> Length {
        Length(self * rhs.0)
    }
}

impl ops::Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

impl ops::Div for Length {
    type Output = f64;
    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

impl ops::AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl ops::SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl ops::MulAssign<f64> for Length {
    fn mul_assign(&mut self, rhs: f64) {
        self.0 *= rhs;
    }
}

impl iter::Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        Length(iter.map(|l| l.0).sum())
    }
}

/// A point, or a vector, on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const ORIGIN: Point = Point::pt(0.0, 0.0);

    pub const fn new(x: Length, y: Length) -> Self {
        Point { x, y }
    }

    /// Build a point from coordinates in points
    pub const fn pt(x: f64, y: f64) -> Self {
        Point {
            x: Length(x),
            y: Length(y),
        }
    }

    /// Dot product, in squared points
    pub fn dot(self, other: Point) -> f64 {
        self.x.0 * other.x.0 + self.y.0 * other.y.0
    }

    pub fn scale(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }

    /// Rotate counter-clockwise around the origin
    pub fn rotate(self, theta: f64) -> Point {
        if theta == 0.0 {
            return self;
        }
        let (sin, cos) = theta.sin_cos();
        Point::pt(
            self.x.0 * cos - self.y.0 * sin,
            self.x.0 * sin + self.y.0 * cos,
        )
    }
}

impl ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Extent of a canvas. Both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    w: PositiveF64,
    h: PositiveF64,
}

impl Size {
    /// Returns `None` if either dimension is negative or not finite
    pub fn new(w: Length, h: Length) -> Option<Self> {
        Some(Size {
            w: PositiveF64::new(w.points())?,
            h: PositiveF64::new(h.points())?,
        })
    }

    pub fn width(&self) -> Length {
        Length(self.w.get())
    }

    pub fn height(&self) -> Length {
        Length(self.h.get())
    }

    pub fn to_rect(&self) -> Rectangle {
        Rectangle::new(Point::ORIGIN, Point::new(self.width(), self.height()))
    }
}

/// An axis aligned rectangle, from its bottom-left to its top-right corner.
///
/// Rectangles with equal corners are valid and empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    pub const fn new(min: Point, max: Point) -> Self {
        Rectangle { min, max }
    }

    pub fn from_xywh(x: Length, y: Length, w: Length, h: Length) -> Self {
        Rectangle::new(Point::new(x, y), Point::new(x + w, y + h))
    }

    /// The diagonal vector from `min` to `max`
    pub fn size(&self) -> Point {
        self.max - self.min
    }

    pub fn width(&self) -> Length {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Length {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= Length::ZERO || self.height() <= Length::ZERO
    }

    pub fn contains(&self, p: Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    pub fn contains_x(&self, x: Length) -> bool {
        self.min.x <= x && x <= self.max.x
    }

    pub fn contains_y(&self, y: Length) -> bool {
        self.min.y <= y && y <= self.max.y
    }

    pub fn translate(&self, d: Point) -> Self {
        Rectangle::new(self.min + d, self.max + d)
    }

    /// The smallest rectangle containing both
    pub fn union(&self, other: &Rectangle) -> Self {
        Rectangle::new(
            Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    /// Move each side inward by the given amount
    pub fn crop(&self, left: Length, right: Length, bottom: Length, top: Length) -> Self {
        Rectangle::new(
            Point::new(self.min.x + left, self.min.y + bottom),
            Point::new(self.max.x - right, self.max.y - top),
        )
    }

    pub fn to_path(&self) -> Path {
        Path::polygon(&[
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ])
    }
}

/// A 2x3 affine transform.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Affine::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Affine {
            e: dx,
            f: dy,
            ..Affine::IDENTITY
        }
    }

    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Affine {
            a: sx,
            d: sy,
            ..Affine::IDENTITY
        }
    }

    /// `self × other`: `other` is applied first, then `self`
    pub fn pre_concat(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        let (x, y) = (p.x.points(), p.y.points());
        Point::pt(
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Mean scaling factor, used to scale line widths
    pub fn mean_scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }
}

/// One command of a [`Path`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    Move(Point),
    Line(Point),
    /// Circular arc. Angles are in radians, a positive sweep is counter-clockwise.
    Arc {
        center: Point,
        radius: Length,
        start: f64,
        sweep: f64,
    },
    /// Connects back to the most recent move
    Close,
}

/// An ordered sequence of path commands.
///
/// Every sub-path starts with a [`PathCmd::Move`]: the builder methods insert
/// one whenever a line or an arc is added to an empty path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Path { cmds: Vec::new() }
    }

    /// An open path through all the points
    pub fn polyline(pts: &[Point]) -> Self {
        let mut path = Path {
            cmds: Vec::with_capacity(pts.len()),
        };
        for (i, p) in pts.iter().enumerate() {
            if i == 0 {
                path.move_to(*p);
            } else {
                path.line_to(*p);
            }
        }
        path
    }

    /// A closed path through all the points
    pub fn polygon(pts: &[Point]) -> Self {
        let mut path = Path::polyline(pts);
        if !path.is_empty() {
            path.close();
        }
        path
    }

    /// A full circle
    pub fn circle(center: Point, radius: Length) -> Self {
        let mut path = Path::new();
        path.arc(center, radius, 0.0, 2.0 * std::f64::consts::PI);
        path.close();
        path
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn move_to(&mut self, p: Point) {
        self.cmds.push(PathCmd::Move(p));
    }

    pub fn line_to(&mut self, p: Point) {
        if self.cmds.is_empty() {
            self.move_to(p);
        } else {
            self.cmds.push(PathCmd::Line(p));
        }
    }

    /// Adds an arc. A line joins the current point to the start of the arc.
    pub fn arc(&mut self, center: Point, radius: Length, start: f64, sweep: f64) {
        if self.cmds.is_empty() {
            self.move_to(arc_point(center, radius, start));
        }
        self.cmds.push(PathCmd::Arc {
            center,
            radius,
            start,
            sweep,
        });
    }

    pub fn close(&mut self) {
        self.cmds.push(PathCmd::Close);
    }

    /// Flattens the path to move, line and cubic segments.
    ///
    /// Arcs are approximated by one cubic Bézier per quarter turn.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segs = Vec::with_capacity(self.cmds.len());
        let mut current: Option<Point> = None;
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::Move(p) => {
                    segs.push(Segment::MoveTo(p));
                    current = Some(p);
                }
                PathCmd::Line(p) => {
                    segs.push(Segment::LineTo(p));
                    current = Some(p);
                }
                PathCmd::Arc {
                    center,
                    radius,
                    start,
                    sweep,
                } => {
                    let p0 = arc_point(center, radius, start);
                    match current {
                        None => segs.push(Segment::MoveTo(p0)),
                        Some(cur) if cur != p0 => segs.push(Segment::LineTo(p0)),
                        _ => (),
                    }
                    arc_to_cubics(center, radius, start, sweep, &mut segs);
                    current = Some(arc_point(center, radius, start + sweep));
                }
                PathCmd::Close => segs.push(Segment::Close),
            }
        }
        segs
    }

    /// Converts to a tiny-skia path, applying the transform
    pub fn to_skia(&self, transform: &Affine) -> Option<tiny_skia_path::Path> {
        let mut pb = tiny_skia_path::PathBuilder::new();
        for seg in self.segments() {
            match seg.transform(transform) {
                Segment::MoveTo(p) => pb.move_to(p.x.points() as f32, p.y.points() as f32),
                Segment::LineTo(p) => pb.line_to(p.x.points() as f32, p.y.points() as f32),
                Segment::CubicTo(p1, p2, p) => pb.cubic_to(
                    p1.x.points() as f32,
                    p1.y.points() as f32,
                    p2.x.points() as f32,
                    p2.y.points() as f32,
                    p.x.points() as f32,
                    p.y.points() as f32,
                ),
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

/// A flattened path segment, see [`Path::segments`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl Segment {
    pub fn transform(self, t: &Affine) -> Segment {
        match self {
            Segment::MoveTo(p) => Segment::MoveTo(t.apply(p)),
            Segment::LineTo(p) => Segment::LineTo(t.apply(p)),
            Segment::CubicTo(p1, p2, p) => {
                Segment::CubicTo(t.apply(p1), t.apply(p2), t.apply(p))
            }
            Segment::Close => Segment::Close,
        }
    }
}

fn arc_point(center: Point, radius: Length, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    center + Point::new(radius * cos, radius * sin)
}

fn arc_to_cubics(center: Point, radius: Length, start: f64, sweep: f64, segs: &mut Vec<Segment>) {
    if sweep == 0.0 {
        return;
    }
    let n = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / n as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    let r = radius.points();
    let mut a0 = start;
    for _ in 0..n {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        let p0 = arc_point(center, radius, a0);
        let p3 = arc_point(center, radius, a1);
        let p1 = p0 + Point::pt(-k * r * s0, k * r * c0);
        let p2 = p3 - Point::pt(-k * r * s1, k * r * c1);
        segs.push(Segment::CubicTo(p1, p2, p3));
        a0 = a1;
    }
}
