//! Drawing helpers shared by the axes, the legend and the plotters.
//!
//! A [`DrawArea`] pairs a canvas with the rectangle it is allowed to draw
//! into. Narrowing an area never installs a clip on the back-end: the
//! `stroke_lines` and `fill_polygon` helpers clip the geometry themselves.

use std::f64::consts::{FRAC_PI_2, PI};

use statplot_base::clip;
use statplot_base::{Canvas, ColorU8, Length, Path, Point, Rectangle, color};
use statplot_text::TextStyle;

use crate::defaults;

/// Stroke style
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: ColorU8,
    /// A width `<= 0` disables the stroke
    pub width: Length,
    pub dashes: Vec<Length>,
    pub dash_offset: Length,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: color::BLACK,
            width: defaults::LINE_WIDTH,
            dashes: Vec::new(),
            dash_offset: Length::ZERO,
        }
    }
}

impl LineStyle {
    pub fn new(color: ColorU8, width: Length) -> Self {
        LineStyle {
            color,
            width,
            ..Default::default()
        }
    }

    pub fn with_color(self, color: ColorU8) -> Self {
        LineStyle { color, ..self }
    }

    pub fn with_width(self, width: Length) -> Self {
        LineStyle { width, ..self }
    }

    pub fn with_dashes(self, dashes: Vec<Length>, dash_offset: Length) -> Self {
        LineStyle {
            dashes,
            dash_offset,
            ..self
        }
    }

    /// Whether strokes with this style are visible
    pub fn is_visible(&self) -> bool {
        self.width > Length::ZERO && self.color.alpha() > 0
    }

    /// Install this style as the current canvas state
    pub fn apply(&self, canvas: &mut dyn Canvas) {
        canvas.set_color(Some(self.color));
        canvas.set_line_width(self.width);
        canvas.set_line_dash(&self.dashes, self.dash_offset);
    }
}

/// Marker shapes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlyphShape {
    /// Filled disc
    #[default]
    Circle,
    /// Outlined circle
    Ring,
    /// Outlined square
    Square,
    /// Filled square
    Box,
    /// Outlined triangle, pointing up
    Triangle,
    /// Filled triangle, pointing up
    Pyramid,
    Plus,
    Cross,
}

/// Marker style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub color: ColorU8,
    pub radius: Length,
    pub shape: GlyphShape,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        GlyphStyle {
            color: color::BLACK,
            radius: defaults::GLYPH_RADIUS,
            shape: GlyphShape::Circle,
        }
    }
}

impl GlyphStyle {
    pub fn with_color(self, color: ColorU8) -> Self {
        GlyphStyle { color, ..self }
    }

    pub fn with_radius(self, radius: Length) -> Self {
        GlyphStyle { radius, ..self }
    }

    pub fn with_shape(self, shape: GlyphShape) -> Self {
        GlyphStyle { shape, ..self }
    }

    /// Extent of the glyph relative to its center
    pub fn rectangle(&self) -> Rectangle {
        let r = self.radius;
        Rectangle::new(Point::new(-r, -r), Point::new(r, r))
    }

    /// Draw the glyph centered on `pt`
    pub fn draw(&self, canvas: &mut dyn Canvas, pt: Point) {
        let r = self.radius;
        let outline_width = r / 5.0;
        canvas.set_color(Some(self.color));
        match self.shape {
            GlyphShape::Circle => canvas.fill(&Path::circle(pt, r)),
            GlyphShape::Ring => {
                canvas.set_line_width(outline_width);
                canvas.set_line_dash(&[], Length::ZERO);
                canvas.stroke(&Path::circle(pt, r - outline_width / 2.0));
            }
            GlyphShape::Square | GlyphShape::Box => {
                let h = if self.shape == GlyphShape::Square {
                    r - outline_width / 2.0
                } else {
                    r
                };
                let path = Path::polygon(&[
                    pt + Point::new(-h, -h),
                    pt + Point::new(h, -h),
                    pt + Point::new(h, h),
                    pt + Point::new(-h, h),
                ]);
                if self.shape == GlyphShape::Square {
                    canvas.set_line_width(outline_width);
                    canvas.set_line_dash(&[], Length::ZERO);
                    canvas.stroke(&path);
                } else {
                    canvas.fill(&path);
                }
            }
            GlyphShape::Triangle | GlyphShape::Pyramid => {
                let pts: Vec<Point> = (0..3)
                    .map(|i| {
                        let a = FRAC_PI_2 + i as f64 * 2.0 * PI / 3.0;
                        pt + Point::new(r * a.cos(), r * a.sin())
                    })
                    .collect();
                let path = Path::polygon(&pts);
                if self.shape == GlyphShape::Triangle {
                    canvas.set_line_width(outline_width);
                    canvas.set_line_dash(&[], Length::ZERO);
                    canvas.stroke(&path);
                } else {
                    canvas.fill(&path);
                }
            }
            GlyphShape::Plus => {
                canvas.set_line_width(outline_width);
                canvas.set_line_dash(&[], Length::ZERO);
                canvas.stroke(&Path::polyline(&[
                    pt + Point::new(-r, Length::ZERO),
                    pt + Point::new(r, Length::ZERO),
                ]));
                canvas.stroke(&Path::polyline(&[
                    pt + Point::new(Length::ZERO, -r),
                    pt + Point::new(Length::ZERO, r),
                ]));
            }
            GlyphShape::Cross => {
                let d = r * (PI / 4.0).cos();
                canvas.set_line_width(outline_width);
                canvas.set_line_dash(&[], Length::ZERO);
                canvas.stroke(&Path::polyline(&[
                    pt + Point::new(-d, -d),
                    pt + Point::new(d, d),
                ]));
                canvas.stroke(&Path::polyline(&[
                    pt + Point::new(-d, d),
                    pt + Point::new(d, -d),
                ]));
            }
        }
    }
}

/// A canvas restricted to a rectangle
pub struct DrawArea<'a> {
    canvas: &'a mut dyn Canvas,
    pub rect: Rectangle,
}

impl std::fmt::Debug for DrawArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawArea").field("rect", &self.rect).finish()
    }
}

impl<'a> DrawArea<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, rect: Rectangle) -> Self {
        DrawArea { canvas, rect }
    }

    /// The whole canvas
    pub fn full(canvas: &'a mut dyn Canvas) -> Self {
        let rect = canvas.size().to_rect();
        DrawArea { canvas, rect }
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Borrow the same canvas with another rectangle
    pub fn with_rect(&mut self, rect: Rectangle) -> DrawArea<'_> {
        DrawArea {
            canvas: &mut *self.canvas,
            rect,
        }
    }

    /// Borrow the same canvas with each side moved inward
    pub fn crop(&mut self, left: Length, right: Length, bottom: Length, top: Length) -> DrawArea<'_> {
        let rect = self.rect.crop(left, right, bottom, top);
        self.with_rect(rect)
    }

    /// Canvas x of the normalized position `f`
    pub fn x(&self, f: f64) -> Length {
        self.rect.min.x + self.rect.width() * f
    }

    /// Canvas y of the normalized position `f`
    pub fn y(&self, f: f64) -> Length {
        self.rect.min.y + self.rect.height() * f
    }

    pub fn contains_x(&self, x: Length) -> bool {
        let slop = Length::pt(clip::SLOP);
        x >= self.rect.min.x - slop && x <= self.rect.max.x + slop
    }

    pub fn contains_y(&self, y: Length) -> bool {
        let slop = Length::pt(clip::SLOP);
        y >= self.rect.min.y - slop && y <= self.rect.max.y + slop
    }

    pub fn contains(&self, p: Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    /// Stroke a line strip without clipping
    pub fn stroke_line(&mut self, style: &LineStyle, pts: &[Point]) {
        if pts.len() < 2 || !style.is_visible() {
            return;
        }
        style.apply(&mut *self.canvas);
        self.canvas.stroke(&Path::polyline(pts));
    }

    pub fn stroke_line2(&mut self, style: &LineStyle, p0: Point, p1: Point) {
        self.stroke_line(style, &[p0, p1]);
    }

    /// Clip the line strips to the area and stroke what remains
    pub fn stroke_lines(&mut self, style: &LineStyle, lines: &[Vec<Point>]) {
        if !style.is_visible() {
            return;
        }
        for line in clip::clip_lines(&self.rect, lines) {
            self.stroke_line(style, &line);
        }
    }

    /// Clip the polygon to the area and fill what remains
    pub fn fill_polygon(&mut self, color: ColorU8, pts: &[Point]) {
        let pts = clip::clip_polygon(&self.rect, pts);
        if pts.len() < 3 {
            return;
        }
        self.canvas.set_color(Some(color));
        self.canvas.fill(&Path::polygon(&pts));
    }

    /// Draw a glyph if its center lies in the area
    pub fn draw_glyph(&mut self, style: &GlyphStyle, pt: Point) {
        if !self.contains(pt) {
            return;
        }
        style.draw(&mut *self.canvas, pt);
    }

    /// Draw a glyph even if its center lies outside of the area
    pub fn draw_glyph_unclipped(&mut self, style: &GlyphStyle, pt: Point) {
        style.draw(&mut *self.canvas, pt);
    }

    pub fn fill_text(&mut self, style: &TextStyle, pt: Point, txt: &str) {
        style.draw(&mut *self.canvas, pt, txt);
    }
}

/// Subdivision of a rectangle into a grid of tiles.
///
/// Tile rows are counted from the top, columns from the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tiles {
    pub rows: usize,
    pub cols: usize,
    pub pad_top: Length,
    pub pad_bottom: Length,
    pub pad_left: Length,
    pub pad_right: Length,
    /// Horizontal space between columns
    pub pad_x: Length,
    /// Vertical space between rows
    pub pad_y: Length,
}

impl Tiles {
    pub fn new(rows: usize, cols: usize) -> Self {
        Tiles {
            rows,
            cols,
            pad_top: Length::ZERO,
            pad_bottom: Length::ZERO,
            pad_left: Length::ZERO,
            pad_right: Length::ZERO,
            pad_x: Length::ZERO,
            pad_y: Length::ZERO,
        }
    }

    pub fn with_padding(self, outer: Length, inner: Length) -> Self {
        Tiles {
            pad_top: outer,
            pad_bottom: outer,
            pad_left: outer,
            pad_right: outer,
            pad_x: inner,
            pad_y: inner,
            ..self
        }
    }

    /// Rectangle of the tile at column `col` and row `row`
    pub fn at(&self, rect: &Rectangle, col: usize, row: usize) -> Rectangle {
        let tile_h = (rect.height()
            - self.pad_top
            - self.pad_bottom
            - self.pad_y * self.rows.saturating_sub(1) as f64)
            / self.rows as f64;
        let tile_w = (rect.width()
            - self.pad_left
            - self.pad_right
            - self.pad_x * self.cols.saturating_sub(1) as f64)
            / self.cols as f64;
        let ymax = rect.max.y - self.pad_top - (self.pad_y + tile_h) * row as f64;
        let xmin = rect.min.x + self.pad_left + (self.pad_x + tile_w) * col as f64;
        Rectangle::new(Point::new(xmin, ymax - tile_h), Point::new(xmin + tile_w, ymax))
    }
}
