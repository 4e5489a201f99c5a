use std::sync::Arc;

use statplot_base::color::{self, ColorU8};
use statplot_base::{Canvas, Font, Length, Point, Rectangle};

use crate::fontdb;
use crate::metrics::Metrics;

/// Horizontal alignment putting the anchor on the left of the text
pub const X_LEFT: f64 = 0.0;
pub const X_CENTER: f64 = -0.5;
pub const X_RIGHT: f64 = -1.0;
/// Vertical alignment putting the anchor on the last baseline
pub const Y_BOTTOM: f64 = 0.0;
pub const Y_CENTER: f64 = -0.5;
pub const Y_TOP: f64 = -1.0;

/// How text is measured and drawn.
///
/// The alignment factors are fractions of the text block extent, in
/// `[-1, 0]`: the block is shifted by `x_align × width` and
/// `y_align × height` relative to the anchor point, before rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: ColorU8,
    pub font: Font,
    /// Counter-clockwise, in radians, around the anchor
    pub rotation: f64,
    pub x_align: f64,
    pub y_align: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            color: color::BLACK,
            font: Font::default(),
            rotation: 0.0,
            x_align: X_LEFT,
            y_align: Y_BOTTOM,
        }
    }
}

fn lines(txt: &str) -> impl Iterator<Item = &str> {
    txt.trim_end_matches('\n').split('\n')
}

impl TextStyle {
    pub fn new(font: Font) -> Self {
        TextStyle {
            font,
            ..Default::default()
        }
    }

    pub fn with_color(self, color: ColorU8) -> Self {
        TextStyle { color, ..self }
    }

    pub fn with_font(self, font: Font) -> Self {
        TextStyle { font, ..self }
    }

    pub fn with_size(self, size: Length) -> Self {
        TextStyle {
            font: self.font.with_size(size),
            ..self
        }
    }

    pub fn with_rotation(self, rotation: f64) -> Self {
        TextStyle { rotation, ..self }
    }

    pub fn with_align(self, x_align: f64, y_align: f64) -> Self {
        TextStyle {
            x_align,
            y_align,
            ..self
        }
    }

    pub fn metrics(&self) -> Arc<dyn Metrics> {
        fontdb::metrics(&self.font.name)
    }

    pub fn ascent(&self) -> Length {
        self.font.size * self.metrics().extents().ascent
    }

    /// Depth of the block below its last baseline: the font descent
    pub fn depth(&self) -> Length {
        self.font.size * self.metrics().extents().descent
    }

    pub fn line_height(&self) -> Length {
        self.font.size * self.metrics().extents().line_height
    }

    /// Width of a single line
    pub fn line_width(&self, line: &str) -> Length {
        self.font.size * self.metrics().advance(line)
    }

    /// Width of the block: the widest line
    pub fn width(&self, txt: &str) -> Length {
        if txt.is_empty() {
            return Length::ZERO;
        }
        let metrics = self.metrics();
        lines(txt)
            .map(|l| self.font.size * metrics.advance(l))
            .fold(Length::ZERO, Length::max)
    }

    /// Height of the block above its last baseline:
    /// ascent + (n - 1) × line height for n lines
    pub fn height(&self, txt: &str) -> Length {
        if txt.is_empty() {
            return Length::ZERO;
        }
        let n = lines(txt).count();
        let ext = self.metrics().extents();
        self.font.size * (ext.ascent + (n - 1) as f64 * ext.line_height)
    }

    /// Bounding box of the drawn text, relative to the anchor point.
    ///
    /// The four corners of the unrotated block are rotated and enclosed.
    pub fn rectangle(&self, txt: &str) -> Rectangle {
        let w = self.width(txt);
        let h = self.height(txt);
        let depth = if txt.is_empty() { Length::ZERO } else { self.depth() };
        let x0 = w * self.x_align;
        let y0 = h * self.y_align - depth;
        let y1 = h * self.y_align + h;
        let corners = [
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x0 + w, y0),
            Point::new(x0 + w, y1),
        ]
        .map(|p| p.rotate(self.rotation));
        let mut rect = Rectangle::new(corners[0], corners[0]);
        for c in &corners[1..] {
            rect = rect.union(&Rectangle::new(*c, *c));
        }
        rect
    }

    /// Draws `txt` with its anchor at `pt`
    pub fn draw(&self, canvas: &mut dyn Canvas, pt: Point, txt: &str) {
        if txt.is_empty() {
            return;
        }
        let metrics = self.metrics();
        let ext = metrics.extents();
        let size = self.font.size;
        let h = self.height(txt);
        let top = h * self.y_align + h;

        canvas.push();
        canvas.set_color(Some(self.color));
        canvas.translate(pt);
        if self.rotation != 0.0 {
            canvas.rotate(self.rotation);
        }
        for (i, line) in lines(txt).enumerate() {
            let x = size * metrics.advance(line) * self.x_align;
            let y = top - size * ext.ascent - size * ext.line_height * i as f64;
            canvas.fill_string(&self.font, Point::new(x, y), line);
        }
        if let Err(err) = canvas.pop() {
            log::warn!("text drawing left the canvas unbalanced: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use statplot_base::canvas::Op;
    use statplot_base::{Recorder, Size};

    use super::*;

    fn near(a: Length, b: f64) -> bool {
        (a.points() - b).abs() < 1e-9
    }

    fn style() -> TextStyle {
        TextStyle::new(Font::new("Helvetica", Length::pt(10.0)))
    }

    #[test]
    fn block_measures() {
        let s = style();
        assert!(near(s.width("00\n0"), 11.12));
        assert!(near(s.height("0"), 7.18));
        assert!(near(s.height("0\n0\n"), 7.18 + 11.5));
        assert!(near(s.depth(), 2.07));
        assert_eq!(s.width(""), Length::ZERO);
        assert_eq!(s.height(""), Length::ZERO);
    }

    #[test]
    fn rectangle_aligned() {
        let s = style().with_align(X_CENTER, Y_TOP);
        let r = s.rectangle("00");
        assert!(near(r.min.x, -5.56));
        assert!(near(r.max.x, 5.56));
        assert!(near(r.max.y, 0.0));
        assert!(near(r.min.y, -7.18 - 2.07));
    }

    #[test]
    fn rectangle_rotated() {
        let s = style().with_rotation(FRAC_PI_2);
        let r = s.rectangle("00");
        // the block now extends to the left, upward
        assert!(near(r.min.x, -7.18));
        assert!(near(r.max.x, 2.07));
        assert!(near(r.min.y, 0.0));
        assert!(near(r.max.y, 11.12));
    }

    #[test]
    fn draw_lines_on_successive_baselines() {
        let mut rec = Recorder::new(Size::new(Length::pt(100.0), Length::pt(100.0)).unwrap());
        style().draw(&mut rec, Point::pt(10.0, 20.0), "a\nbb");
        let strings: Vec<(Point, String)> = rec
            .ops()
            .iter()
            .filter_map(|op| match op {
                Op::FillString { pt, text, .. } => Some((*pt, text.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[0].1, "a");
        assert!(near(strings[0].0.y, 11.5));
        assert!(near(strings[1].0.y, 0.0));
        assert_eq!(rec.ops().first(), Some(&Op::Push));
        assert_eq!(rec.ops().last(), Some(&Op::Pop));
    }
}
