//! Plot axes: range, scale, ticks and their layout.
//!
//! An [`Axis`] is drawn either horizontally, below the data area, or
//! vertically, on its left. Both layouts are computed from the same record;
//! the orientation is chosen by the plot.

use std::f64::consts::FRAC_PI_2;

use statplot_base::{Length, Point, color};
use statplot_text::{TextStyle, X_CENTER, X_RIGHT, Y_BOTTOM, Y_CENTER, Y_TOP};

use crate::Error;
use crate::defaults;
use crate::draw::{DrawArea, LineStyle};
use crate::plotter::GlyphBox;

mod scale;
pub mod talbot;
mod tick;

pub use scale::{Normalizer, Scale};
pub use talbot::Containment;
pub use tick::{
    ConstantTicks, DefaultTicks, LogTicks, Tick, TickMarker, TickStrategy, Ticker, TimeFn,
    TimeTicks, unix_time,
};

/// Orientation of an axis in the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The title of an axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    /// Space between the label and the tick labels
    pub padding: Length,
    pub style: TextStyle,
}

/// Tick marks and tick labels configuration
#[derive(Debug, Clone)]
pub struct TickConfig {
    pub label: TextStyle,
    pub line_style: LineStyle,
    /// Length of the major tick marks, minor marks are half as long
    pub length: Length,
    pub marker: TickMarker,
}

#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub label: AxisLabel,
    pub line_style: LineStyle,
    /// Distance between the axis line and the data area
    pub padding: Length,
    pub tick: TickConfig,
    pub scale: Scale,
    /// Widen the range to the outermost ticks when sanitized
    pub auto_rescale: bool,
}

impl Axis {
    /// A new axis with an empty range: `min = +inf` and `max = -inf`
    pub fn new(orientation: Orientation) -> Self {
        let (x_align, y_align) = match orientation {
            Orientation::Horizontal => (X_CENTER, Y_TOP),
            Orientation::Vertical => (X_RIGHT, Y_CENTER),
        };
        Axis {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            label: AxisLabel {
                text: String::new(),
                padding: Length::ZERO,
                style: TextStyle::default()
                    .with_size(defaults::AXIS_LABEL_FONT_SIZE)
                    .with_align(X_CENTER, Y_BOTTOM),
            },
            line_style: LineStyle::new(color::BLACK, defaults::AXIS_LINE_WIDTH),
            padding: defaults::AXIS_PADDING,
            tick: TickConfig {
                label: TextStyle::default()
                    .with_size(defaults::TICK_LABEL_FONT_SIZE)
                    .with_align(x_align, y_align),
                line_style: LineStyle::new(color::BLACK, defaults::TICK_LINE_WIDTH),
                length: defaults::TICK_LENGTH,
                marker: TickMarker::default(),
            },
            scale: Scale::Linear,
            auto_rescale: false,
        }
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label.text = text.into();
        self
    }

    pub fn with_range(self, min: f64, max: f64) -> Self {
        Axis { min, max, ..self }
    }

    pub fn with_scale(self, scale: Scale) -> Self {
        Axis { scale, ..self }
    }

    pub fn with_marker(mut self, marker: impl Into<TickMarker>) -> Self {
        self.tick.marker = marker.into();
        self
    }

    pub fn with_padding(self, padding: Length) -> Self {
        Axis { padding, ..self }
    }

    pub fn with_auto_rescale(self, auto_rescale: bool) -> Self {
        Axis {
            auto_rescale,
            ..self
        }
    }

    /// Widen the range to include `[min, max]`
    pub fn extend(&mut self, min: f64, max: f64) {
        self.min = self.min.min(min);
        self.max = self.max.max(max);
    }

    /// Make the range drawable: infinities become 0, a reversed range is
    /// swapped and an empty range is widened by 1 on both sides.
    pub fn sanitize(&mut self) {
        if self.min.is_infinite() {
            self.min = 0.0;
        }
        if self.max.is_infinite() {
            self.max = 0.0;
        }
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        if self.min == self.max {
            self.min -= 1.0;
            self.max += 1.0;
        }
        if self.auto_rescale {
            for t in self.marks() {
                self.min = self.min.min(t.value);
                self.max = self.max.max(t.value);
            }
        }
    }

    /// Check that the range can be normalized and ticked
    pub fn check(&self) -> Result<(), Error> {
        if !(self.max > self.min) {
            return Err(Error::InputRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.scale.is_log() && self.min <= 0.0 {
            return Err(Error::Domain(format!(
                "log scale of the range [{}, {}]",
                self.min, self.max
            )));
        }
        self.tick.marker.ticks(self.min, self.max).map(|_| ())
    }

    /// Normalized position of `x` along the axis
    pub fn norm(&self, x: f64) -> f64 {
        self.scale.normalize(self.min, self.max, x)
    }

    /// Ticks of the current range. Generation failures are logged and give no tick.
    pub fn marks(&self) -> Vec<Tick> {
        match self.tick.marker.ticks(self.min, self.max) {
            Ok(ticks) => ticks,
            Err(err) => {
                log::warn!("no ticks for axis [{}, {}]: {}", self.min, self.max, err);
                Vec::new()
            }
        }
    }

    fn draws_ticks(&self) -> bool {
        self.tick.line_style.width > Length::ZERO && self.tick.length > Length::ZERO
    }

    /// Height of the axis band when drawn horizontally
    pub fn horizontal_size(&self) -> Length {
        let mut h = Length::ZERO;
        if !self.label.text.is_empty() {
            h += self.label.style.depth();
            h += self.label.style.height(&self.label.text);
            h += self.label.padding;
        }
        let marks = self.marks();
        if !marks.is_empty() {
            if self.draws_ticks() {
                h += self.tick.length;
            }
            h += tick_label_height(&self.tick.label, &marks);
        }
        h += self.line_style.width / 2.0;
        h += self.padding;
        h
    }

    /// Width of the axis band when drawn vertically
    pub fn vertical_size(&self) -> Length {
        let mut w = Length::ZERO;
        if !self.label.text.is_empty() {
            w += self.label.style.depth();
            w += self.label.style.height(&self.label.text);
            w += self.label.padding;
        }
        let marks = self.marks();
        if !marks.is_empty() {
            let lwidth = tick_label_width(&self.tick.label, &marks);
            if lwidth > Length::ZERO {
                w += lwidth;
                w += self.tick.label.width(" ");
            }
            if self.draws_ticks() {
                w += self.tick.length;
            }
        }
        w += self.line_style.width / 2.0;
        w += self.padding;
        w
    }

    /// Draw the axis band, label at the bottom and axis line at the top
    pub fn draw_horizontal(&self, area: &mut DrawArea) {
        let mut y = area.rect.min.y;
        if !self.label.text.is_empty() {
            let x = area.rect.center().x;
            let descent = self.label.style.depth();
            area.fill_text(&self.label.style, Point::new(x, y + descent), &self.label.text);
            y += self.label.style.height(&self.label.text) + descent;
            y += self.label.padding;
        }

        let marks = self.marks();
        let label_height = tick_label_height(&self.tick.label, &marks);
        let descent = self.tick.label.depth();
        for t in marks.iter().filter(|t| !t.is_minor()) {
            let x = area.x(self.norm(t.value));
            if !area.contains_x(x) {
                continue;
            }
            area.fill_text(
                &self.tick.label,
                Point::new(x, y + label_height + descent),
                &t.label,
            );
        }

        if marks.is_empty() {
            y += self.line_style.width / 2.0;
        } else {
            y += label_height;
        }

        if !marks.is_empty() && self.draws_ticks() {
            let len = self.tick.length;
            for t in &marks {
                let x = area.x(self.norm(t.value));
                if !area.contains_x(x) {
                    continue;
                }
                let start = if t.is_minor() { len / 2.0 } else { Length::ZERO };
                area.stroke_line2(
                    &self.tick.line_style,
                    Point::new(x, y + start),
                    Point::new(x, y + len),
                );
            }
            y += len;
        }

        let (x0, x1) = (area.rect.min.x, area.rect.max.x);
        area.stroke_line2(&self.line_style, Point::new(x0, y), Point::new(x1, y));
    }

    /// Draw the axis band, label on the left and axis line on the right
    pub fn draw_vertical(&self, area: &mut DrawArea) {
        let mut x = area.rect.min.x;
        if !self.label.text.is_empty() {
            let style = self
                .label
                .style
                .clone()
                .with_rotation(self.label.style.rotation + FRAC_PI_2);
            x += self.label.style.height(&self.label.text);
            let y = area.rect.center().y;
            let descent = self.label.style.depth();
            area.fill_text(&style, Point::new(x - descent, y), &self.label.text);
            x += descent;
            x += self.label.padding;
        }

        let marks = self.marks();
        let label_width = tick_label_width(&self.tick.label, &marks);
        if !marks.is_empty() && label_width > Length::ZERO {
            x += label_width;
        }
        let mut major = false;
        for t in marks.iter().filter(|t| !t.is_minor()) {
            let y = area.y(self.norm(t.value));
            if !area.contains_y(y) {
                continue;
            }
            area.fill_text(&self.tick.label, Point::new(x, y), &t.label);
            major = true;
        }
        if major {
            x += self.tick.label.width(" ");
        }

        if !marks.is_empty() && self.draws_ticks() {
            let len = self.tick.length;
            for t in &marks {
                let y = area.y(self.norm(t.value));
                if !area.contains_y(y) {
                    continue;
                }
                let start = if t.is_minor() { len / 2.0 } else { Length::ZERO };
                area.stroke_line2(
                    &self.tick.line_style,
                    Point::new(x + start, y),
                    Point::new(x + len, y),
                );
            }
            x += len;
        }

        let (y0, y1) = (area.rect.min.y, area.rect.max.y);
        area.stroke_line2(&self.line_style, Point::new(x, y0), Point::new(x, y1));
    }

    /// Boxes of the tick labels along a horizontal axis
    pub fn horizontal_glyph_boxes(&self) -> Vec<GlyphBox> {
        self.marks()
            .iter()
            .filter(|t| !t.is_minor())
            .map(|t| GlyphBox {
                x: self.norm(t.value),
                y: 0.0,
                rect: self.tick.label.rectangle(&t.label),
            })
            .collect()
    }

    /// Boxes of the tick labels along a vertical axis
    pub fn vertical_glyph_boxes(&self) -> Vec<GlyphBox> {
        self.marks()
            .iter()
            .filter(|t| !t.is_minor())
            .map(|t| GlyphBox {
                x: 0.0,
                y: self.norm(t.value),
                rect: self.tick.label.rectangle(&t.label),
            })
            .collect()
    }
}

fn tick_label_height(style: &TextStyle, ticks: &[Tick]) -> Length {
    ticks
        .iter()
        .filter(|t| !t.is_minor())
        .map(|t| style.rectangle(&t.label).height())
        .fold(Length::ZERO, Length::max)
}

fn tick_label_width(style: &TextStyle, ticks: &[Tick]) -> Length {
    ticks
        .iter()
        .filter(|t| !t.is_minor())
        .map(|t| style.rectangle(&t.label).width())
        .fold(Length::ZERO, Length::max)
}

#[cfg(test)]
mod tests {
    use statplot_base::canvas::Op;
    use statplot_base::{Recorder, Size};

    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn sanitize_range() {
        let mut a = Axis::new(Orientation::Horizontal);
        a.sanitize();
        assert_eq!((a.min, a.max), (-1.0, 1.0));

        let mut a = Axis::new(Orientation::Horizontal).with_range(3.0, -2.0);
        a.sanitize();
        assert_eq!((a.min, a.max), (-2.0, 3.0));

        let mut a = Axis::new(Orientation::Horizontal).with_range(f64::NEG_INFINITY, 5.0);
        a.sanitize();
        assert_eq!((a.min, a.max), (0.0, 5.0));
    }

    #[test]
    fn auto_rescale_to_ticks() {
        let mut a = Axis::new(Orientation::Horizontal)
            .with_range(0.3, 9.7)
            .with_marker(ConstantTicks(vec![Tick::major(0.0, "0"), Tick::major(10.0, "10")]))
            .with_auto_rescale(true);
        a.sanitize();
        assert_eq!((a.min, a.max), (0.0, 10.0));
    }

    #[test]
    fn log_axis_check() {
        let a = Axis::new(Orientation::Vertical)
            .with_range(0.0, 10.0)
            .with_scale(Scale::Log)
            .with_marker(LogTicks::default());
        assert!(matches!(a.check(), Err(Error::Domain(_))));
        let a = a.with_range(1.0, 10.0);
        assert!(a.check().is_ok());
    }

    #[test]
    fn horizontal_size_sums_components() {
        let a = Axis::new(Orientation::Horizontal).with_range(0.0, 1.0);
        let label_h = tick_label_height(&a.tick.label, &a.marks());
        let expected = label_h + defaults::TICK_LENGTH + defaults::AXIS_LINE_WIDTH / 2.0
            + defaults::AXIS_PADDING;
        assert_near!(abs, a.horizontal_size().points(), expected.points(), 1e-9);
    }

    #[test]
    fn glyph_boxes_at_major_ticks() {
        let a = Axis::new(Orientation::Horizontal).with_range(-1.98465, 0.43710);
        let boxes = a.horizontal_glyph_boxes();
        assert_eq!(boxes.len(), 3);
        assert_near!(abs, boxes[2].x, a.norm(0.0));
        assert!(boxes.iter().all(|b| b.rect.width() > Length::ZERO));
    }

    #[test]
    fn axis_line_is_last() {
        let mut rec = Recorder::new(Size::new(Length::pt(200.0), Length::pt(50.0)).unwrap());
        let a = Axis::new(Orientation::Horizontal).with_range(0.0, 1.0);
        {
            let mut area = DrawArea::full(&mut rec);
            a.draw_horizontal(&mut area);
        }
        let strokes = rec.ops().iter().filter(|op| matches!(op, Op::Stroke(_))).count();
        let n_ticks = a.marks().len();
        assert_eq!(strokes, n_ticks + 1);
        assert!(matches!(rec.ops().last(), Some(Op::Stroke(_))));
    }
}
