use statplot_base::{Length, Point, Rectangle};

use crate::Error;
use crate::data::{Valuer, Values};
use crate::draw::{DrawArea, GlyphStyle, LineStyle};
use crate::plotter::{DataRange, DataRanger, Frame, GlyphBox, GlyphBoxer, Plotter, Thumbnailer};

/// Five-number summary of a set of values, with Tukey fences
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub median: f64,
    /// first quartile
    pub q1: f64,
    /// third quartile
    pub q3: f64,
    pub min: f64,
    pub max: f64,
    /// Smallest value within the lower fence
    pub adj_low: f64,
    /// Largest value within the upper fence
    pub adj_high: f64,
    /// Indices of the values outside the fences
    pub outside: Vec<usize>,
}

impl BoxSummary {
    pub fn new(values: &[f64]) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::Domain("box plot of no values".to_string()));
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(Error::NaN);
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let med = median(&sorted);
        let q1 = if n / 2 == 0 { med } else { median(&sorted[..n / 2]) };
        let upper = &sorted[n.div_ceil(2)..];
        let q3 = if upper.is_empty() { med } else { median(upper) };

        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let mut adj_low = f64::INFINITY;
        let mut adj_high = f64::NEG_INFINITY;
        let mut outside = Vec::new();
        for (i, v) in values.iter().copied().enumerate() {
            if v < low_fence || v > high_fence {
                outside.push(i);
            } else {
                adj_low = adj_low.min(v);
                adj_high = adj_high.max(v);
            }
        }

        Ok(BoxSummary {
            median: med,
            q1,
            q3,
            min: sorted[0],
            max: sorted[n - 1],
            adj_low,
            adj_high,
            outside,
        })
    }
}

/// Median of sorted, non-empty values
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// A vertical box and whiskers plot of a set of values, drawn at an `x` location
#[derive(Debug, Clone)]
pub struct BoxPlot {
    pub values: Values,
    /// Position on the x axis, in data coordinates
    pub location: f64,
    /// Width of the box
    pub width: Length,
    /// Width of the whisker caps
    pub cap_width: Length,
    pub summary: BoxSummary,
    pub box_style: LineStyle,
    pub median_style: LineStyle,
    pub whisker_style: LineStyle,
    /// Style of the outside values
    pub glyph_style: GlyphStyle,
}

impl BoxPlot {
    pub fn new(width: Length, location: f64, values: &dyn Valuer) -> Result<Self, Error> {
        if width < Length::ZERO {
            return Err(Error::Domain(format!("negative box width {}", width)));
        }
        let values = Values::copy_from(values)?;
        let summary = BoxSummary::new(&values.0)?;
        Ok(BoxPlot {
            values,
            location,
            width,
            cap_width: width / 2.0,
            summary,
            box_style: LineStyle::default(),
            median_style: LineStyle::default(),
            whisker_style: LineStyle::default().with_dashes(vec![Length::pt(4.0), Length::pt(2.0)], Length::ZERO),
            glyph_style: GlyphStyle::default(),
        })
    }

    pub fn with_box_style(self, box_style: LineStyle) -> Self {
        BoxPlot { box_style, ..self }
    }

    pub fn with_median_style(self, median_style: LineStyle) -> Self {
        BoxPlot { median_style, ..self }
    }

    pub fn with_whisker_style(self, whisker_style: LineStyle) -> Self {
        BoxPlot {
            whisker_style,
            ..self
        }
    }

    pub fn with_glyph_style(self, glyph_style: GlyphStyle) -> Self {
        BoxPlot { glyph_style, ..self }
    }
}

impl Plotter for BoxPlot {
    fn plot(&self, area: &mut DrawArea, frame: &Frame) {
        let x = frame.map_x(area, self.location);
        if !area.contains_x(x) {
            log::debug!("box plot at {} is outside of the data area", self.location);
            return;
        }
        let s = &self.summary;
        let q1 = frame.map_y(area, s.q1);
        let q3 = frame.map_y(area, s.q3);
        let med = frame.map_y(area, s.median);
        let adj_low = frame.map_y(area, s.adj_low);
        let adj_high = frame.map_y(area, s.adj_high);

        let half = self.width / 2.0;
        let (left, right) = (x - half, x + half);
        let outline = vec![
            Point::new(left, q1),
            Point::new(left, q3),
            Point::new(right, q3),
            Point::new(right, q1),
            Point::new(left, q1),
        ];
        area.stroke_line(&self.box_style, &outline);
        area.stroke_line2(&self.median_style, Point::new(left, med), Point::new(right, med));

        let cap = self.cap_width / 2.0;
        area.stroke_lines(
            &self.whisker_style,
            &[
                vec![Point::new(x, q3), Point::new(x, adj_high)],
                vec![Point::new(x, q1), Point::new(x, adj_low)],
            ],
        );
        area.stroke_lines(
            &self.box_style,
            &[
                vec![Point::new(x - cap, adj_high), Point::new(x + cap, adj_high)],
                vec![Point::new(x - cap, adj_low), Point::new(x + cap, adj_low)],
            ],
        );

        for &i in &s.outside {
            let y = frame.map_y(area, self.values.0[i]);
            area.draw_glyph(&self.glyph_style, Point::new(x, y));
        }
    }

    fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
        Some(self)
    }

    fn as_glyph_boxer(&self) -> Option<&dyn GlyphBoxer> {
        Some(self)
    }
}

impl DataRanger for BoxPlot {
    fn data_range(&self) -> DataRange {
        DataRange {
            x_min: self.location,
            x_max: self.location,
            y_min: self.summary.min,
            y_max: self.summary.max,
        }
    }
}

impl GlyphBoxer for BoxPlot {
    fn glyph_boxes(&self, frame: &Frame) -> Vec<GlyphBox> {
        let x = frame.x.norm(self.location);
        let rect = self.glyph_style.rectangle();
        let mut boxes: Vec<GlyphBox> = self
            .summary
            .outside
            .iter()
            .map(|&i| GlyphBox {
                x,
                y: frame.y.norm(self.values.0[i]),
                rect,
            })
            .collect();
        let half = self.width / 2.0;
        boxes.push(GlyphBox {
            x,
            y: frame.y.norm(self.summary.median),
            rect: Rectangle::new(Point::new(-half, Length::ZERO), Point::new(half, Length::ZERO)),
        });
        boxes
    }
}

impl Thumbnailer for BoxPlot {
    fn thumbnail(&self, area: &mut DrawArea) {
        let r = area.rect;
        let outline = vec![
            r.min,
            Point::new(r.min.x, r.max.y),
            r.max,
            Point::new(r.max.x, r.min.y),
            r.min,
        ];
        area.stroke_line(&self.box_style, &outline);
        let y = r.center().y;
        area.stroke_line2(&self.median_style, Point::new(r.min.x, y), Point::new(r.max.x, y));
    }
}
