use statplot_base::{ColorU8, Point};

use crate::Error;
use crate::data::{XYer, XYs, xy_range};
use crate::draw::{DrawArea, LineStyle};
use crate::plotter::{DataRange, DataRanger, Frame, Plotter, Thumbnailer};

/// Points joined by straight segments, optionally filled down to the
/// bottom of the data area
#[derive(Debug, Clone)]
pub struct Line {
    pub xys: XYs,
    pub line_style: LineStyle,
    pub fill_color: Option<ColorU8>,
}

impl Line {
    pub fn new(data: &dyn XYer) -> Result<Self, Error> {
        Ok(Line {
            xys: XYs::copy_from(data)?,
            line_style: LineStyle::default(),
            fill_color: None,
        })
    }

    pub fn with_line_style(self, line_style: LineStyle) -> Self {
        Line { line_style, ..self }
    }

    pub fn with_fill_color(self, color: ColorU8) -> Self {
        Line {
            fill_color: Some(color),
            ..self
        }
    }
}

impl Plotter for Line {
    fn plot(&self, area: &mut DrawArea, frame: &Frame) {
        if self.xys.0.is_empty() {
            log::debug!("skipping line without points");
            return;
        }
        let pts: Vec<Point> = self.xys.iter().map(|p| frame.map(area, p.x, p.y)).collect();

        if let Some(color) = self.fill_color {
            let bottom = area.rect.min.y;
            let mut poly = Vec::with_capacity(pts.len() + 2);
            poly.push(Point::new(pts[0].x, bottom));
            poly.extend_from_slice(&pts);
            poly.push(Point::new(pts[pts.len() - 1].x, bottom));
            area.fill_polygon(color, &poly);
        }

        area.stroke_lines(&self.line_style, &[pts]);
    }

    fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
        Some(self)
    }
}

impl DataRanger for Line {
    fn data_range(&self) -> DataRange {
        let (x_min, x_max, y_min, y_max) = xy_range(&self.xys);
        DataRange {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

impl Thumbnailer for Line {
    fn thumbnail(&self, area: &mut DrawArea) {
        let r = area.rect;
        if let Some(color) = self.fill_color {
            let pts = [r.min, Point::new(r.min.x, r.max.y), r.max, Point::new(r.max.x, r.min.y)];
            area.fill_polygon(color, &pts);
        }
        let y = r.center().y;
        area.stroke_line2(&self.line_style, Point::new(r.min.x, y), Point::new(r.max.x, y));
    }
}
