use statplot_base::{Length, Point, color};

use crate::defaults;
use crate::draw::{DrawArea, LineStyle};
use crate::plotter::{Frame, Plotter};

/// Lines across the data area at the major ticks of both axes.
///
/// A style with a zero width disables the lines in that direction.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Style of the lines at the x ticks
    pub vertical: LineStyle,
    /// Style of the lines at the y ticks
    pub horizontal: LineStyle,
}

impl Default for Grid {
    fn default() -> Self {
        let style = LineStyle::new(color::GRAY, defaults::GRID_LINE_WIDTH);
        Grid {
            vertical: style.clone(),
            horizontal: style,
        }
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertical(self, vertical: LineStyle) -> Self {
        Grid { vertical, ..self }
    }

    pub fn with_horizontal(self, horizontal: LineStyle) -> Self {
        Grid { horizontal, ..self }
    }
}

impl Plotter for Grid {
    fn plot(&self, area: &mut DrawArea, frame: &Frame) {
        let r = area.rect;
        if self.vertical.width > Length::ZERO {
            for tick in frame.x.marks().iter().filter(|t| !t.is_minor()) {
                let x = frame.map_x(area, tick.value);
                if area.contains_x(x) {
                    area.stroke_line2(&self.vertical, Point::new(x, r.min.y), Point::new(x, r.max.y));
                }
            }
        }
        if self.horizontal.width > Length::ZERO {
            for tick in frame.y.marks().iter().filter(|t| !t.is_minor()) {
                let y = frame.map_y(area, tick.value);
                if area.contains_y(y) {
                    area.stroke_line2(&self.horizontal, Point::new(r.min.x, y), Point::new(r.max.x, y));
                }
            }
        }
    }
}
