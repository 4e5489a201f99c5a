//! Capabilities of the things a plot draws.
//!
//! Every plotter draws itself. A plotter may also report the data range it
//! covers, the glyphs overflowing its data points and a legend thumbnail;
//! these are separate traits queried through [`Plotter`].

use std::fmt;

use statplot_base::{Length, Point, Rectangle};

use crate::axis::Axis;
use crate::draw::DrawArea;

/// The axes a plot is drawn with, after their ranges were sanitized
#[derive(Debug, Clone)]
pub struct Frame {
    pub x: Axis,
    pub y: Axis,
}

impl Frame {
    /// Canvas position of the data point `(x, y)` in `area`
    pub fn map(&self, area: &DrawArea, x: f64, y: f64) -> Point {
        Point::new(self.map_x(area, x), self.map_y(area, y))
    }

    pub fn map_x(&self, area: &DrawArea, x: f64) -> Length {
        area.x(self.x.norm(x))
    }

    pub fn map_y(&self, area: &DrawArea, y: f64) -> Length {
        area.y(self.y.norm(y))
    }
}

/// Extent of the data drawn by a plotter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A rectangle, relative to a point given in normalized data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    pub x: f64,
    pub y: f64,
    pub rect: Rectangle,
}

impl GlyphBox {
    pub fn size(&self) -> Point {
        self.rect.size()
    }
}

pub trait Plotter: fmt::Debug + Send + Sync {
    /// Draw into the data area of the plot
    fn plot(&self, area: &mut DrawArea, frame: &Frame);

    fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
        None
    }

    fn as_glyph_boxer(&self) -> Option<&dyn GlyphBoxer> {
        None
    }
}

pub trait DataRanger {
    fn data_range(&self) -> DataRange;
}

pub trait GlyphBoxer {
    fn glyph_boxes(&self, frame: &Frame) -> Vec<GlyphBox>;
}

/// Draws the legend sample of a plotter
pub trait Thumbnailer: fmt::Debug + Send + Sync {
    fn thumbnail(&self, area: &mut DrawArea);
}
