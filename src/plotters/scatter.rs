use crate::Error;
use crate::data::{XYer, XYs, xy_range};
use crate::draw::{DrawArea, GlyphStyle};
use crate::plotter::{DataRange, DataRanger, Frame, GlyphBox, GlyphBoxer, Plotter, Thumbnailer};

/// A glyph at each point
#[derive(Debug, Clone)]
pub struct Scatter {
    pub xys: XYs,
    pub glyph_style: GlyphStyle,
}

impl Scatter {
    pub fn new(data: &dyn XYer) -> Result<Self, Error> {
        Ok(Scatter {
            xys: XYs::copy_from(data)?,
            glyph_style: GlyphStyle::default(),
        })
    }

    pub fn with_glyph_style(self, glyph_style: GlyphStyle) -> Self {
        Scatter {
            glyph_style,
            ..self
        }
    }
}

impl Plotter for Scatter {
    fn plot(&self, area: &mut DrawArea, frame: &Frame) {
        for p in self.xys.iter() {
            let pt = frame.map(area, p.x, p.y);
            area.draw_glyph(&self.glyph_style, pt);
        }
    }

    fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
        Some(self)
    }

    fn as_glyph_boxer(&self) -> Option<&dyn GlyphBoxer> {
        Some(self)
    }
}

impl DataRanger for Scatter {
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

impl GlyphBoxer for Scatter {
    fn glyph_boxes(&self, frame: &Frame) -> Vec<GlyphBox> {
        let rect = self.glyph_style.rectangle();
        self.xys
            .iter()
            .map(|p| GlyphBox {
                x: frame.x.norm(p.x),
                y: frame.y.norm(p.y),
                rect,
            })
            .collect()
    }
}

impl Thumbnailer for Scatter {
    fn thumbnail(&self, area: &mut DrawArea) {
        let center = area.rect.center();
        area.draw_glyph_unclipped(&self.glyph_style, center);
    }
}
