use std::{fmt, path, sync::Arc};

use crate::metrics::{Extents, Metrics};
use crate::{Error, ttf};

/// Metrics and outlines of a TrueType or OpenType face.
///
/// Advances are computed by shaping the text with rustybuzz, so kerning and
/// ligatures are accounted for.
#[derive(Clone)]
pub struct TtfMetrics {
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: f64,
    extents: Extents,
}

impl fmt::Debug for TtfMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfMetrics")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .field("extents", &self.extents)
            .finish()
    }
}

impl TtfMetrics {
    /// Parse the face at `index` in a font file or collection
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self, Error> {
        let face = ttf::Face::parse(&data, index)?;
        let units_per_em = face.units_per_em() as f64;
        let ascender = face.ascender() as f64;
        let descender = face.descender() as f64;
        let line_gap = face.line_gap() as f64;
        let extents = Extents {
            ascent: ascender / units_per_em,
            descent: -descender / units_per_em,
            line_height: (ascender - descender + line_gap) / units_per_em,
        };
        if rustybuzz::Face::from_slice(&data, index).is_none() {
            let name = face_name(&face).unwrap_or_else(|| "<unnamed>".to_string());
            return Err(Error::Unshapable(name));
        }
        Ok(TtfMetrics {
            data: Arc::new(data),
            index,
            units_per_em,
            extents,
        })
    }

    /// Read and parse the first face of a font file
    pub fn load<P: AsRef<path::Path>>(path: P) -> Result<Self, Error> {
        let data = std::fs::read(path)?;
        Self::from_data(data, 0)
    }

    /// Family name found in the naming table
    pub fn family_name(&self) -> Option<String> {
        let face = ttf::Face::parse(&self.data, self.index).ok()?;
        face_name(&face)
    }

    fn shape(&self, text: &str) -> Option<rustybuzz::GlyphBuffer> {
        let face = rustybuzz::Face::from_slice(&self.data, self.index)?;
        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        Some(rustybuzz::shape(&face, &[], buffer))
    }
}

fn face_name(face: &ttf::Face) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|n| n.name_id == ttf::name_id::FAMILY && n.is_unicode())
        .find_map(|n| n.to_string())
}

impl Metrics for TtfMetrics {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn advance(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let Some(glyphs) = self.shape(text) else {
            log::warn!("failed to shape {:?}, advance taken as zero", text);
            return 0.0;
        };
        let units: i64 = glyphs
            .glyph_positions()
            .iter()
            .map(|p| p.x_advance as i64)
            .sum();
        units as f64 / self.units_per_em
    }

    fn outline(&self, text: &str, size: f64) -> Option<tiny_skia_path::Path> {
        let face = ttf::Face::parse(&self.data, self.index).ok()?;
        let glyphs = self.shape(text)?;
        let scale = size / self.units_per_em;
        let mut pb = tiny_skia_path::PathBuilder::new();
        let mut pen_x = 0.0;
        for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
            let mut outliner = Outliner {
                pb: &mut pb,
                scale,
                x: pen_x + pos.x_offset as f64 * scale,
                y: pos.y_offset as f64 * scale,
            };
            face.outline_glyph(ttf::GlyphId(info.glyph_id as u16), &mut outliner);
            pen_x += pos.x_advance as f64 * scale;
        }
        pb.finish()
    }
}

/// Feeds glyph outlines, in font units, to a path builder in points
struct Outliner<'a> {
    pb: &'a mut tiny_skia_path::PathBuilder,
    scale: f64,
    x: f64,
    y: f64,
}

impl Outliner<'_> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (self.x + x as f64 * self.scale) as f32,
            (self.y + y as f64 * self.scale) as f32,
        )
    }
}

impl ttf::OutlineBuilder for Outliner<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        let res = TtfMetrics::from_data(vec![0, 1, 2, 3, 4, 5], 0);
        assert!(matches!(res, Err(Error::FaceParsing(_))));
    }

    #[test]
    fn missing_file() {
        let res = TtfMetrics::load("/nonexistent/statplot/font.ttf");
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
