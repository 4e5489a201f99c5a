use std::fmt;

/// Vertical metrics of a face, as fractions of the font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Distance from the baseline to the top of the tallest glyphs
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the descending glyphs (positive)
    pub descent: f64,
    /// Distance between two consecutive baselines
    pub line_height: f64,
}

/// Provider of font measurements.
///
/// All quantities are relative to a font size of 1.
pub trait Metrics: fmt::Debug + Send + Sync {
    fn extents(&self) -> Extents;

    /// Advance width of a single line of text
    fn advance(&self, text: &str) -> f64;

    /// Glyph outlines of `text` set on a baseline starting at the origin,
    /// Y pointing up, for a font of `size` points.
    ///
    /// Metrics-only faces return `None`.
    fn outline(&self, text: &str, size: f64) -> Option<tiny_skia_path::Path> {
        let _ = (text, size);
        None
    }
}

/// The metrics of the standard PostScript Helvetica face.
///
/// Always available, it is used when no face is registered for a name.
/// It has no outlines: back-ends that draw text themselves (PDF, EPS, SVG,
/// TeX) use the face name, the raster back-end skips the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Helvetica;

const HELVETICA_ASCENT: f64 = 0.718;
const HELVETICA_DESCENT: f64 = 0.207;
const HELVETICA_LINE_HEIGHT: f64 = 1.15;
const HELVETICA_DEFAULT_WIDTH: u16 = 556;

/// Advance widths per 1000 em of the printable ASCII characters, starting at the space
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

impl Metrics for Helvetica {
    fn extents(&self) -> Extents {
        Extents {
            ascent: HELVETICA_ASCENT,
            descent: HELVETICA_DESCENT,
            line_height: HELVETICA_LINE_HEIGHT,
        }
    }

    fn advance(&self, text: &str) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| {
                let code = c as u32;
                if (32..127).contains(&code) {
                    HELVETICA_WIDTHS[(code - 32) as usize] as u32
                } else {
                    HELVETICA_DEFAULT_WIDTH as u32
                }
            })
            .sum();
        units as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths() {
        assert_eq!(Helvetica.advance(""), 0.0);
        assert_eq!(Helvetica.advance(" "), 0.278);
        assert_eq!(Helvetica.advance("0"), 0.556);
        assert_eq!(Helvetica.advance("W"), 0.944);
        assert_eq!(Helvetica.advance("~"), 0.584);
        assert!((Helvetica.advance("-1.6") - (0.333 + 0.556 + 0.278 + 0.556)).abs() < 1e-12);
        assert_eq!(Helvetica.advance("é"), 0.556);
    }
}
