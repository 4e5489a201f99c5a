//! Vector document back-ends for statplot: Encapsulated PostScript, PDF and
//! PGF/TeX.
//!
//! All three canvases resolve the current transform themselves and emit
//! absolute coordinates in points, y pointing up, origin at the bottom left
//! of the page.

use statplot_base::canvas::State;
use statplot_base::geom::Segment;
use statplot_base::{Affine, ColorU8, Path};

pub mod eps;
pub mod pdf;
pub mod tex;

pub use eps::EpsCanvas;
pub use pdf::PdfCanvas;
pub use tex::TexCanvas;

/// Format a coordinate with at most 4 decimals
pub(crate) fn num(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Color components in `0..=1`, as expected by PostScript and PDF operators
pub(crate) fn rgb_unit(c: ColorU8) -> [String; 3] {
    let [r, g, b] = c.rgb();
    [r, g, b].map(|v| num(v as f64 / 255.0))
}

pub(crate) fn device_segments(path: &Path, t: &Affine) -> Vec<Segment> {
    path.segments().into_iter().map(|s| s.transform(t)).collect()
}

/// Line style resolved to device units
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pen {
    pub width: f64,
    pub dashes: Vec<f64>,
    pub offset: f64,
}

impl Pen {
    pub fn from_state(state: &State) -> Self {
        let s = state.transform.mean_scale();
        Pen {
            width: state.line_width.points() * s,
            dashes: state.dashes.iter().map(|d| d.points() * s).collect(),
            offset: state.dash_offset.points() * s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_format() {
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.00001), "0");
        assert_eq!(num(12.0), "12");
    }

    #[test]
    fn unit_color() {
        assert_eq!(rgb_unit(ColorU8::from_rgb(255, 0, 51)), ["1", "0", "0.2"]);
    }
}
