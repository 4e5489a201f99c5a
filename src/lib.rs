#![warn(missing_debug_implementations)]
/*!
 * # statplot
 * A statistical plotting engine written in Rust.
 *
 * A [`Plot`] holds a title, two [axes](axis::Axis), a [legend](legend::Legend)
 * and an ordered list of [plotters](plotter::Plotter). Plotters draw data sets
 * in the data area: lines, scatters, histograms, box plots, contours and grids
 * are provided in [`plotters`]. Anything implementing [`plotter::Plotter`] can
 * be added as well.
 *
 * Plots are drawn onto any [`Canvas`]. The workspace provides an SVG canvas
 * (`statplot-svg`), a raster canvas producing PNG (`statplot-pxl`) and
 * document canvases producing EPS, PDF and TeX/PGF (`statplot-doc`).
 * [`Plot::save`] picks one from the file extension.
 *
 * ## Get started
 *
 * ```no_run
 * # use std::sync::Arc;
 * # fn main() -> Result<(), statplot::Error> {
 * use statplot::geom::Length;
 * use statplot::plotter::Thumbnailer;
 * use statplot::plotters::{Grid, Line, Scatter};
 * use statplot::Plot;
 *
 * let xys: Vec<(f64, f64)> = (0..=100)
 *     .map(|i| i as f64 / 10.0)
 *     .map(|x| (x, x.sin()))
 *     .collect();
 *
 * let mut plot = Plot::new().with_title("a sine wave");
 * plot.x.label.text = "x".to_string();
 * plot.y.label.text = "sin(x)".to_string();
 *
 * plot.add(Arc::new(Grid::new()));
 * let line = Arc::new(Line::new(&xys)?);
 * let points = Arc::new(Scatter::new(&xys)?);
 * plot.add(line.clone());
 * plot.add(points.clone());
 * plot.legend.add(
 *     "sin",
 *     vec![line as Arc<dyn Thumbnailer>, points as Arc<dyn Thumbnailer>],
 * );
 *
 * plot.save(Length::pt(300.0), Length::pt(200.0), "sine.svg")?;
 * # Ok(())
 * # }
 * ```
 *
 * ## Drawing model
 *
 * The axes are drawn first, then every plotter in the order it was added,
 * then the legend. Drawing never mutates the plot: the axes are copied and
 * sanitized into a [`plotter::Frame`] handed to the plotters, so the same
 * plot can be drawn many times, possibly from several threads onto
 * separate canvases.
 *
 * Errors met while a plot is assembled can be retained with
 * [`Plot::try_add`] or [`Plot::record_error`] and are returned when the
 * plot is saved.
 */

pub mod axis;
pub mod contour;
pub mod data;
pub mod defaults;
pub mod draw;
mod error;
pub mod legend;
pub mod palette;
pub mod plot;
pub mod plotter;
pub mod plotters;
pub mod time;

pub use error::Error;
pub use plot::Plot;

/// Rexports of [`statplot_base::color`] items
pub mod color {
    pub use statplot_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`statplot_base::geom`] items
pub mod geom {
    pub use statplot_base::geom::*;
}

/// Rexports of [`statplot_base::canvas`] items
pub mod canvas {
    pub use statplot_base::canvas::*;
}
pub use canvas::{Canvas, Recorder};

/// Rexports of [`statplot_text`] items
pub mod text {
    pub use statplot_text::*;
}

#[cfg(test)]
pub(crate) mod tests {
    pub trait Near {
        fn near_abs(&self, other: &Self, tol: f64) -> bool;
        fn near_rel(&self, other: &Self, err: f64) -> bool;
    }

    impl Near for f64 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs();
            let largest = self.abs().max(other.abs());
            diff <= largest * err
        }
    }

    impl Near for f32 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() as f64 <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs() as f64;
            let largest = self.abs().max(other.abs()) as f64;
            diff <= largest * err
        }
    }

    macro_rules! assert_near {
        (abs, $a:expr, $b:expr, $tol:expr) => {
            assert!($a.near_abs(&$b, $tol), "values are not close enough\n left: {:?}\nright: {:?}\n  tol: {}", $a, $b, $tol);
        };
        (abs, $a:expr, $b:expr) => {
            assert_near!(abs, $a, $b, 1e-8);
        };
        (rel, $a:expr, $b:expr, $err:expr) => {
            assert!($a.near_rel(&$b, $err), "values are not close enough\n left: {:?}\nright: {:?}\n  err: {}", $a, $b, $err);
        };
        (rel, $a:expr, $b:expr) => {
            assert_near!(rel, $a, $b, 1e-8);
        };
    }

    pub(crate) use assert_near;

    #[test]
    fn near_values() {
        let a = 1.0;
        let b = 1.0 + 1e-9;
        assert_near!(abs, a, b);
        assert!(!a.near_abs(&b, 1e-10));
        assert_near!(rel, a, b);
        assert!(!a.near_rel(&b, 1e-10));
    }
}
