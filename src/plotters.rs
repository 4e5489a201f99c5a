//! The plotters: drawings of data sets in the data area of a plot

mod boxplot;
mod contour;
mod grid;
mod histogram;
mod line;
mod scatter;

pub use boxplot::{BoxPlot, BoxSummary};
pub use contour::Contour;
pub use grid::Grid;
pub use histogram::{Histogram, HistogramBin};
pub use line::Line;
pub use scatter::Scatter;
