use statplot_base::{ColorU8, Point, color};

use crate::Error;
use crate::data::{Valuer, Values, XYer, XYs};
use crate::draw::{DrawArea, LineStyle};
use crate::plotter::{DataRange, DataRanger, Frame, Plotter, Thumbnailer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub min: f64,
    pub max: f64,
    pub weight: f64,
}

/// Weights of `x` samples summed over equal-width bins
#[derive(Debug, Clone)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Width of every bin
    pub width: f64,
    pub fill_color: Option<ColorU8>,
    pub line_style: LineStyle,
}

impl Histogram {
    /// Bin the `x` of `data`, weighted by `y`.
    ///
    /// With `n == 0` the number of bins is `⌈√Σ max(y, 1)⌉`.
    pub fn new(data: &dyn XYer, n: usize) -> Result<Self, Error> {
        let xys = XYs::copy_from(data)?;
        let (bins, width) = bin_points(&xys, n)?;
        Ok(Histogram {
            bins,
            width,
            fill_color: Some(color::GRAY),
            line_style: LineStyle::default(),
        })
    }

    /// Count `values` over `n` bins
    pub fn from_values(values: &dyn Valuer, n: usize) -> Result<Self, Error> {
        let values = Values::copy_from(values)?;
        let xys: Vec<(f64, f64)> = values.0.iter().map(|v| (*v, 1.0)).collect();
        Histogram::new(&xys, n)
    }

    pub fn with_fill_color(self, fill_color: Option<ColorU8>) -> Self {
        Histogram { fill_color, ..self }
    }

    pub fn with_line_style(self, line_style: LineStyle) -> Self {
        Histogram { line_style, ..self }
    }

    /// Scale the weights so that the histogram area is `sum`
    pub fn normalize(&mut self, sum: f64) -> Result<(), Error> {
        let mass: f64 = self.bins.iter().map(|b| b.weight).sum();
        if mass == 0.0 {
            return Err(Error::Domain("normalizing an empty histogram".to_string()));
        }
        let factor = sum / (self.width * mass);
        for b in &mut self.bins {
            b.weight *= factor;
        }
        Ok(())
    }
}

fn bin_points(xys: &XYs, n: usize) -> Result<(Vec<HistogramBin>, f64), Error> {
    if xys.0.is_empty() {
        return Err(Error::Domain("histogram of no data".to_string()));
    }
    let (xmin, xmax) = xys
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));

    let mut n = if n == 0 {
        let mass: f64 = xys.iter().map(|p| p.y.max(1.0)).sum();
        mass.sqrt().ceil() as usize
    } else {
        n
    };
    if n < 1 || xmax <= xmin {
        n = 1;
    }

    let mut width = (xmax - xmin) / n as f64;
    if width == 0.0 {
        width = 1.0;
    }
    let mut bins: Vec<HistogramBin> = (0..n)
        .map(|i| HistogramBin {
            min: xmin + i as f64 * width,
            max: xmin + (i + 1) as f64 * width,
            weight: 0.0,
        })
        .collect();
    for p in xys.iter() {
        let bin = if p.x == xmax {
            n - 1
        } else {
            (((p.x - xmin) / width) as usize).min(n - 1)
        };
        bins[bin].weight += p.y;
    }
    Ok((bins, width))
}

impl Plotter for Histogram {
    fn plot(&self, area: &mut DrawArea, frame: &Frame) {
        for bin in &self.bins {
            let pts = [
                frame.map(area, bin.min, 0.0),
                frame.map(area, bin.min, bin.weight),
                frame.map(area, bin.max, bin.weight),
                frame.map(area, bin.max, 0.0),
            ];
            if let Some(color) = self.fill_color {
                area.fill_polygon(color, &pts);
            }
            area.stroke_lines(&self.line_style, &[pts.to_vec()]);
        }
    }

    fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
        Some(self)
    }
}

impl DataRanger for Histogram {
    fn data_range(&self) -> DataRange {
        let x_min = self.bins.first().map_or(f64::INFINITY, |b| b.min);
        let x_max = self.bins.last().map_or(f64::NEG_INFINITY, |b| b.max);
        let (y_min, y_max) = self
            .bins
            .iter()
            .fold((0.0f64, 0.0f64), |(lo, hi), b| (lo.min(b.weight), hi.max(b.weight)));
        DataRange {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

impl Thumbnailer for Histogram {
    fn thumbnail(&self, area: &mut DrawArea) {
        let r = area.rect;
        let pts = [
            r.min,
            Point::new(r.min.x, r.max.y),
            r.max,
            Point::new(r.max.x, r.min.y),
        ];
        if let Some(color) = self.fill_color {
            area.fill_polygon(color, &pts);
        }
        let mut outline = pts.to_vec();
        outline.push(pts[0]);
        area.stroke_lines(&self.line_style, &[outline]);
    }
}
