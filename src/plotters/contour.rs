use statplot_base::Point;

use crate::Error;
use crate::contour::{ContourSet, DEFAULT_QUANTILES, quantile_levels};
use crate::data::{self, GridXYZ};
use crate::draw::{DrawArea, LineStyle};
use crate::palette::Palette;
use crate::plotter::{DataRange, DataRanger, Frame, Plotter, Thumbnailer};

/// Contour lines of a gridded field.
///
/// Lines are colored by level through the palette when one is given, the
/// lowest level taking the first color and the highest the last one.
/// Otherwise the line styles are cycled over the levels.
#[derive(Debug, Clone)]
pub struct Contour {
    pub grid: data::Grid,
    pub set: ContourSet,
    pub line_styles: Vec<LineStyle>,
    pub palette: Option<Palette>,
}

impl Contour {
    /// Trace `grid` at `levels`, or at [`DEFAULT_QUANTILES`] of its values
    /// if `levels` is empty
    pub fn new(grid: &dyn GridXYZ, levels: &[f64], palette: Option<Palette>) -> Result<Self, Error> {
        let (cols, rows) = grid.dims();
        if cols < 2 || rows < 2 {
            return Err(Error::Domain(format!("contour of a {}x{} grid", cols, rows)));
        }
        let grid = data::Grid::copy_from(grid)?;
        let set = if levels.is_empty() {
            ContourSet::trace(&grid, &quantile_levels(&grid, &DEFAULT_QUANTILES))
        } else {
            ContourSet::trace(&grid, levels)
        };
        Ok(Contour {
            grid,
            set,
            line_styles: vec![LineStyle::default()],
            palette: palette.filter(|p| !p.is_empty()),
        })
    }

    pub fn with_line_styles(self, line_styles: Vec<LineStyle>) -> Self {
        Contour { line_styles, ..self }
    }

    /// The levels actually traced
    pub fn levels(&self) -> &[f64] {
        &self.set.levels
    }

    /// Stroke style of the lines at the `idx`-th level
    pub fn level_style(&self, idx: usize) -> LineStyle {
        let mut style = if self.line_styles.is_empty() {
            LineStyle::default()
        } else {
            self.line_styles[idx % self.line_styles.len()].clone()
        };
        if let Some(palette) = &self.palette {
            let levels = &self.set.levels;
            let span = levels[levels.len() - 1] - levels[0];
            let scale = if span > 0.0 {
                (palette.len() - 1) as f64 / span
            } else {
                0.0
            };
            let i = ((levels[idx] - levels[0]) * scale + 0.5) as usize;
            style.color = palette[i.min(palette.len() - 1)];
        }
        style
    }
}

impl Plotter for Contour {
    fn plot(&self, area: &mut DrawArea, frame: &Frame) {
        for (idx, level) in self.set.levels.iter().enumerate() {
            let style = self.level_style(idx);
            let lines: Vec<Vec<Point>> = self
                .set
                .level_paths(*level)
                .map(|path| {
                    let mut pts: Vec<Point> =
                        path.points.iter().map(|(x, y)| frame.map(area, *x, *y)).collect();
                    if path.closed && !pts.is_empty() {
                        pts.push(pts[0]);
                    }
                    pts
                })
                .collect();
            area.stroke_lines(&style, &lines);
        }
    }

    fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
        Some(self)
    }
}

impl DataRanger for Contour {
    fn data_range(&self) -> DataRange {
        let (cols, rows) = self.grid.dims();
        let (x0, x1) = (self.grid.x(0), self.grid.x(cols - 1));
        let (y0, y1) = (self.grid.y(0), self.grid.y(rows - 1));
        DataRange {
            x_min: x0.min(x1),
            x_max: x0.max(x1),
            y_min: y0.min(y1),
            y_max: y0.max(y1),
        }
    }
}

impl Thumbnailer for Contour {
    fn thumbnail(&self, area: &mut DrawArea) {
        if self.set.levels.is_empty() {
            return;
        }
        let style = self.level_style(self.set.levels.len() / 2);
        let r = area.rect;
        let y = r.center().y;
        area.stroke_line2(&style, Point::new(r.min.x, y), Point::new(r.max.x, y));
    }
}

#[cfg(test)]
mod tests {
    use statplot_base::canvas::Op;
    use statplot_base::color;

    use super::*;
    use crate::plotters::test_util::record;

    fn bowl() -> data::Grid {
        let xs: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        let ys = xs.clone();
        data::Grid::from_fn(xs, ys, |x, y| (x - 5.0).powi(2) + (y - 5.0).powi(2)).unwrap()
    }

    #[test]
    fn default_levels_are_quantiles() {
        let grid = bowl();
        let contour = Contour::new(&grid, &[], None).unwrap();
        let mut expected = quantile_levels(&grid, &DEFAULT_QUANTILES);
        expected.dedup();
        assert_eq!(contour.levels(), &expected[..]);
    }

    #[test]
    fn palette_spans_levels() {
        let palette = vec![color::RED, color::GREEN, color::BLUE];
        let contour = Contour::new(&bowl(), &[9.0, 4.0, 6.5], Some(palette)).unwrap();
        assert_eq!(contour.levels(), &[4.0, 6.5, 9.0]);
        assert_eq!(contour.level_style(0).color, color::RED);
        assert_eq!(contour.level_style(1).color, color::GREEN);
        assert_eq!(contour.level_style(2).color, color::BLUE);
    }

    #[test]
    fn one_closed_stroke_per_ring() {
        let palette = vec![color::RED, color::BLUE];
        let contour = Contour::new(&bowl(), &[3.5, 8.5], Some(palette)).unwrap();
        let rec = record(&contour);
        let ops = rec.ops();
        let strokes = ops.iter().filter(|op| matches!(op, Op::Stroke(_))).count();
        assert_eq!(strokes, 2);
        let colors: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::SetColor(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![color::RED, color::BLUE]);
    }

    #[test]
    fn range_of_the_grid() {
        let contour = Contour::new(&bowl(), &[4.0], None).unwrap();
        assert_eq!(
            contour.data_range(),
            DataRange {
                x_min: 0.0,
                x_max: 10.0,
                y_min: 0.0,
                y_max: 10.0
            }
        );
    }

    #[test]
    fn degenerate_grid() {
        let grid = data::Grid::new(vec![0.0], vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
        assert!(matches!(Contour::new(&grid, &[1.5], None), Err(Error::Domain(_))));
    }
}
