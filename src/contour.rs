//! Contour lines of gridded scalar fields.
//!
//! [`ContourSet::trace`] runs CONREC over the grid, then joins the
//! segments of each level into polylines.

use crate::Error;
use crate::data::GridXYZ;

mod assemble;
mod conrec;

use assemble::Assembler;

/// Quantiles used as contour levels when none are given
pub const DEFAULT_QUANTILES: [f64; 7] = [0.01, 0.05, 0.25, 0.5, 0.75, 0.95, 0.99];

/// A contour line of a single level
#[derive(Debug, Clone, PartialEq)]
pub struct ContourPath {
    pub level: f64,
    /// Closed paths don't repeat their first point
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSet {
    /// Sorted and deduplicated levels
    pub levels: Vec<f64>,
    pub paths: Vec<ContourPath>,
}

impl ContourSet {
    /// Contour lines of `grid` at each of `levels`.
    ///
    /// NaN levels are ignored. A polyline ending inside the grid means
    /// that the field could not be traced cleanly; it is logged and kept
    /// as an open path.
    pub fn trace(grid: &dyn GridXYZ, levels: &[f64]) -> ContourSet {
        let mut levels: Vec<f64> = levels.iter().copied().filter(|l| !l.is_nan()).collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();

        let mut assemblers: Vec<Assembler> = levels.iter().map(|_| Assembler::default()).collect();
        conrec::conrec(grid, &levels, |k, p0, p1| assemblers[k].add(p0, p1));

        let mut paths = Vec::new();
        for (level, asm) in levels.iter().zip(&assemblers) {
            for line in asm.finish() {
                paths.push(ContourPath {
                    level: *level,
                    points: line.points,
                    closed: line.closed,
                });
            }
        }

        let set = ContourSet { levels, paths };
        if let Err(err) = set.check_open_ends(grid) {
            log::warn!("{}", err);
        }
        set
    }

    /// The paths of `level`
    pub fn level_paths(&self, level: f64) -> impl Iterator<Item = &ContourPath> + '_ {
        self.paths.iter().filter(move |p| p.level == level)
    }

    /// Fail if an open path ends away from the grid boundary
    pub fn check_open_ends(&self, grid: &dyn GridXYZ) -> Result<(), Error> {
        for path in self.paths.iter().filter(|p| !p.closed) {
            let ends = [path.points.first(), path.points.last()];
            for pt in ends.into_iter().flatten() {
                if !on_boundary(grid, *pt) {
                    return Err(Error::ContourStructural(format!(
                        "open contour end at ({}, {}) inside the grid for level {}",
                        pt.0, pt.1, path.level
                    )));
                }
            }
        }
        Ok(())
    }
}

fn on_boundary(grid: &dyn GridXYZ, (x, y): (f64, f64)) -> bool {
    let (cols, rows) = grid.dims();
    if cols == 0 || rows == 0 {
        return false;
    }
    let (x0, x1) = (grid.x(0), grid.x(cols - 1));
    let (y0, y1) = (grid.y(0), grid.y(rows - 1));
    let tol_x = 1e-9 * (x1 - x0).abs().max(1.0);
    let tol_y = 1e-9 * (y1 - y0).abs().max(1.0);
    (x - x0).abs() <= tol_x
        || (x - x1).abs() <= tol_x
        || (y - y0).abs() <= tol_y
        || (y - y1).abs() <= tol_y
}

/// Quantiles of the finite z values of `grid`, linearly interpolated
/// between order statistics
pub fn quantile_levels(grid: &dyn GridXYZ, quantiles: &[f64]) -> Vec<f64> {
    let (cols, rows) = grid.dims();
    let mut zs: Vec<f64> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| grid.z(c, r)))
        .filter(|z| z.is_finite())
        .collect();
    if zs.is_empty() {
        return Vec::new();
    }
    zs.sort_by(f64::total_cmp);
    let n = zs.len();
    quantiles
        .iter()
        .map(|p| {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            zs[lo] + (h - lo as f64) * (zs[hi] - zs[lo])
        })
        .collect()
}
