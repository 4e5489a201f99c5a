//! Data adapters consumed by the plotters.
//!
//! Plotters take their input through the [`XYer`], [`Valuer`] and
//! [`GridXYZ`] traits and copy it into the owned [`XYs`] and [`Values`]
//! after validation: NaN values are rejected with [`Error::NaN`], infinite
//! values with [`Error::Domain`].

use crate::Error;

/// A sequence of (x, y) pairs
pub trait XYer {
    fn len(&self) -> usize;

    fn xy(&self, i: usize) -> (f64, f64);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence of values
pub trait Valuer {
    fn len(&self) -> usize;

    fn value(&self, i: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl XYer for [(f64, f64)] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn xy(&self, i: usize) -> (f64, f64) {
        self[i]
    }
}

impl XYer for Vec<(f64, f64)> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn xy(&self, i: usize) -> (f64, f64) {
        self[i]
    }
}

impl Valuer for [f64] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn value(&self, i: usize) -> f64 {
        self[i]
    }
}

impl Valuer for Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn value(&self, i: usize) -> f64 {
        self[i]
    }
}

/// A pair of coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

/// Owned, validated (x, y) data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XYs(pub Vec<XY>);

impl XYs {
    /// Copy `data`, failing on NaN or infinite coordinates
    pub fn copy_from(data: &dyn XYer) -> Result<Self, Error> {
        let mut xys = Vec::with_capacity(data.len());
        for i in 0..data.len() {
            let (x, y) = data.xy(i);
            check_finite(x)?;
            check_finite(y)?;
            xys.push(XY { x, y });
        }
        Ok(XYs(xys))
    }

    pub fn iter(&self) -> impl Iterator<Item = &XY> + '_ {
        self.0.iter()
    }
}

impl XYer for XYs {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn xy(&self, i: usize) -> (f64, f64) {
        (self.0[i].x, self.0[i].y)
    }
}

/// Owned, validated values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values(pub Vec<f64>);

impl Values {
    /// Copy `data`, failing on NaN or infinite values
    pub fn copy_from(data: &dyn Valuer) -> Result<Self, Error> {
        let mut vals = Vec::with_capacity(data.len());
        for i in 0..data.len() {
            let v = data.value(i);
            check_finite(v)?;
            vals.push(v);
        }
        Ok(Values(vals))
    }
}

impl Valuer for Values {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn value(&self, i: usize) -> f64 {
        self.0[i]
    }
}

fn check_finite(v: f64) -> Result<(), Error> {
    if v.is_nan() {
        Err(Error::NaN)
    } else if v.is_infinite() {
        Err(Error::Domain(format!("infinite value {}", v)))
    } else {
        Ok(())
    }
}

/// Extremes of the x and y coordinates: `(xmin, xmax, ymin, ymax)`.
///
/// Empty data yields `(+inf, -inf, +inf, -inf)`, which leaves an axis range
/// untouched when merged.
pub fn xy_range(data: &dyn XYer) -> (f64, f64, f64, f64) {
    let mut r = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    for i in 0..data.len() {
        let (x, y) = data.xy(i);
        r.0 = r.0.min(x);
        r.1 = r.1.max(x);
        r.2 = r.2.min(y);
        r.3 = r.3.max(y);
    }
    r
}

/// Extremes of the values, `(+inf, -inf)` when empty
pub fn range(data: &dyn Valuer) -> (f64, f64) {
    (0..data.len()).map(|i| data.value(i)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), v| (min.min(v), max.max(v)),
    )
}

/// A scalar field sampled on a rectilinear grid.
///
/// Columns run along x, rows along y. The coordinates need not be evenly
/// spaced but must be monotonic.
pub trait GridXYZ {
    /// `(columns, rows)`
    fn dims(&self) -> (usize, usize);

    fn z(&self, c: usize, r: usize) -> f64;

    fn x(&self, c: usize) -> f64;

    fn y(&self, r: usize) -> f64;
}

/// Dense [`GridXYZ`] storing `z` row by row
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
}

impl Grid {
    /// `zs` holds `ys.len()` rows of `xs.len()` values
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, zs: Vec<f64>) -> Result<Self, Error> {
        if xs.len() * ys.len() != zs.len() {
            return Err(Error::Domain(format!(
                "grid of {}x{} with {} values",
                xs.len(),
                ys.len(),
                zs.len()
            )));
        }
        for v in xs.iter().chain(ys.iter()) {
            check_finite(*v)?;
        }
        Ok(Grid { xs, ys, zs })
    }

    /// Sample `f(x, y)` at every grid node
    pub fn from_fn<F>(xs: Vec<f64>, ys: Vec<f64>, f: F) -> Result<Self, Error>
    where
        F: Fn(f64, f64) -> f64,
    {
        let zs = ys
            .iter()
            .flat_map(|y| xs.iter().map(|x| f(*x, *y)).collect::<Vec<_>>())
            .collect();
        Grid::new(xs, ys, zs)
    }

    /// Copy any grid
    pub fn copy_from(grid: &dyn GridXYZ) -> Result<Self, Error> {
        let (cols, rows) = grid.dims();
        let xs = (0..cols).map(|c| grid.x(c)).collect();
        let ys = (0..rows).map(|r| grid.y(r)).collect();
        let zs = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| grid.z(c, r)))
            .collect();
        Grid::new(xs, ys, zs)
    }
}

impl GridXYZ for Grid {
    fn dims(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }

    fn z(&self, c: usize, r: usize) -> f64 {
        self.zs[r * self.xs.len() + c]
    }

    fn x(&self, c: usize) -> f64 {
        self.xs[c]
    }

    fn y(&self, r: usize) -> f64 {
        self.ys[r]
    }
}

/// Extremes of the finite z values of a grid
pub fn grid_z_range(grid: &dyn GridXYZ) -> (f64, f64) {
    let (cols, rows) = grid.dims();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in 0..rows {
        for c in 0..cols {
            let z = grid.z(c, r);
            if z.is_finite() {
                min = min.min(z);
                max = max.max(z);
            }
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_rejects_nan_and_inf() {
        let data = vec![(0.0, 1.0), (f64::NAN, 2.0)];
        assert!(matches!(XYs::copy_from(&data), Err(Error::NaN)));
        let data = vec![1.0, f64::INFINITY];
        assert!(matches!(Values::copy_from(&data), Err(Error::Domain(_))));
    }

    #[test]
    fn ranges() {
        let data = vec![(1.0, -2.0), (-3.0, 4.0), (0.5, 0.0)];
        assert_eq!(xy_range(&data), (-3.0, 1.0, -2.0, 4.0));
        assert_eq!(range(&vec![2.0, -1.0, 7.0]), (-1.0, 7.0));
        let empty: Vec<f64> = vec![];
        assert_eq!(range(&empty), (f64::INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn grid_layout() {
        let g = Grid::from_fn(vec![0.0, 1.0, 2.0], vec![10.0, 20.0], |x, y| x + y).unwrap();
        assert_eq!(g.dims(), (3, 2));
        assert_eq!(g.z(2, 1), 22.0);
        assert_eq!(g.z(1, 0), 11.0);
        assert!(Grid::new(vec![0.0], vec![0.0], vec![]).is_err());
    }
}
