use statplot_base::ColorU8;

use super::lab::Lab;
use super::{ColorMap, search};
use crate::Error;
use crate::error::check_range;

/// Interpolation in L*a*b* between control colors of increasing lightness.
///
/// Each control color sits at its normalized lightness, so that the
/// lightness of the map grows linearly with the scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Luminance {
    colors: Vec<Lab>,
    scalars: Vec<f64>,
    min: f64,
    max: f64,
    alpha: f64,
}

impl Luminance {
    /// Fails if there are fewer than 2 colors or if the lightness of a
    /// color is lower than that of its predecessor
    pub fn new(colors: &[ColorU8]) -> Result<Self, Error> {
        if colors.len() < 2 {
            return Err(Error::Domain(format!(
                "luminance color map needs 2 colors, got {}",
                colors.len()
            )));
        }
        let labs: Vec<Lab> = colors.iter().map(|c| Lab::from_color(*c)).collect();
        for (i, w) in labs.windows(2).enumerate() {
            if w[1].l < w[0].l {
                return Err(Error::Domain(format!(
                    "lightness of color {} ({}) is lower than that of color {} ({})",
                    i + 1,
                    w[1].l,
                    i,
                    w[0].l
                )));
            }
        }
        let first = labs[0].l;
        let last = labs[labs.len() - 1].l;
        if !(last > first) {
            return Err(Error::Domain("control colors have the same lightness".to_string()));
        }
        let scalars = labs.iter().map(|c| (c.l - first) / (last - first)).collect();
        Ok(Luminance {
            colors: labs,
            scalars,
            min: 0.0,
            max: 0.0,
            alpha: 1.0,
        })
    }

    /// For control colors known to be valid
    pub(super) fn new_unchecked(colors: &[ColorU8]) -> Self {
        match Luminance::new(colors) {
            Ok(map) => map,
            Err(err) => unreachable!("invalid built-in color map: {}", err),
        }
    }
}

impl ColorMap for Luminance {
    fn at_in(&self, min: f64, max: f64, v: f64) -> Result<ColorU8, Error> {
        check_range(min, max, v)?;
        let t = (v - min) / (max - min);
        let i = search(&self.scalars, t);
        if i == 0 {
            return Ok(self.colors[0].to_srgb().to_color(self.alpha));
        }
        let c0 = self.colors[i - 1];
        let c1 = self.colors[i];
        let frac = (t - self.scalars[i - 1]) / (self.scalars[i] - self.scalars[i - 1]);
        let lab = Lab {
            l: c0.l + frac * (c1.l - c0.l),
            a: c0.a + frac * (c1.a - c0.a),
            b: c0.b + frac * (c1.b - c0.b),
        };
        Ok(lab.to_srgb().to_color(self.alpha))
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }
}
