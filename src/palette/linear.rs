use statplot_base::ColorU8;

use super::{ColorMap, search};
use crate::Error;
use crate::error::check_range;

/// Piecewise linear interpolation between control colors, channel by
/// channel in sRGB
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    colors: Vec<ColorU8>,
    /// Position of each color in `[0, 1]`, strictly increasing
    scalars: Vec<f64>,
    min: f64,
    max: f64,
    alpha: f64,
}

impl Linear {
    /// Evenly spaced control colors
    pub fn new(colors: &[ColorU8]) -> Result<Self, Error> {
        let n = colors.len();
        if n < 2 {
            return Linear::with_scalars(colors, &[]);
        }
        let scalars: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        Linear::with_scalars(colors, &scalars)
    }

    /// Control colors at the given positions. The positions must start at 0,
    /// end at 1 and be strictly increasing.
    pub fn with_scalars(colors: &[ColorU8], scalars: &[f64]) -> Result<Self, Error> {
        if colors.len() < 2 {
            return Err(Error::Domain(format!(
                "linear color map needs 2 colors, got {}",
                colors.len()
            )));
        }
        if scalars.len() != colors.len() {
            return Err(Error::Domain(format!(
                "{} positions for {} colors",
                scalars.len(),
                colors.len()
            )));
        }
        let increasing = scalars.windows(2).all(|w| w[0] < w[1]);
        if scalars[0] != 0.0 || scalars[scalars.len() - 1] != 1.0 || !increasing {
            return Err(Error::Domain(
                "color positions must increase from 0 to 1".to_string(),
            ));
        }
        Ok(Linear {
            colors: colors.to_vec(),
            scalars: scalars.to_vec(),
            min: 0.0,
            max: 0.0,
            alpha: 1.0,
        })
    }
}

impl ColorMap for Linear {
    fn at_in(&self, min: f64, max: f64, v: f64) -> Result<ColorU8, Error> {
        check_range(min, max, v)?;
        let t = (v - min) / (max - min);
        let i = search(&self.scalars, t);
        if i == 0 {
            let [r, g, b, _] = self.colors[0].rgba_f64();
            return Ok(ColorU8::from_rgba_f64(r, g, b, self.alpha));
        }
        let frac = (t - self.scalars[i - 1]) / (self.scalars[i] - self.scalars[i - 1]);
        let c0 = self.colors[i - 1].rgba_f64();
        let c1 = self.colors[i].rgba_f64();
        let mix = |k: usize| c0[k] + frac * (c1[k] - c0[k]);
        Ok(ColorU8::from_rgba_f64(mix(0), mix(1), mix(2), self.alpha))
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

#[cfg(test)]
mod tests {
    use statplot_base::color;

    use super::*;

    fn gray_map() -> Linear {
        let mut map = Linear::new(&[color::BLACK, color::WHITE]).unwrap();
        map.set_max(2.0);
        map
    }

    #[test]
    fn interpolates_channels() {
        let map = Linear::with_scalars(&[color::BLACK, color::RED, color::WHITE], &[0.0, 0.25, 1.0])
            .unwrap();
        let mut map = map;
        map.set_max(1.0);
        assert_eq!(map.at(0.25).unwrap(), color::RED);
        assert_eq!(map.at(0.125).unwrap(), ColorU8::from_rgb(128, 0, 0));
        assert_eq!(map.at(1.0).unwrap(), color::WHITE);
    }

    #[test]
    fn range_errors() {
        let map = gray_map();
        assert!(matches!(map.at(f64::NAN), Err(Error::NaN)));
        assert!(matches!(map.at(-0.1), Err(Error::Underflow(_))));
        assert!(matches!(map.at(2.1), Err(Error::Overflow(_))));

        let unset = Linear::new(&[color::BLACK, color::WHITE]).unwrap();
        assert!(matches!(unset.at(0.0), Err(Error::InputRange { .. })));
    }

    #[test]
    fn alpha_applies() {
        let mut map = gray_map();
        map.set_alpha(0.5);
        assert_eq!(map.at(0.0).unwrap().alpha(), 128);
    }

    #[test]
    fn invalid_controls() {
        assert!(Linear::new(&[color::BLACK]).is_err());
        assert!(Linear::with_scalars(&[color::BLACK, color::WHITE], &[0.0, 0.5]).is_err());
        assert!(
            Linear::with_scalars(&[color::BLACK, color::RED, color::WHITE], &[0.0, 0.0, 1.0])
                .is_err()
        );
    }
}
