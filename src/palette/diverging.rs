use statplot_base::ColorU8;

use super::ColorMap;
use super::lab::Msh;
use crate::Error;
use crate::error::check_range;

/// Tolerance of the out of gamut check, in sRGB channel units
const GAMUT_TOL: f64 = 1e-3;

/// Two colors joined through an unsaturated color of magnitude
/// `convergence_m`, interpolated in the Msh space.
///
/// The neutral color sits at the convergence point, the middle of
/// `[min, max]` unless set otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Diverging {
    start: Msh,
    end: Msh,
    convergence_m: f64,
    convergence: Option<f64>,
    min: f64,
    max: f64,
    alpha: f64,
}

impl Diverging {
    /// A map from `start` to `end`. The convergence magnitude is the
    /// largest of 88 and the magnitudes of both colors.
    pub fn new(start: ColorU8, end: ColorU8) -> Self {
        let start = Msh::from_color(start);
        let end = Msh::from_color(end);
        let convergence_m = start.m.max(end.m).max(88.0);
        Diverging::from_msh(start, end, convergence_m)
    }

    pub fn from_msh(start: Msh, end: Msh, convergence_m: f64) -> Self {
        Diverging {
            start,
            end,
            convergence_m,
            convergence: None,
            min: 0.0,
            max: 0.0,
            alpha: 1.0,
        }
    }

    /// Place the neutral color at `v`, in data units.
    ///
    /// `v` must lie within `[min, max]` once the range is set. A range set
    /// afterwards that excludes `v` makes [`ColorMap::at`] fail.
    pub fn set_convergence(&mut self, v: f64) -> Result<(), Error> {
        if v.is_nan() {
            return Err(Error::NaN);
        }
        let (min, max) = (self.min, self.max);
        if max > min && !(min..=max).contains(&v) {
            return Err(Error::InputRange { min, max });
        }
        self.convergence = Some(v);
        Ok(())
    }

    pub fn convergence(&self) -> f64 {
        self.convergence.unwrap_or((self.min + self.max) / 2.0)
    }

    fn msh_at(&self, t: f64, p: f64) -> Msh {
        let mc = self.convergence_m;
        if t < p {
            let s = self.start;
            let a = t / p;
            Msh {
                m: (mc - s.m) * a + s.m,
                s: s.s * (1.0 - a),
                h: s.h + s.hue_twist(mc) * a,
            }
        } else if t > p {
            let e = self.end;
            // t > p implies p < 1
            let a1 = (t - 1.0) / (p - 1.0);
            let a2 = if p > 0.0 { t / p - 1.0 } else { t };
            Msh {
                m: (mc - e.m) * a1 + e.m,
                s: e.s * a2,
                h: e.h + e.hue_twist(mc) * a1,
            }
        } else {
            Msh {
                m: mc,
                s: 0.0,
                h: 0.0,
            }
        }
    }
}

impl ColorMap for Diverging {
    /// Out of gamut colors fail with [`Error::GamutClamp`], which carries
    /// the clamped color
    fn at_in(&self, min: f64, max: f64, v: f64) -> Result<ColorU8, Error> {
        check_range(min, max, v)?;
        let t = (v - min) / (max - min);
        let p = match self.convergence {
            Some(c) => (c - min) / (max - min),
            None => 0.5,
        };
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InputRange { min, max });
        }
        let srgb = self.msh_at(t, p).to_lab().to_srgb();
        let color = srgb.to_color(self.alpha);
        if !srgb.in_gamut(GAMUT_TOL) {
            return Err(Error::GamutClamp { value: v, color });
        }
        Ok(color)
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
