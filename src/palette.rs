//! Color maps and palettes.
//!
//! A [`ColorMap`] turns a scalar of `[min, max]` into a color. Three
//! families are provided: piecewise linear in sRGB ([`Linear`]), monotone
//! in perceived luminance ([`Luminance`]) and diverging through a neutral
//! color in the Msh space ([`Diverging`]).

use std::fmt;

use statplot_base::ColorU8;

use crate::Error;

mod diverging;
pub mod lab;
mod linear;
mod luminance;

pub use diverging::Diverging;
pub use linear::Linear;
pub use luminance::Luminance;

/// An ordered list of colors
pub type Palette = Vec<ColorU8>;

pub trait ColorMap: fmt::Debug + Send + Sync {
    /// The color at `v` with the map spanning `[min, max]`.
    ///
    /// Fails with [`Error::NaN`], [`Error::InputRange`], [`Error::Underflow`]
    /// or [`Error::Overflow`], checked in this order.
    fn at_in(&self, min: f64, max: f64, v: f64) -> Result<ColorU8, Error>;

    /// The color at `v`
    fn at(&self, v: f64) -> Result<ColorU8, Error> {
        self.at_in(self.min(), self.max(), v)
    }

    fn min(&self) -> f64;
    fn max(&self) -> f64;
    fn set_min(&mut self, min: f64);
    fn set_max(&mut self, max: f64);

    /// Opacity of the produced colors, in `[0, 1]`
    fn alpha(&self) -> f64;
    fn set_alpha(&mut self, alpha: f64);

    /// `n` colors evenly spaced over `[min, max]`.
    ///
    /// A map with both bounds at zero is sampled over `[0, 1]` and out of
    /// gamut colors are kept clamped.
    fn palette(&self, n: usize) -> Result<Palette, Error> {
        let (min, max) = if self.min() == 0.0 && self.max() == 0.0 {
            (0.0, 1.0)
        } else {
            (self.min(), self.max())
        };
        let sample = |v: f64| -> Result<ColorU8, Error> {
            let v = v.clamp(min, max);
            match self.at_in(min, max, v) {
                Err(Error::GamutClamp { color, .. }) => Ok(color),
                res => res,
            }
        };
        match n {
            0 => Ok(Vec::new()),
            1 => Ok(vec![sample(min)?]),
            _ => {
                let delta = (max - min) / (n - 1) as f64;
                (0..n).map(|i| sample(min + delta * i as f64)).collect()
            }
        }
    }
}

/// A map evaluated on its own `[0, 1]` range
fn unit<M: ColorMap>(mut map: M) -> M {
    map.set_min(0.0);
    map.set_max(1.0);
    map
}

/// Black through red and yellow to white
pub fn black_body() -> Luminance {
    let colors = [
        ColorU8::from_rgb(0, 0, 0),
        ColorU8::from_rgb(178, 34, 34),
        ColorU8::from_rgb(227, 105, 5),
        ColorU8::from_rgb(238, 210, 20),
        ColorU8::from_rgb(255, 255, 255),
    ];
    unit(Luminance::new_unchecked(&colors))
}

/// Black through blue, purple, red and yellow to white
pub fn extended_black_body() -> Luminance {
    let colors = [
        ColorU8::from_rgb(0, 0, 0),
        ColorU8::from_rgb(0, 24, 168),
        ColorU8::from_rgb(99, 0, 228),
        ColorU8::from_rgb(220, 20, 60),
        ColorU8::from_rgb(255, 117, 0),
        ColorU8::from_rgb(255, 255, 255),
    ];
    unit(Luminance::new_unchecked(&colors))
}

/// Blue to red, through a light gray
pub fn smooth_blue_red() -> Diverging {
    let start = lab::Msh {
        m: 80.0,
        s: 1.08,
        h: -1.1,
    };
    let end = lab::Msh {
        m: 80.0,
        s: 1.08,
        h: 0.5,
    };
    unit(Diverging::from_msh(start, end, 88.0))
}

/// Index of the first value `>= x` in the sorted `values`
fn search(values: &[f64], x: f64) -> usize {
    values.partition_point(|v| *v < x)
}
