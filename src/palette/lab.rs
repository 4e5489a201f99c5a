//! Color spaces used for perceptual interpolation.
//!
//! Conversions go through linear RGB and CIE XYZ with the D65 white point:
//! sRGB ⇄ linear RGB ⇄ XYZ ⇄ CIE L*a*b* ⇄ Msh.

use statplot_base::ColorU8;

/// D65 reference white
const WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

/// Gamma-encoded sRGB, channels nominally in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// CIE L*a*b*
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Polar form of L*a*b*: magnitude, saturation and hue angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Msh {
    pub m: f64,
    pub s: f64,
    pub h: f64,
}

fn to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn to_gamma(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

impl Srgb {
    pub fn from_color(c: ColorU8) -> Self {
        let [r, g, b, _] = c.rgba_f64();
        Srgb { r, g, b }
    }

    /// Whether all channels lie in `[-tol, 1 + tol]`
    pub fn in_gamut(&self, tol: f64) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| *c >= -tol && *c <= 1.0 + tol)
    }

    /// Clamp the channels to `[0, 1]` and quantize
    pub fn to_color(self, alpha: f64) -> ColorU8 {
        ColorU8::from_rgba_f64(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            alpha.clamp(0.0, 1.0),
        )
    }

    pub fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: to_linear(self.r),
            g: to_linear(self.g),
            b: to_linear(self.b),
        }
    }
}

impl LinearRgb {
    pub fn to_srgb(self) -> Srgb {
        Srgb {
            r: to_gamma(self.r),
            g: to_gamma(self.g),
            b: to_gamma(self.b),
        }
    }

    pub fn to_xyz(self) -> Xyz {
        let LinearRgb { r, g, b } = self;
        Xyz {
            x: 0.4124 * r + 0.3576 * g + 0.1805 * b,
            y: 0.2126 * r + 0.7152 * g + 0.0722 * b,
            z: 0.0193 * r + 0.1192 * g + 0.9505 * b,
        }
    }
}

impl Xyz {
    pub fn to_linear_rgb(self) -> LinearRgb {
        let Xyz { x, y, z } = self;
        LinearRgb {
            r: 3.2406255 * x - 1.537208 * y - 0.4986286 * z,
            g: -0.9689307 * x + 1.8757561 * y + 0.0415175 * z,
            b: 0.0557101 * x - 0.2040211 * y + 1.0569959 * z,
        }
    }

    pub fn to_lab(self) -> Lab {
        let fx = lab_f(self.x / WHITE.x);
        let fy = lab_f(self.y / WHITE.y);
        let fz = lab_f(self.z / WHITE.z);
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl Lab {
    pub fn from_color(c: ColorU8) -> Self {
        Srgb::from_color(c).to_linear().to_xyz().to_lab()
    }

    pub fn to_xyz(self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;
        Xyz {
            x: WHITE.x * lab_f_inv(fx),
            y: WHITE.y * lab_f_inv(fy),
            z: WHITE.z * lab_f_inv(fz),
        }
    }

    pub fn to_srgb(self) -> Srgb {
        self.to_xyz().to_linear_rgb().to_srgb()
    }

    pub fn to_msh(self) -> Msh {
        let m = (self.l * self.l + self.a * self.a + self.b * self.b).sqrt();
        let s = if m > 0.0 { (self.l / m).acos() } else { 0.0 };
        Msh {
            m,
            s,
            h: self.b.atan2(self.a),
        }
    }
}

impl Msh {
    pub fn from_color(c: ColorU8) -> Self {
        Lab::from_color(c).to_msh()
    }

    pub fn to_lab(self) -> Lab {
        let (sin_s, cos_s) = self.s.sin_cos();
        let (sin_h, cos_h) = self.h.sin_cos();
        Lab {
            l: self.m * cos_s,
            a: self.m * sin_s * cos_h,
            b: self.m * sin_s * sin_h,
        }
    }

    /// Hue shift applied when desaturating toward the magnitude `m`, which
    /// keeps the interpolation perceptually even near the neutral point
    pub fn hue_twist(&self, m: f64) -> f64 {
        if self.m >= m || self.s == 0.0 {
            return 0.0;
        }
        let twist = self.s * (m * m - self.m * self.m).sqrt() / (self.m * self.s.sin());
        if self.h < 0.0 { -twist } else { twist }
    }
}

#[cfg(test)]
mod tests {
    use statplot_base::color;

    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn white_and_black() {
        let white = Lab::from_color(color::WHITE);
        assert_near!(abs, white.l, 100.0, 0.01);
        assert_near!(abs, white.a, 0.0, 0.05);
        assert_near!(abs, white.b, 0.0, 0.05);
        let black = Lab::from_color(color::BLACK);
        assert_near!(abs, black.l, 0.0);
    }

    #[test]
    fn lab_round_trip() {
        for c in [
            ColorU8::from_rgb(0, 24, 168),
            ColorU8::from_rgb(220, 20, 60),
            ColorU8::from_rgb(59, 76, 192),
            ColorU8::from_rgb(180, 4, 38),
        ] {
            assert_eq!(Lab::from_color(c).to_srgb().to_color(1.0), c);
            let msh = Msh::from_color(c);
            assert_eq!(msh.to_lab().to_srgb().to_color(1.0), c);
        }
    }

    #[test]
    fn luminance_of_dark_blue() {
        let lab = Lab::from_color(ColorU8::from_rgb(0, 24, 168));
        assert_near!(abs, lab.l / 100.0, 0.21873, 1e-3);
    }

    #[test]
    fn twist_sign_follows_hue() {
        let cool = Msh {
            m: 80.0,
            s: 1.08,
            h: -1.1,
        };
        let warm = Msh { h: 0.5, ..cool };
        assert_near!(abs, cool.hue_twist(88.0), -0.56116, 1e-3);
        assert_near!(abs, warm.hue_twist(88.0), 0.56116, 1e-3);
        assert_eq!(cool.hue_twist(70.0), 0.0);
    }
}
