//! Non-premultiplied sRGB colors with an alpha channel.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Default for ColorU8 {
    fn default() -> Self {
        BLACK
    }
}

impl ColorU8 {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// Build from channels in `[0, 1]`, rounded to the nearest step.
    /// Out of range channels are clamped.
    pub fn from_rgba_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        ColorU8 {
            r: channel_u8(r),
            g: channel_u8(g),
            b: channel_u8(b),
            a: channel_u8(a),
        }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// Panics on malformed input, which makes it suited for constants.
    pub const fn from_html(hex: &[u8]) -> Self {
        if hex.is_empty() || hex[0] != b'#' {
            panic!("html color must start with '#'");
        }
        match hex.len() {
            4 | 5 => {
                let r = hex_digit(hex[1]) * 17;
                let g = hex_digit(hex[2]) * 17;
                let b = hex_digit(hex[3]) * 17;
                let a = if hex.len() == 5 { hex_digit(hex[4]) * 17 } else { 255 };
                ColorU8 { r, g, b, a }
            }
            7 | 9 => {
                let r = hex_digit(hex[1]) << 4 | hex_digit(hex[2]);
                let g = hex_digit(hex[3]) << 4 | hex_digit(hex[4]);
                let b = hex_digit(hex[5]) << 4 | hex_digit(hex[6]);
                let a = if hex.len() == 9 {
                    hex_digit(hex[7]) << 4 | hex_digit(hex[8])
                } else {
                    255
                };
                ColorU8 { r, g, b, a }
            }
            _ => panic!("html color has an invalid length"),
        }
    }

    pub const fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgba_f64(&self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        ]
    }

    pub const fn red(&self) -> u8 {
        self.r
    }

    pub const fn green(&self) -> u8 {
        self.g
    }

    pub const fn blue(&self) -> u8 {
        self.b
    }

    pub const fn alpha(&self) -> u8 {
        self.a
    }

    /// `None` when fully opaque
    pub fn opacity(&self) -> Option<f64> {
        if self.a == 255 {
            None
        } else {
            Some(self.a as f64 / 255.0)
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        ColorU8 { a, ..self }
    }

    /// `#rrggbb`, alpha is not included
    pub fn html(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for ColorU8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.html())?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

fn channel_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
pub const WHITE: ColorU8 = ColorU8::from_rgb(255, 255, 255);
pub const TRANSPARENT: ColorU8 = ColorU8::from_rgba(0, 0, 0, 0);
pub const RED: ColorU8 = ColorU8::from_rgb(255, 0, 0);
pub const GREEN: ColorU8 = ColorU8::from_rgb(0, 128, 0);
pub const BLUE: ColorU8 = ColorU8::from_rgb(0, 0, 255);
pub const GRAY: ColorU8 = ColorU8::from_html(b"#808080");
pub const LIGHT_GRAY: ColorU8 = ColorU8::from_html(b"#d3d3d3");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_forms() {
        assert_eq!(ColorU8::from_html(b"#f00"), RED);
        assert_eq!(ColorU8::from_html(b"#ff000080"), RED.with_alpha(0x80));
        assert_eq!(ColorU8::from_html(b"#8080"), ColorU8::from_rgba(0x88, 0, 0x88, 0));
        assert_eq!(LIGHT_GRAY.html(), "#d3d3d3");
    }

    #[test]
    fn f64_rounding() {
        let c = ColorU8::from_rgba_f64(0.5, -1.0, 2.0, f64::NAN);
        assert_eq!(c.rgba(), [128, 0, 255, 0]);
    }

    #[test]
    fn display_alpha() {
        assert_eq!(BLACK.to_string(), "#000000");
        assert_eq!(WHITE.with_alpha(0x10).to_string(), "#ffffff10");
    }
}
