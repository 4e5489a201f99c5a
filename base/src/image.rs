//! Minimal RGBA raster image handed to [`Canvas::draw_image`](crate::Canvas::draw_image).

use crate::color::ColorU8;

/// Row-major pixels, first row on top
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<ColorU8>,
}

impl Image {
    /// Returns `None` if `pixels` does not hold `width × height` entries
    pub fn new(width: u32, height: u32, pixels: Vec<ColorU8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Image {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, color: ColorU8) -> Self {
        Image {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[ColorU8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorU8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: ColorU8) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }
}
