//! Raster back-end for statplot, built on tiny-skia.
//!
//! [`PxlCanvas`] paints directly into a pixmap. Text is drawn from the glyph
//! outlines of the fonts registered in `statplot_text::fontdb`; fonts known
//! only by their metrics are skipped.

use std::{io, path};

use statplot_base::canvas::{self, Canvas, State, StateStack};
use statplot_base::{Affine, ColorU8, Font, Image, Path, Point, Rectangle, Size};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tiny_skia::{FillRule, Pixmap, PixmapPaint};

/// Resolution used when none is specified
pub const DEFAULT_DPI: f64 = 96.0;

#[derive(Debug, Clone)]
pub struct PxlCanvas {
    pixmap: Pixmap,
    size: Size,
    base: Affine,
    state: StateStack,
}

impl PxlCanvas {
    /// Returns `None` if the pixmap would be empty
    pub fn new(size: Size, dpi: f64) -> Option<Self> {
        let s = dpi / 72.0;
        let width = (size.width().points() * s).ceil() as u32;
        let height = (size.height().points() * s).ceil() as u32;
        let pixmap = Pixmap::new(width, height)?;
        Some(PxlCanvas {
            pixmap,
            size,
            base: Affine {
                a: s,
                d: -s,
                f: size.height().points() * s,
                ..Affine::IDENTITY
            },
            state: StateStack::new(),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn device(&self) -> Affine {
        self.base.pre_concat(&self.state.current().transform)
    }

    pub fn write_png<W: io::Write>(&self, mut dest: W) -> Result<(), canvas::Error> {
        let data = self
            .pixmap
            .encode_png()
            .map_err(|err| io::Error::other(err.to_string()))?;
        dest.write_all(&data)?;
        Ok(())
    }

    pub fn save_png<P: AsRef<path::Path>>(&self, path: P) -> Result<(), canvas::Error> {
        let file = std::fs::File::create(path)?;
        self.write_png(io::BufWriter::new(file))
    }

    /// Write the pixmap as a baseline JPEG.
    ///
    /// JPEG has no alpha channel: transparent pixels are composited over white.
    pub fn write_jpeg<W: io::Write>(&self, mut dest: W, quality: u8) -> Result<(), canvas::Error> {
        let img = self.rgb_over_white();
        let encoder = JpegEncoder::new_with_quality(&mut dest, quality);
        img.write_with_encoder(encoder).map_err(image_error)?;
        Ok(())
    }

    /// Write the pixmap as an uncompressed RGBA TIFF
    pub fn write_tiff<W: io::Write>(&self, mut dest: W) -> Result<(), canvas::Error> {
        // the TIFF encoder seeks back to patch offsets
        let mut buf = io::Cursor::new(Vec::new());
        let img = self.rgba();
        img.write_with_encoder(TiffEncoder::new(&mut buf))
            .map_err(image_error)?;
        dest.write_all(buf.get_ref())?;
        Ok(())
    }

    fn rgba(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    fn rgb_over_white(&self) -> RgbImage {
        let mut img = RgbImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            // premultiplied, so `c + (1 - a)` is the color over white
            let bg = 255 - src.alpha();
            *dst = Rgb([src.red() + bg, src.green() + bg, src.blue() + bg]);
        }
        img
    }
}

impl Canvas for PxlCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn stroke(&mut self, path: &Path) {
        let state = self.state.current();
        if !canvas::should_stroke(state) {
            return;
        }
        let device = self.device();
        let Some(ts_path) = path.to_skia(&device) else {
            return;
        };
        let paint = ts_paint(state.color);
        let stroke = ts_stroke(state, &device);
        self.pixmap
            .stroke_path(&ts_path, &paint, &stroke, tiny_skia::Transform::identity(), None);
    }

    fn fill(&mut self, path: &Path) {
        let state = self.state.current();
        let Some(ts_path) = path.to_skia(&self.device()) else {
            return;
        };
        let paint = ts_paint(state.color);
        self.pixmap.fill_path(
            &ts_path,
            &paint,
            FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn fill_string(&mut self, font: &Font, pt: Point, text: &str) {
        let metrics = statplot_text::fontdb::metrics(&font.name);
        let Some(glyphs) = metrics.outline(text, font.size.points()) else {
            log::debug!("no outlines for font {:?}, text {:?} skipped", font.name, text);
            return;
        };
        let t = self
            .device()
            .pre_concat(&Affine::translation(pt.x.points(), pt.y.points()));
        let paint = ts_paint(self.state.current().color);
        self.pixmap
            .fill_path(&glyphs, &paint, FillRule::Winding, ts_transform(&t), None);
    }

    fn draw_image(&mut self, rect: Rectangle, image: &Image) {
        let Some(src) = ts_pixmap(image) else {
            return;
        };
        let to_rect = Affine {
            a: rect.width().points() / image.width() as f64,
            b: 0.0,
            c: 0.0,
            d: -rect.height().points() / image.height() as f64,
            e: rect.min.x.points(),
            f: rect.max.y.points(),
        };
        let t = self.device().pre_concat(&to_rect);
        self.pixmap.draw_pixmap(
            0,
            0,
            src.as_ref(),
            &PixmapPaint::default(),
            ts_transform(&t),
            None,
        );
    }
}

fn ts_transform(t: &Affine) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(
        t.a as f32, t.b as f32, t.c as f32, t.d as f32, t.e as f32, t.f as f32,
    )
}

fn ts_paint(color: ColorU8) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    let [r, g, b, a] = color.rgba();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn ts_stroke(state: &State, device: &Affine) -> tiny_skia::Stroke {
    let scale = device.mean_scale();
    let mut stroke = tiny_skia::Stroke {
        width: (state.line_width.points() * scale) as f32,
        ..Default::default()
    };
    if !state.dashes.is_empty() {
        let mut array: Vec<f32> = state
            .dashes
            .iter()
            .map(|d| (d.points() * scale) as f32)
            .collect();
        if array.len() % 2 == 1 {
            array.extend_from_within(..);
        }
        stroke.dash =
            tiny_skia::StrokeDash::new(array, (state.dash_offset.points() * scale) as f32);
    }
    stroke
}

fn image_error(err: image::ImageError) -> io::Error {
    io::Error::other(err.to_string())
}

fn ts_pixmap(image: &Image) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.rgba();
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}
