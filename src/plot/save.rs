//! Saving plots to files, the back-end being chosen by the file extension

use std::{fmt, fs, io, path};

use statplot_base::{Length, Size};
use statplot_doc::{EpsCanvas, PdfCanvas, TexCanvas};
use statplot_pxl::PxlCanvas;
use statplot_svg::SvgCanvas;

use crate::Error;
use crate::defaults;
use crate::draw::DrawArea;
use crate::plot::Plot;

/// Output formats known by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Eps,
    Jpeg,
    Pdf,
    Png,
    Svg,
    Tex,
    Tiff,
}

impl Format {
    /// The format of a file extension, case insensitive
    pub fn from_extension(ext: &str) -> Result<Format, Error> {
        match ext.to_ascii_lowercase().as_str() {
            "eps" => Ok(Format::Eps),
            "jpg" | "jpeg" => Ok(Format::Jpeg),
            "pdf" => Ok(Format::Pdf),
            "png" => Ok(Format::Png),
            "svg" => Ok(Format::Svg),
            "tex" => Ok(Format::Tex),
            "tif" | "tiff" => Ok(Format::Tiff),
            _ => Err(Error::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_path(path: &path::Path) -> Result<Format, Error> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Format::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Eps => "eps",
            Format::Jpeg => "jpg",
            Format::Pdf => "pdf",
            Format::Png => "png",
            Format::Svg => "svg",
            Format::Tex => "tex",
            Format::Tiff => "tiff",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl Plot {
    /// Draw the plot on a canvas of `width × height` and save it at `path`.
    ///
    /// Fails without touching the file system if the extension is not
    /// supported, if an error was retained while the plot was built or if
    /// an axis can't be drawn.
    pub fn save<P: AsRef<path::Path>>(
        &self,
        width: Length,
        height: Length,
        path: P,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        self.check()?;
        let file = fs::File::create(path)?;
        let mut dest = io::BufWriter::new(file);
        self.write_to(width, height, format, &mut dest)?;
        io::Write::flush(&mut dest)?;
        log::debug!("saved plot to {}", path.display());
        Ok(())
    }

    /// Draw the plot on a canvas of `width × height` and write it to `dest`
    pub fn write_to<W: io::Write>(
        &self,
        width: Length,
        height: Length,
        format: Format,
        dest: W,
    ) -> Result<(), Error> {
        self.check()?;
        let size = Size::new(width, height)
            .ok_or_else(|| Error::Domain(format!("canvas size {} × {}", width, height)))?;
        match format {
            Format::Eps => {
                let mut canvas = EpsCanvas::new(size).with_title(self.title.text.clone());
                self.draw(&mut DrawArea::full(&mut canvas));
                canvas.write_to(dest)?;
            }
            Format::Pdf => {
                let mut canvas = PdfCanvas::new(size);
                self.draw(&mut DrawArea::full(&mut canvas));
                canvas.write_to(dest)?;
            }
            Format::Jpeg | Format::Png | Format::Tiff => {
                let mut canvas = PxlCanvas::new(size, defaults::DPI).ok_or_else(|| {
                    Error::Domain(format!("no pixmap of {} × {} at {} dpi", width, height, defaults::DPI))
                })?;
                self.draw(&mut DrawArea::full(&mut canvas));
                match format {
                    Format::Jpeg => canvas.write_jpeg(dest, defaults::JPEG_QUALITY)?,
                    Format::Tiff => canvas.write_tiff(dest)?,
                    _ => canvas.write_png(dest)?,
                }
            }
            Format::Svg => {
                let mut canvas = SvgCanvas::new(size);
                self.draw(&mut DrawArea::full(&mut canvas));
                canvas.write_to(dest)?;
            }
            Format::Tex => {
                let mut canvas = TexCanvas::new(size);
                self.draw(&mut DrawArea::full(&mut canvas));
                canvas.write_to(dest)?;
            }
        }
        Ok(())
    }
}
