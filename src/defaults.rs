//! Default values of the plot configuration
use statplot_base::{ColorU8, Length, color};

pub const BACKGROUND_COLOR: ColorU8 = color::WHITE;

pub const TITLE_FONT_SIZE: Length = Length::pt(12.0);
pub const TITLE_PADDING: Length = Length::pt(5.0);

pub const AXIS_LABEL_FONT_SIZE: Length = Length::pt(12.0);
pub const AXIS_LINE_WIDTH: Length = Length::pt(0.5);
pub const AXIS_PADDING: Length = Length::pt(5.0);

pub const TICK_LABEL_FONT_SIZE: Length = Length::pt(10.0);
pub const TICK_LINE_WIDTH: Length = Length::pt(0.5);
pub const TICK_LENGTH: Length = Length::pt(8.0);
/// Number of labelled ticks the tick generators aim for
pub const SUGGESTED_TICKS: usize = 3;

pub const LEGEND_FONT_SIZE: Length = Length::pt(12.0);
pub const LEGEND_THUMBNAIL_WIDTH: Length = Length::pt(20.0);

pub const LINE_WIDTH: Length = Length::pt(1.0);
pub const GLYPH_RADIUS: Length = Length::pt(2.5);
pub const GRID_LINE_WIDTH: Length = Length::pt(0.25);

/// Resolution of the raster outputs
pub const DPI: f64 = 96.0;
/// Quality of saved JPEG images, in 1..=100
pub const JPEG_QUALITY: u8 = 90;
