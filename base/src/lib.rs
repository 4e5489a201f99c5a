//! Base library for statplot.
//!
//! Holds the leaves every other crate of the workspace builds upon:
//! lengths and geometry, colors, raster images, polyline and polygon
//! clipping, and the [`Canvas`] contract implemented by the drawing back-ends.
//!
//! Coordinates are expressed in points (1/72 inch), with the origin at the
//! bottom-left corner of the canvas and the Y axis pointing up.

#![warn(missing_debug_implementations)]

pub mod canvas;
pub mod clip;
pub mod color;
pub mod font;
pub mod geom;
pub mod image;

pub use canvas::{Canvas, Recorder};
pub use color::ColorU8;
pub use font::Font;
pub use geom::{Affine, Length, Path, Point, Rectangle, Size};
pub use image::Image;
