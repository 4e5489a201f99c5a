//! Font metrics and text layout for statplot.
//!
//! Fonts are referred to by name through [`statplot_base::Font`]. The
//! metrics behind a name come from a process-wide registry ([`fontdb`]) that
//! always knows the built-in Helvetica metrics and can be extended with
//! TrueType/OpenType faces.
//!
//! [`TextStyle`] measures and draws multi-line, rotated and aligned text onto
//! any [`statplot_base::Canvas`].

#![warn(missing_debug_implementations)]

use std::{fmt, io};

pub use ttf_parser as ttf;

pub mod fontdb;
mod metrics;
mod style;
mod ttf_metrics;

pub use metrics::{Extents, Helvetica, Metrics};
pub use style::{TextStyle, X_CENTER, X_LEFT, X_RIGHT, Y_BOTTOM, Y_CENTER, Y_TOP};
pub use ttf_metrics::TtfMetrics;

#[derive(Debug, Clone)]
pub enum Error {
    NoSuchFont(String),
    FaceParsing(ttf::FaceParsingError),
    /// The face parses but cannot be shaped
    Unshapable(String),
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoSuchFont(name) => write!(f, "could not find a font named {:?}", name),
            Error::FaceParsing(err) => write!(f, "could not parse font face: {}", err),
            Error::Unshapable(name) => write!(f, "font {:?} is not supported by the shaper", name),
            Error::Io(err) => write!(f, "could not read font file: {}", err),
        }
    }
}

impl From<ttf::FaceParsingError> for Error {
    fn from(err: ttf::FaceParsingError) -> Self {
        Error::FaceParsing(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl std::error::Error for Error {}
