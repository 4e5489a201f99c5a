//! Error type shared by the plot engine
use std::sync::Arc;
use std::{fmt, io};

use statplot_base::ColorU8;
use statplot_base::canvas;

/// Errors raised while building, evaluating or saving plots.
///
/// `Error` is `Clone` so that a [`crate::Plot`] can retain the first error
/// met while it is assembled and return it again at save time.
#[derive(Debug, Clone)]
pub enum Error {
    /// An empty or reversed range, `max <= min`
    InputRange {
        /// range minimum
        min: f64,
        /// range maximum
        max: f64,
    },
    /// A value outside of the domain of an operation, such as the
    /// logarithm of a non-positive value
    Domain(String),
    /// A color map evaluated below its minimum
    Underflow(f64),
    /// A color map evaluated above its maximum
    Overflow(f64),
    /// NaN met in data or passed to a color map
    NaN,
    /// Saving to a file extension that has no back-end
    UnsupportedFormat(String),
    /// The contour tracer left an open end inside the grid
    ContourStructural(String),
    /// A color map produced a color out of the sRGB gamut.
    /// The clamped color is still provided.
    GamutClamp {
        /// the evaluated scalar
        value: f64,
        /// the color after clamping
        color: ColorU8,
    },
    /// `pop` without matching `push`
    StackUnderflow,
    /// Font loading or shaping error
    Text(statplot_text::Error),
    /// Output error
    Io(Arc<io::Error>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputRange { min, max } => {
                write!(f, "invalid range: max ({}) <= min ({})", max, min)
            }
            Error::Domain(msg) => write!(f, "domain error: {}", msg),
            Error::Underflow(v) => write!(f, "value {} is below the color map minimum", v),
            Error::Overflow(v) => write!(f, "value {} is above the color map maximum", v),
            Error::NaN => write!(f, "NaN value"),
            Error::UnsupportedFormat(ext) => write!(f, "unsupported format: {}", ext),
            Error::ContourStructural(msg) => write!(f, "contour structure error: {}", msg),
            Error::GamutClamp { value, color } => {
                write!(f, "color map out of gamut at {}, clamped to {}", value, color)
            }
            Error::StackUnderflow => write!(f, "canvas state stack underflow"),
            Error::Text(err) => err.fmt(f),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Text(err) => Some(err),
            Error::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<statplot_text::Error> for Error {
    fn from(err: statplot_text::Error) -> Self {
        Error::Text(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl From<canvas::Error> for Error {
    fn from(err: canvas::Error) -> Self {
        match err {
            canvas::Error::StackUnderflow => Error::StackUnderflow,
            canvas::Error::Io(err) => Error::Io(Arc::new(err)),
        }
    }
}

/// Check that `x` lies in `[min, max]`, in the order NaN, range, underflow, overflow
pub(crate) fn check_range(min: f64, max: f64, x: f64) -> Result<(), Error> {
    if x.is_nan() {
        return Err(Error::NaN);
    }
    if !(max > min) {
        return Err(Error::InputRange { min, max });
    }
    if x < min {
        return Err(Error::Underflow(x));
    }
    if x > max {
        return Err(Error::Overflow(x));
    }
    Ok(())
}
