//! Font handles.
//!
//! A [`Font`] only names a face and a size. Metrics and outlines are looked up
//! by name in the `statplot-text` registry.

use crate::geom::Length;

/// Name of the face used when none is given, and when a name is unknown
pub const DEFAULT_FONT_NAME: &str = "Helvetica";

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub name: String,
    pub size: Length,
}

impl Font {
    pub fn new(name: impl Into<String>, size: Length) -> Self {
        Font {
            name: name.into(),
            size,
        }
    }

    pub fn with_size(self, size: Length) -> Self {
        Font { size, ..self }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(DEFAULT_FONT_NAME, Length::pt(12.0))
    }
}
