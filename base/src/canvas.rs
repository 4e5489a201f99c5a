//! The drawing contract shared by every back-end.
//!
//! A [`Canvas`] is a stateful sink: the current color, line width, dash
//! pattern and transform apply to every following draw until changed or
//! restored by [`Canvas::pop`].
//! The state itself lives in a [`StateStack`] the back-ends embed, so that the
//! stacking behavior is identical everywhere.

use std::{error, fmt, io};

use crate::color::{self, ColorU8};
use crate::font::Font;
use crate::geom::{Affine, Length, Path, Point, Rectangle, Size};
use crate::image::Image;

mod recorder;

pub use recorder::{Op, Recorder};

#[derive(Debug)]
pub enum Error {
    /// `pop` without a matching `push`
    StackUnderflow,
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StackUnderflow => write!(f, "canvas state stack underflow"),
            Error::Io(err) => write!(f, "canvas output error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// The graphics state saved by `push` and restored by `pop`
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub color: ColorU8,
    pub line_width: Length,
    pub dashes: Vec<Length>,
    pub dash_offset: Length,
    pub transform: Affine,
}

impl Default for State {
    fn default() -> Self {
        State {
            color: color::BLACK,
            line_width: Length::pt(1.0),
            dashes: Vec::new(),
            dash_offset: Length::ZERO,
            transform: Affine::IDENTITY,
        }
    }
}

impl State {
    /// Line width in device space, taking the transform into account
    pub fn device_line_width(&self) -> f64 {
        self.line_width.points() * self.transform.mean_scale()
    }
}

/// Explicit stack of graphics states
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: State,
    saved: Vec<State>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &State {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn set_line_width(&mut self, w: Length) {
        self.current.line_width = w;
    }

    pub fn set_line_dash(&mut self, dashes: &[Length], offset: Length) {
        self.current.dashes = dashes.to_vec();
        self.current.dash_offset = offset;
    }

    pub fn set_color(&mut self, color: Option<ColorU8>) {
        self.current.color = color.unwrap_or(color::BLACK);
    }

    pub fn push(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn pop(&mut self) -> Result<(), Error> {
        self.current = self.saved.pop().ok_or(Error::StackUnderflow)?;
        Ok(())
    }

    /// The most recent transform is applied first to drawn coordinates
    pub fn transform(&mut self, t: &Affine) {
        self.current.transform = self.current.transform.pre_concat(t);
    }
}

/// The drawing sink implemented by every back-end.
///
/// Implementors provide access to their [`StateStack`] and the drawing
/// primitives; state operations have default implementations on top of it.
pub trait Canvas {
    /// Extent of the drawing surface
    fn size(&self) -> Size;

    fn state(&self) -> &StateStack;

    fn state_mut(&mut self) -> &mut StateStack;

    /// A width `<= 0` suppresses stroking
    fn set_line_width(&mut self, w: Length) {
        self.state_mut().set_line_width(w);
    }

    fn set_line_dash(&mut self, dashes: &[Length], offset: Length) {
        self.state_mut().set_line_dash(dashes, offset);
    }

    /// `None` maps to opaque black
    fn set_color(&mut self, color: Option<ColorU8>) {
        self.state_mut().set_color(color);
    }

    /// Save the whole state: color, line width, dashes and transform
    fn push(&mut self) {
        self.state_mut().push();
    }

    /// Restore the state saved by the matching [`Canvas::push`]
    fn pop(&mut self) -> Result<(), Error> {
        self.state_mut().pop()
    }

    fn translate(&mut self, d: Point) {
        self.state_mut()
            .transform(&Affine::translation(d.x.points(), d.y.points()));
    }

    /// Rotate counter-clockwise by `theta` radians
    fn rotate(&mut self, theta: f64) {
        self.state_mut().transform(&Affine::rotation(theta));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state_mut().transform(&Affine::scaling(sx, sy));
    }

    fn stroke(&mut self, path: &Path);

    fn fill(&mut self, path: &Path);

    /// Fill a single line of text, `pt` is the origin of the baseline
    fn fill_string(&mut self, font: &Font, pt: Point, text: &str);

    /// Draw an image stretched over `rect`.
    /// Back-ends without image support ignore the call.
    fn draw_image(&mut self, rect: Rectangle, image: &Image) {
        let _ = (rect, image);
        log::debug!("canvas does not support images, draw_image ignored");
    }
}

/// Whether stroking with the current state would draw anything
pub fn should_stroke(state: &State) -> bool {
    state.line_width > Length::ZERO && state.color.alpha() > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_everything() {
        let mut st = StateStack::new();
        st.push();
        st.set_color(Some(color::RED));
        st.set_line_width(Length::pt(3.0));
        st.set_line_dash(&[Length::pt(2.0)], Length::pt(1.0));
        st.transform(&Affine::translation(1.0, 2.0));
        st.pop().unwrap();
        assert_eq!(*st.current(), State::default());
    }

    #[test]
    fn unbalanced_pop() {
        let mut st = StateStack::new();
        st.push();
        assert!(st.pop().is_ok());
        assert!(matches!(st.pop(), Err(Error::StackUnderflow)));
    }

    #[test]
    fn nil_color_is_black() {
        let mut st = StateStack::new();
        st.set_color(Some(color::RED));
        st.set_color(None);
        assert_eq!(st.current().color, color::BLACK);
    }

    #[test]
    fn last_transform_applies_first() {
        let mut st = StateStack::new();
        st.transform(&Affine::translation(10.0, 0.0));
        st.transform(&Affine::scaling(2.0, 2.0));
        let p = st.current().transform.apply(Point::pt(1.0, 1.0));
        assert_eq!(p, Point::pt(12.0, 2.0));
    }
}
