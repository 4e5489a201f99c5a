use crate::canvas::{Canvas, Error, StateStack};
use crate::color::{self, ColorU8};
use crate::font::Font;
use crate::geom::{Affine, Length, Path, Point, Rectangle, Size};
use crate::image::Image;

/// A recorded canvas operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetLineWidth(Length),
    SetLineDash(Vec<Length>, Length),
    SetColor(ColorU8),
    Push,
    Pop,
    Translate(Point),
    Rotate(f64),
    Scale(f64, f64),
    Stroke(Path),
    Fill(Path),
    FillString {
        font: Font,
        pt: Point,
        text: String,
    },
    DrawImage {
        rect: Rectangle,
        image: Image,
    },
}

/// A canvas retaining the operations drawn onto it.
///
/// The recording can be compared or replayed onto another canvas.
#[derive(Debug, Clone)]
pub struct Recorder {
    size: Size,
    state: StateStack,
    ops: Vec<Op>,
}

impl Recorder {
    pub fn new(size: Size) -> Self {
        Recorder {
            size,
            state: StateStack::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// Forget all operations and reset the state
    pub fn reset(&mut self) {
        self.ops.clear();
        self.state = StateStack::new();
    }

    /// Draw the recorded operations onto `canvas`
    pub fn replay(&self, canvas: &mut dyn Canvas) -> Result<(), Error> {
        for op in &self.ops {
            match op {
                Op::SetLineWidth(w) => canvas.set_line_width(*w),
                Op::SetLineDash(dashes, offset) => canvas.set_line_dash(dashes, *offset),
                Op::SetColor(c) => canvas.set_color(Some(*c)),
                Op::Push => canvas.push(),
                Op::Pop => canvas.pop()?,
                Op::Translate(d) => canvas.translate(*d),
                Op::Rotate(theta) => canvas.rotate(*theta),
                Op::Scale(sx, sy) => canvas.scale(*sx, *sy),
                Op::Stroke(path) => canvas.stroke(path),
                Op::Fill(path) => canvas.fill(path),
                Op::FillString { font, pt, text } => canvas.fill_string(font, *pt, text),
                Op::DrawImage { rect, image } => canvas.draw_image(*rect, image),
            }
        }
        Ok(())
    }
}

impl Canvas for Recorder {
    fn size(&self) -> Size {
        self.size
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn set_line_width(&mut self, w: Length) {
        self.state.set_line_width(w);
        self.ops.push(Op::SetLineWidth(w));
    }

    fn set_line_dash(&mut self, dashes: &[Length], offset: Length) {
        self.state.set_line_dash(dashes, offset);
        self.ops.push(Op::SetLineDash(dashes.to_vec(), offset));
    }

    fn set_color(&mut self, color: Option<ColorU8>) {
        let color = color.unwrap_or(color::BLACK);
        self.state.set_color(Some(color));
        self.ops.push(Op::SetColor(color));
    }

    fn push(&mut self) {
        self.state.push();
        self.ops.push(Op::Push);
    }

    fn pop(&mut self) -> Result<(), Error> {
        self.state.pop()?;
        self.ops.push(Op::Pop);
        Ok(())
    }

    fn translate(&mut self, d: Point) {
        self.state
            .transform(&Affine::translation(d.x.points(), d.y.points()));
        self.ops.push(Op::Translate(d));
    }

    fn rotate(&mut self, theta: f64) {
        self.state.transform(&Affine::rotation(theta));
        self.ops.push(Op::Rotate(theta));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform(&Affine::scaling(sx, sy));
        self.ops.push(Op::Scale(sx, sy));
    }

    fn stroke(&mut self, path: &Path) {
        self.ops.push(Op::Stroke(path.clone()));
    }

    fn fill(&mut self, path: &Path) {
        self.ops.push(Op::Fill(path.clone()));
    }

    fn fill_string(&mut self, font: &Font, pt: Point, text: &str) {
        self.ops.push(Op::FillString {
            font: font.clone(),
            pt,
            text: text.to_string(),
        });
    }

    fn draw_image(&mut self, rect: Rectangle, image: &Image) {
        self.ops.push(Op::DrawImage {
            rect,
            image: image.clone(),
        });
    }
}
