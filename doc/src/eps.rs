//! Encapsulated PostScript output

use std::fmt::Write as _;
use std::{io, path};

use statplot_base::canvas::{self, Canvas, StateStack};
use statplot_base::geom::Segment;
use statplot_base::{Affine, ColorU8, Font, Path, Point, Size};

use crate::{Pen, device_segments, num, rgb_unit};

/// A canvas producing a single page EPS document
#[derive(Debug, Clone)]
pub struct EpsCanvas {
    size: Size,
    title: String,
    state: StateStack,
    body: String,
    color: Option<ColorU8>,
    pen: Option<Pen>,
}

impl EpsCanvas {
    pub fn new(size: Size) -> Self {
        EpsCanvas {
            size,
            title: String::new(),
            state: StateStack::new(),
            body: String::new(),
            color: None,
            pen: None,
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        EpsCanvas {
            title: title.into(),
            ..self
        }
    }

    pub fn write_to<W: io::Write>(&self, mut dest: W) -> Result<(), canvas::Error> {
        if self.state.depth() != 0 {
            log::warn!("EPS written with {} unbalanced push", self.state.depth());
        }
        let w = self.size.width().points();
        let h = self.size.height().points();
        writeln!(dest, "%!PS-Adobe-3.0 EPSF-3.0")?;
        writeln!(dest, "%%Creator: statplot")?;
        if !self.title.is_empty() {
            writeln!(dest, "%%Title: {}", self.title)?;
        }
        writeln!(dest, "%%BoundingBox: 0 0 {} {}", w.ceil(), h.ceil())?;
        writeln!(dest, "%%HiResBoundingBox: 0 0 {} {}", num(w), num(h))?;
        writeln!(dest, "%%EndComments")?;
        dest.write_all(self.body.as_bytes())?;
        writeln!(dest, "showpage")?;
        writeln!(dest, "%%EOF")?;
        Ok(())
    }

    pub fn save<P: AsRef<path::Path>>(&self, path: P) -> Result<(), canvas::Error> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }

    fn emit_color(&mut self) {
        let c = self.state.current().color;
        if self.color == Some(c) {
            return;
        }
        let [r, g, b] = rgb_unit(c);
        let _ = writeln!(self.body, "{} {} {} setrgbcolor", r, g, b);
        self.color = Some(c);
    }

    fn emit_pen(&mut self) {
        let pen = Pen::from_state(self.state.current());
        if self.pen.as_ref() == Some(&pen) {
            return;
        }
        let _ = writeln!(self.body, "{} setlinewidth", num(pen.width));
        let dashes: Vec<String> = pen.dashes.iter().map(|d| num(*d)).collect();
        let _ = writeln!(self.body, "[{}] {} setdash", dashes.join(" "), num(pen.offset));
        self.pen = Some(pen);
    }

    fn emit_path(&mut self, path: &Path) {
        let segs = device_segments(path, &self.state.current().transform);
        self.body.push_str("newpath\n");
        for seg in segs {
            let _ = match seg {
                Segment::MoveTo(p) => writeln!(self.body, "{} {} moveto", x(p), y(p)),
                Segment::LineTo(p) => writeln!(self.body, "{} {} lineto", x(p), y(p)),
                Segment::CubicTo(p1, p2, p) => writeln!(
                    self.body,
                    "{} {} {} {} {} {} curveto",
                    x(p1),
                    y(p1),
                    x(p2),
                    y(p2),
                    x(p),
                    y(p)
                ),
                Segment::Close => writeln!(self.body, "closepath"),
            };
        }
    }
}

fn x(p: Point) -> String {
    num(p.x.points())
}

fn y(p: Point) -> String {
    num(p.y.points())
}

impl Canvas for EpsCanvas {
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
        if !canvas::should_stroke(self.state.current()) || path.is_empty() {
            return;
        }
        self.emit_color();
        self.emit_pen();
        self.emit_path(path);
        self.body.push_str("stroke\n");
    }

    fn fill(&mut self, path: &Path) {
        if self.state.current().color.alpha() == 0 || path.is_empty() {
            return;
        }
        self.emit_color();
        self.emit_path(path);
        self.body.push_str("fill\n");
    }

    fn fill_string(&mut self, font: &Font, pt: Point, text: &str) {
        self.emit_color();
        let m = self
            .state
            .current()
            .transform
            .pre_concat(&Affine::translation(pt.x.points(), pt.y.points()));
        let _ = writeln!(
            self.body,
            "gsave [{} {} {} {} {} {}] concat /{} findfont {} scalefont setfont 0 0 moveto ({}) show grestore",
            num(m.a),
            num(m.b),
            num(m.c),
            num(m.d),
            num(m.e),
            num(m.f),
            font.name.replace(' ', "-"),
            num(font.size.points()),
            escape(text)
        );
    }
}

/// Escape a PostScript string literal
pub(crate) fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                s.push('\\');
                s.push(c);
            }
            c if c.is_ascii() => s.push(c),
            c => {
                log::debug!("non ASCII character {:?} replaced in PostScript string", c);
                s.push('?');
            }
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use statplot_base::{Length, Rectangle, color};

    use super::*;

    fn output(c: &EpsCanvas) -> String {
        let mut buf = Vec::new();
        c.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn canvas() -> EpsCanvas {
        EpsCanvas::new(Size::new(Length::pt(100.5), Length::pt(50.0)).unwrap())
    }

    #[test]
    fn header_and_trailer() {
        let out = output(&canvas());
        assert!(out.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(out.contains("%%BoundingBox: 0 0 101 50\n"));
        assert!(out.contains("%%HiResBoundingBox: 0 0 100.5 50\n"));
        assert!(out.ends_with("showpage\n%%EOF\n"));
    }

    #[test]
    fn stroke_in_page_coordinates() {
        let mut c = canvas();
        c.set_color(Some(color::RED));
        c.translate(Point::pt(10.0, 5.0));
        c.stroke(&Path::polyline(&[Point::pt(0.0, 0.0), Point::pt(20.0, 0.0)]));
        let out = output(&c);
        assert!(out.contains("1 0 0 setrgbcolor\n1 setlinewidth\n[] 0 setdash\n"));
        assert!(out.contains("newpath\n10 5 moveto\n30 5 lineto\nstroke\n"));
    }

    #[test]
    fn state_emitted_once() {
        let mut c = canvas();
        let r = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(1.0, 1.0));
        c.fill(&r.to_path());
        c.fill(&r.to_path());
        assert_eq!(output(&c).matches("setrgbcolor").count(), 1);
    }

    #[test]
    fn text_escaped() {
        let mut c = canvas();
        c.fill_string(&Font::default(), Point::pt(1.0, 2.0), "f(x)");
        let out = output(&c);
        assert!(out.contains("[1 0 0 1 1 2] concat /Helvetica findfont 12 scalefont"));
        assert!(out.contains("(f\\(x\\)) show"));
    }
}
