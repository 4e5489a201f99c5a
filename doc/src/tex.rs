//! PGF/TeX output, to be included in a LaTeX document or compiled on its
//! own when written as a standalone document.

use std::fmt::Write as _;
use std::{io, path};

use statplot_base::canvas::{self, Canvas, StateStack};
use statplot_base::geom::Segment;
use statplot_base::{Affine, ColorU8, Font, Path, Point, Size};

use crate::{Pen, device_segments, num};

#[derive(Debug, Clone)]
pub struct TexCanvas {
    size: Size,
    state: StateStack,
    body: String,
    standalone: bool,
}

impl TexCanvas {
    pub fn new(size: Size) -> Self {
        TexCanvas {
            size,
            state: StateStack::new(),
            body: String::new(),
            standalone: false,
        }
    }

    /// Wrap the picture in a `standalone` LaTeX document
    pub fn with_standalone(self, standalone: bool) -> Self {
        TexCanvas { standalone, ..self }
    }

    pub fn write_to<W: io::Write>(&self, mut dest: W) -> Result<(), canvas::Error> {
        if self.state.depth() != 0 {
            log::warn!("TeX written with {} unbalanced push", self.state.depth());
        }
        if self.standalone {
            writeln!(dest, "\\documentclass{{standalone}}")?;
            writeln!(dest, "\\usepackage{{pgf}}")?;
            writeln!(dest, "\\begin{{document}}")?;
        }
        writeln!(dest, "\\begin{{pgfpicture}}")?;
        writeln!(
            dest,
            "\\pgfpathrectangle{{\\pgfpointorigin}}{{{}}}",
            qpoint(self.size.width().points(), self.size.height().points())
        )?;
        writeln!(dest, "\\pgfusepath{{use as bounding box}}")?;
        dest.write_all(self.body.as_bytes())?;
        writeln!(dest, "\\end{{pgfpicture}}")?;
        if self.standalone {
            writeln!(dest, "\\end{{document}}")?;
        }
        Ok(())
    }

    pub fn save<P: AsRef<path::Path>>(&self, path: P) -> Result<(), canvas::Error> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }

    fn emit_color(&mut self, which: &str, c: ColorU8) {
        let [r, g, b] = c.rgb();
        let _ = writeln!(self.body, "\\definecolor{{sp}}{{RGB}}{{{},{},{}}}", r, g, b);
        let _ = writeln!(self.body, "\\pgfset{}color{{sp}}", which);
        if let Some(op) = c.opacity() {
            let _ = writeln!(self.body, "\\pgfset{}opacity{{{}}}", which, num(op));
        }
    }

    fn emit_path(&mut self, path: &Path) {
        for seg in device_segments(path, &self.state.current().transform) {
            let _ = match seg {
                Segment::MoveTo(p) => writeln!(self.body, "\\pgfpathmoveto{{{}}}", pt_q(p)),
                Segment::LineTo(p) => writeln!(self.body, "\\pgfpathlineto{{{}}}", pt_q(p)),
                Segment::CubicTo(p1, p2, p) => writeln!(
                    self.body,
                    "\\pgfpathcurveto{{{}}}{{{}}}{{{}}}",
                    pt_q(p1),
                    pt_q(p2),
                    pt_q(p)
                ),
                Segment::Close => writeln!(self.body, "\\pgfpathclose"),
            };
        }
    }
}

fn qpoint(x: f64, y: f64) -> String {
    format!("\\pgfqpoint{{{}pt}}{{{}pt}}", num(x), num(y))
}

fn pt_q(p: Point) -> String {
    qpoint(p.x.points(), p.y.points())
}

impl Canvas for TexCanvas {
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
        if !canvas::should_stroke(state) || path.is_empty() {
            return;
        }
        let color = state.color;
        let pen = Pen::from_state(state);
        self.body.push_str("\\begin{pgfscope}\n");
        self.emit_color("stroke", color);
        let _ = writeln!(self.body, "\\pgfsetlinewidth{{{}pt}}", num(pen.width));
        let dashes: String = pen
            .dashes
            .iter()
            .map(|d| format!("{{{}pt}}", num(*d)))
            .collect();
        let _ = writeln!(self.body, "\\pgfsetdash{{{}}}{{{}pt}}", dashes, num(pen.offset));
        self.emit_path(path);
        self.body.push_str("\\pgfusepath{stroke}\n\\end{pgfscope}\n");
    }

    fn fill(&mut self, path: &Path) {
        let color = self.state.current().color;
        if color.alpha() == 0 || path.is_empty() {
            return;
        }
        self.body.push_str("\\begin{pgfscope}\n");
        self.emit_color("fill", color);
        self.emit_path(path);
        self.body.push_str("\\pgfusepath{fill}\n\\end{pgfscope}\n");
    }

    fn fill_string(&mut self, font: &Font, pt: Point, text: &str) {
        let t = self.state.current().transform;
        let at = t.apply(pt);
        let angle = t.b.atan2(t.a).to_degrees();
        let size = font.size.points() * t.mean_scale();
        let color = self.state.current().color;
        self.body.push_str("\\begin{pgfscope}\n");
        self.emit_color("fill", color);
        let mut opts = format!("base,left,at={{{}}}", pt_q(at));
        if angle.abs() > 1e-9 {
            let _ = write!(opts, ",rotate={}", num(angle));
        }
        let _ = writeln!(
            self.body,
            "\\pgftext[{}]{{\\fontsize{{{}pt}}{{{}pt}}\\selectfont {}}}",
            opts,
            num(size),
            num(size * 1.2),
            escape(text)
        );
        self.body.push_str("\\end{pgfscope}\n");
    }
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => s.push_str("\\textbackslash{}"),
            '~' => s.push_str("\\textasciitilde{}"),
            '^' => s.push_str("\\textasciicircum{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                s.push('\\');
                s.push(c);
            }
            c => s.push(c),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use statplot_base::{Length, color};

    use super::*;

    fn output(c: &TexCanvas) -> String {
        let mut buf = Vec::new();
        c.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn canvas() -> TexCanvas {
        TexCanvas::new(Size::new(Length::pt(40.0), Length::pt(30.0)).unwrap())
    }

    #[test]
    fn picture_bounds() {
        let out = output(&canvas());
        assert!(out.starts_with("\\begin{pgfpicture}\n"));
        assert!(out.contains("\\pgfpathrectangle{\\pgfpointorigin}{\\pgfqpoint{40pt}{30pt}}"));
        assert!(out.ends_with("\\end{pgfpicture}\n"));
    }

    #[test]
    fn standalone_document() {
        let out = output(&canvas().with_standalone(true));
        assert!(out.starts_with("\\documentclass{standalone}\n"));
        assert!(out.ends_with("\\end{document}\n"));
    }

    #[test]
    fn stroke_path() {
        let mut c = canvas();
        c.set_color(Some(color::RED));
        c.stroke(&Path::polyline(&[Point::pt(0.0, 0.0), Point::pt(5.0, 5.0)]));
        let out = output(&c);
        assert!(out.contains("\\definecolor{sp}{RGB}{255,0,0}\n\\pgfsetstrokecolor{sp}\n"));
        assert!(out.contains("\\pgfpathmoveto{\\pgfqpoint{0pt}{0pt}}\n\\pgfpathlineto{\\pgfqpoint{5pt}{5pt}}\n\\pgfusepath{stroke}"));
    }

    #[test]
    fn rotated_text() {
        let mut c = canvas();
        c.rotate(std::f64::consts::FRAC_PI_2);
        c.fill_string(&Font::default(), Point::pt(0.0, 0.0), "50%");
        let out = output(&c);
        assert!(out.contains("rotate=90]"));
        assert!(out.contains("\\selectfont 50\\%}"));
    }
}
