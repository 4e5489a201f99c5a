//! Single page PDF output.
//!
//! Text uses the standard Type 1 fonts by name, no font is embedded.

use std::fmt::Write as _;
use std::{io, path};

use statplot_base::canvas::{self, Canvas, StateStack};
use statplot_base::geom::Segment;
use statplot_base::{Affine, ColorU8, Font, Path, Point, Size};

use crate::{Pen, device_segments, num, rgb_unit};

#[derive(Debug, Clone)]
pub struct PdfCanvas {
    size: Size,
    state: StateStack,
    content: String,
    fonts: Vec<String>,
    fill_color: Option<ColorU8>,
    stroke_color: Option<ColorU8>,
    pen: Option<Pen>,
}

impl PdfCanvas {
    pub fn new(size: Size) -> Self {
        PdfCanvas {
            size,
            state: StateStack::new(),
            content: String::new(),
            fonts: Vec::new(),
            fill_color: None,
            stroke_color: None,
            pen: None,
        }
    }

    /// Assemble the document: catalog, page tree, page, content stream and
    /// one object per font, followed by the cross-reference table.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut objects: Vec<String> = Vec::new();
        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        objects.push("<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string());

        let font_base = 5;
        let mut font_refs = String::new();
        for i in 0..self.fonts.len() {
            let _ = write!(font_refs, " /F{} {} 0 R", i + 1, font_base + i);
        }
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font <<{} >> >> /Contents 4 0 R >>",
            num(self.size.width().points()),
            num(self.size.height().points()),
            font_refs
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            self.content.len(),
            self.content
        ));
        for name in &self.fonts {
            objects.push(format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                name.replace(' ', "-")
            ));
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, obj).as_bytes());
        }
        let xref = out.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for off in offsets {
            let _ = write!(tail, "{:010} 00000 n \n", off);
        }
        let _ = write!(
            tail,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        );
        out.extend_from_slice(tail.as_bytes());
        out
    }

    pub fn write_to<W: io::Write>(&self, mut dest: W) -> Result<(), canvas::Error> {
        if self.state.depth() != 0 {
            log::warn!("PDF written with {} unbalanced push", self.state.depth());
        }
        dest.write_all(&self.to_bytes())?;
        Ok(())
    }

    pub fn save<P: AsRef<path::Path>>(&self, path: P) -> Result<(), canvas::Error> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }

    fn font_resource(&mut self, name: &str) -> usize {
        match self.fonts.iter().position(|f| f == name) {
            Some(i) => i + 1,
            None => {
                self.fonts.push(name.to_string());
                self.fonts.len()
            }
        }
    }

    fn emit_fill_color(&mut self) {
        let c = self.state.current().color;
        if self.fill_color != Some(c) {
            let [r, g, b] = rgb_unit(c);
            let _ = writeln!(self.content, "{} {} {} rg", r, g, b);
            self.fill_color = Some(c);
        }
    }

    fn emit_stroke_style(&mut self) {
        let c = self.state.current().color;
        if self.stroke_color != Some(c) {
            let [r, g, b] = rgb_unit(c);
            let _ = writeln!(self.content, "{} {} {} RG", r, g, b);
            self.stroke_color = Some(c);
        }
        let pen = Pen::from_state(self.state.current());
        if self.pen.as_ref() != Some(&pen) {
            let dashes: Vec<String> = pen.dashes.iter().map(|d| num(*d)).collect();
            let _ = writeln!(
                self.content,
                "{} w\n[{}] {} d",
                num(pen.width),
                dashes.join(" "),
                num(pen.offset)
            );
            self.pen = Some(pen);
        }
    }

    fn emit_path(&mut self, path: &Path) {
        for seg in device_segments(path, &self.state.current().transform) {
            let _ = match seg {
                Segment::MoveTo(p) => writeln!(self.content, "{} m", xy(p)),
                Segment::LineTo(p) => writeln!(self.content, "{} l", xy(p)),
                Segment::CubicTo(p1, p2, p) => {
                    writeln!(self.content, "{} {} {} c", xy(p1), xy(p2), xy(p))
                }
                Segment::Close => writeln!(self.content, "h"),
            };
        }
    }
}

fn xy(p: Point) -> String {
    format!("{} {}", num(p.x.points()), num(p.y.points()))
}

impl Canvas for PdfCanvas {
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
        self.emit_stroke_style();
        self.emit_path(path);
        self.content.push_str("S\n");
    }

    fn fill(&mut self, path: &Path) {
        if self.state.current().color.alpha() == 0 || path.is_empty() {
            return;
        }
        self.emit_fill_color();
        self.emit_path(path);
        self.content.push_str("f\n");
    }

    fn fill_string(&mut self, font: &Font, pt: Point, text: &str) {
        self.emit_fill_color();
        let f = self.font_resource(&font.name);
        let m = self
            .state
            .current()
            .transform
            .pre_concat(&Affine::translation(pt.x.points(), pt.y.points()));
        let _ = writeln!(
            self.content,
            "BT /F{} {} Tf {} {} {} {} {} {} Tm ({}) Tj ET",
            f,
            num(font.size.points()),
            num(m.a),
            num(m.b),
            num(m.c),
            num(m.d),
            num(m.e),
            num(m.f),
            crate::eps::escape(text)
        );
    }
}
