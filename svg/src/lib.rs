//! SVG back-end for statplot.
//!
//! [`SvgCanvas`] builds an SVG document while being drawn onto. Coordinates
//! are converted from the canvas space (points, Y up) to the SVG user space
//! (points, Y down) as elements are emitted.

use std::{io, path};

use statplot_base::canvas::{self, Canvas, State, StateStack};
use statplot_base::geom::Segment;
use statplot_base::{Affine, Font, Path, Point, Size};
use svg::Node;
use svg::node::element;

#[derive(Debug)]
pub struct SvgCanvas {
    doc: svg::Document,
    size: Size,
    flip: Affine,
    state: StateStack,
}

impl SvgCanvas {
    pub fn new(size: Size) -> Self {
        let w = size.width().points();
        let h = size.height().points();
        let doc = svg::Document::new()
            .set("width", format!("{}pt", num(w)))
            .set("height", format!("{}pt", num(h)))
            .set("viewBox", format!("0 0 {} {}", num(w), num(h)));
        SvgCanvas {
            doc,
            size,
            flip: Affine {
                d: -1.0,
                f: h,
                ..Affine::IDENTITY
            },
            state: StateStack::new(),
        }
    }

    fn device(&self) -> Affine {
        self.flip.pre_concat(&self.state.current().transform)
    }

    fn path_data(&self, path: &Path) -> element::path::Data {
        let t = self.device();
        let mut data = element::path::Data::new();
        for seg in path.segments() {
            data = match seg.transform(&t) {
                Segment::MoveTo(p) => data.move_to(coords(&[p])),
                Segment::LineTo(p) => data.line_to(coords(&[p])),
                Segment::CubicTo(p1, p2, p) => data.cubic_curve_to(coords(&[p1, p2, p])),
                Segment::Close => data.close(),
            };
        }
        data
    }

    pub fn document(&self) -> &svg::Document {
        &self.doc
    }

    pub fn write_to<W: io::Write>(&self, dest: W) -> Result<(), canvas::Error> {
        if self.state.depth() != 0 {
            log::warn!("SVG written with {} unbalanced push", self.state.depth());
        }
        svg::write(dest, &self.doc)?;
        Ok(())
    }

    pub fn save<P: AsRef<path::Path>>(&self, path: P) -> Result<(), canvas::Error> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }
}

impl Canvas for SvgCanvas {
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
        let mut node = element::Path::new().set("d", self.path_data(path));
        node.assign("fill", "none");
        assign_stroke(&mut node, state);
        self.doc.append(node);
    }

    fn fill(&mut self, path: &Path) {
        let state = self.state.current();
        if path.is_empty() || state.color.alpha() == 0 {
            return;
        }
        let mut node = element::Path::new().set("d", self.path_data(path));
        assign_fill(&mut node, state);
        self.doc.append(node);
    }

    fn fill_string(&mut self, font: &Font, pt: Point, text: &str) {
        if text.is_empty() {
            return;
        }
        // SVG glyphs grow downward, hence the final flip
        let m = self
            .device()
            .pre_concat(&Affine::translation(pt.x.points(), pt.y.points()))
            .pre_concat(&Affine::scaling(1.0, -1.0));
        let mut node = element::Text::new(text)
            .set("x", 0)
            .set("y", 0)
            .set("font-family", font.name.as_str())
            .set("font-size", num(font.size.points()));
        assign_fill(&mut node, self.state.current());
        node.assign("transform", matrix(&m));
        self.doc.append(node);
    }
}

fn num(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn coords(pts: &[Point]) -> Vec<f32> {
    pts.iter()
        .flat_map(|p| [p.x.points() as f32, p.y.points() as f32])
        .collect()
}

fn matrix(m: &Affine) -> String {
    format!(
        "matrix({} {} {} {} {} {})",
        num(m.a),
        num(m.b),
        num(m.c),
        num(m.d),
        num(m.e),
        num(m.f)
    )
}

fn assign_fill<N: Node>(node: &mut N, state: &State) {
    node.assign("fill", state.color.html());
    if let Some(opacity) = state.color.opacity() {
        node.assign("fill-opacity", num(opacity));
    }
}

fn assign_stroke<N: Node>(node: &mut N, state: &State) {
    let scale = state.transform.mean_scale();
    node.assign("stroke", state.color.html());
    node.assign("stroke-width", num(state.device_line_width()));
    if let Some(opacity) = state.color.opacity() {
        node.assign("stroke-opacity", num(opacity));
    }
    if !state.dashes.is_empty() {
        let array: Vec<String> = state
            .dashes
            .iter()
            .map(|d| num(d.points() * scale))
            .collect();
        node.assign("stroke-dasharray", array.join(" "));
        if state.dash_offset.points() != 0.0 {
            node.assign("stroke-dashoffset", num(state.dash_offset.points() * scale));
        }
    }
}

#[cfg(test)]
mod tests {
    use statplot_base::color;
    use statplot_base::Length;

    use super::*;

    fn canvas() -> SvgCanvas {
        SvgCanvas::new(Size::new(Length::pt(200.0), Length::pt(100.0)).unwrap())
    }

    fn render(c: &SvgCanvas) -> String {
        let mut buf = Vec::new();
        c.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header() {
        let out = render(&canvas());
        assert!(out.contains("<svg"));
        assert!(out.contains("viewBox=\"0 0 200 100\""));
        assert!(out.contains("width=\"200pt\""));
    }

    #[test]
    fn y_is_flipped() {
        let mut c = canvas();
        c.set_color(Some(color::RED));
        c.stroke(&Path::polyline(&[Point::pt(0.0, 0.0), Point::pt(10.0, 20.0)]));
        let out = render(&c);
        assert!(out.contains("M0,100 L10,80"), "{}", out);
        assert!(out.contains("stroke=\"#ff0000\""));
        assert!(out.contains("fill=\"none\""));
    }

    #[test]
    fn zero_width_does_not_stroke() {
        let mut c = canvas();
        c.set_line_width(Length::ZERO);
        c.stroke(&Path::polyline(&[Point::pt(0.0, 0.0), Point::pt(10.0, 20.0)]));
        assert!(!render(&c).contains("<path"));
    }

    #[test]
    fn text_element() {
        let mut c = canvas();
        c.fill_string(&Font::default(), Point::pt(5.0, 10.0), "ab");
        let out = render(&c);
        assert!(out.contains(">ab<"), "{}", out);
        assert!(out.contains("matrix(1 0 0 1 5 90)"), "{}", out);
        assert!(out.contains("font-family=\"Helvetica\""));
    }

    #[test]
    fn num_format() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.25), "1.25");
        assert_eq!(num(-0.00001), "0");
        assert_eq!(num(100.0), "100");
    }
}
