use statplot::canvas::Op;
use statplot::geom::Size;
use statplot::{Plot, Recorder};
use statplot_svg::SvgCanvas;

/// A way of drawing plots to a comparable form
pub trait TestHarness {
    type DrawnPlot: PartialEq;

    fn id() -> &'static str;

    fn draw_plot(plot: &Plot, size: Size) -> Self::DrawnPlot;

    /// A readable difference, or `None` if both drawings are equal
    fn diff_plot(expected: &Self::DrawnPlot, actual: &Self::DrawnPlot) -> Option<String>;

    fn check_same(expected: &Plot, actual: &Plot, size: Size) -> Result<(), String> {
        let expected = Self::draw_plot(expected, size);
        let actual = Self::draw_plot(actual, size);
        match Self::diff_plot(&expected, &actual) {
            Some(diff) => Err(diff),
            None => Ok(()),
        }
    }
}

fn text_diff(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    let diff = similar::TextDiff::from_lines(expected, actual);
    Some(
        diff.unified_diff()
            .header("expected", "actual")
            .context_radius(3)
            .to_string(),
    )
}

/// Draws onto a [`Recorder`], one line per operation
pub struct OpsHarness;

impl OpsHarness {
    pub fn record(plot: &Plot, size: Size) -> Recorder {
        let mut rec = Recorder::new(size);
        plot.render(&mut rec);
        rec
    }

    pub fn ops_to_string(ops: &[Op]) -> String {
        let mut out = String::new();
        for op in ops {
            out.push_str(&format!("{:?}\n", op));
        }
        out
    }
}

impl TestHarness for OpsHarness {
    type DrawnPlot = String;

    fn id() -> &'static str {
        "ops"
    }

    fn draw_plot(plot: &Plot, size: Size) -> String {
        Self::ops_to_string(Self::record(plot, size).ops())
    }

    fn diff_plot(expected: &String, actual: &String) -> Option<String> {
        text_diff(expected, actual)
    }
}

/// Draws onto a [`SvgCanvas`]
pub struct SvgHarness;

impl TestHarness for SvgHarness {
    type DrawnPlot = String;

    fn id() -> &'static str {
        "svg"
    }

    fn draw_plot(plot: &Plot, size: Size) -> String {
        let mut svg = SvgCanvas::new(size);
        plot.render(&mut svg);
        let mut buf = Vec::new();
        svg.write_to(&mut buf).unwrap();
        sort_attributes(&String::from_utf8(buf).unwrap())
    }

    fn diff_plot(expected: &String, actual: &String) -> Option<String> {
        text_diff(expected, actual)
    }
}

/// Rewrite every start tag with its attributes in name order.
/// Attribute order carries no meaning in SVG.
fn sort_attributes(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len());
    let mut rest = svg;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let Some(end) = tag_end(rest) else {
            break;
        };
        out.push_str(&sorted_tag(&rest[..=end]));
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Index of the `>` closing the tag at the start of `s`
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn sorted_tag(tag: &str) -> String {
    if tag.starts_with("</") || tag.starts_with("<!") || tag.starts_with("<?") {
        return tag.to_string();
    }
    let self_closing = tag.ends_with("/>");
    let inner = tag[1..tag.len() - if self_closing { 2 } else { 1 }].trim();

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    for c in inner.chars() {
        match (quote, c) {
            (None, '"' | '\'') => {
                quote = Some(c);
                current.push(c);
            }
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    if parts.is_empty() {
        return tag.to_string();
    }
    let name = parts.remove(0);
    parts.sort();

    let mut out = format!("<{}", name);
    for p in parts {
        out.push(' ');
        out.push_str(&p);
    }
    out.push_str(if self_closing { "/>" } else { ">" });
    out
}

#[test]
fn attributes_are_sorted() {
    let svg = "<svg b=\"1\" a=\"x y\">\n<path d=\"M 0 0\" fill=\"red\"/>\n</svg>";
    assert_eq!(
        sort_attributes(svg),
        "<svg a=\"x y\" b=\"1\">\n<path d=\"M 0 0\" fill=\"red\"/>\n</svg>"
    );
}
