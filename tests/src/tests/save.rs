use std::path::PathBuf;

use statplot::Error;
use statplot::geom::Length;
use statplot::plot::Format;

use super::{line, plot_with};

fn out_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("statplot-tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn render(format: Format) -> Vec<u8> {
    let plot = plot_with(line()).with_title("saved");
    let mut out = Vec::new();
    plot.write_to(Length::pt(200.0), Length::pt(150.0), format, &mut out)
        .unwrap();
    out
}

#[test]
fn save_all_formats() {
    let plot = plot_with(line()).with_title("saved");
    for (name, header) in [
        ("plot.svg", &b"<svg"[..]),
        ("plot.png", &b"\x89PNG"[..]),
        ("plot.eps", &b"%!PS-Adobe-3.0 EPSF-3.0"[..]),
        ("plot.pdf", &b"%PDF-1.4"[..]),
        ("plot.jpg", &b"\xff\xd8\xff"[..]),
        ("plot.jpeg", &b"\xff\xd8\xff"[..]),
    ] {
        let path = out_path(name);
        plot.save(Length::pt(200.0), Length::pt(150.0), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let found = bytes.windows(header.len()).position(|w| w == header);
        assert!(found.is_some(), "{} lacks its header", name);
        std::fs::remove_file(&path).unwrap();
    }
}

#[test]
fn save_tiff() {
    let plot = plot_with(line()).with_title("saved");
    for name in ["plot.tif", "plot.tiff"] {
        let path = out_path(name);
        plot.save(Length::pt(200.0), Length::pt(150.0), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // byte order follows the host
        assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"), "{}", name);
        std::fs::remove_file(&path).unwrap();
    }
}

#[test]
fn save_tex() {
    let out = String::from_utf8(render(Format::Tex)).unwrap();
    assert!(out.contains("\\begin{pgfpicture}"));
    assert!(out.contains("\\end{pgfpicture}"));
}

#[test]
fn save_unsupported_extension() {
    let plot = plot_with(line());
    let path = out_path("plot.bmp");
    let res = plot.save(Length::pt(200.0), Length::pt(150.0), &path);
    assert!(matches!(res, Err(Error::UnsupportedFormat(ext)) if ext == "bmp"));
    assert!(!path.exists());
}

#[test]
fn save_retained_error() {
    let mut plot = plot_with(line());
    plot.try_add(statplot::plotters::Line::new(&vec![(0.0, f64::NAN)]));
    plot.try_add(statplot::plotters::Histogram::from_values(&Vec::<f64>::new(), 0));
    let path = out_path("retained.svg");
    let res = plot.save(Length::pt(200.0), Length::pt(150.0), &path);
    // the first error wins
    assert!(matches!(res, Err(Error::NaN)));
    assert!(!path.exists());
}

#[test]
fn same_plot_same_bytes() {
    assert_eq!(render(Format::Eps), render(Format::Eps));
    assert_eq!(render(Format::Pdf), render(Format::Pdf));
}
