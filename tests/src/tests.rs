use std::sync::Arc;

use statplot::Plot;
use statplot::canvas::Op;
use statplot::geom::{Length, Size};
use statplot::plotters::{Line, Scatter};

use crate::{OpsHarness, assert_plots_eq};

mod axes;
mod legend;
mod plotters;
mod save;
mod subplots;

pub fn size_small() -> Size {
    Size::new(Length::pt(400.0), Length::pt(300.0)).unwrap()
}

pub fn size_high() -> Size {
    Size::new(Length::pt(400.0), Length::pt(500.0)).unwrap()
}

fn line() -> Line {
    Line::new(&vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap()
}

fn line2(x: &[f64], y: &[f64]) -> Line {
    let xys: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    Line::new(&xys).unwrap()
}

fn plot_with(line: Line) -> Plot {
    let mut plot = Plot::new();
    plot.add(Arc::new(line));
    plot
}

/// Texts drawn, in drawing order
fn strings(ops: &[Op]) -> Vec<String> {
    ops.iter()
        .filter_map(|op| match op {
            Op::FillString { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn empty() {
    let plot = Plot::new();
    assert!(plot.check().is_ok());
    let rec = OpsHarness::record(&plot, size_small());
    // the background is painted first
    assert!(matches!(rec.ops()[0], Op::SetColor(c) if c == statplot::color::WHITE));
    assert!(matches!(rec.ops()[1], Op::Fill(_)));
}

#[test]
fn empty_transparent() {
    let mut plot = Plot::new();
    plot.background_color = None;
    let rec = OpsHarness::record(&plot, size_small());
    assert!(!matches!(rec.ops()[1], Op::Fill(_)));
}

#[test]
fn title() {
    let plot = plot_with(line()).with_title("Title");
    let rec = OpsHarness::record(&plot, size_small());
    assert_eq!(strings(rec.ops()).first().map(String::as_str), Some("Title"));
}

#[test]
fn drawing_twice_is_identical() {
    let mut plot = plot_with(line()).with_title("Title");
    plot.x.label.text = "x".to_string();
    plot.add(Arc::new(Scatter::new(&vec![(1.5, 2.5), (2.5, 1.5)]).unwrap()));
    assert_plots_eq!(&plot, &plot);

    let size = size_small();
    let mut rec = OpsHarness::record(&plot, size);
    let first = rec.ops().to_vec();
    rec.reset();
    plot.render(&mut rec);
    assert_eq!(rec.ops(), &first[..]);
}

#[test]
fn replay_gives_the_same_stream() {
    let plot = plot_with(line()).with_title("Title");
    let rec = OpsHarness::record(&plot, size_small());
    let mut replayed = statplot::Recorder::new(size_small());
    rec.replay(&mut replayed).unwrap();
    assert_eq!(
        OpsHarness::ops_to_string(rec.ops()),
        OpsHarness::ops_to_string(replayed.ops())
    );
}

#[test]
fn config_and_builder_agree() {
    use statplot::plot::PlotConfig;

    let mut config = PlotConfig::default();
    config.title.text = "Title".to_string();
    config.x.label = "x axis".to_string();
    config.y.label = "y axis".to_string();
    let mut from_config = Plot::from_config(&config);
    from_config.add(Arc::new(line()));

    let mut built = plot_with(line()).with_title("Title");
    built.x.label.text = "x axis".to_string();
    built.y.label.text = "y axis".to_string();

    assert_plots_eq!(&built, &from_config);
}
