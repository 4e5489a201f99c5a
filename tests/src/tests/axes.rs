use std::sync::Arc;

use statplot::axis::{DefaultTicks, Scale, TickMarker};
use statplot::geom::Length;
use statplot::plot::Format;
use statplot::plotters::Line;
use statplot::{Error, Plot};

use super::{line, line2, plot_with, size_small, strings};
use crate::OpsHarness;

#[test]
fn axes_labels() {
    let mut plot = plot_with(line());
    plot.x.label.text = "x axis".to_string();
    plot.y.label.text = "y axis".to_string();
    let rec = OpsHarness::record(&plot, size_small());
    let texts = strings(rec.ops());
    let x = texts.iter().position(|t| t == "x axis").unwrap();
    let y = texts.iter().position(|t| t == "y axis").unwrap();
    // x axis drawn before y axis
    assert!(x < y);
}

#[test]
fn axes_tick_labels() {
    let plot = plot_with(line2(&[0.0, 1.0], &[-1.98465, 0.43710]));
    let rec = OpsHarness::record(&plot, size_small());
    let texts = strings(rec.ops());
    let y_labels: Vec<&str> = ["-1.6", "-0.8", "0"]
        .into_iter()
        .filter(|l| texts.iter().any(|t| t == l))
        .collect();
    assert_eq!(y_labels, vec!["-1.6", "-0.8", "0"]);
    let pos: Vec<usize> = y_labels
        .iter()
        .map(|l| texts.iter().rposition(|t| t == l).unwrap())
        .collect();
    assert!(pos.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn axes_talbot_ticks() {
    let mut plot = plot_with(line2(&[0.0, 1.0], &[555.6545, 21800.9875]));
    plot.y.tick.marker = TickMarker::from(DefaultTicks::talbot());
    plot.y.auto_rescale = true;
    let frame = plot.frame();
    assert!(frame.y.min <= 555.6545);
    assert!(frame.y.max >= 21800.9875);
    assert!(plot.check().is_ok());
}

#[test]
fn axes_log_of_non_positive() {
    let mut plot = plot_with(line2(&[0.0, 1.0, 2.0], &[0.0, 10.0, 100.0]));
    plot.y.scale = Scale::Log;
    let mut out = Vec::new();
    let res = plot.write_to(Length::pt(100.0), Length::pt(100.0), Format::Svg, &mut out);
    assert!(matches!(res, Err(Error::Domain(_))));
    assert!(out.is_empty());
}

#[test]
fn axes_log() {
    let mut plot = Plot::new();
    plot.add(Arc::new(Line::new(&vec![(1.0, 1.0), (2.0, 10.0), (3.0, 1000.0)]).unwrap()));
    plot.y.scale = Scale::Log;
    assert!(plot.check().is_ok());
    let rec = OpsHarness::record(&plot, size_small());
    assert!(!rec.ops().is_empty());
}
