use std::sync::Arc;

use statplot::Plot;
use statplot::canvas::Op;
use statplot::data::Grid as GridData;
use statplot::geom::{Length, Point, Rectangle};
use statplot::palette::{self, ColorMap};
use statplot::plotters::{BoxPlot, Contour, Grid, Histogram, Scatter};

use super::{line, size_small};
use crate::{OpsHarness, assert_plots_eq};

fn count_strokes(ops: &[Op]) -> usize {
    ops.iter().filter(|op| matches!(op, Op::Stroke(_))).count()
}

#[test]
fn plotters_draw_in_insertion_order() {
    let points = Scatter::new(&vec![(1.5, 1.5)]).unwrap();

    let mut line_first = Plot::new();
    line_first.add(Arc::new(line()));
    line_first.add(Arc::new(points.clone()));

    let mut points_first = Plot::new();
    points_first.add(Arc::new(points));
    points_first.add(Arc::new(line()));

    let a = OpsHarness::record(&line_first, size_small());
    let b = OpsHarness::record(&points_first, size_small());
    // same axes, plotters swapped
    assert_eq!(a.ops().len(), b.ops().len());
    assert_ne!(a.ops(), b.ops());
}

#[test]
fn grid_is_under_the_line() {
    let mut plot = Plot::new();
    plot.add(Arc::new(Grid::new()));
    plot.add(Arc::new(line()));
    let with_grid = OpsHarness::record(&plot, size_small());

    let without_grid = OpsHarness::record(&super::plot_with(line()), size_small());
    assert!(count_strokes(with_grid.ops()) > count_strokes(without_grid.ops()));

    // the line is the last stroke either way
    let last_stroke = |ops: &[Op]| {
        ops.iter()
            .rev()
            .find(|op| matches!(op, Op::Stroke(_)))
            .cloned()
    };
    assert_eq!(last_stroke(with_grid.ops()), last_stroke(without_grid.ops()));
}

#[test]
fn histogram_plot() {
    let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 10.0).collect();
    let mut hist = Histogram::from_values(&values, 10).unwrap();
    hist.normalize(1.0).unwrap();
    let area: f64 = hist.bins.iter().map(|b| b.weight * hist.width).sum();
    assert!((area - 1.0).abs() < 1e-12);

    let mut plot = Plot::new();
    plot.add(Arc::new(hist));
    let frame = plot.frame();
    assert_eq!(frame.y.min, 0.0);
    assert_plots_eq!(&plot, &plot);
}

#[test]
fn box_plots_side_by_side() {
    let mut plot = Plot::new();
    for (i, offset) in [0.0, 2.0, 4.0].into_iter().enumerate() {
        let values: Vec<f64> = (0..20).map(|v| v as f64 + offset).chain([60.0]).collect();
        let bp = BoxPlot::new(Length::pt(20.0), i as f64, &values).unwrap();
        assert_eq!(bp.summary.outside.len(), 1);
        plot.add(Arc::new(bp));
    }
    let frame = plot.frame();
    assert_eq!((frame.x.min, frame.x.max), (0.0, 2.0));
    assert_eq!(frame.y.max, 60.0);
    // the boxes at the ends of the x axis pad the data area
    let canvas = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(400.0, 300.0));
    let boxes = plot.data_rect(canvas);
    let plain = super::plot_with(line()).data_rect(canvas);
    assert!(boxes.max.x < plain.max.x);
}

#[test]
fn contour_with_color_map() {
    let coords: Vec<f64> = (0..40).map(|i| i as f64 - 19.5).collect();
    let grid = GridData::from_fn(coords.clone(), coords, |x, y| (x * x + y * y).sqrt()).unwrap();
    let levels = [4.0, 8.0, 12.0, 16.0];
    let colors = palette::black_body().palette(levels.len()).unwrap();
    let contour = Contour::new(&grid, &levels, Some(colors.clone())).unwrap();
    assert_eq!(contour.levels(), &levels);
    for (i, c) in colors.iter().enumerate() {
        assert_eq!(contour.level_style(i).color, *c);
    }
    for level in levels {
        let paths: Vec<_> = contour.set.level_paths(level).collect();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].closed);
    }

    let mut plot = Plot::new();
    plot.add(Arc::new(contour));
    let rec = OpsHarness::record(&plot, size_small());
    let set_colors: Vec<_> = rec
        .ops()
        .iter()
        .filter_map(|op| match op {
            Op::SetColor(c) => Some(*c),
            _ => None,
        })
        .collect();
    for c in &colors {
        assert!(set_colors.contains(c));
    }
}
