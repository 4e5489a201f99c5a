use std::sync::Arc;

use statplot::canvas::Op;
use statplot::geom::Point;
use statplot::plotter::Thumbnailer;
use statplot::plotters::{Line, Scatter};
use statplot::{Plot, Recorder};

use super::{line, size_small, strings};
use crate::OpsHarness;

fn plot_with_legend(top: bool, left: bool) -> Plot {
    let line = Arc::new(line());
    let mut plot = Plot::new();
    plot.add(line.clone());
    plot.legend.top = top;
    plot.legend.left = left;
    plot.legend.add("line", vec![line as Arc<dyn Thumbnailer>]);
    plot
}

/// Anchor of `text`: strings are drawn in a frame translated to their anchor
fn text_position(rec: &Recorder, text: &str) -> Point {
    let mut anchor = None;
    for op in rec.ops() {
        match op {
            Op::Translate(pt) => anchor = Some(*pt),
            Op::FillString { text: t, .. } if t == text => return anchor.unwrap(),
            _ => {}
        }
    }
    panic!("{:?} was not drawn", text);
}

#[test]
fn legend_is_drawn_last() {
    let rec = OpsHarness::record(&plot_with_legend(false, false), size_small());
    assert_eq!(strings(rec.ops()).last().map(String::as_str), Some("line"));
}

#[test]
fn legend_pos_corners() {
    let bottom_right = OpsHarness::record(&plot_with_legend(false, false), size_small());
    let top_right = OpsHarness::record(&plot_with_legend(true, false), size_small());
    let bottom_left = OpsHarness::record(&plot_with_legend(false, true), size_small());

    let br = text_position(&bottom_right, "line");
    let tr = text_position(&top_right, "line");
    let bl = text_position(&bottom_left, "line");
    assert!(tr.y > br.y);
    assert!(bl.x < br.x);
}

#[test]
fn legend_entries_stack_down() {
    let line = Arc::new(line());
    let points = Arc::new(Scatter::new(&vec![(1.0, 2.0), (2.0, 1.0)]).unwrap());
    let other = Arc::new(Line::new(&vec![(1.0, 3.0), (3.0, 1.0)]).unwrap());
    let mut plot = Plot::new();
    plot.add(line.clone());
    plot.add(points.clone());
    plot.add(other.clone());
    plot.legend.top = true;
    plot.legend.add(
        "first",
        vec![line as Arc<dyn Thumbnailer>, points as Arc<dyn Thumbnailer>],
    );
    plot.legend.add("second", vec![other as Arc<dyn Thumbnailer>]);

    let rec = OpsHarness::record(&plot, size_small());
    let first = text_position(&rec, "first");
    let second = text_position(&rec, "second");
    assert!(second.y < first.y);
}
