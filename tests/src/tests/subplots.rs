use statplot::Plot;
use statplot::canvas::Op;
use statplot::draw::{DrawArea, Tiles};
use statplot::geom::{Length, Point, Rectangle};

use super::{line2, plot_with, size_high};
use crate::OpsHarness;

fn near(a: Length, b: Length) -> bool {
    (a - b).points().abs() < 1.0
}

fn grid_of_plots() -> Vec<Vec<Plot>> {
    let small = plot_with(line2(&[0.0, 1.0], &[0.0, 1.0]));
    let wide_labels = plot_with(line2(&[0.0, 1.0], &[-123456.0, 654321.0]));
    let mut titled = plot_with(line2(&[0.0, 1.0], &[0.0, 1.0])).with_title("titled");
    titled.x.label.text = "x".to_string();
    let plain = plot_with(line2(&[0.0, 1.0], &[0.0, 1.0]));
    vec![vec![small, titled], vec![wide_labels, plain]]
}

#[test]
fn subplots_aligned() {
    let plots = grid_of_plots();
    let refs: Vec<Vec<Option<&Plot>>> = plots
        .iter()
        .map(|row| row.iter().map(Some).collect())
        .collect();
    let tiles = Tiles::new(2, 2).with_padding(Length::pt(10.0), Length::pt(10.0));
    let rect = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(400.0, 500.0));
    let cells = Plot::align(&refs, &tiles, &rect).unwrap();

    let data: Vec<Vec<Rectangle>> = plots
        .iter()
        .zip(&cells)
        .map(|(row, cells)| {
            row.iter()
                .zip(cells)
                .map(|(plot, cell)| plot.data_rect(cell.unwrap()))
                .collect()
        })
        .collect();

    for col in 0..2 {
        assert!(near(data[0][col].min.x, data[1][col].min.x));
        assert!(near(data[0][col].max.x, data[1][col].max.x));
    }
    for row in 0..2 {
        assert!(near(data[row][0].min.y, data[row][1].min.y));
        assert!(near(data[row][0].max.y, data[row][1].max.y));
    }
}

#[test]
fn subplots_on_one_canvas() {
    let plots = grid_of_plots();
    let refs: Vec<Vec<Option<&Plot>>> = vec![
        vec![Some(&plots[0][0]), None],
        vec![Some(&plots[1][0]), Some(&plots[1][1])],
    ];
    let tiles = Tiles::new(2, 2);
    let size = size_high();
    let rect = Rectangle::new(Point::pt(0.0, 0.0), Point::new(size.width(), size.height()));
    let cells = Plot::align(&refs, &tiles, &rect).unwrap();
    assert!(cells[0][1].is_none());

    let mut rec = statplot::Recorder::new(size);
    for (row, cells) in refs.iter().zip(&cells) {
        for (plot, cell) in row.iter().zip(cells) {
            if let (Some(plot), Some(cell)) = (plot, cell) {
                plot.draw(&mut DrawArea::new(&mut rec, *cell));
            }
        }
    }
    let backgrounds = rec
        .ops()
        .windows(2)
        .filter(|w| {
            matches!(w[0], Op::SetColor(c) if c == statplot::color::WHITE)
                && matches!(w[1], Op::Fill(_))
        })
        .count();
    assert!(backgrounds >= 3);

    // one plot alone draws less
    let alone = OpsHarness::record(&plots[1][1], size);
    assert!(alone.ops().len() < rec.ops().len());
}
