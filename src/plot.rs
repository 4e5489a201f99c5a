//! The plot: axes, title, legend and plotters laid out on a canvas.
//!
//! Drawing never mutates the plot. The axes are cloned and sanitized for
//! each drawing into a [`Frame`], so drawing twice gives the same output.

use std::sync::Arc;

use statplot_base::{Canvas, ColorU8, Length, Point, Rectangle};
use statplot_text::{TextStyle, X_CENTER, Y_TOP};

use crate::Error;
use crate::axis::{Axis, Orientation};
use crate::defaults;
use crate::draw::{DrawArea, Tiles};
use crate::legend::Legend;
use crate::plotter::{Frame, GlyphBox, Plotter};

mod config;
mod save;

pub use config::{AxisConfig, LegendConfig, PlotConfig, TitleConfig};
pub use save::Format;

#[derive(Debug, Clone)]
pub struct Title {
    pub text: String,
    /// Space between the title and the rest of the plot
    pub padding: Length,
    pub style: TextStyle,
}

impl Default for Title {
    fn default() -> Self {
        Title {
            text: String::new(),
            padding: defaults::TITLE_PADDING,
            style: TextStyle::default()
                .with_size(defaults::TITLE_FONT_SIZE)
                .with_align(X_CENTER, Y_TOP),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Plot {
    pub title: Title,
    /// `None` leaves the canvas unpainted
    pub background_color: Option<ColorU8>,
    pub x: Axis,
    pub y: Axis,
    pub legend: Legend,
    plotters: Vec<Arc<dyn Plotter>>,
    error: Option<Error>,
}

impl Default for Plot {
    fn default() -> Self {
        Plot::new()
    }
}

/// Rectangles of the plot components
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    x_axis: Rectangle,
    y_axis: Rectangle,
    data: Rectangle,
    legend: Rectangle,
}

impl Plot {
    pub fn new() -> Self {
        Plot {
            title: Title::default(),
            background_color: Some(defaults::BACKGROUND_COLOR),
            x: Axis::new(Orientation::Horizontal),
            y: Axis::new(Orientation::Vertical),
            legend: Legend::default(),
            plotters: Vec::new(),
            error: None,
        }
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title.text = text.into();
        self
    }

    /// Add a plotter, widening the axes to its data range
    pub fn add(&mut self, plotter: Arc<dyn Plotter>) {
        if let Some(ranger) = plotter.as_data_ranger() {
            let r = ranger.data_range();
            self.x.extend(r.x_min, r.x_max);
            self.y.extend(r.y_min, r.y_max);
        }
        self.plotters.push(plotter);
    }

    /// Add the plotter if it could be built, otherwise retain the error
    /// to be returned when the plot is saved
    pub fn try_add<P: Plotter + 'static>(&mut self, plotter: Result<P, Error>) {
        match plotter {
            Ok(p) => self.add(Arc::new(p)),
            Err(err) => self.record_error(err),
        }
    }

    /// Retain `err` unless an error is already retained
    pub fn record_error(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn plotters(&self) -> &[Arc<dyn Plotter>] {
        &self.plotters
    }

    /// The axes used for drawing
    pub fn frame(&self) -> Frame {
        let mut x = self.x.clone();
        let mut y = self.y.clone();
        x.sanitize();
        y.sanitize();
        Frame { x, y }
    }

    /// Fail with the retained error, or if an axis can't be drawn
    pub fn check(&self) -> Result<(), Error> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let frame = self.frame();
        frame.x.check()?;
        frame.y.check()
    }

    /// Glyph boxes of the plotters.
    ///
    /// A box whose normalized position lies outside of [0, 1] on one axis is
    /// only ignored when padding along that axis.
    pub fn glyph_boxes(&self, frame: &Frame) -> Vec<GlyphBox> {
        self.plotters
            .iter()
            .filter_map(|p| p.as_glyph_boxer())
            .flat_map(|boxer| boxer.glyph_boxes(frame))
            .collect()
    }

    /// Draw the whole plot into the area
    pub fn draw(&self, area: &mut DrawArea) {
        let frame = self.frame();
        if let Some(color) = self.background_color {
            let path = area.rect.to_path();
            let canvas = area.canvas();
            canvas.set_color(Some(color));
            canvas.fill(&path);
        }

        let mut rect = area.rect;
        if !self.title.text.is_empty() {
            let descent = self.title.style.depth();
            let anchor = Point::new(rect.center().x, rect.max.y + descent);
            area.fill_text(&self.title.style, anchor, &self.title.text);
            rect.max.y -= self.title_height();
        }

        let layout = self.layout(&frame, rect);
        frame.x.draw_horizontal(&mut area.with_rect(layout.x_axis));
        frame.y.draw_vertical(&mut area.with_rect(layout.y_axis));
        for p in &self.plotters {
            p.plot(&mut area.with_rect(layout.data), &frame);
        }
        self.legend.draw(&mut area.with_rect(layout.legend));
    }

    /// Draw the whole plot on the canvas
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.draw(&mut DrawArea::full(canvas));
    }

    /// The rectangle the plotters draw into when the plot is drawn in `rect`
    pub fn data_rect(&self, rect: Rectangle) -> Rectangle {
        let mut rect = rect;
        if !self.title.text.is_empty() {
            rect.max.y -= self.title_height();
        }
        self.layout(&self.frame(), rect).data
    }

    fn title_height(&self) -> Length {
        self.title.style.rectangle(&self.title.text).height() + self.title.padding
    }

    fn layout(&self, frame: &Frame, rect: Rectangle) -> Layout {
        let y_width = frame.y.vertical_size();
        let x_height = frame.x.horizontal_size();
        let boxes = self.glyph_boxes(frame);
        let x_boxes = frame.x.horizontal_glyph_boxes();
        let y_boxes = frame.y.vertical_glyph_boxes();

        let zero = Length::ZERO;
        let x_axis = pad_x(&boxes, &x_boxes, rect.crop(y_width, zero, zero, zero));
        let y_axis = pad_y(&boxes, &y_boxes, rect.crop(zero, zero, x_height, zero));
        let legend = rect.crop(y_width, zero, x_height, zero);
        let data = pad_y(&boxes, &y_boxes, pad_x(&boxes, &x_boxes, legend));
        Layout {
            x_axis,
            y_axis,
            data,
            legend,
        }
    }

    /// Lay out a grid of plots on tiles so that the data areas of each
    /// column share their horizontal extent and those of each row share
    /// their vertical extent.
    ///
    /// `plots` is indexed by row then column. Empty cells give `None`.
    pub fn align(
        plots: &[Vec<Option<&Plot>>],
        tiles: &Tiles,
        rect: &Rectangle,
    ) -> Result<Vec<Vec<Option<Rectangle>>>, Error> {
        if plots.len() != tiles.rows || plots.iter().any(|row| row.len() != tiles.cols) {
            return Err(Error::Domain(format!(
                "plot grid does not match {} rows and {} columns of tiles",
                tiles.rows, tiles.cols
            )));
        }

        #[derive(Clone, Copy)]
        struct Spacing {
            neg: Length,
            pos: Length,
        }
        let zero = Spacing {
            neg: Length::ZERO,
            pos: Length::ZERO,
        };
        let mut x_spacing = vec![zero; tiles.cols];
        let mut y_spacing = vec![zero; tiles.rows];

        let mut cells = Vec::with_capacity(tiles.rows);
        for (j, row) in plots.iter().enumerate() {
            let mut cells_row = Vec::with_capacity(tiles.cols);
            for (i, plot) in row.iter().enumerate() {
                let tile = tiles.at(rect, i, j);
                let Some(plot) = plot else {
                    cells_row.push(None);
                    continue;
                };
                let data = plot.data_rect(tile);
                x_spacing[i].neg = x_spacing[i].neg.max(data.min.x - tile.min.x);
                x_spacing[i].pos = x_spacing[i].pos.max(tile.max.x - data.max.x);
                y_spacing[j].neg = y_spacing[j].neg.max(data.min.y - tile.min.y);
                y_spacing[j].pos = y_spacing[j].pos.max(tile.max.y - data.max.y);
                cells_row.push(Some((tile, data)));
            }
            cells.push(cells_row);
        }

        let aligned = cells
            .into_iter()
            .enumerate()
            .map(|(j, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        cell.map(|(tile, data)| {
                            tile.crop(
                                x_spacing[i].neg - (data.min.x - tile.min.x),
                                x_spacing[i].pos - (tile.max.x - data.max.x),
                                y_spacing[j].neg - (data.min.y - tile.min.y),
                                y_spacing[j].pos - (tile.max.y - data.max.y),
                            )
                        })
                    })
                    .collect()
            })
            .collect();
        Ok(aligned)
    }
}

fn left_most(rect: &Rectangle, boxes: &[&GlyphBox]) -> GlyphBox {
    let mut min_x = rect.min.x;
    let mut l = GlyphBox {
        x: 0.0,
        y: 0.0,
        rect: Rectangle::default(),
    };
    for b in boxes {
        if b.size().x <= Length::ZERO {
            continue;
        }
        let x = rect.min.x + rect.width() * b.x + b.rect.min.x;
        if x < min_x && (0.0..=1.0).contains(&b.x) {
            min_x = x;
            l = **b;
        }
    }
    l
}

fn right_most(rect: &Rectangle, boxes: &[&GlyphBox]) -> GlyphBox {
    let mut max_x = rect.max.x;
    let mut r = GlyphBox {
        x: 1.0,
        y: 0.0,
        rect: Rectangle::default(),
    };
    for b in boxes {
        if b.size().x <= Length::ZERO {
            continue;
        }
        let x = rect.min.x + rect.width() * b.x + b.rect.max.x;
        if x > max_x && (0.0..=1.0).contains(&b.x) {
            max_x = x;
            r = **b;
        }
    }
    r
}

fn bottom_most(rect: &Rectangle, boxes: &[&GlyphBox]) -> GlyphBox {
    let mut min_y = rect.min.y;
    let mut b = GlyphBox {
        x: 0.0,
        y: 0.0,
        rect: Rectangle::default(),
    };
    for gb in boxes {
        if gb.size().y <= Length::ZERO {
            continue;
        }
        let y = rect.min.y + rect.height() * gb.y + gb.rect.min.y;
        if y < min_y && (0.0..=1.0).contains(&gb.y) {
            min_y = y;
            b = **gb;
        }
    }
    b
}

fn top_most(rect: &Rectangle, boxes: &[&GlyphBox]) -> GlyphBox {
    let mut max_y = rect.max.y;
    let mut t = GlyphBox {
        x: 0.0,
        y: 1.0,
        rect: Rectangle::default(),
    };
    for gb in boxes {
        if gb.size().y <= Length::ZERO {
            continue;
        }
        let y = rect.min.y + rect.height() * gb.y + gb.rect.max.y;
        if y > max_y && (0.0..=1.0).contains(&gb.y) {
            max_y = y;
            t = **gb;
        }
    }
    t
}

/// Shrink `rect` horizontally so that no glyph box overflows it.
///
/// The left-most box at normalized `l.x` and the right-most at `r.x` must
/// both fit once the normalized coordinates are mapped on the new extent.
fn pad_x(plot_boxes: &[GlyphBox], axis_boxes: &[GlyphBox], rect: Rectangle) -> Rectangle {
    let boxes: Vec<&GlyphBox> = plot_boxes.iter().chain(axis_boxes).collect();
    let l = left_most(&rect, &boxes);
    let r = right_most(&rect, &boxes);

    let min_x = rect.min.x - l.rect.min.x;
    let max_x = rect.max.x - r.rect.max.x;
    let (lx, rx) = (l.x, r.x);
    if (lx - rx).abs() < 1e-12 {
        return rect;
    }
    let n = (max_x * lx - min_x * rx) / (lx - rx);
    let m = (max_x * (lx - 1.0) - min_x * rx + min_x) / (lx - rx);
    Rectangle::new(Point::new(n, rect.min.y), Point::new(m, rect.max.y))
}

/// Vertical counterpart of [`pad_x`]
fn pad_y(plot_boxes: &[GlyphBox], axis_boxes: &[GlyphBox], rect: Rectangle) -> Rectangle {
    let boxes: Vec<&GlyphBox> = plot_boxes.iter().chain(axis_boxes).collect();
    let b = bottom_most(&rect, &boxes);
    let t = top_most(&rect, &boxes);

    let min_y = rect.min.y - b.rect.min.y;
    let max_y = rect.max.y - t.rect.max.y;
    let (by, ty) = (b.y, t.y);
    if (by - ty).abs() < 1e-12 {
        return rect;
    }
    let n = (max_y * by - min_y * ty) / (by - ty);
    let m = (max_y * (by - 1.0) - min_y * ty + min_y) / (by - ty);
    Rectangle::new(Point::new(rect.min.x, n), Point::new(rect.max.x, m))
}

#[cfg(test)]
mod tests {
    use statplot_base::canvas::{Op, Recorder};
    use statplot_base::{Path, Size};

    use super::*;
    use crate::plotter::{DataRange, DataRanger, GlyphBoxer};
    use crate::tests::{Near, assert_near};

    fn unit_rect() -> Rectangle {
        Rectangle::new(Point::pt(0.0, 0.0), Point::pt(100.0, 100.0))
    }

    fn glyph(x: f64, y: f64, half: f64) -> GlyphBox {
        GlyphBox {
            x,
            y,
            rect: Rectangle::new(Point::pt(-half, -half), Point::pt(half, half)),
        }
    }

    #[derive(Debug)]
    struct Dots(Vec<(f64, f64)>);

    impl Plotter for Dots {
        fn plot(&self, area: &mut DrawArea, frame: &Frame) {
            for &(x, y) in &self.0 {
                let p = frame.map(area, x, y);
                area.canvas().fill(&Path::circle(p, Length::pt(2.0)));
            }
        }

        fn as_data_ranger(&self) -> Option<&dyn DataRanger> {
            Some(self)
        }

        fn as_glyph_boxer(&self) -> Option<&dyn GlyphBoxer> {
            Some(self)
        }
    }

    impl DataRanger for Dots {
        fn data_range(&self) -> DataRange {
            let xs = self.0.iter().map(|p| p.0);
            let ys = self.0.iter().map(|p| p.1);
            DataRange {
                x_min: xs.clone().fold(f64::INFINITY, f64::min),
                x_max: xs.fold(f64::NEG_INFINITY, f64::max),
                y_min: ys.clone().fold(f64::INFINITY, f64::min),
                y_max: ys.fold(f64::NEG_INFINITY, f64::max),
            }
        }
    }

    impl GlyphBoxer for Dots {
        fn glyph_boxes(&self, frame: &Frame) -> Vec<GlyphBox> {
            self.0
                .iter()
                .map(|&(x, y)| glyph(frame.x.norm(x), frame.y.norm(y), 2.0))
                .collect()
        }
    }

    #[test]
    fn pad_without_boxes_is_identity() {
        let r = unit_rect();
        assert_eq!(pad_x(&[], &[], r), r);
        assert_eq!(pad_y(&[], &[], r), r);
    }

    #[test]
    fn padding_keeps_boxes_inside() {
        let r = unit_rect();
        let boxes = [glyph(0.0, 0.0, 5.0), glyph(1.0, 1.0, 5.0)];
        let p = pad_x(&boxes, &[], r);
        assert_near!(abs, p.min.x.points(), 5.0, 1e-9);
        assert_near!(abs, p.max.x.points(), 95.0, 1e-9);
        let p = pad_y(&boxes, &[], r);
        assert_near!(abs, p.min.y.points(), 5.0, 1e-9);
        assert_near!(abs, p.max.y.points(), 95.0, 1e-9);
    }

    #[test]
    fn padding_with_inner_boxes() {
        let r = unit_rect();
        let boxes = [glyph(0.25, 0.5, 40.0)];
        let p = pad_x(&boxes, &[], r);
        // the box at a quarter of the width touches the left side
        let left = p.min.x.points() + p.width().points() * 0.25 - 40.0;
        assert_near!(abs, left, 0.0, 1e-9);
        assert_near!(abs, p.max.x.points(), 100.0, 1e-9);
    }

    #[test]
    fn box_outside_one_axis_pads_the_other() {
        let r = unit_rect();
        let boxes = [glyph(1.0, 1.5, 20.0)];
        let p = pad_x(&boxes, &[], r);
        assert_near!(abs, p.min.x.points(), 0.0, 1e-9);
        assert_near!(abs, p.max.x.points(), 80.0, 1e-9);
        assert_eq!(pad_y(&boxes, &[], r), r);
    }

    #[test]
    fn glyph_boxes_are_kept_per_axis() {
        let mut plot = Plot::new();
        plot.add(Arc::new(Dots(vec![(0.0, 0.0), (1.0, 1.0)])));
        plot.y.max = 2.0 / 3.0;
        let boxes = plot.glyph_boxes(&plot.frame());
        assert_eq!(boxes.len(), 2);
        assert_near!(abs, boxes[1].x, 1.0, 1e-12);
        assert_near!(abs, boxes[1].y, 1.5, 1e-12);
    }

    #[test]
    fn add_widens_axes() {
        let mut plot = Plot::new();
        plot.add(Arc::new(Dots(vec![(1.0, 2.0), (3.0, -4.0)])));
        assert_eq!((plot.x.min, plot.x.max), (1.0, 3.0));
        assert_eq!((plot.y.min, plot.y.max), (-4.0, 2.0));
    }

    #[test]
    fn first_error_is_retained() {
        let mut plot = Plot::new();
        plot.try_add::<Dots>(Err(Error::NaN));
        plot.try_add::<Dots>(Err(Error::Domain("second".into())));
        assert!(matches!(plot.check(), Err(Error::NaN)));
    }

    #[test]
    fn drawing_is_idempotent() {
        let mut plot = Plot::new().with_title("twice");
        plot.add(Arc::new(Dots(vec![(0.0, 0.0), (1.0, 1.0)])));
        let size = Size::new(Length::pt(300.0), Length::pt(200.0)).unwrap();
        let mut first = Recorder::new(size);
        plot.render(&mut first);
        let mut second = Recorder::new(size);
        plot.render(&mut second);
        assert_eq!(first.ops(), second.ops());
        assert_eq!(plot.x.min, 0.0);
    }

    #[test]
    fn data_area_inside_canvas() {
        let mut plot = Plot::new();
        plot.add(Arc::new(Dots(vec![(0.0, 0.0), (10.0, 5.0)])));
        let rect = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(300.0, 200.0));
        let data = plot.data_rect(rect);
        assert!(data.min.x > rect.min.x && data.max.x <= rect.max.x);
        assert!(data.min.y > rect.min.y && data.max.y <= rect.max.y);

        let mut rec = Recorder::new(Size::new(Length::pt(300.0), Length::pt(200.0)).unwrap());
        plot.render(&mut rec);
        let background = rec.ops().iter().position(|op| matches!(op, Op::Fill(_)));
        assert_eq!(background, Some(1));
    }

    #[test]
    fn aligned_columns_share_extent() {
        let mut narrow = Plot::new();
        narrow.add(Arc::new(Dots(vec![(0.0, 0.0), (1.0, 1.0)])));
        let mut wide = Plot::new();
        wide.add(Arc::new(Dots(vec![(0.0, -123456.0), (1.0, 1.0)])));

        let plots = vec![vec![Some(&narrow)], vec![Some(&wide)]];
        let tiles = Tiles::new(2, 1);
        let rect = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(300.0, 400.0));
        let cells = Plot::align(&plots, &tiles, &rect).unwrap();

        let a = narrow.data_rect(cells[0][0].unwrap());
        let b = wide.data_rect(cells[1][0].unwrap());
        assert_near!(abs, a.min.x.points(), b.min.x.points(), 1e-6);
        assert_near!(abs, a.max.x.points(), b.max.x.points(), 1e-6);
    }

    #[test]
    fn align_rejects_mismatched_grid() {
        let plot = Plot::new();
        let plots = vec![vec![Some(&plot), None]];
        let rect = unit_rect();
        assert!(Plot::align(&plots, &Tiles::new(2, 2), &rect).is_err());
        let cells = Plot::align(&plots, &Tiles::new(1, 2), &rect).unwrap();
        assert!(cells[0][1].is_none());
    }
}
