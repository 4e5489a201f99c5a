//! Legend: a column of labelled thumbnails drawn in a corner of the data area

use std::sync::Arc;

use statplot_base::{Length, Point, Rectangle};
use statplot_text::{TextStyle, X_RIGHT};

use crate::defaults;
use crate::draw::DrawArea;
use crate::plotter::Thumbnailer;

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    thumbs: Vec<Arc<dyn Thumbnailer>>,
}

#[derive(Debug, Clone)]
pub struct Legend {
    pub text_style: TextStyle,
    /// Vertical space between entries
    pub padding: Length,
    /// Place the legend at the top rather than at the bottom
    pub top: bool,
    /// Place the legend on the left rather than on the right
    pub left: bool,
    pub x_offs: Length,
    pub y_offs: Length,
    pub thumbnail_width: Length,
    entries: Vec<Entry>,
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            text_style: TextStyle::default().with_size(defaults::LEGEND_FONT_SIZE),
            padding: Length::ZERO,
            top: false,
            left: false,
            x_offs: Length::ZERO,
            y_offs: Length::ZERO,
            thumbnail_width: defaults::LEGEND_THUMBNAIL_WIDTH,
            entries: Vec::new(),
        }
    }
}

impl Legend {
    /// Add an entry. The thumbnails are drawn on top of each other.
    pub fn add(&mut self, text: impl Into<String>, thumbs: Vec<Arc<dyn Thumbnailer>>) {
        self.entries.push(Entry {
            text: text.into(),
            thumbs,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_height(&self) -> Length {
        self.entries
            .iter()
            .map(|e| self.text_style.rectangle(&e.text).max.y)
            .fold(Length::ZERO, Length::max)
    }

    /// Rectangle of each entry thumbnail, from the first entry downward
    pub fn thumbnail_rects(&self, rect: &Rectangle) -> Vec<Rectangle> {
        let enth = self.entry_height();
        let descent = self.text_style.depth();
        let mut x = if self.left {
            rect.min.x
        } else {
            rect.max.x - self.thumbnail_width
        };
        x += self.x_offs;
        let mut y = if self.top {
            rect.max.y - enth - descent
        } else {
            rect.min.y + (enth + self.padding) * self.entries.len().saturating_sub(1) as f64
        };
        y += self.y_offs;

        let mut rects = Vec::with_capacity(self.entries.len());
        for _ in &self.entries {
            rects.push(Rectangle::new(
                Point::new(x, y),
                Point::new(x + self.thumbnail_width, y + enth),
            ));
            y -= enth + self.padding;
        }
        rects
    }

    pub fn draw(&self, area: &mut DrawArea) {
        if self.entries.is_empty() {
            return;
        }
        let mut style = self.text_style.clone();
        let em = style.rectangle(" ").max.x;
        let rects = self.thumbnail_rects(&area.rect);
        let enth = self.entry_height();

        let text_x = if self.left {
            area.rect.min.x + self.thumbnail_width + em + self.x_offs
        } else {
            style.x_align = X_RIGHT;
            area.rect.max.x - self.thumbnail_width - em + self.x_offs
        };

        for (entry, rect) in self.entries.iter().zip(rects) {
            {
                let mut icon = area.with_rect(rect);
                for t in &entry.thumbs {
                    t.thumbnail(&mut icon);
                }
            }
            let h = style.height(&entry.text);
            let y = rect.min.y + (enth - h) / 2.0;
            area.fill_text(&style, Point::new(text_x, y), &entry.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use statplot_base::Size;
    use statplot_base::canvas::{Op, Recorder};

    use super::*;

    #[derive(Debug)]
    struct Swatch;

    impl Thumbnailer for Swatch {
        fn thumbnail(&self, area: &mut DrawArea) {
            let r = area.rect;
            area.fill_polygon(
                statplot_base::color::RED,
                &[r.min, Point::new(r.max.x, r.min.y), r.max, Point::new(r.min.x, r.max.y)],
            );
        }
    }

    fn legend(top: bool, left: bool) -> Legend {
        let mut l = Legend {
            top,
            left,
            ..Default::default()
        };
        l.add("first", vec![Arc::new(Swatch)]);
        l.add("second", vec![Arc::new(Swatch)]);
        l
    }

    #[test]
    fn entries_stack_downward() {
        let rect = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(200.0, 100.0));
        for (top, left) in [(false, false), (true, true)] {
            let rects = legend(top, left).thumbnail_rects(&rect);
            assert_eq!(rects.len(), 2);
            assert!(rects[1].max.y <= rects[0].min.y);
            assert!(rects.iter().all(|r| r.min.y >= rect.min.y && r.max.y <= rect.max.y));
        }
    }

    #[test]
    fn corner_placement() {
        let rect = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(200.0, 100.0));
        let rects = legend(false, false).thumbnail_rects(&rect);
        assert_eq!(rects[0].max.x, rect.max.x);
        assert_eq!(rects[1].min.y, rect.min.y);

        let rects = legend(true, true).thumbnail_rects(&rect);
        assert_eq!(rects[0].min.x, rect.min.x);
        assert!(rects[0].max.y < rect.max.y);
    }

    #[test]
    fn draws_thumbnails() {
        let mut rec = Recorder::new(Size::new(Length::pt(200.0), Length::pt(100.0)).unwrap());
        let l = legend(true, false);
        {
            let mut area = DrawArea::full(&mut rec);
            l.draw(&mut area);
        }
        let fills = rec.ops().iter().filter(|op| matches!(op, Op::Fill(_))).count();
        assert_eq!(fills, 2);
    }
}
