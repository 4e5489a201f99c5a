//! Declarative plot configuration.
//!
//! A [`PlotConfig`] carries the settings of a plot without its data, so
//! that a look can be shared between plots.

use statplot_base::{ColorU8, Length};

use crate::axis::{Scale, TickMarker};
use crate::defaults;
use crate::plot::Plot;

#[derive(Debug, Clone)]
pub struct TitleConfig {
    pub text: String,
    pub padding: Length,
    pub font_size: Length,
}

impl Default for TitleConfig {
    fn default() -> Self {
        TitleConfig {
            text: String::new(),
            padding: defaults::TITLE_PADDING,
            font_size: defaults::TITLE_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AxisConfig {
    pub label: String,
    /// Fixed range. `None` lets the plotters set it.
    pub range: Option<(f64, f64)>,
    pub padding: Length,
    pub scale: Scale,
    pub marker: TickMarker,
    pub auto_rescale: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            label: String::new(),
            range: None,
            padding: defaults::AXIS_PADDING,
            scale: Scale::Linear,
            marker: TickMarker::default(),
            auto_rescale: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LegendConfig {
    pub top: bool,
    pub left: bool,
    pub x_offs: Length,
    pub y_offs: Length,
    pub padding: Length,
    pub thumbnail_width: Length,
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            top: false,
            left: false,
            x_offs: Length::ZERO,
            y_offs: Length::ZERO,
            padding: Length::ZERO,
            thumbnail_width: defaults::LEGEND_THUMBNAIL_WIDTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub background_color: Option<ColorU8>,
    pub title: TitleConfig,
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub legend: LegendConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            background_color: Some(defaults::BACKGROUND_COLOR),
            title: TitleConfig::default(),
            x: AxisConfig::default(),
            y: AxisConfig::default(),
            legend: LegendConfig::default(),
        }
    }
}

fn configure_axis(axis: &mut crate::axis::Axis, config: &AxisConfig) {
    axis.label.text = config.label.clone();
    if let Some((min, max)) = config.range {
        axis.min = min;
        axis.max = max;
    }
    axis.padding = config.padding;
    axis.scale = config.scale.clone();
    axis.tick.marker = config.marker.clone();
    axis.auto_rescale = config.auto_rescale;
}

impl Plot {
    /// A plot without plotters, set up from `config`
    pub fn from_config(config: &PlotConfig) -> Plot {
        let mut plot = Plot::new();
        plot.background_color = config.background_color;

        plot.title.text = config.title.text.clone();
        plot.title.padding = config.title.padding;
        plot.title.style.font.size = config.title.font_size;

        configure_axis(&mut plot.x, &config.x);
        configure_axis(&mut plot.y, &config.y);

        let legend = &mut plot.legend;
        legend.top = config.legend.top;
        legend.left = config.legend.left;
        legend.x_offs = config.legend.x_offs;
        legend.y_offs = config.legend.y_offs;
        legend.padding = config.legend.padding;
        legend.thumbnail_width = config.legend.thumbnail_width;
        plot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::LogTicks;

    #[test]
    fn default_config_matches_new_plot() {
        let plot = Plot::from_config(&PlotConfig::default());
        let new = Plot::new();
        assert_eq!(plot.background_color, new.background_color);
        assert_eq!(plot.title.style, new.title.style);
        assert_eq!(plot.x.label, new.x.label);
        assert_eq!(plot.y.padding, new.y.padding);
        assert!(plot.x.min.is_infinite());
    }

    #[test]
    fn config_is_applied() {
        let config = PlotConfig {
            background_color: None,
            title: TitleConfig {
                text: "Decay".into(),
                ..Default::default()
            },
            y: AxisConfig {
                label: "count".into(),
                range: Some((1.0, 1000.0)),
                scale: Scale::Log,
                marker: LogTicks::default().into(),
                ..Default::default()
            },
            legend: LegendConfig {
                top: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let plot = Plot::from_config(&config);
        assert!(plot.background_color.is_none());
        assert_eq!(plot.title.text, "Decay");
        assert_eq!(plot.y.label.text, "count");
        assert_eq!((plot.y.min, plot.y.max), (1.0, 1000.0));
        assert!(plot.y.scale.is_log());
        assert!(plot.legend.top);
        assert!(plot.check().is_ok());
    }
}
