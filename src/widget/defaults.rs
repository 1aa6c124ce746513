use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::api::{CategoryFormatterFn, ChartScene, TextStyle, ValueFormatterFn};
use crate::core::{Datum, Padding, SharedData, Viewport, format_month_label, format_thousands};

use super::props::{
    AreaChartProps, AreaColor, AxisConfig, AxisSideConfig, ExtraHook, MultipleLine, ShapeConfig,
};

pub const DEFAULT_DURATION_MS: u64 = 6000;
pub const DEFAULT_PADDING: Padding = Padding::new(8.0, 8.0, 48.0, 64.0);
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1000;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 350;

static DEFAULT_DATA: LazyLock<SharedData> = LazyLock::new(|| {
    Arc::new(vec![
        Datum::new("2021-01-01", 120.0),
        Datum::new("2021-02-02", 150.0),
        Datum::new("2021-03-03", 250.0),
        Datum::new("2021-04-04", 500.0),
        Datum::new("2021-05-05", 620.0),
        Datum::new("2021-06-06", 500.0),
    ])
});

/// Built-in dataset. Every call returns the same allocation, so repeated
/// defaulting never looks like a data change.
#[must_use]
pub fn default_data() -> SharedData {
    Arc::clone(&DEFAULT_DATA)
}

fn title_style() -> TextStyle {
    TextStyle {
        fill: Some("#E0FCFF".to_owned()),
        font_size: Some(15.0),
        font_family: Some("SourceHanSansCN-Normal".to_owned()),
        font_weight: Some("400".to_owned()),
    }
}

#[must_use]
pub fn default_axis_config() -> AxisConfig {
    AxisConfig {
        x: AxisSideConfig {
            show_title: false,
            title: String::new(),
            range: [0.0, 0.99],
            color: "#20424C".to_owned(),
            title_style: title_style(),
            label_offset: 25.0,
            label_style: TextStyle {
                font_size: Some(20.0),
                font_weight: Some("bold".to_owned()),
                ..TextStyle::default()
            },
            line_width: 3.0,
        },
        y: AxisSideConfig {
            show_title: false,
            title: "货值".to_owned(),
            range: [0.0, 0.95],
            color: "#20424C".to_owned(),
            title_style: title_style(),
            label_offset: 18.0,
            label_style: TextStyle {
                font_size: Some(20.0),
                font_weight: Some("bold".to_owned()),
                font_family: Some("Microsoft YaHei".to_owned()),
                ..TextStyle::default()
            },
            line_width: 3.0,
        },
    }
}

#[must_use]
pub fn default_area_color() -> AreaColor {
    AreaColor::new("#55FAFE", "#20424C")
}

#[must_use]
pub fn default_viewport() -> Viewport {
    Viewport::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
}

/// Props with every default filled in, ready for chart construction.
///
/// Nothing is validated here; bad colors, shapes or sizes surface when the
/// chart renders.
#[derive(Clone)]
pub struct ResolvedAreaConfig {
    pub data: SharedData,
    pub multiple_lines: Vec<MultipleLine>,
    pub axis: AxisConfig,
    pub area_color: AreaColor,
    pub padding: Padding,
    pub shape: ShapeConfig,
    pub viewport: Viewport,
    pub duration: Duration,
    pub extra: ExtraHook,
    pub x_scale_formatter: CategoryFormatterFn,
    pub y_value_formatter: ValueFormatterFn,
}

impl fmt::Debug for ResolvedAreaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAreaConfig")
            .field("data_len", &self.data.len())
            .field("multiple_lines", &self.multiple_lines.len())
            .field("axis", &self.axis)
            .field("area_color", &self.area_color)
            .field("padding", &self.padding)
            .field("shape", &self.shape)
            .field("viewport", &self.viewport)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl ResolvedAreaConfig {
    #[must_use]
    pub fn from_props(props: &AreaChartProps) -> Self {
        Self {
            data: props.data.clone().unwrap_or_else(default_data),
            multiple_lines: props.multiple_lines.clone(),
            axis: props.axis.clone().unwrap_or_else(default_axis_config),
            area_color: props.area_color.clone().unwrap_or_else(default_area_color),
            padding: props.padding.unwrap_or(DEFAULT_PADDING),
            shape: props.shape.clone().unwrap_or_default(),
            viewport: props.viewport.unwrap_or_else(default_viewport),
            duration: props.cycle_period(),
            extra: props
                .extra
                .clone()
                .unwrap_or_else(|| Arc::new(|_: &mut ChartScene| {})),
            x_scale_formatter: props
                .x_scale_formatter
                .clone()
                .unwrap_or_else(|| Arc::new(format_month_label)),
            y_value_formatter: props
                .y_value_formatter
                .clone()
                .unwrap_or_else(|| Arc::new(format_thousands)),
        }
    }
}

impl AreaChartProps {
    #[must_use]
    pub fn resolved(&self) -> ResolvedAreaConfig {
        ResolvedAreaConfig::from_props(self)
    }

    /// Tooltip cycling period; unset or zero falls back to the default.
    #[must_use]
    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(
            self.duration
                .filter(|millis| *millis > 0)
                .unwrap_or(DEFAULT_DURATION_MS),
        )
    }

    /// Dataset the tooltip cycles through: the first series in multi-series
    /// mode, otherwise the single dataset.
    #[must_use]
    pub fn active_dataset(&self) -> SharedData {
        match self.multiple_lines.first() {
            Some(series) => Arc::clone(&series.data),
            None => self.data.clone().unwrap_or_else(default_data),
        }
    }
}
