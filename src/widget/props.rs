use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{CategoryFormatterFn, ChartScene, TextStyle, ValueFormatterFn};
use crate::core::{Padding, SharedData, Viewport};
use crate::error::{ChartError, ChartResult};

/// Decoration hook run on the fully configured chart right before its first render.
pub type ExtraHook = Arc<dyn Fn(&mut ChartScene) + Send + Sync + 'static>;

/// Gradient endpoints of an area fill, top color first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaColor {
    pub source: String,
    pub target: String,
}

impl AreaColor {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Vertical gradient spec running from `source` at the top to `target`.
    #[must_use]
    pub fn gradient(&self) -> String {
        format!("l(90) 0:{} 1:{}", self.source, self.target)
    }
}

/// One series of a multi-series chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleLine {
    /// Numeric field of every datum holding this series' value.
    pub key: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub data: SharedData,
    pub area_color: AreaColor,
}

impl MultipleLine {
    #[must_use]
    pub fn new(key: impl Into<String>, data: SharedData, area_color: AreaColor) -> Self {
        Self {
            key: key.into(),
            alias: None,
            data,
            area_color,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Styling of one axis as the widget exposes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSideConfig {
    #[serde(default)]
    pub show_title: bool,
    #[serde(default)]
    pub title: String,
    /// Normalized plot range `[start, end]` covered by the scale.
    pub range: [f64; 2],
    /// Axis line color.
    pub color: String,
    #[serde(default)]
    pub title_style: TextStyle,
    pub label_offset: f64,
    #[serde(default)]
    pub label_style: TextStyle,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub x: AxisSideConfig,
    pub y: AxisSideConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub line: String,
    pub area: String,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            line: "line".to_owned(),
            area: "area".to_owned(),
        }
    }
}

/// Caller-facing widget properties. Every field is optional; unset fields
/// take the built-in defaults when the chart is constructed.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaChartProps {
    pub class_name: Option<String>,
    pub data: Option<SharedData>,
    pub multiple_lines: Vec<MultipleLine>,
    /// Replaces the default axis configuration as a whole.
    pub axis: Option<AxisConfig>,
    pub area_color: Option<AreaColor>,
    pub padding: Option<Padding>,
    pub shape: Option<ShapeConfig>,
    pub viewport: Option<Viewport>,
    /// Tooltip cycling period in milliseconds. `0` means the default.
    pub duration: Option<u64>,
    #[serde(skip)]
    pub extra: Option<ExtraHook>,
    #[serde(skip)]
    pub x_scale_formatter: Option<CategoryFormatterFn>,
    #[serde(skip)]
    pub y_value_formatter: Option<ValueFormatterFn>,
}

impl fmt::Debug for AreaChartProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AreaChartProps")
            .field("class_name", &self.class_name)
            .field("data_len", &self.data.as_ref().map(|data| data.len()))
            .field("multiple_lines", &self.multiple_lines.len())
            .field("axis", &self.axis)
            .field("area_color", &self.area_color)
            .field("padding", &self.padding)
            .field("shape", &self.shape)
            .field("viewport", &self.viewport)
            .field("duration", &self.duration)
            .field("extra", &self.extra.is_some())
            .field("x_scale_formatter", &self.x_scale_formatter.is_some())
            .field("y_value_formatter", &self.y_value_formatter.is_some())
            .finish()
    }
}

impl AreaChartProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads props from JSON. Hooks cannot be expressed in JSON and stay unset.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse props json: {e}")))
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: SharedData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: MultipleLine) -> Self {
        self.multiple_lines.push(series);
        self
    }

    #[must_use]
    pub fn with_multiple_lines(mut self, multiple_lines: Vec<MultipleLine>) -> Self {
        self.multiple_lines = multiple_lines;
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axis = Some(axis);
        self
    }

    #[must_use]
    pub fn with_area_color(mut self, area_color: AreaColor) -> Self {
        self.area_color = Some(area_color);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: ShapeConfig) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_extra<F>(mut self, extra: F) -> Self
    where
        F: Fn(&mut ChartScene) + Send + Sync + 'static,
    {
        self.extra = Some(Arc::new(extra));
        self
    }

    #[must_use]
    pub fn with_x_scale_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.x_scale_formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_y_value_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.y_value_formatter = Some(Arc::new(formatter));
        self
    }

    /// True when both props point at the same dataset, or neither sets one.
    ///
    /// Contents are not compared: an equal but freshly allocated dataset
    /// counts as a change.
    #[must_use]
    pub fn same_data(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{AreaChartProps, AreaColor};
    use crate::core::{Datum, shared};

    #[test]
    fn data_identity_ignores_contents() {
        let data = shared(vec![Datum::new("2021-01-01", 1.0)]);
        let first = AreaChartProps::new().with_data(data.clone());
        let same = AreaChartProps::new().with_data(data.clone()).with_class_name("x");
        let copy = AreaChartProps::new().with_data(shared(data.to_vec()));
        assert!(first.same_data(&same));
        assert!(!first.same_data(&copy));
        assert!(AreaChartProps::new().same_data(&AreaChartProps::new()));
        assert!(!first.same_data(&AreaChartProps::new()));
    }

    #[test]
    fn props_load_from_json() {
        let props = AreaChartProps::from_json_str(
            r##"{
                "class_name": "sales",
                "data": [{"Date": "2021-01-01", "value": 120}],
                "multiple_lines": [{
                    "key": "north",
                    "alias": "North",
                    "data": [{"Date": "2021-01-01", "north": 3}],
                    "area_color": {"source": "#fff", "target": "#000"}
                }],
                "padding": [1, 2, 3, 4],
                "duration": 2500
            }"##,
        )
        .expect("props");
        assert_eq!(props.class_name.as_deref(), Some("sales"));
        assert_eq!(props.data.as_ref().map(|data| data.len()), Some(1));
        assert_eq!(props.multiple_lines[0].alias.as_deref(), Some("North"));
        assert_eq!(props.multiple_lines[0].data[0].field("north"), Some(3.0));
        assert_eq!(props.duration, Some(2500));
        assert!(props.extra.is_none());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(AreaChartProps::from_json_str("{\"padding\": 3}").is_err());
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        assert_eq!(
            AreaColor::new("#55FAFE", "#20424C").gradient(),
            "l(90) 0:#55FAFE 1:#20424C"
        );
        assert_eq!(
            AreaChartProps::new()
                .with_duration(Duration::from_secs(2))
                .duration,
            Some(2000)
        );
    }
}
