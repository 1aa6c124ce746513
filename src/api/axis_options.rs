use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::{Color, TextHAlign, TextPrimitive};

pub const DEFAULT_LABEL_COLOR: &str = "#595959";
pub const DEFAULT_LINE_COLOR: &str = "#BFBFBF";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Text styling shared by axis titles, axis labels and annotations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_weight: Option<String>,
}

impl TextStyle {
    #[must_use]
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref() {
            Some("bold" | "bolder") => true,
            Some(weight) => weight.parse::<u16>().is_ok_and(|value| value >= 600),
            None => false,
        }
    }

    /// Builds a text primitive, falling back to `default_fill` when no fill is set.
    pub fn text_primitive(
        &self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        h_align: TextHAlign,
        default_fill: &str,
    ) -> ChartResult<TextPrimitive> {
        let color = Color::parse(self.fill.as_deref().unwrap_or(default_fill))?;
        Ok(TextPrimitive::new(
            text,
            x,
            y,
            self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            color,
            h_align,
        )
        .with_font(self.font_family.clone(), self.is_bold()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTitleOptions {
    pub style: TextStyle,
    #[serde(default)]
    pub auto_rotate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLineOptions {
    pub stroke: String,
    pub line_width: f64,
}

impl Default for AxisLineOptions {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_LINE_COLOR.to_owned(),
            line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLineOptions {
    pub stroke: String,
    #[serde(default = "default_tick_length")]
    pub length: f64,
    #[serde(default)]
    pub align_tick: bool,
}

impl Default for TickLineOptions {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_LINE_COLOR.to_owned(),
            length: default_tick_length(),
            align_tick: true,
        }
    }
}

fn default_tick_length() -> f64 {
    4.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridOptions {
    pub stroke: String,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelOptions {
    pub offset: f64,
    #[serde(default)]
    pub style: TextStyle,
}

impl Default for AxisLabelOptions {
    fn default() -> Self {
        Self {
            offset: 8.0,
            style: TextStyle::default(),
        }
    }
}

/// Styling for one axis. `None` parts are not drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default)]
    pub title: Option<AxisTitleOptions>,
    #[serde(default)]
    pub line: Option<AxisLineOptions>,
    #[serde(default)]
    pub tick_line: Option<TickLineOptions>,
    #[serde(default)]
    pub grid: Option<GridOptions>,
    #[serde(default)]
    pub label: Option<AxisLabelOptions>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            title: None,
            line: Some(AxisLineOptions::default()),
            tick_line: Some(TickLineOptions::default()),
            grid: None,
            label: Some(AxisLabelOptions::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextStyle;

    #[test]
    fn bold_weight_accepts_keywords_and_numbers() {
        let style = |weight: &str| TextStyle {
            font_weight: Some(weight.to_owned()),
            ..TextStyle::default()
        };
        assert!(style("bold").is_bold());
        assert!(style("700").is_bold());
        assert!(!style("400").is_bold());
        assert!(!TextStyle::default().is_bold());
    }
}
