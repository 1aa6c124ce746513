use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Four-sided inner spacing in pixels.
///
/// Serialized as `[top, right, bottom, left]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl From<[f64; 4]> for Padding {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl From<Padding> for [f64; 4] {
    fn from(padding: Padding) -> Self {
        [padding.top, padding.right, padding.bottom, padding.left]
    }
}

/// Point in screen pixels relative to the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Plotting region left after padding is applied to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn from_viewport(viewport: Viewport, padding: Padding) -> ChartResult<Self> {
        let viewport = viewport.validate()?;
        let width = f64::from(viewport.width) - padding.left - padding.right;
        let height = f64::from(viewport.height) - padding.top - padding.bottom;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "padding leaves no plot area inside {}x{} viewport",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            left: padding.left,
            top: padding.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Maps a normalized horizontal position (0 = left edge) to pixels.
    #[must_use]
    pub fn x_at(self, normalized: f64) -> f64 {
        self.left + normalized * self.width
    }

    /// Maps a normalized vertical position (0 = bottom edge) to pixels.
    #[must_use]
    pub fn y_at(self, normalized: f64) -> f64 {
        self.bottom() - normalized * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::{Padding, PlotRect, Viewport};

    #[test]
    fn plot_rect_subtracts_padding_in_css_order() {
        let rect = PlotRect::from_viewport(Viewport::new(1000, 350), Padding::new(8.0, 8.0, 48.0, 64.0))
            .expect("plot rect");
        assert_eq!(rect.left, 64.0);
        assert_eq!(rect.top, 8.0);
        assert_eq!(rect.width, 928.0);
        assert_eq!(rect.height, 294.0);
        assert_eq!(rect.bottom(), 302.0);
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let result = PlotRect::from_viewport(Viewport::new(100, 100), Padding::uniform(60.0));
        assert!(result.is_err());
    }

    #[test]
    fn padding_serializes_as_four_element_array() {
        let json = serde_json::to_string(&Padding::new(1.0, 2.0, 3.0, 4.0)).expect("serialize");
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
    }
}
