use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Fill, LinearGradient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Area,
    Line,
    Point,
}

impl GeometryKind {
    #[must_use]
    pub fn default_shape(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Line => "line",
            Self::Point => "circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryStyle {
    #[serde(default)]
    pub fill_opacity: Option<f64>,
    #[serde(default)]
    pub line_width: Option<f64>,
}

/// One mark layer inside a view: an area, a line or a set of points.
///
/// Values are stored as given and only interpreted when the chart renders,
/// so malformed shapes or colors surface as render errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub kind: GeometryKind,
    position: Option<String>,
    color: Option<String>,
    style: GeometryStyle,
    shape: Option<String>,
    size: Option<f64>,
}

impl Geometry {
    pub(crate) fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            position: None,
            color: None,
            style: GeometryStyle::default(),
            shape: None,
            size: None,
        }
    }

    /// Sets the `x*y` field pair, e.g. `Date*value`.
    pub fn position(&mut self, position: impl Into<String>) -> &mut Self {
        self.position = Some(position.into());
        self
    }

    /// Sets a `#rrggbb` color or a `l(<angle>) <offset>:<color> ...` gradient.
    pub fn color(&mut self, color: impl Into<String>) -> &mut Self {
        self.color = Some(color.into());
        self
    }

    pub fn style(&mut self, style: GeometryStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn shape(&mut self, shape: impl Into<String>) -> &mut Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn size(&mut self, size: f64) -> &mut Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn style_options(&self) -> &GeometryStyle {
        &self.style
    }

    #[must_use]
    pub fn size_or(&self, default: f64) -> f64 {
        self.size.unwrap_or(default)
    }

    #[must_use]
    pub fn shape_name(&self) -> &str {
        self.shape.as_deref().unwrap_or(self.kind.default_shape())
    }

    #[must_use]
    pub fn color_spec(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Splits the position spec into `(x_field, y_field)`.
    pub fn position_fields(&self) -> ChartResult<(&str, &str)> {
        let position = self.position.as_deref().ok_or_else(|| {
            ChartError::InvalidData(format!("{:?} geometry has no position", self.kind))
        })?;
        match position.split_once('*') {
            Some((x, y)) if !x.is_empty() && !y.is_empty() && !y.contains('*') => Ok((x, y)),
            _ => Err(ChartError::InvalidData(format!(
                "position `{position}` must look like `x*y`"
            ))),
        }
    }

    /// Resolves the configured color into a fill, using `fallback` when unset.
    pub fn fill(&self, fallback: &str) -> ChartResult<Fill> {
        let spec = self.color.as_deref().unwrap_or(fallback);
        if spec.trim_start().starts_with("l(") {
            LinearGradient::parse(spec).map(Fill::Linear)
        } else {
            Color::parse(spec).map(Fill::Solid)
        }
    }

    /// Single color for strokes; gradients contribute their first stop.
    pub fn stroke_color(&self, fallback: &str) -> ChartResult<Color> {
        Ok(match self.fill(fallback)? {
            Fill::Solid(color) => color,
            Fill::Linear(gradient) => gradient.stops[0].color,
        })
    }

    /// Color text for tooltip items and snapshots.
    #[must_use]
    pub fn legend_color(&self) -> Option<String> {
        let spec = self.color.as_deref()?;
        if spec.trim_start().starts_with("l(") {
            spec.split_whitespace()
                .nth(1)
                .and_then(|stop| stop.split_once(':'))
                .map(|(_, color)| color.to_owned())
        } else {
            Some(spec.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Geometry, GeometryKind};
    use crate::render::Fill;

    #[test]
    fn position_spec_splits_into_fields() {
        let mut geometry = Geometry::new(GeometryKind::Line);
        geometry.position("Date*sales");
        assert_eq!(geometry.position_fields().expect("fields"), ("Date", "sales"));

        geometry.position("Date");
        assert!(geometry.position_fields().is_err());
        geometry.position("Date*a*b");
        assert!(geometry.position_fields().is_err());
    }

    #[test]
    fn gradient_colors_resolve_to_linear_fill() {
        let mut geometry = Geometry::new(GeometryKind::Area);
        geometry.color("l(90) 0:#55FAFE 1:#20424C");
        assert!(matches!(geometry.fill("#000").expect("fill"), Fill::Linear(_)));
        assert_eq!(geometry.legend_color().as_deref(), Some("#55FAFE"));
    }

    #[test]
    fn unset_shape_uses_kind_default() {
        assert_eq!(Geometry::new(GeometryKind::Point).shape_name(), "circle");
        let mut geometry = Geometry::new(GeometryKind::Area);
        geometry.shape("smooth");
        assert_eq!(geometry.shape_name(), "smooth");
    }
}
