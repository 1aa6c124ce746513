use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ChartError::InvalidColor(input.to_owned()))?;
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_owned(),
            _ => return Err(ChartError::InvalidColor(input.to_owned())),
        };
        let channel = |index: usize| -> ChartResult<f64> {
            let pair = expanded
                .get(index * 2..index * 2 + 2)
                .ok_or_else(|| ChartError::InvalidColor(input.to_owned()))?;
            u8::from_str_radix(pair, 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidColor(input.to_owned()))
        };
        let alpha = if expanded.len() == 8 { channel(3)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, alpha))
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Linear gradient spanning the bounding box of the filled shape.
///
/// `angle_deg` follows the `l(<angle>)` convention: 0 runs left to right,
/// 90 runs top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle_deg: f64,
    pub stops: SmallVec<[GradientStop; 4]>,
}

impl LinearGradient {
    /// Parses `l(<angle>) <offset>:<color> <offset>:<color> ...`.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidColor(input.to_owned());
        let rest = input.trim().strip_prefix("l(").ok_or_else(invalid)?;
        let (angle, stops_text) = rest.split_once(')').ok_or_else(invalid)?;
        let angle_deg: f64 = angle.trim().parse().map_err(|_| invalid())?;

        let mut stops = SmallVec::new();
        for token in stops_text.split_whitespace() {
            let (offset, color) = token.split_once(':').ok_or_else(invalid)?;
            let offset: f64 = offset.parse().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&offset) {
                return Err(invalid());
            }
            stops.push(GradientStop {
                offset,
                color: Color::parse(color)?,
            });
        }
        if stops.len() < 2 {
            return Err(invalid());
        }
        Ok(Self { angle_deg, stops })
    }

    /// Start and end points of the gradient axis over a bounding box.
    #[must_use]
    pub fn endpoints(&self, min: (f64, f64), max: (f64, f64)) -> ((f64, f64), (f64, f64)) {
        let radians = self.angle_deg.to_radians();
        let (dx, dy) = (radians.cos(), radians.sin());
        let center = ((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0);
        let half_w = (max.0 - min.0) / 2.0;
        let half_h = (max.1 - min.1) / 2.0;
        let reach = (half_w * dx).abs() + (half_h * dy).abs();
        (
            (center.0 - dx * reach, center.1 - dy * reach),
            (center.0 + dx * reach, center.1 + dy * reach),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Linear(LinearGradient),
}

impl Fill {
    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Solid(color) => color.validate(),
            Self::Linear(gradient) => {
                for stop in &gradient.stops {
                    stop.color.validate()?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Axis-aligned rectangle, used for tooltip boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_border(mut self, color: Color, width: f64) -> Self {
        self.border_color = color;
        self.border_width = width;
        self
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for value in [self.x, self.y, self.width, self.height] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "rect geometry must be finite".to_owned(),
                ));
            }
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Closed filled polygon; the first vertex is not repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub points: Vec<(f64, f64)>,
    pub fill: Fill,
    pub opacity: f64,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, fill: Fill, opacity: f64) -> Self {
        Self {
            points,
            fill,
            opacity,
        }
    }

    /// Bounding box as `(min, max)` corners.
    #[must_use]
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        self.points.iter().fold(
            ((f64::INFINITY, f64::INFINITY), (f64::NEG_INFINITY, f64::NEG_INFINITY)),
            |(min, max), &(x, y)| ((min.0.min(x), min.1.min(y)), (max.0.max(x), max.1.max(y))),
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 3 {
            return Err(ChartError::InvalidData(
                "polygon needs at least 3 vertices".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "polygon vertices must be finite".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "polygon opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
}

/// Point marker centered at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub shape: MarkerShape,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl MarkerPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub font_family: Option<String>,
    pub bold: bool,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            font_family: None,
            bold: false,
            color,
            h_align,
        }
    }

    #[must_use]
    pub fn with_font(mut self, family: Option<String>, bold: bool) -> Self {
        self.font_family = family;
        self.bold = bold;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LinearGradient};

    #[test]
    fn hex_colors_parse_in_short_and_long_form() {
        let long = Color::parse("#55FAFE").expect("long");
        assert!((long.red - 85.0 / 255.0).abs() <= 1e-12);
        assert!((long.green - 250.0 / 255.0).abs() <= 1e-12);
        assert_eq!(long.alpha, 1.0);

        let short = Color::parse("#fff").expect("short");
        assert_eq!(short, Color::rgb(1.0, 1.0, 1.0));
        assert!(Color::parse("transparent").expect("transparent").is_transparent());
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for input in ["", "55FAFE", "#12", "#GGGGGG", "red"] {
            assert!(Color::parse(input).is_err(), "{input} should fail");
        }
    }

    #[test]
    fn gradient_spec_parses_angle_and_stops() {
        let gradient = LinearGradient::parse("l(90) 0:#55FAFE 1:#20424C").expect("gradient");
        assert_eq!(gradient.angle_deg, 90.0);
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(gradient.stops[1].offset, 1.0);

        let ((_, y0), (_, y1)) = gradient.endpoints((0.0, 10.0), (100.0, 110.0));
        assert!((y0 - 10.0).abs() <= 1e-9);
        assert!((y1 - 110.0).abs() <= 1e-9);
    }

    #[test]
    fn gradient_spec_needs_two_stops() {
        assert!(LinearGradient::parse("l(90) 0:#55FAFE").is_err());
        assert!(LinearGradient::parse("r(0.5, 0.5) 0:#fff 1:#000").is_err());
    }
}
