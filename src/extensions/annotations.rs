use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

/// Where an annotation is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationAnchor {
    /// Data coordinates, resolved against the first view's scales.
    Data { date: String, value: f64 },
    /// Absolute container pixels.
    Pixel(ScreenPoint),
}

impl AnnotationAnchor {
    #[must_use]
    pub fn data(date: impl Into<String>, value: f64) -> Self {
        Self::Data {
            date: date.into(),
            value,
        }
    }
}

/// Extra drawing added by decoration hooks before the chart renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    Line {
        start: AnnotationAnchor,
        end: AnnotationAnchor,
        color: String,
        width: f64,
        dashed: bool,
    },
    Text {
        anchor: AnnotationAnchor,
        content: String,
        color: String,
        font_size: f64,
    },
    Region {
        start: AnnotationAnchor,
        end: AnnotationAnchor,
        fill: String,
        opacity: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    items: Vec<Annotation>,
}

impl Annotations {
    pub fn line(
        &mut self,
        start: AnnotationAnchor,
        end: AnnotationAnchor,
        color: impl Into<String>,
        width: f64,
    ) -> &mut Self {
        self.items.push(Annotation::Line {
            start,
            end,
            color: color.into(),
            width,
            dashed: false,
        });
        self
    }

    pub fn dashed_line(
        &mut self,
        start: AnnotationAnchor,
        end: AnnotationAnchor,
        color: impl Into<String>,
        width: f64,
    ) -> &mut Self {
        self.items.push(Annotation::Line {
            start,
            end,
            color: color.into(),
            width,
            dashed: true,
        });
        self
    }

    pub fn text(
        &mut self,
        anchor: AnnotationAnchor,
        content: impl Into<String>,
        color: impl Into<String>,
        font_size: f64,
    ) -> &mut Self {
        self.items.push(Annotation::Text {
            anchor,
            content: content.into(),
            color: color.into(),
            font_size,
        });
        self
    }

    pub fn region(
        &mut self,
        start: AnnotationAnchor,
        end: AnnotationAnchor,
        fill: impl Into<String>,
        opacity: f64,
    ) -> &mut Self {
        self.items.push(Annotation::Region {
            start,
            end,
            fill: fill.into(),
            opacity,
        });
        self
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }
}
