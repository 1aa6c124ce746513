//! Shape names accepted by line, area and point geometries, and the path
//! interpolation each one implies.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const SMOOTH_SEGMENTS_PER_SPAN: usize = 8;
const SMOOTH_TENSION: f64 = 0.5;

/// How consecutive points of a path are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Linear,
    Smooth,
    /// Horizontal then vertical.
    StepAfter,
    /// Vertical then horizontal.
    StepBefore,
    /// Horizontal to the midpoint, vertical, horizontal.
    StepMiddle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineShape {
    Line,
    Smooth,
    Dash,
    Hv,
    Vh,
    Hvh,
}

impl LineShape {
    pub fn parse(name: &str) -> ChartResult<Self> {
        match name {
            "line" => Ok(Self::Line),
            "smooth" => Ok(Self::Smooth),
            "dash" => Ok(Self::Dash),
            "hv" => Ok(Self::Hv),
            "vh" => Ok(Self::Vh),
            "hvh" => Ok(Self::Hvh),
            other => Err(ChartError::UnknownShape {
                kind: "line",
                name: other.to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn interpolation(self) -> Interpolation {
        match self {
            Self::Line | Self::Dash => Interpolation::Linear,
            Self::Smooth => Interpolation::Smooth,
            Self::Hv => Interpolation::StepAfter,
            Self::Vh => Interpolation::StepBefore,
            Self::Hvh => Interpolation::StepMiddle,
        }
    }

    #[must_use]
    pub fn is_dashed(self) -> bool {
        matches!(self, Self::Dash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaShape {
    Area,
    Smooth,
    /// Outline only, no fill.
    Line,
    SmoothLine,
}

impl AreaShape {
    pub fn parse(name: &str) -> ChartResult<Self> {
        match name {
            "area" => Ok(Self::Area),
            "smooth" => Ok(Self::Smooth),
            "line" => Ok(Self::Line),
            "smoothLine" => Ok(Self::SmoothLine),
            other => Err(ChartError::UnknownShape {
                kind: "area",
                name: other.to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn interpolation(self) -> Interpolation {
        match self {
            Self::Area | Self::Line => Interpolation::Linear,
            Self::Smooth | Self::SmoothLine => Interpolation::Smooth,
        }
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        matches!(self, Self::Area | Self::Smooth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointShape {
    Circle,
    Square,
}

impl PointShape {
    pub fn parse(name: &str) -> ChartResult<Self> {
        match name {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            other => Err(ChartError::UnknownShape {
                kind: "point",
                name: other.to_owned(),
            }),
        }
    }
}

/// Expands mapped points into the polyline drawn for `interpolation`.
#[must_use]
pub fn interpolate_path(points: &[(f64, f64)], interpolation: Interpolation) -> Vec<(f64, f64)> {
    if points.len() < 2 {
        return points.to_vec();
    }
    match interpolation {
        Interpolation::Linear => points.to_vec(),
        Interpolation::Smooth => catmull_rom(points),
        Interpolation::StepAfter => step(points, |a, b| vec![(b.0, a.1)]),
        Interpolation::StepBefore => step(points, |a, b| vec![(a.0, b.1)]),
        Interpolation::StepMiddle => step(points, |a, b| {
            let mid = (a.0 + b.0) / 2.0;
            vec![(mid, a.1), (mid, b.1)]
        }),
    }
}

fn step(
    points: &[(f64, f64)],
    corners: impl Fn((f64, f64), (f64, f64)) -> Vec<(f64, f64)>,
) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(points.len() * 3);
    path.push(points[0]);
    for pair in points.windows(2) {
        path.extend(corners(pair[0], pair[1]));
        path.push(pair[1]);
    }
    path
}

fn catmull_rom(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let n = points.len();
    let mut path = Vec::with_capacity((n - 1) * SMOOTH_SEGMENTS_PER_SPAN + 1);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        for j in 0..SMOOTH_SEGMENTS_PER_SPAN {
            let t = j as f64 / SMOOTH_SEGMENTS_PER_SPAN as f64;
            path.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    path.push(points[n - 1]);
    path
}

fn catmull_rom_point(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let tau = SMOOTH_TENSION;

    let c0 = -tau * t3 + 2.0 * tau * t2 - tau * t;
    let c1 = (2.0 - tau) * t3 + (tau - 3.0) * t2 + 1.0;
    let c2 = (tau - 2.0) * t3 + (3.0 - 2.0 * tau) * t2 + tau * t;
    let c3 = tau * t3 - tau * t2;

    (
        c0 * p0.0 + c1 * p1.0 + c2 * p2.0 + c3 * p3.0,
        c0 * p0.1 + c1 * p1.1 + c2 * p2.1 + c3 * p3.1,
    )
}

#[cfg(test)]
mod tests {
    use super::{AreaShape, Interpolation, LineShape, PointShape, interpolate_path};

    #[test]
    fn shape_names_parse() {
        assert_eq!(LineShape::parse("smooth").expect("smooth"), LineShape::Smooth);
        assert_eq!(AreaShape::parse("smoothLine").expect("area"), AreaShape::SmoothLine);
        assert_eq!(PointShape::parse("circle").expect("point"), PointShape::Circle);
        assert!(LineShape::parse("zigzag").is_err());
        assert!(!AreaShape::Line.is_filled());
    }

    #[test]
    fn step_after_inserts_one_corner_per_span() {
        let path = interpolate_path(&[(0.0, 0.0), (10.0, 5.0)], Interpolation::StepAfter);
        assert_eq!(path, vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
    }

    #[test]
    fn step_middle_breaks_at_midpoint() {
        let path = interpolate_path(&[(0.0, 0.0), (10.0, 5.0)], Interpolation::StepMiddle);
        assert_eq!(path, vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (10.0, 5.0)]);
    }

    #[test]
    fn smooth_path_passes_through_every_input_point() {
        let points = [(0.0, 0.0), (10.0, 20.0), (20.0, 5.0), (30.0, 15.0)];
        let path = interpolate_path(&points, Interpolation::Smooth);
        for point in points {
            assert!(
                path.iter()
                    .any(|p| (p.0 - point.0).abs() <= 1e-9 && (p.1 - point.1).abs() <= 1e-9),
                "{point:?} missing from smooth path"
            );
        }
    }
}
