//! area-chart-rs: an animated area/line chart widget for time-series data.
//!
//! The [`widget::AreaChart`] component owns a scene-graph [`api::Chart`],
//! rebuilds it when the dataset changes and cycles a tooltip through the
//! data points on a fixed period. Rendering goes through the
//! [`render::Renderer`] trait, with a headless `NullRenderer` and an
//! optional Cairo backend.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod widget;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{Chart, ChartOptions, ChartScene};
pub use error::{ChartError, ChartResult};
pub use widget::{AreaChart, AreaChartProps};
