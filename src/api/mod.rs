//! Scene-graph charting API: charts hold views, views hold geometries, and
//! scales, axes and tooltips are resolved into a layered render frame.

mod axis_options;
mod chart;
mod geometry;
mod scale_options;
mod scene;
mod scene_builder;
mod snapshot;
mod tooltip;
mod view;

pub use axis_options::{
    AxisLabelOptions, AxisLineOptions, AxisOptions, AxisTitleOptions, DEFAULT_FONT_SIZE,
    DEFAULT_LABEL_COLOR, DEFAULT_LINE_COLOR, GridOptions, TextStyle, TickLineOptions,
};
pub use chart::Chart;
pub use geometry::{Geometry, GeometryKind, GeometryStyle};
pub use scale_options::{
    CategoryFormatterFn, ScaleKind, ScaleOptions, ScaleSync, ValueFormatterFn,
};
pub use scene::{ChartOptions, ChartScene, InteractionKind};
pub use snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1, GeometrySnapshot,
    ViewSnapshot,
};
pub use tooltip::{TooltipItem, TooltipOptions, TooltipState};
pub use view::{View, ViewLayout};
