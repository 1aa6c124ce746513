//! The area chart widget: props and their defaults, chart construction,
//! the tooltip cycler and the lifecycle component tying them together.

mod component;
mod cycler;
mod defaults;
mod init;
mod props;

pub use component::{AreaChart, CONTAINER_BASE_CLASS, RendererFactory};
pub use cycler::{CycleStep, TooltipCycler};
pub use defaults::{
    DEFAULT_DURATION_MS, DEFAULT_PADDING, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
    ResolvedAreaConfig, default_area_color, default_axis_config, default_data, default_viewport,
};
pub use init::{TOOLTIP_VIEW_INDEX, init_chart};
pub use props::{
    AreaChartProps, AreaColor, AxisConfig, AxisSideConfig, ExtraHook, MultipleLine, ShapeConfig,
};
