mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use layer_stack::{CanvasLayerKind, ViewLayerStack};
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame, ViewLayerFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, Fill, GradientStop, LinePrimitive, LineStrokeStyle, LinearGradient, MarkerPrimitive,
    MarkerShape, PolygonPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart configuration and widget state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
