#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use tracing::debug;

use crate::core::{Padding, Viewport};
use crate::error::ChartResult;
use crate::render::{LayeredRenderFrame, Renderer};

use super::{ChartOptions, ChartScene, ChartSnapshot, View};

/// A live chart: a scene plus the backend it paints into.
///
/// The handle is exclusively owned. `destroy` consumes it, so a destroyed
/// chart cannot be touched again.
pub struct Chart<R: Renderer> {
    renderer: R,
    scene: ChartScene,
    last_frame: Option<LayeredRenderFrame>,
    render_count: u64,
}

impl<R: Renderer> Chart<R> {
    pub fn new(renderer: R, options: ChartOptions) -> ChartResult<Self> {
        let scene = ChartScene::new(options)?;
        debug!(
            container = scene.container(),
            width = scene.viewport().width,
            height = scene.viewport().height,
            "chart created"
        );
        Ok(Self {
            renderer,
            scene,
            last_frame: None,
            render_count: 0,
        })
    }

    #[must_use]
    pub fn scene(&self) -> &ChartScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut ChartScene {
        &mut self.scene
    }

    #[must_use]
    pub fn container(&self) -> &str {
        self.scene.container()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.scene.viewport()
    }

    pub fn create_view(&mut self, padding: Option<Padding>) -> &mut View {
        self.scene.create_view(padding)
    }

    #[must_use]
    pub fn views(&self) -> &[View] {
        self.scene.views()
    }

    #[must_use]
    pub fn view(&self, index: usize) -> Option<&View> {
        self.scene.view(index)
    }

    pub fn view_mut(&mut self, index: usize) -> ChartResult<&mut View> {
        self.scene.view_mut(index)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Resolves layout and paints the whole chart through the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let layered = self.scene.layout()?;
        self.renderer.render(&layered.flatten())?;
        self.last_frame = Some(layered);
        self.render_count += 1;
        Ok(())
    }

    /// Renders into an external cairo context.
    ///
    /// Used by GTK drawing callbacks where the context belongs to the widget.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let layered = self.scene.layout()?;
        self.renderer
            .render_on_cairo_context(context, &layered.flatten())?;
        self.last_frame = Some(layered);
        self.render_count += 1;
        Ok(())
    }

    /// Follows a container resize. The next `render` uses the new size.
    pub fn change_size(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.scene.set_viewport(viewport)
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&LayeredRenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.last_frame.is_some()
    }

    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot::capture(&self.scene, self.last_frame.as_ref())
    }

    /// Tears the chart down and hands the renderer back.
    pub fn destroy(self) -> R {
        debug!(
            container = self.scene.container(),
            renders = self.render_count,
            "chart destroyed"
        );
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::Chart;
    use crate::api::{ChartOptions, GeometryStyle};
    use crate::core::{Datum, Padding, Viewport, shared};
    use crate::render::{CanvasLayerKind, NullRenderer};

    fn sample_chart() -> Chart<NullRenderer> {
        let options = ChartOptions::new("root", Viewport::new(400, 200))
            .with_padding(Padding::new(8.0, 8.0, 48.0, 64.0));
        let mut chart = Chart::new(NullRenderer::default(), options).expect("chart");
        let data = shared(vec![
            Datum::new("2021-01-01", 10.0),
            Datum::new("2021-02-01", 30.0),
            Datum::new("2021-03-01", 20.0),
        ]);
        let view = chart.create_view(None);
        view.data(data);
        view.area()
            .position("Date*value")
            .color("l(90) 0:#55FAFE 1:#20424C")
            .style(GeometryStyle {
                fill_opacity: Some(0.4),
                line_width: None,
            });
        view.line().position("Date*value").color("#55FAFE");
        chart
    }

    #[test]
    fn render_materializes_series_and_axes() {
        let mut chart = sample_chart();
        chart.render().expect("render");
        let frame = chart.last_frame().expect("frame");
        let series = frame.layer(0, CanvasLayerKind::Series).expect("series");
        assert_eq!(series.polygons.len(), 1);
        assert_eq!(series.lines.len(), 2);
        assert!(!frame.layer(0, CanvasLayerKind::Axis).expect("axis").is_empty());
        assert_eq!(chart.renderer().render_count, 1);
        assert_eq!(chart.render_count(), 1);
    }

    #[test]
    fn unknown_shape_fails_at_render_time() {
        let mut chart = sample_chart();
        chart
            .view_mut(0)
            .expect("view")
            .line()
            .position("Date*value")
            .shape("zigzag");
        assert!(chart.render().is_err());
        assert!(!chart.is_rendered());
    }

    #[test]
    fn destroy_returns_the_renderer() {
        let mut chart = sample_chart();
        chart.render().expect("render");
        chart.render().expect("render");
        let renderer = chart.destroy();
        assert_eq!(renderer.render_count, 2);
    }

    #[test]
    fn change_size_rejects_empty_viewport() {
        let mut chart = sample_chart();
        assert!(chart.change_size(Viewport::new(0, 0)).is_err());
        chart.change_size(Viewport::new(800, 300)).expect("resize");
        assert_eq!(chart.viewport(), Viewport::new(800, 300));
    }
}
