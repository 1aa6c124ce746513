#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use area_chart::ChartError;
use area_chart::core::Viewport;
use area_chart::render::CairoRenderer;
use area_chart::widget::{AreaChart, AreaChartProps, init_chart};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_paints_default_area_chart() {
    let config = AreaChartProps::new().resolved();
    let renderer = CairoRenderer::for_viewport(config.viewport).expect("renderer");
    let chart = init_chart(&config, "cairo", renderer).expect("chart");
    let renderer = chart.destroy();
    let stats = renderer.last_stats();

    assert_eq!(stats.polygons_drawn, 1);
    assert_eq!(stats.markers_drawn, 6);
    // five line segments plus at least the two axis lines
    assert!(stats.lines_drawn >= 7);
    assert!(stats.texts_drawn >= 6);
    assert_eq!(stats.rects_drawn, 0);
}

#[test]
fn widget_chart_can_draw_on_external_context() {
    let props = AreaChartProps::new().with_viewport(Viewport::new(600, 320));
    let mut widget = AreaChart::new(props, CairoRenderer::for_viewport);
    widget.mount().expect("mount");
    let before = widget.chart().expect("chart").renderer().last_stats();
    widget.tick().expect("tick");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let chart = widget.chart_mut().expect("chart");
    chart
        .render_on_cairo_context(&context)
        .expect("render on context");

    let stats = chart.renderer().last_stats();
    // crosshair, one active marker, the tooltip box and its title and value
    assert_eq!(stats.lines_drawn, before.lines_drawn + 1);
    assert_eq!(stats.markers_drawn, before.markers_drawn + 1);
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.texts_drawn, before.texts_drawn + 2);
}
