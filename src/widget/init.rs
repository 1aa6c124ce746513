use std::sync::Arc;

use tracing::debug;

use crate::api::{
    AxisLabelOptions, AxisLineOptions, AxisOptions, AxisTitleOptions, Chart, ChartOptions,
    ChartScene, GeometryStyle, InteractionKind, ScaleOptions, ScaleSync, TickLineOptions,
    TooltipOptions,
};
use crate::core::{DATE_FIELD, SharedData, VALUE_FIELD};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::defaults::ResolvedAreaConfig;
use super::props::{AreaColor, AxisSideConfig};

const SINGLE_SERIES_FILL_OPACITY: f64 = 0.4;
const MULTI_SERIES_FILL_OPACITY: f64 = 0.3;

/// View that carries the axes and receives the cycling tooltip.
pub const TOOLTIP_VIEW_INDEX: usize = 1;

/// Builds, decorates and renders the area chart for one mount cycle.
///
/// Every series gets two views: a gradient area without axes or tooltip,
/// then a line with circle points. Only the first series' line view draws
/// axes.
pub fn init_chart<R: Renderer>(
    config: &ResolvedAreaConfig,
    container_id: &str,
    renderer: R,
) -> ChartResult<Chart<R>> {
    let options = ChartOptions::new(container_id, config.viewport)
        .with_auto_fit(true)
        .with_padding(config.padding);
    let mut chart = Chart::new(renderer, options)?;
    let scene = chart.scene_mut();

    scene.scale(
        DATE_FIELD,
        ScaleOptions::category()
            .with_range(config.axis.x.range)
            .with_category_formatter(Arc::clone(&config.x_scale_formatter))
            .with_alias(config.axis.x.title.clone()),
    );

    if config.multiple_lines.is_empty() {
        scene.scale(
            VALUE_FIELD,
            value_scale(config)
                .with_min(0.0)
                .with_alias(config.axis.y.title.clone()),
        );
    } else {
        for series in &config.multiple_lines {
            let mut options = value_scale(config);
            if let Some(alias) = &series.alias {
                options = options.with_alias(alias.clone());
            }
            scene.scale(series.key.clone(), options);
        }
    }

    scene.tooltip(TooltipOptions {
        show_crosshairs: true,
        shared: true,
    });

    if config.multiple_lines.is_empty() {
        add_series_views(
            scene,
            config,
            &config.data,
            VALUE_FIELD,
            &config.area_color,
            SINGLE_SERIES_FILL_OPACITY,
            true,
        );
    } else {
        for (index, series) in config.multiple_lines.iter().enumerate() {
            add_series_views(
                scene,
                config,
                &series.data,
                &series.key,
                &series.area_color,
                MULTI_SERIES_FILL_OPACITY,
                index == 0,
            );
        }
    }

    scene.remove_interaction(InteractionKind::LegendFilter);
    (config.extra)(scene);

    debug!(
        container = container_id,
        series = config.multiple_lines.len().max(1),
        views = chart.views().len(),
        "area chart constructed"
    );
    chart.render()?;
    Ok(chart)
}

fn value_scale(config: &ResolvedAreaConfig) -> ScaleOptions {
    ScaleOptions::linear()
        .with_range(config.axis.y.range)
        .with_nice(true)
        .with_sync(ScaleSync::Field)
        .with_value_formatter(Arc::clone(&config.y_value_formatter))
}

fn add_series_views(
    scene: &mut ChartScene,
    config: &ResolvedAreaConfig,
    data: &SharedData,
    field: &str,
    color: &AreaColor,
    fill_opacity: f64,
    with_axes: bool,
) {
    let position = format!("{DATE_FIELD}*{field}");

    let area_view = scene.create_view(Some(config.padding));
    area_view.data(Arc::clone(data)).tooltip(false).disable_axes();
    area_view
        .area()
        .position(position.clone())
        .color(color.gradient())
        .style(GeometryStyle {
            fill_opacity: Some(fill_opacity),
            line_width: None,
        })
        .shape(config.shape.area.clone());

    let line_view = scene.create_view(Some(config.padding));
    line_view.data(Arc::clone(data));
    if with_axes {
        line_view
            .axis(field, value_axis(&config.axis.y))
            .axis(DATE_FIELD, date_axis(&config.axis.x));
    } else {
        line_view.disable_axes();
    }
    line_view
        .line()
        .color(color.source.clone())
        .position(position.clone())
        .shape(config.shape.line.clone());
    line_view
        .point()
        .position(position)
        .color(color.source.clone())
        .shape("circle");
}

fn value_axis(side: &AxisSideConfig) -> AxisOptions {
    AxisOptions {
        title: side.show_title.then(|| AxisTitleOptions {
            style: side.title_style.clone(),
            auto_rotate: false,
        }),
        line: Some(AxisLineOptions {
            stroke: side.color.clone(),
            line_width: side.line_width,
        }),
        tick_line: Some(TickLineOptions {
            stroke: "transparent".to_owned(),
            align_tick: true,
            ..TickLineOptions::default()
        }),
        grid: None,
        label: Some(AxisLabelOptions {
            offset: side.label_offset,
            style: side.label_style.clone(),
        }),
    }
}

fn date_axis(side: &AxisSideConfig) -> AxisOptions {
    AxisOptions {
        title: side.show_title.then(|| AxisTitleOptions {
            style: side.title_style.clone(),
            auto_rotate: true,
        }),
        line: Some(AxisLineOptions {
            stroke: side.color.clone(),
            line_width: side.line_width,
        }),
        tick_line: None,
        grid: None,
        label: Some(AxisLabelOptions {
            offset: side.label_offset,
            style: side.label_style.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{TOOLTIP_VIEW_INDEX, init_chart};
    use crate::api::{GeometryKind, InteractionKind};
    use crate::core::{Datum, shared};
    use crate::render::NullRenderer;
    use crate::widget::props::{AreaChartProps, AreaColor, MultipleLine};

    #[test]
    fn single_series_builds_area_and_line_views() {
        let config = AreaChartProps::new().resolved();
        let chart = init_chart(&config, "root", NullRenderer::default()).expect("chart");
        assert_eq!(chart.views().len(), 2);

        let area = &chart.views()[0];
        assert!(!area.tooltip_enabled());
        assert!(!area.axes_enabled());
        assert_eq!(area.geometries()[0].kind, GeometryKind::Area);
        assert_eq!(
            area.geometries()[0].color_spec(),
            Some("l(90) 0:#55FAFE 1:#20424C")
        );

        let line = &chart.views()[TOOLTIP_VIEW_INDEX];
        let kinds: Vec<_> = line.geometries().iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![GeometryKind::Line, GeometryKind::Point]);
        assert!(line.axis_options_for("value").is_some());
        assert!(line.axis_options_for("Date").is_some());

        assert!(!chart.scene().has_interaction(InteractionKind::LegendFilter));
        assert!(chart.is_rendered());
    }

    #[test]
    fn value_scale_starts_at_zero_and_nices_up() {
        let config = AreaChartProps::new().resolved();
        let chart = init_chart(&config, "root", NullRenderer::default()).expect("chart");
        let layout = chart.views()[TOOLTIP_VIEW_INDEX].layout().expect("layout");
        let (scale, _) = layout.y.get("value").expect("value scale");
        assert_eq!(scale.domain(), (0.0, 700.0));
        assert_eq!(scale.range(), (0.0, 0.95));
    }

    #[test]
    fn multi_series_axes_only_on_first_line_view() {
        let color = AreaColor::new("#55FAFE", "#20424C");
        let data = shared(vec![
            Datum::with_field("2021-01-01", "north", 1.0).and_field("south", 5.0),
            Datum::with_field("2021-02-01", "north", 4.0).and_field("south", 2.0),
        ]);
        let props = AreaChartProps::new()
            .with_series(MultipleLine::new("north", data.clone(), color.clone()).with_alias("North"))
            .with_series(MultipleLine::new("south", data, color));
        let chart = init_chart(&props.resolved(), "root", NullRenderer::default()).expect("chart");
        assert_eq!(chart.views().len(), 4);
        let with_axes: Vec<_> = chart
            .views()
            .iter()
            .filter(|view| view.axes_enabled())
            .map(|view| view.index())
            .collect();
        assert_eq!(with_axes, vec![1]);
        assert_eq!(
            chart.scene().scale_options("north").and_then(|s| s.alias.as_deref()),
            Some("North")
        );
        assert!(chart.scene().scale_options("value").is_none());
    }

    #[test]
    fn extra_hook_runs_before_render() {
        let props = AreaChartProps::new().with_extra(|scene| {
            scene
                .annotations_mut()
                .text(crate::extensions::AnnotationAnchor::data("2021-04-04", 500.0), "peak", "#fff", 12.0);
        });
        let chart = init_chart(&props.resolved(), "root", NullRenderer::default()).expect("chart");
        assert_eq!(chart.snapshot().annotation_count, 1);
        assert_eq!(chart.renderer().render_count, 1);
    }
}
