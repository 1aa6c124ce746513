use indexmap::IndexMap;
use tracing::warn;

use crate::core::{
    AreaShape, CategoryScale, DATE_FIELD, LineShape, LinearScale, PlotRect, PointShape,
    ScreenPoint, categories, interpolate_path, nice_domain, ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{Annotation, AnnotationAnchor};
use crate::render::{
    CanvasLayerKind, Color, Fill, LayeredRenderFrame, LinePrimitive, LineStrokeStyle,
    MarkerPrimitive, MarkerShape, PolygonPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
    ViewLayerStack,
};

use super::axis_options::{DEFAULT_FONT_SIZE, DEFAULT_LABEL_COLOR, DEFAULT_LINE_COLOR};
use super::{
    AxisOptions, ChartScene, Geometry, GeometryKind, ScaleKind, ScaleOptions, ScaleSync, View,
    ViewLayout,
};

const DEFAULT_GEOMETRY_COLOR: &str = "#1890FF";
const DEFAULT_AREA_OPACITY: f64 = 0.25;
const DEFAULT_LINE_WIDTH: f64 = 2.0;
const DEFAULT_POINT_RADIUS: f64 = 3.0;
const ACTIVE_POINT_RADIUS: f64 = 4.0;
const TOOLTIP_LINE_HEIGHT: f64 = 20.0;
const TOOLTIP_PADDING: f64 = 12.0;
const TOOLTIP_OFFSET: f64 = 12.0;
const TOOLTIP_CHAR_WIDTH: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisSide {
    Left,
    Right,
}

/// Resolves category and value scales for every view.
///
/// Value scales sharing a sync key get one domain covering all their data.
pub(crate) fn resolve_layouts(scene: &ChartScene) -> ChartResult<Vec<ViewLayout>> {
    let mut extents: IndexMap<String, Option<(f64, f64)>> = IndexMap::new();
    for view in scene.views() {
        for (_, y_field) in view.position_fields()? {
            let options = value_scale_options(scene, y_field)?;
            let key = sync_key(view.index(), y_field, &options);
            let extent = data_extent(view, y_field);
            let merged = match (extents.get(&key).copied().flatten(), extent) {
                (Some((lo, hi)), Some((min, max))) => Some((lo.min(min), hi.max(max))),
                (current, None) => current,
                (None, extent) => extent,
            };
            extents.insert(key, merged);
        }
    }

    let mut layouts = Vec::with_capacity(scene.views().len());
    for view in scene.views() {
        let fields = view.position_fields()?;
        let x_field = fields.first().map_or(DATE_FIELD, |(x, _)| *x);
        if let Some((other, _)) = fields.iter().find(|(x, _)| *x != DATE_FIELD) {
            return Err(ChartError::InvalidData(format!(
                "horizontal position must use `{DATE_FIELD}`, got `{other}`"
            )));
        }

        let x_options = scene
            .scale_options(x_field)
            .cloned()
            .unwrap_or_else(ScaleOptions::category);
        let x = CategoryScale::new(
            categories(view.data_ref())
                .into_iter()
                .map(str::to_owned)
                .collect(),
            x_options.range_or_default(),
        );

        let mut y = IndexMap::new();
        for (_, y_field) in fields {
            let options = value_scale_options(scene, y_field)?;
            let key = sync_key(view.index(), y_field, &options);
            let extent = extents.get(&key).copied().flatten();
            let scale = resolve_value_scale(extent, &options)?;
            y.insert(y_field.to_owned(), (scale, options));
        }

        layouts.push(ViewLayout {
            plot: PlotRect::from_viewport(scene.viewport(), view.padding())?,
            x_field: x_field.to_owned(),
            x,
            x_options,
            y,
            tooltip_options: scene.tooltip_options(),
        });
    }
    Ok(layouts)
}

fn value_scale_options(scene: &ChartScene, field: &str) -> ChartResult<ScaleOptions> {
    let options = scene
        .scale_options(field)
        .cloned()
        .unwrap_or_else(ScaleOptions::linear);
    if options.kind != ScaleKind::Linear {
        return Err(ChartError::InvalidData(format!(
            "vertical field `{field}` needs a linear scale"
        )));
    }
    Ok(options)
}

fn sync_key(view_index: usize, field: &str, options: &ScaleOptions) -> String {
    match &options.sync {
        Some(ScaleSync::Field) => format!("field:{field}"),
        Some(ScaleSync::Group(group)) => format!("group:{group}"),
        None => format!("view:{view_index}:{field}"),
    }
}

fn data_extent(view: &View, field: &str) -> Option<(f64, f64)> {
    view.data_ref()
        .iter()
        .filter_map(|datum| datum.field(field))
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((lo, hi)) => Some((f64::min(lo, value), f64::max(hi, value))),
        })
}

fn resolve_value_scale(extent: Option<(f64, f64)>, options: &ScaleOptions) -> ChartResult<LinearScale> {
    let (mut lo, mut hi) = extent.unwrap_or((0.0, 0.0));
    if let Some(min) = options.min {
        lo = min;
    }
    if let Some(max) = options.max {
        hi = max;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() };
        if options.max.is_some() && options.min.is_none() {
            lo -= pad;
        } else {
            hi += pad;
        }
    }
    if options.nice {
        let (nice_lo, nice_hi) = nice_domain(lo, hi, options.tick_count);
        if options.min.is_none() {
            lo = nice_lo;
        }
        if options.max.is_none() {
            hi = nice_hi;
        }
    }
    LinearScale::new(lo, hi)?.with_range(options.range_or_default())
}

/// Materializes every view into its layers. Views must already carry a layout.
pub(crate) fn build_frame(scene: &ChartScene) -> ChartResult<LayeredRenderFrame> {
    let stacks = scene
        .views()
        .iter()
        .map(|view| ViewLayerStack::canonical_for_view(view.index()))
        .collect();
    let mut frame = LayeredRenderFrame::from_stacks(scene.viewport(), stacks);

    for view in scene.views() {
        let layout = view.layout().ok_or_else(|| {
            ChartError::InvalidData(format!("view {} has no layout", view.index()))
        })?;
        for geometry in view.geometries() {
            draw_geometry(&mut frame, view, layout, geometry)?;
        }
        draw_axes(&mut frame, view, layout)?;
        draw_tooltip(&mut frame, view, layout, scene)?;
    }
    draw_annotations(&mut frame, scene)?;
    Ok(frame)
}

fn draw_geometry(
    frame: &mut LayeredRenderFrame,
    view: &View,
    layout: &ViewLayout,
    geometry: &Geometry,
) -> ChartResult<()> {
    let (_, y_field) = geometry.position_fields()?;
    let mut points = Vec::with_capacity(view.data_ref().len());
    for datum in view.data_ref().iter() {
        let value = datum.require_field(y_field)?;
        let point = layout.map(&datum.date, y_field, value)?;
        points.push((point.x, point.y));
    }
    let index = view.index();

    match geometry.kind {
        GeometryKind::Area => {
            let shape = AreaShape::parse(geometry.shape_name())?;
            let path = interpolate_path(&points, shape.interpolation());
            if shape.is_filled() {
                let fill = geometry.fill(DEFAULT_GEOMETRY_COLOR)?;
                let opacity = geometry
                    .style_options()
                    .fill_opacity
                    .unwrap_or(DEFAULT_AREA_OPACITY);
                if let (Some(first), Some(last)) = (path.first().copied(), path.last().copied()) {
                    if path.len() >= 2 {
                        let baseline = baseline_y(layout, y_field);
                        let mut polygon = path;
                        polygon.push((last.0, baseline));
                        polygon.push((first.0, baseline));
                        frame.push_polygon(
                            index,
                            CanvasLayerKind::Series,
                            PolygonPrimitive::new(polygon, fill, opacity),
                        );
                    }
                }
            } else {
                let color = geometry.stroke_color(DEFAULT_GEOMETRY_COLOR)?;
                let width = geometry
                    .style_options()
                    .line_width
                    .unwrap_or(DEFAULT_LINE_WIDTH);
                push_polyline(frame, index, &path, width, color, LineStrokeStyle::Solid);
            }
        }
        GeometryKind::Line => {
            let shape = LineShape::parse(geometry.shape_name())?;
            let color = geometry.stroke_color(DEFAULT_GEOMETRY_COLOR)?;
            let width = geometry
                .style_options()
                .line_width
                .unwrap_or(DEFAULT_LINE_WIDTH);
            let stroke_style = if shape.is_dashed() {
                LineStrokeStyle::Dashed
            } else {
                LineStrokeStyle::Solid
            };
            let path = interpolate_path(&points, shape.interpolation());
            push_polyline(frame, index, &path, width, color, stroke_style);
        }
        GeometryKind::Point => {
            let shape = match PointShape::parse(geometry.shape_name())? {
                PointShape::Circle => MarkerShape::Circle,
                PointShape::Square => MarkerShape::Square,
            };
            let color = geometry.stroke_color(DEFAULT_GEOMETRY_COLOR)?;
            let radius = geometry.size_or(DEFAULT_POINT_RADIUS);
            for (x, y) in points {
                frame.push_marker(
                    index,
                    CanvasLayerKind::Series,
                    MarkerPrimitive {
                        x,
                        y,
                        radius,
                        shape,
                        fill_color: color,
                        stroke_color: color,
                        stroke_width: 1.0,
                    },
                );
            }
        }
    }
    Ok(())
}

fn baseline_y(layout: &ViewLayout, y_field: &str) -> f64 {
    let range_start = layout
        .y
        .get(y_field)
        .map_or(0.0, |(scale, _)| scale.range().0);
    layout.plot.y_at(range_start)
}

fn push_polyline(
    frame: &mut LayeredRenderFrame,
    view_index: usize,
    path: &[(f64, f64)],
    width: f64,
    color: Color,
    stroke_style: LineStrokeStyle,
) {
    for pair in path.windows(2) {
        frame.push_line(
            view_index,
            CanvasLayerKind::Series,
            LinePrimitive::new(pair[0].0, pair[0].1, pair[1].0, pair[1].1, width, color)
                .with_stroke_style(stroke_style),
        );
    }
}

fn draw_axes(frame: &mut LayeredRenderFrame, view: &View, layout: &ViewLayout) -> ChartResult<()> {
    if !view.axes_enabled() {
        return Ok(());
    }
    if let Some(options) = view.axis_options_for(&layout.x_field) {
        draw_x_axis(frame, view.index(), layout, &options)?;
    }
    for (position, field) in layout.y.keys().enumerate() {
        let Some(options) = view.axis_options_for(field) else {
            continue;
        };
        let side = if position == 0 {
            AxisSide::Left
        } else {
            AxisSide::Right
        };
        draw_y_axis(frame, view.index(), layout, field, &options, side)?;
    }
    Ok(())
}

fn draw_x_axis(
    frame: &mut LayeredRenderFrame,
    index: usize,
    layout: &ViewLayout,
    options: &AxisOptions,
) -> ChartResult<()> {
    let plot = layout.plot;
    let axis_y = plot.bottom();

    if let Some(line) = &options.line {
        let color = Color::parse(&line.stroke)?;
        if line.line_width > 0.0 && !color.is_transparent() {
            frame.push_line(
                index,
                CanvasLayerKind::Axis,
                LinePrimitive::new(plot.left, axis_y, plot.right(), axis_y, line.line_width, color),
            );
        }
    }

    let tick_color = parse_optional_color(options.tick_line.as_ref().map(|t| t.stroke.as_str()))?;
    let grid_color = parse_optional_color(options.grid.as_ref().map(|g| g.stroke.as_str()))?;
    for (position, category) in layout.x.values().iter().enumerate() {
        let x = plot.x_at(layout.x.scale_index(position));
        if let (Some(tick), Some(color)) = (&options.tick_line, tick_color) {
            if !color.is_transparent() {
                frame.push_line(
                    index,
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(x, axis_y, x, axis_y + tick.length, 1.0, color),
                );
            }
        }
        if let (Some(grid), Some(color)) = (&options.grid, grid_color) {
            if grid.line_width > 0.0 && !color.is_transparent() {
                frame.push_line(
                    index,
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(x, plot.top, x, plot.bottom(), grid.line_width, color),
                );
            }
        }
        if let Some(label) = &options.label {
            let text = layout.x_options.format_category(category);
            if !text.is_empty() {
                frame.push_text(
                    index,
                    CanvasLayerKind::Axis,
                    label.style.text_primitive(
                        text,
                        x,
                        axis_y + label.offset,
                        TextHAlign::Center,
                        DEFAULT_LABEL_COLOR,
                    )?,
                );
            }
        }
    }

    if let Some(title) = &options.title {
        let text = layout.x_options.display_name(&layout.x_field).to_owned();
        let label_band = options.label.as_ref().map_or(0.0, |label| {
            label.offset + label.style.font_size.unwrap_or(DEFAULT_FONT_SIZE)
        });
        let title_size = title.style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        frame.push_text(
            index,
            CanvasLayerKind::Axis,
            title.style.text_primitive(
                text,
                plot.left + plot.width / 2.0,
                axis_y + label_band + title_size,
                TextHAlign::Center,
                DEFAULT_LABEL_COLOR,
            )?,
        );
    }
    Ok(())
}

fn draw_y_axis(
    frame: &mut LayeredRenderFrame,
    index: usize,
    layout: &ViewLayout,
    field: &str,
    options: &AxisOptions,
    side: AxisSide,
) -> ChartResult<()> {
    let plot = layout.plot;
    let Some((scale, scale_options)) = layout.y.get(field) else {
        return Ok(());
    };
    let (axis_x, outward, label_align) = match side {
        AxisSide::Left => (plot.left, -1.0, TextHAlign::Right),
        AxisSide::Right => (plot.right(), 1.0, TextHAlign::Left),
    };

    if let Some(line) = &options.line {
        let color = Color::parse(&line.stroke)?;
        if line.line_width > 0.0 && !color.is_transparent() {
            frame.push_line(
                index,
                CanvasLayerKind::Axis,
                LinePrimitive::new(axis_x, plot.top, axis_x, plot.bottom(), line.line_width, color),
            );
        }
    }

    let (lo, hi) = scale.domain();
    let tick_color = parse_optional_color(options.tick_line.as_ref().map(|t| t.stroke.as_str()))?;
    let grid_color = parse_optional_color(options.grid.as_ref().map(|g| g.stroke.as_str()))?;
    for tick in ticks(lo.min(hi), lo.max(hi), scale_options.tick_count) {
        let y = plot.y_at(scale.scale(tick)?);
        if let (Some(tick_line), Some(color)) = (&options.tick_line, tick_color) {
            if !color.is_transparent() {
                frame.push_line(
                    index,
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(axis_x, y, axis_x + outward * tick_line.length, y, 1.0, color),
                );
            }
        }
        if let (Some(grid), Some(color)) = (&options.grid, grid_color) {
            if grid.line_width > 0.0 && !color.is_transparent() {
                frame.push_line(
                    index,
                    CanvasLayerKind::Axis,
                    LinePrimitive::new(plot.left, y, plot.right(), y, grid.line_width, color),
                );
            }
        }
        if let Some(label) = &options.label {
            let text = scale_options.format_value(tick);
            if !text.is_empty() {
                frame.push_text(
                    index,
                    CanvasLayerKind::Axis,
                    label.style.text_primitive(
                        text,
                        axis_x + outward * label.offset,
                        y,
                        label_align,
                        DEFAULT_LABEL_COLOR,
                    )?,
                );
            }
        }
    }

    if let Some(title) = &options.title {
        let text = scale_options.display_name(field).to_owned();
        let title_size = title.style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        let label_band = options.label.as_ref().map_or(0.0, |label| label.offset);
        let x = axis_x + outward * (label_band + title_size * 2.0);
        frame.push_text(
            index,
            CanvasLayerKind::Axis,
            title.style.text_primitive(
                text,
                x.max(title_size / 2.0),
                plot.top + plot.height / 2.0,
                TextHAlign::Center,
                DEFAULT_LABEL_COLOR,
            )?,
        );
    }
    Ok(())
}

fn parse_optional_color(spec: Option<&str>) -> ChartResult<Option<Color>> {
    spec.map(Color::parse).transpose()
}

fn draw_tooltip(
    frame: &mut LayeredRenderFrame,
    view: &View,
    layout: &ViewLayout,
    scene: &ChartScene,
) -> ChartResult<()> {
    let state = view.tooltip_state();
    if !state.visible {
        return Ok(());
    }
    let Some(category) = state.category.as_deref() else {
        return Ok(());
    };
    let index = view.index();
    let plot = layout.plot;
    let x = plot.x_at(layout.x.scale(category)?);

    if scene.tooltip_options().show_crosshairs {
        frame.push_line(
            index,
            CanvasLayerKind::Tooltip,
            LinePrimitive::new(x, plot.top, x, plot.bottom(), 1.0, Color::parse(DEFAULT_LINE_COLOR)?),
        );
    }

    let white = Color::rgb(1.0, 1.0, 1.0);
    let mut rows = Vec::with_capacity(state.items.len());
    for item in &state.items {
        let color = match item.color.as_deref() {
            Some(spec) => Color::parse(spec)?,
            None => Color::parse(DEFAULT_GEOMETRY_COLOR)?,
        };
        frame.push_marker(
            index,
            CanvasLayerKind::Tooltip,
            MarkerPrimitive {
                x: item.point.x,
                y: item.point.y,
                radius: ACTIVE_POINT_RADIUS,
                shape: MarkerShape::Circle,
                fill_color: color,
                stroke_color: white,
                stroke_width: 1.0,
            },
        );
        rows.push(format!("{}: {}", item.name, item.value));
    }

    let longest = rows
        .iter()
        .map(|row| row.chars().count())
        .chain(std::iter::once(state.title.chars().count()))
        .max()
        .unwrap_or(0);
    let width = longest as f64 * TOOLTIP_CHAR_WIDTH + TOOLTIP_PADDING * 2.0;
    let height = (rows.len() + 1) as f64 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING;
    let viewport_width = f64::from(scene.viewport().width);
    let viewport_height = f64::from(scene.viewport().height);
    let anchor = state.anchor.unwrap_or(ScreenPoint::new(x, plot.top));
    let mut box_x = x + TOOLTIP_OFFSET;
    if box_x + width > viewport_width {
        box_x = (x - TOOLTIP_OFFSET - width).max(0.0);
    }
    let box_y = (anchor.y - height / 2.0).clamp(0.0, (viewport_height - height).max(0.0));

    frame.push_rect(
        index,
        CanvasLayerKind::Tooltip,
        RectPrimitive::new(box_x, box_y, width, height, white.with_alpha(0.95))
            .with_border(Color::parse("#E0E0E0")?, 1.0)
            .with_corner_radius(3.0),
    );
    let text_color = Color::parse(DEFAULT_LABEL_COLOR)?;
    let text_x = box_x + TOOLTIP_PADDING;
    let mut text_y = box_y + TOOLTIP_PADDING / 2.0 + TOOLTIP_LINE_HEIGHT / 2.0;
    if !state.title.is_empty() {
        frame.push_text(
            index,
            CanvasLayerKind::Tooltip,
            TextPrimitive::new(state.title.clone(), text_x, text_y, DEFAULT_FONT_SIZE, text_color, TextHAlign::Left),
        );
    }
    for row in rows {
        text_y += TOOLTIP_LINE_HEIGHT;
        frame.push_text(
            index,
            CanvasLayerKind::Tooltip,
            TextPrimitive::new(row, text_x, text_y, DEFAULT_FONT_SIZE, text_color, TextHAlign::Left),
        );
    }
    Ok(())
}

fn draw_annotations(frame: &mut LayeredRenderFrame, scene: &ChartScene) -> ChartResult<()> {
    if scene.annotations().is_empty() {
        return Ok(());
    }
    let Some(view) = scene.views().first() else {
        warn!(
            count = scene.annotations().len(),
            "dropping annotations: chart has no view"
        );
        return Ok(());
    };
    let layout = view.layout();
    let field = layout.and_then(|layout| layout.y.keys().next().map(String::as_str));
    let resolve = |anchor: &AnnotationAnchor| -> ChartResult<(f64, f64)> {
        match anchor {
            AnnotationAnchor::Pixel(point) => Ok((point.x, point.y)),
            AnnotationAnchor::Data { date, value } => {
                let (Some(layout), Some(field)) = (layout, field) else {
                    return Err(ChartError::InvalidData(
                        "data-anchored annotation needs a view with a value field".to_owned(),
                    ));
                };
                let point = layout.map(date, field, *value)?;
                Ok((point.x, point.y))
            }
        }
    };

    let index = view.index();
    for annotation in scene.annotations().iter() {
        match annotation {
            Annotation::Line {
                start,
                end,
                color,
                width,
                dashed,
            } => {
                let (x1, y1) = resolve(start)?;
                let (x2, y2) = resolve(end)?;
                let style = if *dashed {
                    LineStrokeStyle::Dashed
                } else {
                    LineStrokeStyle::Solid
                };
                frame.push_line(
                    index,
                    CanvasLayerKind::Overlay,
                    LinePrimitive::new(x1, y1, x2, y2, *width, Color::parse(color)?)
                        .with_stroke_style(style),
                );
            }
            Annotation::Text {
                anchor,
                content,
                color,
                font_size,
            } => {
                let (x, y) = resolve(anchor)?;
                frame.push_text(
                    index,
                    CanvasLayerKind::Overlay,
                    TextPrimitive::new(content.clone(), x, y, *font_size, Color::parse(color)?, TextHAlign::Left),
                );
            }
            Annotation::Region {
                start,
                end,
                fill,
                opacity,
            } => {
                let (x1, y1) = resolve(start)?;
                let (x2, y2) = resolve(end)?;
                frame.push_polygon(
                    index,
                    CanvasLayerKind::Overlay,
                    PolygonPrimitive::new(
                        vec![(x1, y1), (x2, y1), (x2, y2), (x1, y2)],
                        Fill::Solid(Color::parse(fill)?),
                        *opacity,
                    ),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_value_scale;
    use crate::api::ScaleOptions;

    #[test]
    fn explicit_min_survives_nice_rounding() {
        let options = ScaleOptions::linear()
            .with_min(0.0)
            .with_nice(true)
            .with_range([0.0, 0.95]);
        let scale = resolve_value_scale(Some((120.0, 620.0)), &options).expect("scale");
        assert_eq!(scale.domain(), (0.0, 700.0));
        assert_eq!(scale.range(), (0.0, 0.95));
    }

    #[test]
    fn constant_series_gets_a_non_zero_domain() {
        let scale = resolve_value_scale(Some((5.0, 5.0)), &ScaleOptions::linear()).expect("scale");
        assert_eq!(scale.domain(), (5.0, 10.0));
        let scale = resolve_value_scale(None, &ScaleOptions::linear()).expect("scale");
        assert_eq!(scale.domain(), (0.0, 1.0));
    }
}
