use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::{CategoryScale, Datum, LinearScale, Padding, PlotRect, ScreenPoint, SharedData};
use crate::error::{ChartError, ChartResult};

use super::{AxisOptions, Geometry, GeometryKind, ScaleOptions, TooltipItem, TooltipOptions, TooltipState};

/// Scales and plot rectangle a view was last rendered with.
#[derive(Debug, Clone)]
pub struct ViewLayout {
    pub plot: PlotRect,
    pub x_field: String,
    pub x: CategoryScale,
    pub x_options: ScaleOptions,
    pub y: IndexMap<String, (LinearScale, ScaleOptions)>,
    pub tooltip_options: TooltipOptions,
}

impl ViewLayout {
    pub fn map(&self, date: &str, y_field: &str, value: f64) -> ChartResult<ScreenPoint> {
        let x = self.x.scale(date)?;
        let (scale, _) = self.y.get(y_field).ok_or_else(|| {
            ChartError::InvalidData(format!("no scale resolved for field `{y_field}`"))
        })?;
        let y = scale.scale(value)?;
        Ok(ScreenPoint::new(self.plot.x_at(x), self.plot.y_at(y)))
    }
}

/// One overlay drawing layer sharing the chart's coordinate space.
#[derive(Debug, Clone)]
pub struct View {
    index: usize,
    padding: Padding,
    data: SharedData,
    tooltip_enabled: bool,
    axes_enabled: bool,
    axis_overrides: IndexMap<String, Option<AxisOptions>>,
    geometries: Vec<Geometry>,
    tooltip: TooltipState,
    layout: Option<ViewLayout>,
}

impl View {
    pub(crate) fn new(index: usize, padding: Padding) -> Self {
        Self {
            index,
            padding,
            data: Arc::new(Vec::new()),
            tooltip_enabled: true,
            axes_enabled: true,
            axis_overrides: IndexMap::new(),
            geometries: Vec::new(),
            tooltip: TooltipState::hidden(),
            layout: None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn data(&mut self, data: SharedData) -> &mut Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn data_ref(&self) -> &SharedData {
        &self.data
    }

    pub fn tooltip(&mut self, enabled: bool) -> &mut Self {
        self.tooltip_enabled = enabled;
        if !enabled {
            self.tooltip = TooltipState::hidden();
        }
        self
    }

    #[must_use]
    pub fn tooltip_enabled(&self) -> bool {
        self.tooltip_enabled
    }

    /// Configures the axis drawn for `field`.
    pub fn axis(&mut self, field: impl Into<String>, options: AxisOptions) -> &mut Self {
        self.axes_enabled = true;
        self.axis_overrides.insert(field.into(), Some(options));
        self
    }

    /// Hides the axis of a single field.
    pub fn hide_axis(&mut self, field: impl Into<String>) -> &mut Self {
        self.axis_overrides.insert(field.into(), None);
        self
    }

    /// Turns off every axis of this view.
    pub fn disable_axes(&mut self) -> &mut Self {
        self.axes_enabled = false;
        self
    }

    #[must_use]
    pub fn axes_enabled(&self) -> bool {
        self.axes_enabled
    }

    /// Effective axis options for `field`, `None` when that axis is hidden.
    #[must_use]
    pub fn axis_options_for(&self, field: &str) -> Option<AxisOptions> {
        if !self.axes_enabled {
            return None;
        }
        match self.axis_overrides.get(field) {
            Some(options) => options.clone(),
            None => Some(AxisOptions::default()),
        }
    }

    pub fn area(&mut self) -> &mut Geometry {
        self.push_geometry(GeometryKind::Area)
    }

    pub fn line(&mut self) -> &mut Geometry {
        self.push_geometry(GeometryKind::Line)
    }

    pub fn point(&mut self) -> &mut Geometry {
        self.push_geometry(GeometryKind::Point)
    }

    fn push_geometry(&mut self, kind: GeometryKind) -> &mut Geometry {
        self.geometries.push(Geometry::new(kind));
        let last = self.geometries.len() - 1;
        &mut self.geometries[last]
    }

    #[must_use]
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Distinct `(x, y)` position fields in geometry order.
    pub fn position_fields(&self) -> ChartResult<Vec<(&str, &str)>> {
        let mut fields: Vec<(&str, &str)> = Vec::with_capacity(self.geometries.len());
        for geometry in &self.geometries {
            let pair = geometry.position_fields()?;
            if !fields.contains(&pair) {
                fields.push(pair);
            }
        }
        Ok(fields)
    }

    #[must_use]
    pub fn layout(&self) -> Option<&ViewLayout> {
        self.layout.as_ref()
    }

    pub(crate) fn set_layout(&mut self, layout: ViewLayout) {
        self.layout = Some(layout);
    }

    fn rendered_layout(&self) -> ChartResult<&ViewLayout> {
        self.layout.as_ref().ok_or_else(|| {
            ChartError::InvalidData(format!("view {} has not been rendered", self.index))
        })
    }

    /// Screen coordinates of `datum` for this view's first geometry.
    pub fn get_xy(&self, datum: &Datum) -> ChartResult<ScreenPoint> {
        let layout = self.rendered_layout()?;
        let geometry = self
            .geometries
            .first()
            .ok_or_else(|| ChartError::InvalidData(format!("view {} has no geometry", self.index)))?;
        let (_, y_field) = geometry.position_fields()?;
        layout.map(&datum.date, y_field, datum.require_field(y_field)?)
    }

    /// Shows the tooltip for the category nearest to `point`.
    ///
    /// Views with tooltips disabled ignore the call. Values come from the
    /// first datum carrying the category.
    pub fn show_tooltip(&mut self, point: ScreenPoint) -> ChartResult<&mut Self> {
        self.fill_tooltip(point, None)
    }

    /// Shows the tooltip at `datum`'s own position, reading values from it.
    ///
    /// Unlike [`View::show_tooltip`], repeated date labels still report the
    /// datum that was asked for.
    pub fn show_datum_tooltip(&mut self, datum: &Datum) -> ChartResult<ScreenPoint> {
        let point = self.get_xy(datum)?;
        self.fill_tooltip(point, Some(datum))?;
        Ok(point)
    }

    fn fill_tooltip(
        &mut self,
        point: ScreenPoint,
        pinned: Option<&Datum>,
    ) -> ChartResult<&mut Self> {
        if !self.tooltip_enabled {
            return Ok(self);
        }
        let layout = self.rendered_layout()?;
        let category = match pinned {
            Some(datum) => datum.date.clone(),
            None => {
                let normalized = (point.x - layout.plot.left) / layout.plot.width;
                let Some(index) = layout.x.nearest_index(normalized) else {
                    self.tooltip = TooltipState::hidden();
                    return Ok(self);
                };
                layout.x.values()[index].clone()
            }
        };

        let mut items: Vec<TooltipItem> = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        for geometry in &self.geometries {
            let (_, y_field) = geometry.position_fields()?;
            if seen.contains(&y_field) {
                continue;
            }
            seen.push(y_field);
            let Some(value) = pinned
                .and_then(|datum| datum.field(y_field))
                .or_else(|| {
                    self.data
                        .iter()
                        .find(|datum| datum.date == category)
                        .and_then(|datum| datum.field(y_field))
                })
            else {
                continue;
            };
            let Some((_, options)) = layout.y.get(y_field) else {
                continue;
            };
            items.push(TooltipItem {
                name: options.display_name(y_field).to_owned(),
                value: options.format_value(value),
                color: geometry.legend_color(),
                point: layout.map(&category, y_field, value)?,
            });
        }
        if !layout.tooltip_options.shared {
            items.truncate(1);
        }

        let title = layout.x_options.format_category(&category);
        self.tooltip = TooltipState {
            visible: true,
            anchor: Some(point),
            category: Some(category),
            title,
            items,
        };
        Ok(self)
    }

    pub fn hide_tooltip(&mut self) -> &mut Self {
        self.tooltip = TooltipState::hidden();
        self
    }

    #[must_use]
    pub fn tooltip_state(&self) -> &TooltipState {
        &self.tooltip
    }
}
