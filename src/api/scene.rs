use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Padding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::Annotations;
use crate::render::LayeredRenderFrame;

use super::{ScaleOptions, TooltipOptions, View, scene_builder};

/// Built-in pointer interactions a chart starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Tooltip,
    LegendFilter,
    LegendActive,
    ContinuousFilter,
    EllipsisText,
}

impl InteractionKind {
    pub const DEFAULTS: [Self; 5] = [
        Self::Tooltip,
        Self::LegendFilter,
        Self::LegendActive,
        Self::ContinuousFilter,
        Self::EllipsisText,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::LegendFilter => "legend-filter",
            Self::LegendActive => "legend-active",
            Self::ContinuousFilter => "continuous-filter",
            Self::EllipsisText => "ellipsis-text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Mount-point identifier of the hosting element.
    pub container: String,
    /// Follow the container size on resize.
    pub auto_fit: bool,
    pub padding: Padding,
    pub viewport: Viewport,
}

impl ChartOptions {
    #[must_use]
    pub fn new(container: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            container: container.into(),
            auto_fit: true,
            padding: Padding::uniform(0.0),
            viewport,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_auto_fit(mut self, auto_fit: bool) -> Self {
        self.auto_fit = auto_fit;
        self
    }
}

/// Renderer-independent part of a chart: scales, views, tooltip settings,
/// interactions and decorations.
///
/// Decoration hooks receive this type so they work with any backend.
#[derive(Debug, Clone)]
pub struct ChartScene {
    options: ChartOptions,
    scales: IndexMap<String, ScaleOptions>,
    tooltip: TooltipOptions,
    views: Vec<View>,
    interactions: Vec<InteractionKind>,
    annotations: Annotations,
}

impl ChartScene {
    pub fn new(options: ChartOptions) -> ChartResult<Self> {
        options.viewport.validate()?;
        Ok(Self {
            options,
            scales: IndexMap::new(),
            tooltip: TooltipOptions::default(),
            views: Vec::new(),
            interactions: InteractionKind::DEFAULTS.to_vec(),
            annotations: Annotations::default(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn container(&self) -> &str {
        &self.options.container
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.options.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.options.viewport = viewport.validate()?;
        Ok(())
    }

    /// Registers (or replaces) the scale definition of `field`.
    pub fn scale(&mut self, field: impl Into<String>, options: ScaleOptions) -> &mut Self {
        self.scales.insert(field.into(), options);
        self
    }

    #[must_use]
    pub fn scale_options(&self, field: &str) -> Option<&ScaleOptions> {
        self.scales.get(field)
    }

    pub fn tooltip(&mut self, options: TooltipOptions) -> &mut Self {
        self.tooltip = options;
        self
    }

    #[must_use]
    pub fn tooltip_options(&self) -> TooltipOptions {
        self.tooltip
    }

    /// Adds an overlay view. `None` inherits the chart padding.
    pub fn create_view(&mut self, padding: Option<Padding>) -> &mut View {
        let index = self.views.len();
        self.views
            .push(View::new(index, padding.unwrap_or(self.options.padding)));
        &mut self.views[index]
    }

    #[must_use]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    #[must_use]
    pub fn view(&self, index: usize) -> Option<&View> {
        self.views.get(index)
    }

    pub fn view_mut(&mut self, index: usize) -> ChartResult<&mut View> {
        self.views
            .get_mut(index)
            .ok_or(ChartError::MissingView(index))
    }

    /// Removes a built-in interaction. Unknown or already removed kinds are ignored.
    pub fn remove_interaction(&mut self, kind: InteractionKind) -> &mut Self {
        self.interactions.retain(|candidate| *candidate != kind);
        self
    }

    #[must_use]
    pub fn interactions(&self) -> &[InteractionKind] {
        &self.interactions
    }

    #[must_use]
    pub fn has_interaction(&self, kind: InteractionKind) -> bool {
        self.interactions.contains(&kind)
    }

    pub fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    #[must_use]
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Resolves scales for every view and builds the layered frame.
    pub fn layout(&mut self) -> ChartResult<LayeredRenderFrame> {
        let layouts = scene_builder::resolve_layouts(self)?;
        for (view, layout) in self.views.iter_mut().zip(layouts) {
            view.set_layout(layout);
        }
        scene_builder::build_frame(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartOptions, ChartScene, InteractionKind};
    use crate::core::{Padding, Viewport};

    #[test]
    fn views_inherit_chart_padding_unless_given() {
        let options = ChartOptions::new("root", Viewport::new(400, 300))
            .with_padding(Padding::new(1.0, 2.0, 3.0, 4.0));
        let mut scene = ChartScene::new(options).expect("scene");
        scene.create_view(None);
        scene.create_view(Some(Padding::uniform(10.0)));
        assert_eq!(scene.views()[0].padding(), Padding::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(scene.views()[1].padding(), Padding::uniform(10.0));
        assert_eq!(scene.views()[1].index(), 1);
    }

    #[test]
    fn removing_interaction_keeps_the_others() {
        let mut scene =
            ChartScene::new(ChartOptions::new("root", Viewport::new(10, 10))).expect("scene");
        scene.remove_interaction(InteractionKind::LegendFilter);
        scene.remove_interaction(InteractionKind::LegendFilter);
        assert!(!scene.has_interaction(InteractionKind::LegendFilter));
        assert!(scene.has_interaction(InteractionKind::Tooltip));
        assert_eq!(scene.interactions().len(), 4);
    }

    #[test]
    fn missing_view_is_reported() {
        let mut scene =
            ChartScene::new(ChartOptions::new("root", Viewport::new(10, 10))).expect("scene");
        assert!(scene.view_mut(1).is_err());
    }

    #[test]
    fn zero_viewport_is_rejected() {
        assert!(ChartScene::new(ChartOptions::new("root", Viewport::new(0, 10))).is_err());
    }
}
