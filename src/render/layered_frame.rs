use crate::core::Viewport;

use super::{
    CanvasLayerKind, LinePrimitive, MarkerPrimitive, PolygonPrimitive, RectPrimitive, RenderFrame,
    TextPrimitive, ViewLayerStack,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub polygons: Vec<PolygonPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            polygons: Vec::new(),
            lines: Vec::new(),
            markers: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
            && self.lines.is_empty()
            && self.markers.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewLayerFrame {
    pub view_index: usize,
    pub layers: Vec<LayerPrimitives>,
}

impl ViewLayerFrame {
    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }
}

/// Per-view layered scene. Views are stacked in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub views: Vec<ViewLayerFrame>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stacks(viewport: Viewport, stacks: Vec<ViewLayerStack>) -> Self {
        let views = stacks
            .into_iter()
            .map(|stack| ViewLayerFrame {
                view_index: stack.view_index,
                layers: stack.layers.into_iter().map(LayerPrimitives::empty).collect(),
            })
            .collect();
        Self { viewport, views }
    }

    #[must_use]
    pub fn layer(&self, view_index: usize, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.views
            .iter()
            .find(|view| view.view_index == view_index)?
            .layer(kind)
    }

    pub fn layer_mut(
        &mut self,
        view_index: usize,
        kind: CanvasLayerKind,
    ) -> Option<&mut LayerPrimitives> {
        self.views
            .iter_mut()
            .find(|view| view.view_index == view_index)?
            .layers
            .iter_mut()
            .find(|layer| layer.kind == kind)
    }

    pub fn push_polygon(&mut self, view_index: usize, kind: CanvasLayerKind, polygon: PolygonPrimitive) {
        if let Some(layer) = self.layer_mut(view_index, kind) {
            layer.polygons.push(polygon);
        }
    }

    pub fn push_line(&mut self, view_index: usize, kind: CanvasLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(view_index, kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_marker(&mut self, view_index: usize, kind: CanvasLayerKind, marker: MarkerPrimitive) {
        if let Some(layer) = self.layer_mut(view_index, kind) {
            layer.markers.push(marker);
        }
    }

    pub fn push_rect(&mut self, view_index: usize, kind: CanvasLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(view_index, kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_text(&mut self, view_index: usize, kind: CanvasLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(view_index, kind) {
            layer.texts.push(text);
        }
    }

    /// Views that drew at least one axis primitive.
    #[must_use]
    pub fn axis_bearing_views(&self) -> Vec<usize> {
        self.views
            .iter()
            .filter(|view| {
                view.layer(CanvasLayerKind::Axis)
                    .is_some_and(|layer| !layer.is_empty())
            })
            .map(|view| view.view_index)
            .collect()
    }

    /// Flattens layer by layer so every view's series sit under every axis.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        let kinds = [
            CanvasLayerKind::Series,
            CanvasLayerKind::Axis,
            CanvasLayerKind::Overlay,
            CanvasLayerKind::Tooltip,
        ];
        for kind in kinds {
            for view in &self.views {
                let Some(layer) = view.layer(kind) else {
                    continue;
                };
                frame.polygons.extend(layer.polygons.iter().cloned());
                frame.lines.extend(layer.lines.iter().copied());
                frame.markers.extend(layer.markers.iter().copied());
                frame.rects.extend(layer.rects.iter().copied());
                frame.texts.extend(layer.texts.iter().cloned());
            }
        }
        frame
    }

    #[must_use]
    pub fn flatten_view(&self, view_index: usize) -> Option<RenderFrame> {
        let view = self.views.iter().find(|view| view.view_index == view_index)?;
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &view.layers {
            frame.polygons.extend(layer.polygons.iter().cloned());
            frame.lines.extend(layer.lines.iter().copied());
            frame.markers.extend(layer.markers.iter().copied());
            frame.rects.extend(layer.rects.iter().copied());
            frame.texts.extend(layer.texts.iter().cloned());
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive, ViewLayerStack};

    #[test]
    fn flatten_orders_layers_across_views() {
        let mut frame = LayeredRenderFrame::from_stacks(
            Viewport::new(100, 100),
            vec![
                ViewLayerStack::canonical_for_view(0),
                ViewLayerStack::canonical_for_view(1),
            ],
        );
        let axis = LinePrimitive::new(0.0, 0.0, 0.0, 10.0, 1.0, Color::rgb(0.0, 0.0, 0.0));
        let series = LinePrimitive::new(1.0, 1.0, 5.0, 5.0, 2.0, Color::rgb(1.0, 0.0, 0.0));
        frame.push_line(0, CanvasLayerKind::Axis, axis);
        frame.push_line(1, CanvasLayerKind::Series, series);

        let flat = frame.flatten();
        assert_eq!(flat.lines, vec![series, axis]);
        assert_eq!(frame.axis_bearing_views(), vec![0]);
    }

    #[test]
    fn pushes_to_unknown_views_are_ignored() {
        let mut frame = LayeredRenderFrame::from_stacks(
            Viewport::new(100, 100),
            vec![ViewLayerStack::canonical_for_view(0)],
        );
        let line = LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, Color::rgb(0.0, 0.0, 0.0));
        frame.push_line(9, CanvasLayerKind::Series, line);
        assert!(frame.flatten().is_empty());
        assert!(frame.flatten_view(9).is_none());
    }
}
