use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Series,
    Axis,
    Overlay,
    Tooltip,
}

/// Ordered layers painted for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLayerStack {
    pub view_index: usize,
    pub layers: Vec<CanvasLayerKind>,
}

impl ViewLayerStack {
    /// Series under axes, decorations above both, tooltip on top.
    #[must_use]
    pub fn canonical_for_view(view_index: usize) -> Self {
        Self {
            view_index,
            layers: vec![
                CanvasLayerKind::Series,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Overlay,
                CanvasLayerKind::Tooltip,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, ViewLayerStack};

    #[test]
    fn view_layer_stack_keeps_tooltip_on_top() {
        let stack = ViewLayerStack::canonical_for_view(3);
        assert_eq!(stack.view_index, 3);
        assert_eq!(stack.layers.last(), Some(&CanvasLayerKind::Tooltip));
        assert_eq!(stack.layers.first(), Some(&CanvasLayerKind::Series));
    }
}
