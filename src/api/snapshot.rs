use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, LayeredRenderFrame};

use super::{ChartScene, GeometryKind, InteractionKind, TooltipState};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub kind: GeometryKind,
    pub shape: String,
    pub y_field: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub index: usize,
    pub data_len: usize,
    pub tooltip_enabled: bool,
    pub axes_enabled: bool,
    /// True when the last render drew at least one axis primitive for this view.
    pub axis_bearing: bool,
    pub series_primitives: usize,
    pub geometries: Vec<GeometrySnapshot>,
    pub tooltip: TooltipState,
}

/// Serializable summary of a chart, used by tests and the snapshot tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub container: String,
    pub viewport: Viewport,
    pub rendered: bool,
    pub views: Vec<ViewSnapshot>,
    pub interactions: Vec<InteractionKind>,
    pub annotation_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub(crate) fn capture(scene: &ChartScene, frame: Option<&LayeredRenderFrame>) -> Self {
        let axis_bearing = frame.map(LayeredRenderFrame::axis_bearing_views).unwrap_or_default();
        let views = scene
            .views()
            .iter()
            .map(|view| {
                let series_primitives = frame
                    .and_then(|frame| frame.layer(view.index(), CanvasLayerKind::Series))
                    .map_or(0, |layer| {
                        layer.polygons.len() + layer.lines.len() + layer.markers.len()
                    });
                ViewSnapshot {
                    index: view.index(),
                    data_len: view.data_ref().len(),
                    tooltip_enabled: view.tooltip_enabled(),
                    axes_enabled: view.axes_enabled(),
                    axis_bearing: axis_bearing.contains(&view.index()),
                    series_primitives,
                    geometries: view
                        .geometries()
                        .iter()
                        .map(|geometry| GeometrySnapshot {
                            kind: geometry.kind,
                            shape: geometry.shape_name().to_owned(),
                            y_field: geometry
                                .position_fields()
                                .ok()
                                .map(|(_, y)| y.to_owned()),
                            color: geometry.color_spec().map(str::to_owned),
                        })
                        .collect(),
                    tooltip: view.tooltip_state().clone(),
                }
            })
            .collect();

        Self {
            container: scene.container().to_owned(),
            viewport: scene.viewport(),
            rendered: frame.is_some(),
            views,
            interactions: scene.interactions().to_vec(),
            annotation_count: scene.annotations().len(),
        }
    }

    /// Views that drew axes in the last render.
    #[must_use]
    pub fn axis_bearing_views(&self) -> Vec<usize> {
        self.views
            .iter()
            .filter(|view| view.axis_bearing)
            .map(|view| view.index)
            .collect()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartSnapshot;
    use crate::api::{ChartOptions, ChartScene};
    use crate::core::Viewport;

    #[test]
    fn unknown_schema_version_is_rejected() {
        let scene = ChartScene::new(ChartOptions::new("root", Viewport::new(10, 10))).expect("scene");
        let snapshot = ChartSnapshot::capture(&scene, None);
        let json = snapshot
            .to_json_contract_v1_pretty()
            .expect("json")
            .replace("\"schema_version\": 1", "\"schema_version\": 7");
        assert!(ChartSnapshot::from_json_compat_str(&json).is_err());
    }

    #[test]
    fn unrendered_chart_has_no_axis_bearing_view() {
        let mut scene =
            ChartScene::new(ChartOptions::new("root", Viewport::new(10, 10))).expect("scene");
        scene.create_view(None);
        let snapshot = ChartSnapshot::capture(&scene, None);
        assert!(!snapshot.rendered);
        assert!(snapshot.axis_bearing_views().is_empty());
        assert_eq!(snapshot.interactions.len(), 5);
    }
}
