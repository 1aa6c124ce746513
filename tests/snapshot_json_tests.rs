use std::time::Duration;

use area_chart::api::{ChartSnapshot, GeometryKind, InteractionKind};
use area_chart::render::NullRenderer;
use area_chart::widget::{AreaChart, AreaChartProps};

const PROPS_JSON: &str = r##"{
    "class_name": "dashboard",
    "data": [
        {"Date": "2021-01-01", "value": 120},
        {"Date": "2021-02-02", "value": 150},
        {"Date": "2021-03-03", "value": 250}
    ],
    "area_color": {"source": "#FF8800", "target": "#202020"},
    "shape": {"line": "smooth", "area": "smooth"},
    "viewport": {"width": 640, "height": 240},
    "duration": 1500
}"##;

fn mounted_from_json() -> AreaChart<NullRenderer> {
    let props = AreaChartProps::from_json_str(PROPS_JSON).expect("props");
    let mut widget = AreaChart::new(props, |_| Ok(NullRenderer::default()));
    widget.mount().expect("mount");
    widget
}

#[test]
fn snapshot_describes_views_and_interactions() {
    let mut widget = mounted_from_json();
    widget.advance(Duration::from_millis(3000)).expect("advance");
    let snapshot = widget.chart().expect("chart").snapshot();

    assert_eq!(Some(snapshot.container.as_str()), widget.container_id());
    assert_eq!(snapshot.viewport.width, 640);
    assert!(snapshot.rendered);
    assert_eq!(snapshot.views.len(), 2);
    assert!(!snapshot.interactions.contains(&InteractionKind::LegendFilter));

    let area = &snapshot.views[0];
    assert_eq!(area.geometries[0].kind, GeometryKind::Area);
    assert_eq!(area.geometries[0].shape, "smooth");
    assert_eq!(
        area.geometries[0].color.as_deref(),
        Some("l(90) 0:#FF8800 1:#202020")
    );
    assert!(!area.axes_enabled);
    assert_eq!(area.data_len, 3);

    let line = &snapshot.views[1];
    assert!(line.axis_bearing);
    assert!(line.tooltip.visible);
    assert_eq!(line.tooltip.category.as_deref(), Some("2021-02-02"));
    assert_eq!(line.tooltip.title, "2月");
    assert_eq!(widget.cycling_index(), 2);
}

#[test]
fn snapshot_json_contract_round_trips() {
    let widget = mounted_from_json();
    let snapshot = widget.chart().expect("chart").snapshot();

    let contract = snapshot.to_json_contract_v1_pretty().expect("contract json");
    assert!(contract.contains("\"schema_version\": 1"));
    let parsed = ChartSnapshot::from_json_compat_str(&contract).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = snapshot.to_json_pretty().expect("bare json");
    let parsed = ChartSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, snapshot);
}

#[test]
fn garbage_snapshot_json_is_rejected() {
    assert!(ChartSnapshot::from_json_compat_str("{\"schema_version\": 1}").is_err());
    assert!(ChartSnapshot::from_json_compat_str("not json").is_err());
}
