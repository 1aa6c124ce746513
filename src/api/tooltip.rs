use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipOptions {
    #[serde(default)]
    pub show_crosshairs: bool,
    #[serde(default)]
    pub shared: bool,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            show_crosshairs: false,
            shared: true,
        }
    }
}

/// One row of the tooltip box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipItem {
    pub name: String,
    pub value: String,
    pub color: Option<String>,
    pub point: ScreenPoint,
}

/// Tooltip content currently shown by a view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    /// Position the tooltip was requested at.
    pub anchor: Option<ScreenPoint>,
    /// Category the anchor snapped to.
    pub category: Option<String>,
    pub title: String,
    pub items: Vec<TooltipItem>,
}

impl TooltipState {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }
}
