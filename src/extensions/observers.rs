use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

/// Lifecycle and tooltip events emitted by the area chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentEvent {
    ChartConstructed {
        container_id: String,
        generation: u64,
    },
    ChartDestroyed {
        container_id: String,
        generation: u64,
    },
    TimerStarted {
        period: Duration,
    },
    TimerCancelled,
    TooltipHidden,
    TooltipShown {
        index: usize,
        date: String,
        point: ScreenPoint,
    },
}

/// Observer hook for host code that tracks the widget.
///
/// Observers only see events; they cannot reach into the chart.
pub trait ComponentObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ComponentEvent);
}
