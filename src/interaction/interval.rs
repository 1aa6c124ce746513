use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Public timer state, exposed for snapshots and host diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalState {
    pub period: Duration,
    /// Time accumulated since the last fired tick.
    pub pending: Duration,
    pub cancelled: bool,
}

/// Deterministic fixed-period timer stepped by the host.
///
/// Ticks never overlap: `advance` only reports how many whole periods
/// elapsed and the caller runs them one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    state: IntervalState,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> ChartResult<Self> {
        if period.is_zero() {
            return Err(ChartError::InvalidData(
                "interval period must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            state: IntervalState {
                period,
                pending: Duration::ZERO,
                cancelled: false,
            },
        })
    }

    #[must_use]
    pub fn period(self) -> Duration {
        self.state.period
    }

    #[must_use]
    pub fn state(self) -> IntervalState {
        self.state
    }

    #[must_use]
    pub fn is_cancelled(self) -> bool {
        self.state.cancelled
    }

    /// Adds `elapsed` and returns the number of ticks now due.
    ///
    /// A cancelled timer always returns 0.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.state.cancelled {
            return 0;
        }
        let total = self.state.pending.saturating_add(elapsed);
        let period = self.state.period.as_nanos();
        let due = total.as_nanos() / period;
        let remainder = total.as_nanos() % period;
        // `remainder < period`, which itself came from a `Duration`.
        self.state.pending = Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX));
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    /// Time left until the next tick, `None` once cancelled.
    #[must_use]
    pub fn remaining(self) -> Option<Duration> {
        if self.state.cancelled {
            return None;
        }
        Some(self.state.period.saturating_sub(self.state.pending))
    }

    pub fn cancel(&mut self) {
        self.state.cancelled = true;
        self.state.pending = Duration::ZERO;
    }
}
