//! Cooperative timing for periodic widget work. The host advances time; no
//! threads or system timers are involved.

mod interval;

pub use interval::{IntervalState, IntervalTimer};
