pub mod datum;
pub mod format;
pub mod scale;
pub mod shape;
pub mod types;

pub use datum::{DATE_FIELD, Datum, SharedData, VALUE_FIELD, categories, shared};
pub use format::{format_month_label, format_thousands};
pub use scale::{CategoryScale, DEFAULT_TICK_COUNT, LinearScale, nice_domain, tick_step, ticks};
pub use shape::{AreaShape, Interpolation, LineShape, PointShape, interpolate_path};
pub use types::{Padding, PlotRect, ScreenPoint, Viewport};
