use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_TICK_COUNT;

pub type CategoryFormatterFn = Arc<dyn Fn(&str) -> String + Send + Sync + 'static>;
pub type ValueFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Category,
    Linear,
}

/// Which scales share one domain across views.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleSync {
    /// Scales of the same field in every view share their domain.
    Field,
    /// Every scale tagged with the same group shares its domain, whatever the field.
    Group(String),
}

/// Declarative scale definition registered on the chart per field.
#[derive(Clone)]
pub struct ScaleOptions {
    pub kind: ScaleKind,
    pub range: Option<[f64; 2]>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub nice: bool,
    pub sync: Option<ScaleSync>,
    pub alias: Option<String>,
    pub tick_count: usize,
    category_formatter: Option<CategoryFormatterFn>,
    value_formatter: Option<ValueFormatterFn>,
}

impl fmt::Debug for ScaleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleOptions")
            .field("kind", &self.kind)
            .field("range", &self.range)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("nice", &self.nice)
            .field("sync", &self.sync)
            .field("alias", &self.alias)
            .field("tick_count", &self.tick_count)
            .field("category_formatter", &self.category_formatter.is_some())
            .field("value_formatter", &self.value_formatter.is_some())
            .finish()
    }
}

impl ScaleOptions {
    fn with_kind(kind: ScaleKind) -> Self {
        Self {
            kind,
            range: None,
            min: None,
            max: None,
            nice: false,
            sync: None,
            alias: None,
            tick_count: DEFAULT_TICK_COUNT,
            category_formatter: None,
            value_formatter: None,
        }
    }

    #[must_use]
    pub fn category() -> Self {
        Self::with_kind(ScaleKind::Category)
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::with_kind(ScaleKind::Linear)
    }

    #[must_use]
    pub fn with_range(mut self, range: [f64; 2]) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    #[must_use]
    pub fn with_sync(mut self, sync: ScaleSync) -> Self {
        self.sync = Some(sync);
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count.max(1);
        self
    }

    #[must_use]
    pub fn with_category_formatter(mut self, formatter: CategoryFormatterFn) -> Self {
        self.category_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_value_formatter(mut self, formatter: ValueFormatterFn) -> Self {
        self.value_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn range_or_default(&self) -> [f64; 2] {
        self.range.unwrap_or([0.0, 1.0])
    }

    #[must_use]
    pub fn format_category(&self, value: &str) -> String {
        match &self.category_formatter {
            Some(formatter) => formatter(value),
            None => value.to_owned(),
        }
    }

    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match &self.value_formatter {
            Some(formatter) => formatter(value),
            None => value.to_string(),
        }
    }

    /// Display name for the field: the alias when one is set.
    #[must_use]
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::ScaleOptions;

    #[test]
    fn formatters_fall_back_to_raw_text() {
        let options = ScaleOptions::linear();
        assert_eq!(options.format_value(120.0), "120");
        assert_eq!(options.format_category("2021-01-01"), "2021-01-01");

        let options = options.with_value_formatter(Arc::new(|v| format!("{v:.1}%")));
        assert_eq!(options.format_value(12.0), "12.0%");
    }

    #[test]
    fn empty_alias_falls_back_to_field() {
        let options = ScaleOptions::category().with_alias("");
        assert_eq!(options.display_name("Date"), "Date");
        let options = options.with_alias("Month");
        assert_eq!(options.display_name("Date"), "Month");
    }
}
