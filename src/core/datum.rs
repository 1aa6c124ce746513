use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Field used for the horizontal (category) position of every datum.
pub const DATE_FIELD: &str = "Date";
/// Numeric field used by single-series data.
pub const VALUE_FIELD: &str = "value";

/// One row of chart data: a date label plus named numeric fields.
///
/// JSON shape: `{ "Date": "2021-01-01", "value": 120 }`. Multi-series rows
/// carry the series key instead of (or next to) `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(flatten)]
    pub fields: IndexMap<String, f64>,
}

impl Datum {
    /// Creates a single-series datum stored under the `value` field.
    #[must_use]
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self::with_field(date, VALUE_FIELD, value)
    }

    #[must_use]
    pub fn with_field(date: impl Into<String>, field: impl Into<String>, value: f64) -> Self {
        let mut fields = IndexMap::with_capacity(1);
        fields.insert(field.into(), value);
        Self {
            date: date.into(),
            fields,
        }
    }

    #[must_use]
    pub fn and_field(mut self, field: impl Into<String>, value: f64) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    #[must_use]
    pub fn field(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }

    pub fn require_field(&self, field: &str) -> ChartResult<f64> {
        self.field(field).ok_or_else(|| ChartError::MissingField {
            date: self.date.clone(),
            field: field.to_owned(),
        })
    }
}

/// Dataset shared between props, views and the tooltip cycler.
///
/// Pointer identity of the `Arc` is what the widget compares to decide
/// whether the chart must be rebuilt.
pub type SharedData = Arc<Vec<Datum>>;

#[must_use]
pub fn shared(data: Vec<Datum>) -> SharedData {
    Arc::new(data)
}

/// Distinct date labels in first-appearance order.
#[must_use]
pub fn categories(data: &[Datum]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(data.len());
    for datum in data {
        if !seen.contains(&datum.date.as_str()) {
            seen.push(datum.date.as_str());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::{Datum, categories};

    #[test]
    fn datum_json_uses_flat_date_and_fields() {
        let datum = Datum::new("2021-01-01", 120.0);
        let json = serde_json::to_string(&datum).expect("serialize");
        assert_eq!(json, r#"{"Date":"2021-01-01","value":120.0}"#);

        let parsed: Datum =
            serde_json::from_str(r#"{"Date":"2021-02-02","sales":5,"cost":2.5}"#).expect("parse");
        assert_eq!(parsed.field("sales"), Some(5.0));
        assert_eq!(parsed.field("cost"), Some(2.5));
        assert_eq!(parsed.fields.keys().collect::<Vec<_>>(), vec!["sales", "cost"]);
    }

    #[test]
    fn missing_field_reports_date_and_name() {
        let datum = Datum::new("2021-01-01", 1.0);
        let err = datum.require_field("sales").expect_err("missing");
        assert!(err.to_string().contains("2021-01-01"));
        assert!(err.to_string().contains("sales"));
    }

    #[test]
    fn categories_deduplicate_in_order() {
        let data = vec![
            Datum::new("b", 1.0),
            Datum::new("a", 2.0),
            Datum::new("b", 3.0),
        ];
        assert_eq!(categories(&data), vec!["b", "a"]);
    }
}
