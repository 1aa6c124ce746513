use chrono::{DateTime, Datelike, NaiveDate};

/// Month label for a date category: `2021-04-04` becomes `4月`.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Anything else is returned
/// unchanged so custom category labels still render.
#[must_use]
pub fn format_month_label(date: &str) -> String {
    let month = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|parsed| parsed.month())
        .or_else(|_| DateTime::parse_from_rfc3339(date).map(|parsed| parsed.month()));
    match month {
        Ok(month) => format!("{month}月"),
        Err(_) => date.to_owned(),
    }
}

/// Locale-style number text: comma grouping, at most three fraction digits.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 5);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = grouped.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::{format_month_label, format_thousands};

    #[test]
    fn month_label_drops_leading_zero() {
        assert_eq!(format_month_label("2021-04-04"), "4月");
        assert_eq!(format_month_label("2021-12-31"), "12月");
        assert_eq!(format_month_label("2021-06-06T08:00:00+08:00"), "6月");
    }

    #[test]
    fn unparseable_labels_pass_through() {
        assert_eq!(format_month_label("Q1"), "Q1");
    }

    #[test]
    fn thousands_grouping_matches_locale_output() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(620.0), "620");
        assert_eq!(format_thousands(1234.5), "1,234.5");
        assert_eq!(format_thousands(1_000_000.0), "1,000,000");
        assert_eq!(format_thousands(-98765.4321), "-98,765.432");
        assert_eq!(format_thousands(-0.0001), "0");
        assert_eq!(format_thousands(f64::NAN), "NaN");
    }
}
