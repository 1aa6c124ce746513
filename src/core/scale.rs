use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default tick count used when niceing a linear domain.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Continuous mapping from a numeric domain into a normalized output range.
///
/// The output range is expressed in plot-relative units (`0.0` = start edge,
/// `1.0` = end edge) so the same scale can serve views with different plot
/// rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    pub fn with_range(mut self, range: [f64; 2]) -> ChartResult<Self> {
        if !range[0].is_finite() || !range[1].is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range[0];
        self.range_end = range[1];
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn scale(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, output: f64) -> ChartResult<f64> {
        if !output.is_finite() {
            return Err(ChartError::InvalidData("output must be finite".to_owned()));
        }
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a collapsed range".to_owned(),
            ));
        }

        let normalized = (output - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Step between ticks for `[start, stop]` split into about `count` intervals.
///
/// Steps are always 1, 2 or 5 times a power of ten.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let raw = (stop - start).abs() / count;
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Extends `[min, max]` outwards so both ends land on tick steps.
#[must_use]
pub fn nice_domain(min: f64, max: f64, count: usize) -> (f64, f64) {
    let (mut lo, mut hi) = (min, max);
    // Two passes settle the step once the domain has been widened.
    for _ in 0..2 {
        let step = tick_step(lo, hi, count);
        if step == 0.0 {
            break;
        }
        lo = (lo / step).floor() * step;
        hi = (hi / step).ceil() * step;
    }
    (lo, hi)
}

/// Tick values inside `[min, max]`, aligned to the nice step.
#[must_use]
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = tick_step(min, max, count);
    if step == 0.0 {
        return vec![min];
    }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Discrete mapping from category labels into a normalized output range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScale {
    values: Vec<String>,
    range_start: f64,
    range_end: f64,
}

impl CategoryScale {
    #[must_use]
    pub fn new(values: Vec<String>, range: [f64; 2]) -> Self {
        Self {
            values,
            range_start: range[0],
            range_end: range[1],
        }
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|candidate| candidate == value)
    }

    /// Normalized position of the category at `index`.
    ///
    /// A lone category sits in the middle of the range.
    #[must_use]
    pub fn scale_index(&self, index: usize) -> f64 {
        let span = self.range_end - self.range_start;
        if self.values.len() <= 1 {
            return self.range_start + span / 2.0;
        }
        let t = index as f64 / (self.values.len() - 1) as f64;
        self.range_start + t * span
    }

    pub fn scale(&self, value: &str) -> ChartResult<f64> {
        self.index_of(value)
            .map(|index| self.scale_index(index))
            .ok_or_else(|| ChartError::UnknownCategory(value.to_owned()))
    }

    /// Index of the category whose position is closest to `normalized`.
    #[must_use]
    pub fn nearest_index(&self, normalized: f64) -> Option<usize> {
        use ordered_float::OrderedFloat;

        (0..self.values.len())
            .min_by_key(|index| OrderedFloat((self.scale_index(*index) - normalized).abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryScale, LinearScale, nice_domain, tick_step, ticks};

    #[test]
    fn linear_scale_maps_into_configured_range() {
        let scale = LinearScale::new(0.0, 800.0)
            .expect("scale")
            .with_range([0.0, 0.95])
            .expect("range");
        assert!((scale.scale(400.0).expect("scale") - 0.475).abs() <= 1e-12);
        assert!((scale.invert(0.475).expect("invert") - 400.0).abs() <= 1e-9);
    }

    #[test]
    fn zero_span_domain_is_rejected() {
        assert!(LinearScale::new(5.0, 5.0).is_err());
    }

    #[test]
    fn tick_step_prefers_one_two_five() {
        assert_eq!(tick_step(0.0, 620.0, 5), 100.0);
        assert_eq!(tick_step(0.0, 10.0, 5), 2.0);
        assert_eq!(tick_step(0.0, 1.0, 5), 0.2);
    }

    #[test]
    fn nice_domain_rounds_outwards() {
        assert_eq!(nice_domain(0.0, 620.0, 5), (0.0, 700.0));
        assert_eq!(nice_domain(120.0, 620.0, 5), (100.0, 700.0));
    }

    #[test]
    fn ticks_cover_nice_domain() {
        assert_eq!(
            ticks(0.0, 700.0, 5),
            vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0]
        );
    }

    #[test]
    fn category_scale_spreads_values_across_range() {
        let scale = CategoryScale::new(
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            [0.0, 0.99],
        );
        assert_eq!(scale.scale("a").expect("a"), 0.0);
        assert!((scale.scale("b").expect("b") - 0.495).abs() <= 1e-12);
        assert!((scale.scale("c").expect("c") - 0.99).abs() <= 1e-12);
        assert!(scale.scale("z").is_err());
        assert_eq!(scale.nearest_index(0.6), Some(1));
    }

    #[test]
    fn single_category_is_centered() {
        let scale = CategoryScale::new(vec!["only".to_owned()], [0.0, 1.0]);
        assert_eq!(scale.scale("only").expect("only"), 0.5);
    }
}
