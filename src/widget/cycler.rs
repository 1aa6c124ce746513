use tracing::{trace, warn};

use crate::api::Chart;
use crate::core::{Datum, ScreenPoint};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::init::TOOLTIP_VIEW_INDEX;

/// Point highlighted by one cycler tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleStep {
    pub index: usize,
    pub date: String,
    pub point: ScreenPoint,
}

/// Walks the tooltip through the active dataset one point per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TooltipCycler {
    index: usize,
}

impl TooltipCycler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the point the next tick highlights, before wrapping.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Moves the tooltip to the next point of `dataset` and repaints.
    ///
    /// Returns `Ok(None)` without touching anything when the chart has no
    /// views. An empty dataset is an error and leaves the index unchanged.
    pub fn tick<R: Renderer>(
        &mut self,
        chart: &mut Chart<R>,
        dataset: &[Datum],
    ) -> ChartResult<Option<CycleStep>> {
        if chart.views().is_empty() {
            warn!(container = chart.container(), "tooltip tick skipped: chart has no views");
            return Ok(None);
        }
        if dataset.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let position = self.index % dataset.len();
        let datum = &dataset[position];
        let view = chart.view_mut(TOOLTIP_VIEW_INDEX)?;
        let point = view.hide_tooltip().show_datum_tooltip(datum)?;
        chart.render()?;

        self.index = (position + 1) % dataset.len();
        trace!(index = position, date = %datum.date, "tooltip advanced");
        Ok(Some(CycleStep {
            index: position,
            date: datum.date.clone(),
            point,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::TooltipCycler;
    use crate::core::{Datum, shared};
    use crate::error::ChartError;
    use crate::render::NullRenderer;
    use crate::widget::defaults::default_data;
    use crate::widget::init::init_chart;
    use crate::widget::props::AreaChartProps;

    #[test]
    fn empty_dataset_is_an_error_and_keeps_the_index() {
        let config = AreaChartProps::new().resolved();
        let mut chart = init_chart(&config, "root", NullRenderer::default()).expect("chart");
        let mut cycler = TooltipCycler::new();
        assert_eq!(cycler.tick(&mut chart, &[]), Err(ChartError::EmptyDataset));
        assert_eq!(cycler.index(), 0);
    }

    #[test]
    fn index_wraps_after_last_point() {
        let config = AreaChartProps::new().resolved();
        let mut chart = init_chart(&config, "root", NullRenderer::default()).expect("chart");
        let data = default_data();
        let mut cycler = TooltipCycler::new();
        for expected in 0..6 {
            let step = cycler.tick(&mut chart, &data).expect("tick").expect("step");
            assert_eq!(step.index, expected);
        }
        assert_eq!(cycler.index(), 0);
        let tooltip = chart.views()[1].tooltip_state();
        assert!(tooltip.visible);
        assert_eq!(tooltip.category.as_deref(), Some("2021-06-06"));
    }

    #[test]
    fn repeated_dates_report_the_highlighted_datum() {
        let data = shared(vec![Datum::new("2021-03-03", 1.0), Datum::new("2021-03-03", 9.0)]);
        let config = AreaChartProps::new().with_data(data.clone()).resolved();
        let mut chart = init_chart(&config, "root", NullRenderer::default()).expect("chart");
        let mut cycler = TooltipCycler::new();

        cycler.tick(&mut chart, &data).expect("tick");
        assert_eq!(chart.views()[1].tooltip_state().items[0].value, "1");

        let step = cycler.tick(&mut chart, &data).expect("tick").expect("step");
        assert_eq!(step.index, 1);
        let tooltip = chart.views()[1].tooltip_state();
        assert_eq!(tooltip.items[0].value, "9");
        assert_eq!(tooltip.items[0].point, step.point);
    }
}
