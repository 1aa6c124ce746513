use std::time::Duration;

use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::api::Chart;
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ComponentEvent, ComponentObserver};
use crate::interaction::IntervalTimer;
use crate::render::Renderer;

use super::cycler::TooltipCycler;
use super::init::init_chart;
use super::props::AreaChartProps;

/// Class every container carries before the caller's own class name.
pub const CONTAINER_BASE_CLASS: &str = "area-chart-container";

/// Creates the backend for each chart the component constructs.
pub type RendererFactory<R> = Box<dyn FnMut(Viewport) -> ChartResult<R>>;

/// Host-driven area chart widget.
///
/// The host calls `mount` / `set_props` / `unmount` in step with its own
/// lifecycle and feeds elapsed time through `advance`. The chart is rebuilt
/// only when the dataset identity changes.
pub struct AreaChart<R: Renderer> {
    props: AreaChartProps,
    renderer_factory: RendererFactory<R>,
    mounted: bool,
    chart: Option<Chart<R>>,
    container_id: Option<String>,
    timer: Option<IntervalTimer>,
    cycler: TooltipCycler,
    generation: u64,
    observers: Vec<Box<dyn ComponentObserver>>,
}

impl<R: Renderer> AreaChart<R> {
    pub fn new<F>(props: AreaChartProps, renderer_factory: F) -> Self
    where
        F: FnMut(Viewport) -> ChartResult<R> + 'static,
    {
        Self {
            props,
            renderer_factory: Box::new(renderer_factory),
            mounted: false,
            chart: None,
            container_id: None,
            timer: None,
            cycler: TooltipCycler::new(),
            generation: 0,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn props(&self) -> &AreaChartProps {
        &self.props
    }

    pub fn add_observer(&mut self, observer: Box<dyn ComponentObserver>) {
        self.observers.push(observer);
    }

    /// Removes the observer registered under `id`. Returns whether one was found.
    pub fn remove_observer(&mut self, id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id() != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// `area-chart-container` followed by the caller's class name, if any.
    #[must_use]
    pub fn container_class(&self) -> String {
        match self.props.class_name.as_deref() {
            Some(class_name) if !class_name.is_empty() => {
                format!("{CONTAINER_BASE_CLASS} {class_name}")
            }
            _ => CONTAINER_BASE_CLASS.to_owned(),
        }
    }

    /// Id of the container the current chart is bound to.
    #[must_use]
    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    #[must_use]
    pub fn chart(&self) -> Option<&Chart<R>> {
        self.chart.as_ref()
    }

    pub fn chart_mut(&mut self) -> Option<&mut Chart<R>> {
        self.chart.as_mut()
    }

    #[must_use]
    pub fn cycling_index(&self) -> usize {
        self.cycler.index()
    }

    /// Number of charts constructed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn timer(&self) -> Option<IntervalTimer> {
        self.timer
    }

    /// Constructs the chart and starts the tooltip timer.
    pub fn mount(&mut self) -> ChartResult<()> {
        if self.mounted {
            return Err(ChartError::AlreadyMounted);
        }
        self.cycler.reset();
        self.construct()?;
        self.mounted = true;
        self.start_timer()
    }

    /// Replaces the props.
    ///
    /// A new dataset identity rebuilds the chart; a new duration re-arms the
    /// timer. Everything else is picked up at the next rebuild. A failed
    /// rebuild leaves the component unmounted with the new props kept, so a
    /// later `mount` retries them.
    pub fn set_props(&mut self, props: AreaChartProps) -> ChartResult<()> {
        let data_changed = !self.props.same_data(&props);
        let period_changed = self.props.cycle_period() != props.cycle_period();
        self.props = props;
        if !self.mounted {
            return Ok(());
        }
        if data_changed {
            debug!(generation = self.generation, "dataset changed, rebuilding chart");
            self.teardown();
            if let Err(err) = self.construct() {
                warn!(error = %err, "chart rebuild failed, component unmounted");
                self.cancel_timer();
                self.mounted = false;
                return Err(err);
            }
        }
        if period_changed {
            self.cancel_timer();
            self.start_timer()?;
        }
        Ok(())
    }

    /// Destroys the chart and cancels the timer.
    ///
    /// Fails with `NotMounted` when there is no chart to destroy.
    pub fn unmount(&mut self) -> ChartResult<()> {
        self.cancel_timer();
        self.mounted = false;
        if self.teardown() {
            Ok(())
        } else {
            Err(ChartError::NotMounted)
        }
    }

    /// Feeds host time into the timer and runs every tick that became due.
    ///
    /// Returns the number of ticks fired. Nothing fires while unmounted.
    pub fn advance(&mut self, elapsed: Duration) -> ChartResult<usize> {
        if !self.mounted {
            return Ok(0);
        }
        let Some(timer) = self.timer.as_mut() else {
            return Ok(0);
        };
        let due = timer.advance(elapsed);
        let mut fired = 0;
        for _ in 0..due {
            self.tick()?;
            fired += 1;
        }
        Ok(fired)
    }

    /// Runs one tooltip step immediately.
    pub fn tick(&mut self) -> ChartResult<()> {
        if !self.mounted {
            return Err(ChartError::NotMounted);
        }
        let Some(chart) = self.chart.as_mut() else {
            return Err(ChartError::NotMounted);
        };
        let dataset = self.props.active_dataset();
        let Some(step) = self.cycler.tick(chart, &dataset)? else {
            return Ok(());
        };
        self.emit(&ComponentEvent::TooltipHidden);
        self.emit(&ComponentEvent::TooltipShown {
            index: step.index,
            date: step.date,
            point: step.point,
        });
        Ok(())
    }

    fn construct(&mut self) -> ChartResult<()> {
        let config = self.props.resolved();
        let container_id = Uuid::new_v4().to_string();
        let renderer = (self.renderer_factory)(config.viewport)?;
        let chart = init_chart(&config, &container_id, renderer)?;
        self.generation += 1;
        self.chart = Some(chart);
        self.container_id = Some(container_id.clone());
        debug!(container = %container_id, generation = self.generation, "chart mounted");
        self.emit(&ComponentEvent::ChartConstructed {
            container_id,
            generation: self.generation,
        });
        Ok(())
    }

    fn teardown(&mut self) -> bool {
        let Some(chart) = self.chart.take() else {
            return false;
        };
        let container_id = chart.container().to_owned();
        drop(chart.destroy());
        self.container_id = None;
        debug!(container = %container_id, generation = self.generation, "chart torn down");
        self.emit(&ComponentEvent::ChartDestroyed {
            container_id,
            generation: self.generation,
        });
        true
    }

    fn start_timer(&mut self) -> ChartResult<()> {
        let period = self.props.cycle_period();
        self.timer = Some(IntervalTimer::new(period)?);
        debug!(period_ms = period.as_millis() as u64, "tooltip timer started");
        self.emit(&ComponentEvent::TimerStarted { period });
        Ok(())
    }

    fn cancel_timer(&mut self) {
        let Some(mut timer) = self.timer.take() else {
            return;
        };
        timer.cancel();
        trace!(pending = ?timer.state().pending, "tooltip timer cancelled");
        self.emit(&ComponentEvent::TimerCancelled);
    }

    fn emit(&mut self, event: &ComponentEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AreaChart, CONTAINER_BASE_CLASS};
    use crate::error::ChartError;
    use crate::render::NullRenderer;
    use crate::widget::props::AreaChartProps;

    fn widget(props: AreaChartProps) -> AreaChart<NullRenderer> {
        AreaChart::new(props, |_| Ok(NullRenderer::default()))
    }

    #[test]
    fn container_class_appends_caller_class() {
        assert_eq!(widget(AreaChartProps::new()).container_class(), CONTAINER_BASE_CLASS);
        assert_eq!(
            widget(AreaChartProps::new().with_class_name("sales")).container_class(),
            "area-chart-container sales"
        );
    }

    #[test]
    fn mount_twice_is_rejected() {
        let mut chart = widget(AreaChartProps::new());
        chart.mount().expect("mount");
        assert_eq!(chart.mount(), Err(ChartError::AlreadyMounted));
        assert_eq!(chart.generation(), 1);
    }

    #[test]
    fn unmount_without_chart_is_reported() {
        let mut chart = widget(AreaChartProps::new());
        assert_eq!(chart.unmount(), Err(ChartError::NotMounted));
        chart.mount().expect("mount");
        chart.unmount().expect("unmount");
        assert_eq!(chart.unmount(), Err(ChartError::NotMounted));
        assert!(chart.container_id().is_none());
    }

    #[test]
    fn failing_renderer_factory_leaves_component_unmounted() {
        let mut chart: AreaChart<NullRenderer> = AreaChart::new(AreaChartProps::new(), |_| {
            Err(ChartError::InvalidData("no backend".to_owned()))
        });
        assert!(chart.mount().is_err());
        assert!(!chart.is_mounted());
        assert!(chart.timer().is_none());
    }
}
