//! GTK4 embedding: drives an [`AreaChart`] from a `DrawingArea`.
//!
//! Realize mounts the widget, unrealize unmounts it, a glib timeout feeds
//! elapsed time into the tooltip timer and the draw callback paints the
//! current chart into the widget's cairo context.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gtk4 as gtk;
use gtk::glib;
use gtk::prelude::*;
use tracing::warn;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, Renderer};
use crate::widget::{AreaChart, AreaChartProps};

/// How often the adapter polls the tooltip timer.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct GtkAreaChartAdapter<R: Renderer> {
    drawing_area: gtk::DrawingArea,
    component: Rc<RefCell<AreaChart<R>>>,
    poll_source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl<R> GtkAreaChartAdapter<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    #[must_use]
    pub fn new(component: AreaChart<R>) -> Self {
        let drawing_area = gtk::DrawingArea::new();
        for class in component.container_class().split_whitespace() {
            drawing_area.add_css_class(class);
        }
        if let Some(viewport) = component.props().viewport {
            drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
            drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));
        }

        let adapter = Self {
            drawing_area,
            component: Rc::new(RefCell::new(component)),
            poll_source: Rc::new(RefCell::new(None)),
        };
        adapter.connect_draw();
        adapter.connect_resize();
        adapter.connect_lifecycle();
        adapter
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn component(&self) -> Rc<RefCell<AreaChart<R>>> {
        Rc::clone(&self.component)
    }

    /// Forwards new props to the component and schedules a redraw.
    pub fn set_props(&self, props: AreaChartProps) -> ChartResult<()> {
        self.component.borrow_mut().set_props(props)?;
        self.drawing_area.queue_draw();
        Ok(())
    }

    fn connect_draw(&self) {
        let component = Rc::clone(&self.component);
        self.drawing_area
            .set_draw_func(move |_, context, _width, _height| {
                let mut component = component.borrow_mut();
                let Some(chart) = component.chart_mut() else {
                    return;
                };
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "area chart draw failed");
                }
            });
    }

    fn connect_resize(&self) {
        let component = Rc::clone(&self.component);
        self.drawing_area.connect_resize(move |area, width, height| {
            let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                return;
            };
            let mut component = component.borrow_mut();
            let Some(chart) = component.chart_mut() else {
                return;
            };
            match chart.change_size(Viewport::new(width, height)) {
                Ok(()) => area.queue_draw(),
                Err(err) => warn!(error = %err, "area chart resize rejected"),
            }
        });
    }

    fn connect_lifecycle(&self) {
        let component = Rc::clone(&self.component);
        let poll_source = Rc::clone(&self.poll_source);
        self.drawing_area.connect_realize(move |area| {
            if let Err(err) = component.borrow_mut().mount() {
                warn!(error = %err, "area chart mount failed");
                return;
            }
            let weak_area = area.downgrade();
            let component = Rc::clone(&component);
            let mut last_poll = Instant::now();
            let source = glib::timeout_add_local(POLL_INTERVAL, move || {
                let Some(area) = weak_area.upgrade() else {
                    return glib::ControlFlow::Break;
                };
                let now = Instant::now();
                let elapsed = now.duration_since(last_poll);
                last_poll = now;
                match component.borrow_mut().advance(elapsed) {
                    Ok(0) => {}
                    Ok(_) => area.queue_draw(),
                    Err(err) => warn!(error = %err, "area chart tooltip tick failed"),
                }
                glib::ControlFlow::Continue
            });
            if let Some(previous) = poll_source.borrow_mut().replace(source) {
                previous.remove();
            }
        });

        let component = Rc::clone(&self.component);
        let poll_source = Rc::clone(&self.poll_source);
        self.drawing_area.connect_unrealize(move |_| {
            if let Some(source) = poll_source.borrow_mut().take() {
                source.remove();
            }
            if let Err(err) = component.borrow_mut().unmount() {
                warn!(error = %err, "area chart unmount failed");
            }
        });
    }
}
