use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;
use glide_core::{ReactiveValue, RestartableTimer, Result, Scope, TaskQueue, TimerState};
use web_time::Duration;

use crate::action::Action;
use crate::config::{INTERVAL_ATTRIBUTE, normalize_interval};
use crate::host::{Host, HostParts};
use crate::markup;

bitflags! {
    /// Cached host facts, named by what makes them stale.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Invalidate: u8 {
        /// The interval attribute was edited.
        const INTERVAL = 1 << 0;
        /// Slides were added or removed.
        const SLIDE_COUNT = 1 << 1;
        /// The viewport changed size without a width reading attached.
        const VIEWPORT = 1 << 2;
    }
}

/// Something the host observed and forwards to the carousel.
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    Button(Action),
    FocusIn,
    FocusOut,
    PointerEnter,
    PointerLeave,
    /// A scroll or drag gesture came to rest at `offset`.
    ScrollSettled {
        offset: f32,
    },
    SlidesChanged,
    Resized {
        width: f32,
    },
    /// The user picked an indicator; the store already holds the new index.
    IndicatorSelected,
    AttributeChanged {
        name: String,
        old: Option<String>,
        new: Option<String>,
    },
}

struct Inner {
    host: Host,
    timer: RestartableTimer,
    index: ReactiveValue,
    interval: Cell<Option<u64>>,
    slide_count: Cell<Option<usize>>,
    viewport_width: Cell<f32>,
    scope: Scope,
}

impl Inner {
    fn interval(&self) -> u64 {
        if let Some(ms) = self.interval.get() {
            return ms;
        }
        let raw = self.host.attributes.attribute(INTERVAL_ATTRIBUTE);
        let ms = normalize_interval(raw.as_deref());
        self.interval.set(Some(ms));
        ms
    }

    fn slide_count(&self) -> usize {
        if let Some(n) = self.slide_count.get() {
            return n;
        }
        let n = self.host.slides.count();
        self.slide_count.set(Some(n));
        n
    }

    fn invalidate(&self, what: Invalidate) {
        if what.contains(Invalidate::INTERVAL) {
            self.interval.set(None);
        }
        if what.contains(Invalidate::SLIDE_COUNT) {
            self.slide_count.set(None);
        }
        if what.contains(Invalidate::VIEWPORT) {
            self.viewport_width.set(self.host.viewport.width().max(0.0));
        }
    }

    fn reconfigure_timer(&self) {
        self.timer.set_duration(Duration::from_millis(self.interval()));
        self.timer.restart();
    }

    fn step(&self, forward: bool) -> Result<()> {
        let n = self.slide_count();
        if n == 0 {
            log::debug!("carousel: no slides to navigate");
            return Ok(());
        }
        let current = self.index.get()?;
        let next = if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        };
        log::debug!("carousel: slide {current} -> {next}");
        self.index.set(next)
    }

    fn autoplay(&self) {
        if let Err(err) = self.step(true) {
            log::error!("carousel: autoplay failed: {err}");
        }
        self.timer.restart();
    }

    fn scroll_to(&self, index: usize) {
        self.host
            .viewport
            .scroll_to(index as f32 * self.viewport_width.get());
    }

    fn scroll_settled(&self, offset: f32) -> Result<()> {
        let width = self.viewport_width.get();
        if width > 0.0 && width.is_finite() && offset.is_finite() {
            self.sync_index_to_offset(offset / width)?;
        } else {
            log::debug!("carousel: settle at {offset} ignored, viewport width {width}");
        }
        self.timer.restart();
        Ok(())
    }

    fn sync_index_to_offset(&self, position: f32) -> Result<()> {
        let n = self.slide_count();
        if n == 0 {
            return Ok(());
        }
        let raw = position.round();
        let index = if raw < 0.0 {
            log::warn!("carousel: settle position {raw} before first slide, clamping");
            0
        } else if raw as usize >= n {
            log::warn!("carousel: settle position {raw} past {n} slides, clamping");
            n - 1
        } else {
            raw as usize
        };
        // The viewport is already there; write without scrolling again.
        if self.index.replace_quiet(index)? {
            log::debug!("carousel: settled on slide {index}");
        }
        Ok(())
    }

    fn render_indicators(&self) -> Result<()> {
        let indicators = markup::indicators(self.slide_count());
        self.host.surface.render_indicators(&indicators);
        // Fresh indicators come up with the first one selected.
        self.index.replace_quiet(0)?;
        Ok(())
    }

    fn teardown(&self) {
        self.scope.dispose();
        self.timer.disable();
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Keeps the current slide, the autoplay timer, and the indicators in step.
///
/// Clones share one carousel; disconnecting any of them disconnects all.
#[derive(Clone)]
pub struct CarouselController {
    inner: Rc<Inner>,
}

impl CarouselController {
    /// Renders the component into the host and starts autoplay if the
    /// interval attribute allows it.
    pub fn connect(parts: HostParts, queue: TaskQueue) -> Result<Self> {
        let host = parts.resolve()?;
        host.surface.render_static(&markup::static_markup());
        let raw_interval = host.attributes.attribute(INTERVAL_ATTRIBUTE);
        let interval = normalize_interval(raw_interval.as_deref());

        let inner = Rc::new_cyclic(|weak: &std::rc::Weak<Inner>| {
            let weak = weak.clone();
            let timer = RestartableTimer::new(queue, Duration::from_millis(interval), move || {
                if let Some(inner) = weak.upgrade() {
                    inner.autoplay();
                }
            });
            let index = ReactiveValue::new(host.store.clone());
            Inner {
                host,
                timer,
                index,
                interval: Cell::new(Some(interval)),
                slide_count: Cell::new(None),
                viewport_width: Cell::new(0.0),
                scope: Scope::new(),
            }
        });

        let weak = Rc::downgrade(&inner);
        inner.index.on_change(move |index| {
            if let Some(inner) = weak.upgrade() {
                inner.scroll_to(index);
            }
        });

        inner.invalidate(Invalidate::VIEWPORT);
        inner.host.viewport.observe_resize();
        let viewport = inner.host.viewport.clone();
        inner.scope.add_disposer(move || viewport.unobserve_resize());

        inner.render_indicators()?;
        log::debug!(
            "carousel: connected with {} slides, interval {}ms",
            inner.slide_count(),
            interval
        );
        Ok(Self { inner })
    }

    pub fn is_connected(&self) -> bool {
        !self.inner.scope.is_disposed()
    }

    /// Stops resize observation and autoplay. Later events are ignored.
    pub fn disconnect(&self) {
        if self.is_connected() {
            log::debug!("carousel: disconnected");
        }
        self.inner.teardown();
    }

    pub fn handle(&self, event: CarouselEvent) -> Result<()> {
        if !self.is_connected() {
            log::debug!("carousel: ignoring {event:?} after disconnect");
            return Ok(());
        }
        let inner = &self.inner;
        match event {
            CarouselEvent::Button(action) => self.perform(action),
            CarouselEvent::FocusIn | CarouselEvent::PointerEnter => {
                inner.timer.disable();
                Ok(())
            }
            CarouselEvent::FocusOut | CarouselEvent::PointerLeave => {
                inner.timer.enable();
                Ok(())
            }
            CarouselEvent::ScrollSettled { offset } => inner.scroll_settled(offset),
            CarouselEvent::SlidesChanged => {
                inner.invalidate(Invalidate::SLIDE_COUNT);
                inner.render_indicators()
            }
            CarouselEvent::Resized { width } => {
                inner.viewport_width.set(width.max(0.0));
                Ok(())
            }
            CarouselEvent::IndicatorSelected => inner.index.store_changed(),
            CarouselEvent::AttributeChanged { name, old, new } => {
                self.attribute_changed(&name, old.as_deref(), new.as_deref());
                Ok(())
            }
        }
    }

    pub fn perform(&self, action: Action) -> Result<()> {
        match action {
            Action::Next => self.show_next_slide(),
            Action::Prev => self.show_prev_slide(),
        }
    }

    /// Dispatches a button's `data-action` tag. Unknown tags are ignored.
    pub fn handle_action_tag(&self, tag: &str) -> Result<()> {
        match tag.parse::<Action>() {
            Ok(action) => self.handle(CarouselEvent::Button(action)),
            Err(err) => {
                log::debug!("carousel: {err}");
                Ok(())
            }
        }
    }

    pub fn show_next_slide(&self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }
        self.inner.step(true)
    }

    pub fn show_prev_slide(&self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }
        self.inner.step(false)
    }

    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new || !self.is_connected() {
            return;
        }
        if name == INTERVAL_ATTRIBUTE {
            self.inner.invalidate(Invalidate::INTERVAL);
            self.inner.reconfigure_timer();
            log::debug!("carousel: interval now {}ms", self.inner.interval());
        }
    }

    pub fn current_index(&self) -> Result<usize> {
        self.inner.index.get()
    }

    pub fn interval(&self) -> u64 {
        self.inner.interval()
    }

    /// Writes the interval back to the host attribute, clamped at zero, and
    /// re-arms autoplay with it.
    pub fn set_interval(&self, ms: i64) {
        let ms = u64::try_from(ms).unwrap_or(0);
        self.inner
            .host
            .attributes
            .set_attribute(INTERVAL_ATTRIBUTE, &ms.to_string());
        self.inner.invalidate(Invalidate::INTERVAL);
        if self.is_connected() {
            self.inner.reconfigure_timer();
        }
    }

    pub fn slide_count(&self) -> usize {
        self.inner.slide_count()
    }

    pub fn viewport_width(&self) -> f32 {
        self.inner.viewport_width.get()
    }

    pub fn invalidate(&self, what: Invalidate) {
        self.inner.invalidate(what);
    }

    pub fn timer_state(&self) -> TimerState {
        self.inner.timer.state()
    }
}
