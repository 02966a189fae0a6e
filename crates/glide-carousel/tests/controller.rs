use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glide_carousel::*;
use glide_core::{Error, ManualClock, MemoryStore, Result, TaskQueue, TimerState};
use web_time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Default)]
struct FakeViewport {
    width: Cell<f32>,
    scrolls: RefCell<Vec<f32>>,
    observing: Cell<bool>,
}

impl Viewport for FakeViewport {
    fn width(&self) -> f32 {
        self.width.get()
    }
    fn scroll_to(&self, offset: f32) {
        self.scrolls.borrow_mut().push(offset);
    }
    fn observe_resize(&self) {
        self.observing.set(true);
    }
    fn unobserve_resize(&self) {
        self.observing.set(false);
    }
}

struct FakeSlides(Cell<usize>);

impl SlideSource for FakeSlides {
    fn count(&self) -> usize {
        self.0.get()
    }
}

#[derive(Default)]
struct FakeSurface {
    static_renders: Cell<usize>,
    indicator_renders: RefCell<Vec<Vec<Indicator>>>,
}

impl RenderSurface for FakeSurface {
    fn render_static(&self, _markup: &str) {
        self.static_renders.set(self.static_renders.get() + 1);
    }
    fn render_indicators(&self, indicators: &[Indicator]) {
        self.indicator_renders.borrow_mut().push(indicators.to_vec());
    }
}

struct Harness {
    clock: ManualClock,
    queue: TaskQueue,
    store: Rc<MemoryStore>,
    viewport: Rc<FakeViewport>,
    slides: Rc<FakeSlides>,
    attrs: Rc<MemoryAttributes>,
    surface: Rc<FakeSurface>,
}

impl Harness {
    fn new(slides: usize, interval: &str, width: f32) -> Self {
        let clock = ManualClock::new();
        let viewport = FakeViewport::default();
        viewport.width.set(width);
        Self {
            queue: TaskQueue::new(clock.clone()),
            clock,
            store: Rc::new(MemoryStore::default()),
            viewport: Rc::new(viewport),
            slides: Rc::new(FakeSlides(Cell::new(slides))),
            attrs: Rc::new(MemoryAttributes::new().with(INTERVAL_ATTRIBUTE, interval)),
            surface: Rc::new(FakeSurface::default()),
        }
    }

    fn parts(&self) -> HostParts {
        HostParts::new()
            .store(self.store.clone())
            .viewport(self.viewport.clone())
            .slides(self.slides.clone())
            .attributes(self.attrs.clone())
            .surface(self.surface.clone())
    }

    fn connect(&self) -> CarouselController {
        CarouselController::connect(self.parts(), self.queue.clone()).unwrap()
    }

    fn advance(&self, n: u64) {
        self.queue.advance(&self.clock, ms(n));
    }

    fn scrolls(&self) -> Vec<f32> {
        self.viewport.scrolls.borrow().clone()
    }
}

#[test]
fn connect_renders_and_arms_autoplay() {
    let h = Harness::new(3, "5000", 300.0);
    let c = h.connect();

    assert_eq!(h.surface.static_renders.get(), 1);
    let renders = h.surface.indicator_renders.borrow();
    assert_eq!(renders.len(), 1);
    assert_eq!(renders[0].len(), 3);
    assert!(renders[0][0].selected);
    assert!(h.viewport.observing.get());
    assert_eq!(c.interval(), 5000);
    assert_eq!(c.viewport_width(), 300.0);
    assert_eq!(c.timer_state(), TimerState::Armed);
    assert_eq!(c.current_index().unwrap(), 0);
}

#[test]
fn missing_collaborators_fail_fast() {
    let h = Harness::new(3, "0", 300.0);

    let no_store = HostParts::new().viewport(h.viewport.clone());
    let err = CarouselController::connect(no_store, h.queue.clone()).err();
    assert_eq!(err, Some(Error::MissingCollaborator("selection store")));

    let no_viewport = HostParts::new().store(h.store.clone());
    let err = CarouselController::connect(no_viewport, h.queue.clone()).err();
    assert_eq!(err, Some(Error::MissingCollaborator("viewport")));
}

#[test]
fn navigation_wraps_both_ways() {
    let h = Harness::new(5, "0", 100.0);
    let c = h.connect();

    c.show_prev_slide().unwrap();
    assert_eq!(c.current_index().unwrap(), 4);
    c.show_next_slide().unwrap();
    assert_eq!(c.current_index().unwrap(), 0);
    assert_eq!(h.scrolls(), vec![400.0, 0.0]);
}

#[test]
fn buttons_dispatch_by_tag() {
    let h = Harness::new(3, "0", 100.0);
    let c = h.connect();

    c.handle_action_tag("next").unwrap();
    c.handle_action_tag("next").unwrap();
    c.handle_action_tag("bogus").unwrap();
    c.handle(CarouselEvent::Button(Action::Prev)).unwrap();
    assert_eq!(c.current_index().unwrap(), 1);
    assert_eq!(h.scrolls(), vec![100.0, 200.0, 100.0]);
}

#[test]
fn navigation_without_slides_is_a_no_op() {
    let h = Harness::new(0, "1000", 100.0);
    let c = h.connect();

    c.show_next_slide().unwrap();
    c.show_prev_slide().unwrap();
    h.advance(5000);
    assert_eq!(c.current_index().unwrap(), 0);
    assert!(h.scrolls().is_empty());
}

#[test]
fn scroll_settle_updates_index_without_scrolling() {
    let h = Harness::new(5, "0", 300.0);
    let c = h.connect();

    c.handle(CarouselEvent::ScrollSettled { offset: 620.0 }).unwrap();
    assert_eq!(c.current_index().unwrap(), 2);
    assert!(h.scrolls().is_empty());

    // Navigation continues from the settled slide.
    c.show_next_slide().unwrap();
    assert_eq!(h.scrolls(), vec![900.0]);
}

#[test]
fn scroll_settle_clamps_out_of_range() {
    let h = Harness::new(3, "0", 300.0);
    let c = h.connect();

    c.handle(CarouselEvent::ScrollSettled { offset: 5000.0 }).unwrap();
    assert_eq!(c.current_index().unwrap(), 2);
    c.handle(CarouselEvent::ScrollSettled { offset: -400.0 }).unwrap();
    assert_eq!(c.current_index().unwrap(), 0);
}

#[test]
fn scroll_settle_with_zero_width_keeps_index() {
    let h = Harness::new(3, "0", 0.0);
    let c = h.connect();
    c.show_next_slide().unwrap();

    c.handle(CarouselEvent::ScrollSettled { offset: 600.0 }).unwrap();
    assert_eq!(c.current_index().unwrap(), 1);
}

#[test]
fn scroll_settle_restarts_countdown() {
    let h = Harness::new(4, "1000", 100.0);
    let c = h.connect();

    h.advance(800);
    c.handle(CarouselEvent::ScrollSettled { offset: 200.0 }).unwrap();
    h.advance(999);
    assert_eq!(c.current_index().unwrap(), 2);
    h.advance(1);
    assert_eq!(c.current_index().unwrap(), 3);
}

#[test]
fn resize_updates_width_only() {
    let h = Harness::new(3, "0", 300.0);
    let c = h.connect();

    c.handle(CarouselEvent::Resized { width: 500.0 }).unwrap();
    assert_eq!(c.viewport_width(), 500.0);
    assert!(h.scrolls().is_empty());
    c.show_next_slide().unwrap();
    assert_eq!(h.scrolls(), vec![500.0]);

    h.viewport.width.set(250.0);
    c.invalidate(Invalidate::VIEWPORT);
    assert_eq!(c.viewport_width(), 250.0);
}

#[test]
fn indicator_selection_scrolls_to_slide() {
    let h = Harness::new(4, "0", 100.0);
    let c = h.connect();

    h.store.write(3).unwrap();
    c.handle(CarouselEvent::IndicatorSelected).unwrap();
    assert_eq!(h.scrolls(), vec![300.0]);
    assert_eq!(c.current_index().unwrap(), 3);
}

#[test]
fn slides_changed_rerenders_indicators() {
    let h = Harness::new(3, "0", 100.0);
    let c = h.connect();
    c.show_next_slide().unwrap();
    c.show_next_slide().unwrap();

    // Count stays cached until the host says the slides changed.
    h.slides.0.set(5);
    assert_eq!(c.slide_count(), 3);

    c.handle(CarouselEvent::SlidesChanged).unwrap();
    assert_eq!(c.slide_count(), 5);
    assert_eq!(c.current_index().unwrap(), 0);
    let renders = h.surface.indicator_renders.borrow();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[1].len(), 5);
    assert_eq!(renders[1].iter().filter(|i| i.selected).count(), 1);
}

#[test]
fn invalid_interval_disables_autoplay() {
    for raw in ["-5", "abc"] {
        let h = Harness::new(3, raw, 100.0);
        let c = h.connect();
        assert_eq!(c.interval(), 0);
        assert_eq!(c.timer_state(), TimerState::Idle);
        h.advance(60_000);
        assert_eq!(c.current_index().unwrap(), 0);
    }
}

#[test]
fn interval_attribute_change_restarts_timer() {
    let h = Harness::new(3, "1000", 100.0);
    let c = h.connect();

    h.advance(900);
    h.attrs.set_attribute(INTERVAL_ATTRIBUTE, "2000");
    c.handle(CarouselEvent::AttributeChanged {
        name: INTERVAL_ATTRIBUTE.to_owned(),
        old: Some("1000".to_owned()),
        new: Some("2000".to_owned()),
    })
    .unwrap();
    assert_eq!(c.interval(), 2000);

    h.advance(1999);
    assert_eq!(c.current_index().unwrap(), 0);
    h.advance(1);
    assert_eq!(c.current_index().unwrap(), 1);
}

#[test]
fn unchanged_or_unobserved_attribute_is_ignored() {
    let h = Harness::new(3, "1000", 100.0);
    let c = h.connect();

    h.advance(900);
    h.attrs.set_attribute(INTERVAL_ATTRIBUTE, "5000");
    c.attribute_changed(INTERVAL_ATTRIBUTE, Some("1000"), Some("1000"));
    c.attribute_changed("class", Some("a"), Some("b"));
    assert_eq!(c.interval(), 1000);

    h.advance(100);
    assert_eq!(c.current_index().unwrap(), 1);
}

#[test]
fn set_interval_writes_attribute_and_rearms() {
    let h = Harness::new(3, "0", 100.0);
    let c = h.connect();
    assert_eq!(c.timer_state(), TimerState::Idle);

    c.set_interval(250);
    assert_eq!(h.attrs.attribute(INTERVAL_ATTRIBUTE).as_deref(), Some("250"));
    assert_eq!(c.timer_state(), TimerState::Armed);
    h.advance(250);
    assert_eq!(c.current_index().unwrap(), 1);

    c.set_interval(-10);
    assert_eq!(h.attrs.attribute(INTERVAL_ATTRIBUTE).as_deref(), Some("0"));
    assert_eq!(c.timer_state(), TimerState::Idle);
}

#[test]
fn pointer_hover_pauses_autoplay() {
    let h = Harness::new(3, "1000", 100.0);
    let c = h.connect();

    h.advance(500);
    c.handle(CarouselEvent::PointerEnter).unwrap();
    h.advance(5000);
    assert_eq!(c.current_index().unwrap(), 0);

    c.handle(CarouselEvent::PointerLeave).unwrap();
    h.advance(999);
    assert_eq!(c.current_index().unwrap(), 0);
    h.advance(1);
    assert_eq!(c.current_index().unwrap(), 1);
}

#[test]
fn autoplay_end_to_end() {
    let h = Harness::new(3, "5000", 300.0);
    let c = h.connect();
    assert_eq!(c.timer_state(), TimerState::Armed);

    h.advance(4999);
    assert_eq!(c.current_index().unwrap(), 0);
    h.advance(1);
    assert_eq!(c.current_index().unwrap(), 1);
    assert_eq!(h.scrolls(), vec![300.0]);
    assert_eq!(c.timer_state(), TimerState::Armed);

    h.advance(100);
    c.handle(CarouselEvent::FocusIn).unwrap();
    assert_eq!(c.timer_state(), TimerState::Disabled);
    h.advance(60_000);
    assert_eq!(c.current_index().unwrap(), 1);

    c.handle(CarouselEvent::FocusOut).unwrap();
    h.advance(5000);
    assert_eq!(c.current_index().unwrap(), 2);
    h.advance(5000);
    assert_eq!(c.current_index().unwrap(), 0);
    assert_eq!(h.scrolls(), vec![300.0, 600.0, 0.0]);
}

#[test]
fn disconnect_stops_everything() {
    let h = Harness::new(3, "1000", 100.0);
    let c = h.connect();

    h.advance(999);
    c.disconnect();
    assert!(!c.is_connected());
    assert!(!h.viewport.observing.get());
    assert_eq!(c.timer_state(), TimerState::Disabled);

    h.advance(10_000);
    c.handle(CarouselEvent::FocusOut).unwrap();
    c.handle(CarouselEvent::Button(Action::Next)).unwrap();
    c.show_next_slide().unwrap();
    h.advance(10_000);
    assert_eq!(c.current_index().unwrap(), 0);
    assert!(h.scrolls().is_empty());
    assert!(h.queue.is_empty());
}

#[test]
fn dropping_controller_cancels_autoplay() {
    let h = Harness::new(3, "1000", 100.0);
    drop(h.connect());
    assert!(h.queue.is_empty());
    assert!(!h.viewport.observing.get());
    h.advance(5000);
    assert_eq!(h.store.read().unwrap(), 0);
}

struct DetachedStore;

impl SelectionStore for DetachedStore {
    fn read(&self) -> Result<usize> {
        Err(Error::Store("indicator group detached".into()))
    }
    fn write(&self, _value: usize) -> Result<()> {
        Err(Error::Store("indicator group detached".into()))
    }
}

#[test]
fn store_failure_surfaces_at_connect() {
    let h = Harness::new(3, "1000", 100.0);
    let parts = h.parts().store(Rc::new(DetachedStore));
    let err = CarouselController::connect(parts, h.queue.clone()).err();
    assert!(matches!(err, Some(Error::Store(_))));
    assert!(h.queue.is_empty());
}
