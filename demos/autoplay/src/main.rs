//! Headless carousel run: autoplay on a manual clock, with a hover, a drag,
//! and a teardown along the way. `RUST_LOG=debug` shows the controller's side.
//!
//! Pass a JSON config as the first argument, e.g. `'{"interval": "1500"}'`.

use std::cell::Cell;
use std::rc::Rc;

use glide_carousel::{
    CarouselConfig, CarouselEvent, ComponentRegistry, HostParts, Indicator, MemoryAttributes,
    RenderSurface, SlideSource, TAG_NAME, Viewport, markup, register,
};
use glide_core::{ManualClock, MemoryStore, TaskQueue};
use web_time::Duration;

struct ConsoleViewport {
    width: f32,
}

impl Viewport for ConsoleViewport {
    fn width(&self) -> f32 {
        self.width
    }
    fn scroll_to(&self, offset: f32) {
        println!("  viewport -> scroll to {offset}px");
    }
}

struct Slides(Cell<usize>);

impl SlideSource for Slides {
    fn count(&self) -> usize {
        self.0.get()
    }
}

struct ConsoleSurface;

impl RenderSurface for ConsoleSurface {
    fn render_static(&self, markup: &str) {
        log::debug!("static markup:\n{markup}");
    }
    fn render_indicators(&self, indicators: &[Indicator]) {
        print!("  indicators:\n{}", markup::indicator_markup(indicators));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config: CarouselConfig = match std::env::args().nth(1) {
        Some(json) => serde_json::from_str(&json)?,
        None => serde_json::from_str(r#"{"interval": 2000}"#)?,
    };
    register()?;

    let clock = ManualClock::new();
    let queue = TaskQueue::new(clock.clone());
    let store = Rc::new(MemoryStore::default());
    let slides = Rc::new(Slides(Cell::new(4)));
    let attributes = Rc::new(MemoryAttributes::new());
    config.apply(&*attributes);

    let parts = HostParts::new()
        .store(store)
        .viewport(Rc::new(ConsoleViewport { width: 320.0 }))
        .slides(slides.clone())
        .attributes(attributes)
        .surface(Rc::new(ConsoleSurface));
    let carousel = ComponentRegistry::global().create(TAG_NAME, parts, queue.clone())?;
    println!("connected, interval {}ms", carousel.interval());

    let step = |label: &str, ms: u64| -> anyhow::Result<()> {
        queue.advance(&clock, Duration::from_millis(ms));
        println!(
            "[{label}] +{ms}ms: slide {}, timer {:?}",
            carousel.current_index()?,
            carousel.timer_state()
        );
        Ok(())
    };

    let interval = carousel.interval().max(1);
    step("autoplay", interval)?;
    step("autoplay", interval)?;

    carousel.handle(CarouselEvent::PointerEnter)?;
    step("hovered", interval * 3)?;
    carousel.handle(CarouselEvent::PointerLeave)?;

    carousel.handle(CarouselEvent::ScrollSettled { offset: 330.0 })?;
    step("dragged", interval / 2)?;

    slides.0.set(6);
    carousel.handle(CarouselEvent::SlidesChanged)?;
    carousel.handle_action_tag("prev")?;
    step("prev", interval)?;

    carousel.disconnect();
    step("disconnected", interval * 5)?;
    Ok(())
}
