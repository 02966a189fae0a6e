//! Collaborators the host environment supplies to a carousel.

use std::rc::Rc;

use glide_core::{Error, Result};

use crate::markup::Indicator;

pub use glide_core::SelectionStore;

/// The slotted slides, in order.
pub trait SlideSource {
    fn count(&self) -> usize;
}

/// The horizontally scrolling region that shows one slide at a time.
pub trait Viewport {
    fn width(&self) -> f32;
    /// Scroll so the left edge sits at `offset`. Easing is up to the host.
    fn scroll_to(&self, offset: f32);
    /// Start delivering `Resized` events for this viewport.
    fn observe_resize(&self) {}
    fn unobserve_resize(&self) {}
}

pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
}

pub trait RenderSurface {
    /// Mounts the component's fixed structure. Called once per connection.
    fn render_static(&self, markup: &str);
    /// Replaces the indicator group's children.
    fn render_indicators(&self, indicators: &[Indicator]);
}

struct NoSlides;
impl SlideSource for NoSlides {
    fn count(&self) -> usize {
        0
    }
}

struct NoAttributes;
impl AttributeSource for NoAttributes {
    fn attribute(&self, _name: &str) -> Option<String> {
        None
    }
    fn set_attribute(&self, _name: &str, _value: &str) {}
}

struct NullSurface;
impl RenderSurface for NullSurface {
    fn render_static(&self, _markup: &str) {}
    fn render_indicators(&self, _indicators: &[Indicator]) {}
}

/// Host collaborators as handed over at connection time.
#[derive(Default, Clone)]
pub struct HostParts {
    pub store: Option<Rc<dyn SelectionStore>>,
    pub slides: Option<Rc<dyn SlideSource>>,
    pub viewport: Option<Rc<dyn Viewport>>,
    pub attributes: Option<Rc<dyn AttributeSource>>,
    pub surface: Option<Rc<dyn RenderSurface>>,
}

impl HostParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Rc<dyn SelectionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn slides(mut self, slides: Rc<dyn SlideSource>) -> Self {
        self.slides = Some(slides);
        self
    }

    pub fn viewport(mut self, viewport: Rc<dyn Viewport>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn attributes(mut self, attributes: Rc<dyn AttributeSource>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn surface(mut self, surface: Rc<dyn RenderSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Fails on a missing store or viewport; the rest fall back to inert
    /// stand-ins.
    pub(crate) fn resolve(self) -> Result<Host> {
        Ok(Host {
            store: self.store.ok_or(Error::MissingCollaborator("selection store"))?,
            viewport: self.viewport.ok_or(Error::MissingCollaborator("viewport"))?,
            slides: self.slides.unwrap_or_else(|| Rc::new(NoSlides)),
            attributes: self.attributes.unwrap_or_else(|| Rc::new(NoAttributes)),
            surface: self.surface.unwrap_or_else(|| Rc::new(NullSurface)),
        })
    }
}

pub(crate) struct Host {
    pub store: Rc<dyn SelectionStore>,
    pub viewport: Rc<dyn Viewport>,
    pub slides: Rc<dyn SlideSource>,
    pub attributes: Rc<dyn AttributeSource>,
    pub surface: Rc<dyn RenderSurface>,
}
