//! # Carousel
//!
//! An autoplaying, scroll-synchronized carousel. The host renders slides in a
//! horizontally scrolling viewport and forwards what it observes as
//! [`CarouselEvent`]s; the [`CarouselController`] keeps three things
//! consistent:
//!
//! - the current slide index, stored in the host's indicator group,
//! - the autoplay countdown, paused while the user is hovering or focused
//!   inside,
//! - the viewport position, scrolled to the current slide whenever the index
//!   changes by navigation rather than by the user's own scrolling.
//!
//! ```rust
//! use std::rc::Rc;
//! use glide_carousel::*;
//! use glide_core::{ManualClock, MemoryStore, TaskQueue};
//! # struct Region;
//! # impl Viewport for Region {
//! #     fn width(&self) -> f32 { 300.0 }
//! #     fn scroll_to(&self, _offset: f32) {}
//! # }
//! # struct Three;
//! # impl SlideSource for Three { fn count(&self) -> usize { 3 } }
//!
//! let clock = ManualClock::new();
//! let queue = TaskQueue::new(clock.clone());
//! let parts = HostParts::new()
//!     .store(Rc::new(MemoryStore::default()))
//!     .viewport(Rc::new(Region))
//!     .slides(Rc::new(Three))
//!     .attributes(Rc::new(MemoryAttributes::new().with(INTERVAL_ATTRIBUTE, "5000")));
//!
//! let carousel = CarouselController::connect(parts, queue.clone())?;
//! queue.advance(&clock, web_time::Duration::from_millis(5000));
//! assert_eq!(carousel.current_index()?, 1);
//! # Ok::<(), glide_core::Error>(())
//! ```

pub mod action;
pub mod config;
pub mod controller;
pub mod host;
pub mod markup;
pub mod registry;


pub use action::*;
pub use config::*;
pub use controller::*;
pub use host::*;
pub use markup::{Indicator, indicators};
pub use registry::*;
