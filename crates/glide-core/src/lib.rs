//! # Values, timers, and the task queue
//!
//! Glide's core is single-threaded and cooperative. There are three main
//! pieces:
//!
//! - `ReactiveValue`: an integer whose only copy lives in a host-owned
//!   `SelectionStore`, with one observer notified per distinct write.
//! - `RestartableTimer`: a one-shot countdown that can be stopped,
//!   restarted, disabled, and re-enabled.
//! - `TaskQueue`: where timers park their callbacks until the driver runs
//!   them.
//!
//! ## Values
//!
//! ```rust
//! use std::rc::Rc;
//! use glide_core::*;
//!
//! let value = ReactiveValue::new(Rc::new(MemoryStore::new(0)));
//! value.on_change(|v| log::info!("now {v}"));
//! value.set(2)?; // notifies
//! value.set(2)?; // same value, silent
//! assert_eq!(value.get()?, 2);
//! # Ok::<(), glide_core::Error>(())
//! ```
//!
//! ## Timers
//!
//! Nothing runs on its own: the host drives the queue, either from its event
//! loop (`run_due`) or, headless, with a `ManualClock`:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use glide_core::*;
//! use web_time::Duration;
//!
//! let clock = ManualClock::new();
//! let queue = TaskQueue::new(clock.clone());
//! let fired = Rc::new(Cell::new(0));
//!
//! let timer = RestartableTimer::new(queue.clone(), Duration::from_millis(100), {
//!     let fired = fired.clone();
//!     move || fired.set(fired.get() + 1)
//! });
//!
//! timer.disable();
//! queue.advance(&clock, Duration::from_millis(500));
//! assert_eq!(fired.get(), 0);
//! ```

pub mod clock;
pub mod error;
pub mod queue;
pub mod scope;
pub mod timer;
pub mod value;


pub use clock::*;
pub use error::*;
pub use queue::*;
pub use scope::*;
pub use timer::*;
pub use value::*;
