use std::sync::Arc;

use parking_lot::Mutex;
use web_time::{Duration, Instant};

/// Time source for the task queue. Platforms use [`SystemClock`]; tests and
/// headless drivers use [`ManualClock`].
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you can drive deterministically. Clones share the same reading.
#[derive(Clone)]
pub struct ManualClock {
    t: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(t: Instant) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.t.lock() += by;
    }

    /// Moves the reading forward to `t`; never moves it backwards.
    pub fn set(&self, t: Instant) {
        let mut cur = self.t.lock();
        if t > *cur {
            *cur = t;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.t.lock()
    }
}
