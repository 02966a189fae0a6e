use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_time::Duration;

use crate::queue::{TaskKey, TaskQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Armed,
    Disabled,
}

struct TimerInner {
    queue: TaskQueue,
    duration: Duration,
    enabled: bool,
    pending: Option<TaskKey>,
    callback: Rc<dyn Fn()>,
}

/// One-shot countdown on a [`TaskQueue`] that only re-arms when told to.
///
/// At most one callback is pending at a time. Stopping or disabling removes it
/// from the queue, so it cannot run afterwards.
pub struct RestartableTimer {
    inner: Rc<RefCell<TimerInner>>,
}

impl RestartableTimer {
    /// Creates the timer and arms it if `duration` is non-zero.
    pub fn new(queue: TaskQueue, duration: Duration, callback: impl Fn() + 'static) -> Self {
        let timer = Self {
            inner: Rc::new(RefCell::new(TimerInner {
                queue,
                duration,
                enabled: true,
                pending: None,
                callback: Rc::new(callback),
            })),
        };
        timer.start();
        timer
    }

    pub fn duration(&self) -> Duration {
        self.inner.borrow().duration
    }

    /// Takes effect on the next `start`/`restart`; a pending countdown keeps
    /// its original deadline.
    pub fn set_duration(&self, duration: Duration) {
        self.inner.borrow_mut().duration = duration;
    }

    pub fn state(&self) -> TimerState {
        let inner = self.inner.borrow();
        if !inner.enabled {
            TimerState::Disabled
        } else if inner.pending.is_some() {
            TimerState::Armed
        } else {
            TimerState::Idle
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state() == TimerState::Armed
    }

    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.enabled || inner.duration.is_zero() || inner.pending.is_some() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let key = inner.queue.schedule(inner.duration, move || fire(weak));
        log::debug!("timer: armed for {:?}", inner.duration);
        inner.pending = Some(key);
    }

    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(key) = inner.pending.take() {
            inner.queue.cancel(key);
            log::debug!("timer: stopped");
        }
    }

    pub fn restart(&self) {
        self.stop();
        self.start();
    }

    pub fn disable(&self) {
        self.inner.borrow_mut().enabled = false;
        self.stop();
    }

    pub fn enable(&self) {
        self.inner.borrow_mut().enabled = true;
        self.start();
    }
}

impl Drop for RestartableTimer {
    fn drop(&mut self) {
        self.disable();
    }
}

fn fire(timer: Weak<RefCell<TimerInner>>) {
    let Some(inner) = timer.upgrade() else {
        return;
    };
    let callback = {
        let mut inner = inner.borrow_mut();
        inner.pending = None;
        inner.callback.clone()
    };
    log::debug!("timer: fired");
    callback();
}
