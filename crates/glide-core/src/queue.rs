//! Cooperative task queue.
//!
//! Deferred work (timer callbacks) is queued here and run one task at a time
//! to completion, in deadline order, with ties broken by scheduling order.
//! Nothing runs until the driver calls [`TaskQueue::run_due`], so a task that
//! is cancelled before its turn is guaranteed never to run.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::clock::{Clock, ManualClock, SystemClock};

new_key_type! {
    /// Handle to a scheduled task, valid until it runs or is cancelled.
    pub struct TaskKey;
}

struct Task {
    due: Instant,
    seq: u64,
    run: Box<dyn FnOnce()>,
}

struct QueueInner {
    clock: Box<dyn Clock>,
    tasks: SlotMap<TaskKey, Task>,
    next_seq: u64,
}

impl QueueInner {
    fn earliest(&self) -> Option<(TaskKey, Instant)> {
        self.tasks
            .iter()
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(k, t)| (k, t.due))
    }
}

#[derive(Clone)]
pub struct TaskQueue(Rc<RefCell<QueueInner>>);

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl TaskQueue {
    pub fn new(clock: impl Clock) -> Self {
        Self(Rc::new(RefCell::new(QueueInner {
            clock: Box::new(clock),
            tasks: SlotMap::with_key(),
            next_seq: 0,
        })))
    }

    pub fn now(&self) -> Instant {
        self.0.borrow().clock.now()
    }

    /// Queues `f` to run once `delay` has elapsed from now.
    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + 'static) -> TaskKey {
        let mut inner = self.0.borrow_mut();
        let due = inner.clock.now() + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let key = inner.tasks.insert(Task {
            due,
            seq,
            run: Box::new(f),
        });
        log::trace!("queue: scheduled {key:?} in {delay:?}");
        key
    }

    /// Removes a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&self, key: TaskKey) -> bool {
        let removed = self.0.borrow_mut().tasks.remove(key).is_some();
        if removed {
            log::trace!("queue: cancelled {key:?}");
        }
        removed
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.0.borrow().tasks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().tasks.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.0.borrow().earliest().map(|(_, due)| due)
    }

    fn pop_due(&self, now: Instant) -> Option<Box<dyn FnOnce()>> {
        let mut inner = self.0.borrow_mut();
        let (key, due) = inner.earliest()?;
        if due > now {
            return None;
        }
        inner.tasks.remove(key).map(|t| t.run)
    }

    /// Runs every task whose deadline has passed, one at a time. Tasks queued
    /// by a running task are eligible in the same call if already due.
    pub fn run_due(&self) -> usize {
        let now = self.now();
        let mut ran = 0;
        while let Some(run) = self.pop_due(now) {
            run();
            ran += 1;
        }
        ran
    }

    /// Moves `clock` forward by `by`, stopping at each deadline on the way so
    /// tasks observe the time they were due at. `clock` must be the clock this
    /// queue was built with.
    pub fn advance(&self, clock: &ManualClock, by: Duration) -> usize {
        let target = clock.now() + by;
        let mut ran = 0;
        while let Some(due) = self.next_deadline() {
            if due > target {
                break;
            }
            clock.set(due);
            ran += self.run_due();
        }
        clock.set(target);
        ran + self.run_due()
    }
}
