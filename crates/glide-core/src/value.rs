use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::Result;

/// Readable/writable integer control owned by the host, e.g. a radio group
/// whose checked member is the current slide.
pub trait SelectionStore {
    fn read(&self) -> Result<usize>;
    fn write(&self, value: usize) -> Result<()>;
}

/// In-memory store for headless hosts and tests.
#[derive(Default)]
pub struct MemoryStore(Cell<usize>);

impl MemoryStore {
    pub fn new(value: usize) -> Self {
        Self(Cell::new(value))
    }
}

impl SelectionStore for MemoryStore {
    fn read(&self) -> Result<usize> {
        Ok(self.0.get())
    }
    fn write(&self, value: usize) -> Result<()> {
        self.0.set(value);
        Ok(())
    }
}

type Observer = Rc<dyn Fn(usize)>;

/// Integer value whose only copy lives in a [`SelectionStore`], with a single
/// observer slot notified once per distinct write.
pub struct ReactiveValue {
    store: Rc<dyn SelectionStore>,
    observer: RefCell<Option<Observer>>,
}

impl ReactiveValue {
    pub fn new(store: Rc<dyn SelectionStore>) -> Self {
        Self {
            store,
            observer: RefCell::new(None),
        }
    }

    pub fn get(&self) -> Result<usize> {
        self.store.read()
    }

    /// Writes `v` and notifies the observer. Writing the current value does
    /// nothing.
    pub fn set(&self, v: usize) -> Result<()> {
        if v == self.get()? {
            return Ok(());
        }
        self.store.write(v)?;
        self.notify(v);
        Ok(())
    }

    /// Writes `v` without notifying. Returns whether the stored value changed.
    pub fn replace_quiet(&self, v: usize) -> Result<bool> {
        if v == self.get()? {
            return Ok(false);
        }
        self.store.write(v)?;
        Ok(true)
    }

    /// Forwards a change the store made on its own (user picked a value).
    pub fn store_changed(&self) -> Result<()> {
        let v = self.get()?;
        self.notify(v);
        Ok(())
    }

    /// Installs the observer, replacing any previous one.
    pub fn on_change(&self, f: impl Fn(usize) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(f));
    }

    pub fn clear_observer(&self) {
        self.observer.borrow_mut().take();
    }

    fn notify(&self, v: usize) {
        // Release the slot before calling so the observer may replace itself.
        let observer = self.observer.borrow().clone();
        if let Some(f) = observer {
            f(v);
        }
    }
}
