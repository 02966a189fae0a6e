use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }
}

/// Owns the cleanups of one connected component. Disposing runs them in
/// registration order, once.
#[derive(Default)]
pub struct Scope {
    disposers: RefCell<Vec<Dispose>>,
    disposed: Cell<bool>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cleanup. On an already disposed scope it runs immediately.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) -> Dispose {
        let d = Dispose::new(disposer);
        if self.disposed.get() {
            d.run();
        } else {
            self.disposers.borrow_mut().push(d.clone());
        }
        d
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer.run();
        }
    }
}
