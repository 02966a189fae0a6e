use std::collections::HashMap;
use std::sync::OnceLock;

use glide_core::{Error, Result, TaskQueue};
use parking_lot::Mutex;

use crate::controller::CarouselController;
use crate::host::HostParts;

/// Tag the carousel registers under.
pub const TAG_NAME: &str = "glide-carousel";

pub type Factory = fn(HostParts, TaskQueue) -> Result<CarouselController>;

/// Maps component tags to their factories. Define once, create many.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: Mutex<HashMap<String, Factory>>,
}

static GLOBAL: OnceLock<ComponentRegistry> = OnceLock::new();

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn global() -> &'static ComponentRegistry {
        GLOBAL.get_or_init(ComponentRegistry::new)
    }

    pub fn define(&self, name: &str, factory: Factory) -> Result<()> {
        let mut factories = self.factories.lock();
        if factories.contains_key(name) {
            return Err(Error::AlreadyRegistered(name.to_owned()));
        }
        factories.insert(name.to_owned(), factory);
        log::debug!("registry: defined <{name}>");
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.factories.lock().contains_key(name)
    }

    pub fn create(
        &self,
        name: &str,
        parts: HostParts,
        queue: TaskQueue,
    ) -> Result<CarouselController> {
        // Copy the fn pointer out so the factory runs without the lock held.
        let factory = self
            .factories
            .lock()
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownComponent(name.to_owned()))?;
        factory(parts, queue)
    }
}

/// Defines the carousel in the global registry. Call once at startup.
pub fn register() -> Result<()> {
    ComponentRegistry::global().define(TAG_NAME, CarouselController::connect)
}
