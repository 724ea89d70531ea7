//! Navigation capability.

use std::sync::{Mutex, PoisonError};

use crate::registry::Capability;

/// Navigation operations shared code may perform.
pub trait Router: Send + Sync {
    /// Navigate to `path`, keeping the current location in history.
    fn push(&self, path: &str);

    /// Navigate to `path`, replacing the current location.
    fn replace(&self, path: &str);

    /// Return to the previous location. Returns false at the start of
    /// history.
    fn back(&self) -> bool;
}

impl Capability for dyn Router {
    const NAME: &'static str = "router";
}

/// History-stack router for headless hosts and tests.
#[derive(Debug)]
pub struct MemoryRouter {
    history: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new(initial: impl Into<String>) -> Self {
        MemoryRouter {
            history: Mutex::new(vec![initial.into()]),
        }
    }

    pub fn current(&self) -> String {
        self.lock().last().cloned().unwrap_or_default()
    }

    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        MemoryRouter::new("/")
    }
}

impl Router for MemoryRouter {
    fn push(&self, path: &str) {
        tracing::debug!("router push {}", path);
        self.lock().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        let mut history = self.lock();
        history.pop();
        history.push(path.to_string());
    }

    fn back(&self) -> bool {
        let mut history = self.lock();
        if history.len() > 1 {
            history.pop();
            true
        } else {
            false
        }
    }
}
