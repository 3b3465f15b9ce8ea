//! Name-to-factory registry for protocol adapters.
//!
//! The registry is the only structure shared across benchmark runs. The
//! host populates it once at startup, then hands out shared references;
//! nothing mutates it after the first run starts, so concurrent reads need
//! no locking.

use crate::error::BenchError;
use crate::protocol::{AdapterError, ProtocolAdapter};
use std::collections::BTreeMap;

/// Constructor for one adapter instance.
///
/// Construction may fail when the scheme's backend is absent from the
/// build; that failure is distinct from the name being unknown, and the
/// runner degrades instead of aborting.
pub type AdapterFactory =
    Box<dyn Fn() -> Result<Box<dyn ProtocolAdapter>, AdapterError> + Send + Sync>;

/// Mapping from scheme name to adapter factory.
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, AdapterFactory>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a scheme name.
    ///
    /// Re-registering a name overwrites the prior binding; the last
    /// registration wins. Duplicates are logged so a surprising overwrite
    /// is visible in the run output.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ProtocolAdapter>, AdapterError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            tracing::warn!(scheme = %name, "overwriting existing adapter registration");
        }
        self.factories.insert(name, Box::new(factory));
    }

    /// Look up the factory for a scheme name.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnknownProtocol`] when no factory is
    /// registered under `name`.
    pub fn get(&self, name: &str) -> Result<&AdapterFactory, BenchError> {
        self.factories
            .get(name)
            .ok_or_else(|| BenchError::UnknownProtocol(name.to_string()))
    }

    /// Registered scheme names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no scheme is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
