//! Explicit registry of extraction strategies, keyed by engine name.

use std::collections::BTreeMap;
use std::sync::Arc;

use medboot_core::MediationStructure;
use thiserror::Error;

use super::{ExtractError, ExtractRequest, Extractor, LinearExtractor};

/// Engine name under which [`LinearExtractor`] is registered by
/// [`ExtractorRegistry::with_builtin`].
pub const LINEAR_ENGINE: &str = "linear";

/// Error raised by registry lookups and extraction through the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No extractor under that name.
    #[error("no extractor registered for engine '{name}' (available: {available:?})")]
    UnknownEngine {
        /// Requested engine.
        name: String,
        /// Registered engines.
        available: Vec<String>,
    },

    /// The name is already taken.
    #[error("an extractor is already registered for engine '{0}'")]
    Duplicate(String),

    /// The extractor ran and failed.
    #[error("extractor for engine '{engine}' failed: {source}")]
    Extraction {
        /// Engine whose extractor failed.
        engine: String,
        /// Underlying failure.
        #[source]
        source: ExtractError,
    },
}

/// Extraction strategies populated by the host application at startup.
///
/// Registration is always explicit. Whether an engine is available is a
/// plain lookup, see [`contains`](Self::contains) and
/// [`require`](Self::require).
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in [`LinearExtractor`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .extractors
            .insert(LINEAR_ENGINE.to_string(), Arc::new(LinearExtractor));
        registry
    }

    /// Register `extractor` under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] if the name is taken.
    pub fn register<E>(&mut self, name: impl Into<String>, extractor: E) -> Result<(), RegistryError>
    where
        E: Extractor + 'static,
    {
        let name = name.into();
        if self.extractors.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        tracing::debug!(engine = %name, "registered extractor");
        self.extractors.insert(name, Arc::new(extractor));
        Ok(())
    }

    /// Remove and return the extractor for `name`.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Extractor>> {
        self.extractors.remove(name)
    }

    /// Extractor registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Extractor>> {
        self.extractors.get(name).cloned()
    }

    /// Whether an extractor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.extractors.contains_key(name)
    }

    /// Like [`get`](Self::get), but a missing engine is an error naming the
    /// registered ones.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Extractor>, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownEngine {
            name: name.to_string(),
            available: self.engines().into_iter().map(String::from).collect(),
        })
    }

    /// Registered engine names in sorted order.
    pub fn engines(&self) -> Vec<&str> {
        self.extractors.keys().map(String::as_str).collect()
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Extract a structure with the extractor registered for `engine`.
    pub fn extract(
        &self,
        engine: &str,
        request: &ExtractRequest<'_>,
    ) -> Result<MediationStructure, RegistryError> {
        let extractor = self.require(engine)?;
        extractor
            .extract(request)
            .map_err(|source| RegistryError::Extraction {
                engine: engine.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("engines", &self.engines())
            .finish()
    }
}
