use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::debug;

use super::{builtin, pair_name, Translator};

/// Name-keyed set of translators
///
/// Populated once at startup and read afterwards. Registering a name that
/// is already present replaces the earlier translator.
#[derive(Default)]
pub struct Registry {
    translators: RwLock<HashMap<String, Arc<dyn Translator>>>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in translator
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for translator in builtin() {
            registry.register(translator);
        }
        registry
    }

    /// Add a translator under its own name, replacing any previous entry
    pub fn register(&self, translator: Arc<dyn Translator>) {
        let name = translator.name().to_string();
        let previous = self
            .translators
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), translator);
        if previous.is_some() {
            debug!("Replaced translator {}", name);
        } else {
            debug!("Registered translator {}", name);
        }
    }

    /// Look up the translator for a source/target pair
    #[must_use]
    pub fn get(&self, source: &str, target: &str) -> Option<Arc<dyn Translator>> {
        self.get_by_name(&pair_name(source, target))
    }

    /// Look up a translator by name (e.g. `ls2eza`)
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Translator>> {
        self.read().get(name).cloned()
    }

    /// Names of all registered translators, in no particular order
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// All registered translators sorted by name
    #[must_use]
    pub fn translators(&self) -> Vec<Arc<dyn Translator>> {
        let mut translators: Vec<_> = self.read().values().cloned().collect();
        translators.sort_by(|a, b| a.name().cmp(b.name()));
        translators
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Writers never leave the map half-updated, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Translator>>> {
        self.translators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
