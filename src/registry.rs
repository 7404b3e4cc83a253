//! Binding storage keyed by service identifier.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::binding::Binding;
use crate::identifier::ServiceIdentifier;

#[cfg(feature = "ahash")]
type IdMap<V> = std::collections::HashMap<ServiceIdentifier, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type IdMap<V> = std::collections::HashMap<ServiceIdentifier, V>;

/// Binding registry holding all registrations
///
/// Pure storage: bindings are grouped per identifier in registration order,
/// which is the order multi-inject targets resolve in. Readers get a snapshot
/// of `Arc<Binding>` handles so no lock is held while planning or resolving.
#[derive(Default)]
pub struct BindingRegistry {
    entries: RwLock<IdMap<Vec<Arc<Binding>>>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding after any existing ones for the same identifier.
    pub fn add(&self, binding: Binding) -> Arc<Binding> {
        let binding = Arc::new(binding);
        self.entries
            .write()
            .entry(binding.service_identifier().clone())
            .or_default()
            .push(binding.clone());
        binding
    }

    /// Bindings for `identifier` in registration order (possibly empty).
    pub fn get(&self, identifier: &ServiceIdentifier) -> Vec<Arc<Binding>> {
        self.entries.read().get(identifier).cloned().unwrap_or_default()
    }

    /// Removes every binding for `identifier`, dropping their singleton caches.
    pub fn remove(&self, identifier: &ServiceIdentifier) -> Vec<Arc<Binding>> {
        self.entries.write().remove(identifier).unwrap_or_default()
    }

    pub fn contains(&self, identifier: &ServiceIdentifier) -> bool {
        self.entries
            .read()
            .get(identifier)
            .map_or(false, |bindings| !bindings.is_empty())
    }

    /// Registered identifiers, in no particular order.
    pub fn identifiers(&self) -> Vec<ServiceIdentifier> {
        self.entries.read().keys().cloned().collect()
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
