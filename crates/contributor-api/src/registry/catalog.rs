use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::contributor::ContributorFactory;
use crate::descriptor::ContributorDescriptor;
use crate::equality::EqualityProvider;
use crate::error::CatalogError;
use crate::id::ContributorId;

use super::RegisteredContributor;

/// Explicit registry of everything that takes part in a search.
///
/// Populated once at startup; sessions read it when they open.
#[derive(Clone, Default)]
pub struct ContributorCatalog {
    contributors: IndexMap<ContributorId, RegisteredContributor>,
    id_index: HashMap<&'static str, ContributorId>,
    equality_providers: IndexMap<&'static str, Arc<dyn EqualityProvider>>,
}

impl ContributorCatalog {
    /// Create a catalog without any contributors registered.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_available(
        &self,
        descriptor: &'static ContributorDescriptor,
    ) -> Result<(), CatalogError> {
        let contributor = ContributorId::from_descriptor(descriptor);
        if self.contributors.contains_key(&contributor) {
            return Err(CatalogError::DuplicateContributor { contributor });
        }
        if self.id_index.contains_key(descriptor.id) {
            return Err(CatalogError::DuplicateId { id: descriptor.id });
        }
        Ok(())
    }

    /// Register a contributor factory under its declared descriptor.
    pub fn register<F>(&mut self, factory: F) -> Result<(), CatalogError>
    where
        F: ContributorFactory + 'static,
    {
        let descriptor = factory.descriptor();
        self.ensure_available(descriptor)?;
        let registered = RegisteredContributor::new(descriptor, Arc::new(factory));
        self.id_index.insert(descriptor.id, registered.id());
        self.contributors.insert(registered.id(), registered);
        Ok(())
    }

    /// Register an equality provider. Providers are consulted in registration order.
    pub fn register_equality_provider<P>(
        &mut self,
        name: &'static str,
        provider: P,
    ) -> Result<(), CatalogError>
    where
        P: EqualityProvider + 'static,
    {
        if self.equality_providers.contains_key(name) {
            return Err(CatalogError::DuplicateEqualityProvider { name });
        }
        self.equality_providers.insert(name, Arc::new(provider));
        Ok(())
    }

    /// Lookup the factory registered for `contributor`.
    pub fn factory(&self, contributor: ContributorId) -> Option<Arc<dyn ContributorFactory>> {
        self.contributors
            .get(&contributor)
            .map(RegisteredContributor::factory)
    }

    /// Attempt to resolve a string identifier to a registered contributor.
    pub fn contributor_by_id(&self, id: &str) -> Option<ContributorId> {
        self.id_index.get(id).copied()
    }

    /// Iterate over registered contributors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredContributor> {
        self.contributors.values()
    }

    /// Iterate over registered descriptors.
    pub fn descriptors(&self) -> impl Iterator<Item = &'static ContributorDescriptor> + '_ {
        self.contributors.values().map(RegisteredContributor::descriptor)
    }

    /// Named equality providers in registration order.
    pub fn equality_providers(
        &self,
    ) -> impl Iterator<Item = (&'static str, Arc<dyn EqualityProvider>)> + '_ {
        self.equality_providers
            .iter()
            .map(|(name, provider)| (*name, Arc::clone(provider)))
    }

    /// Remove the contributor registered for `contributor`.
    pub fn remove(&mut self, contributor: ContributorId) -> Option<RegisteredContributor> {
        let removed = self.contributors.shift_remove(&contributor)?;
        self.id_index.remove(removed.descriptor().id);
        Some(removed)
    }

    /// Remove the contributor registered under `id`.
    pub fn remove_by_id(&mut self, id: &str) -> Option<RegisteredContributor> {
        let contributor = self.id_index.remove(id)?;
        self.contributors.shift_remove(&contributor)
    }

    /// Return the number of registered contributors.
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Returns `true` when no contributors have been registered.
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    pub fn contains(&self, contributor: ContributorId) -> bool {
        self.contributors.contains_key(&contributor)
    }
}
