use std::sync::Arc;

use crate::contributor::ContributorFactory;
use crate::descriptor::ContributorDescriptor;
use crate::id::ContributorId;

/// Metadata and factory pair stored by the catalog.
#[derive(Clone)]
pub struct RegisteredContributor {
    descriptor: &'static ContributorDescriptor,
    factory: Arc<dyn ContributorFactory>,
}

impl RegisteredContributor {
    #[must_use]
    pub fn new(
        descriptor: &'static ContributorDescriptor,
        factory: Arc<dyn ContributorFactory>,
    ) -> Self {
        Self {
            descriptor,
            factory,
        }
    }

    #[must_use]
    pub fn id(&self) -> ContributorId {
        ContributorId::from_descriptor(self.descriptor)
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static ContributorDescriptor {
        self.descriptor
    }

    #[must_use]
    pub fn factory(&self) -> Arc<dyn ContributorFactory> {
        Arc::clone(&self.factory)
    }
}
