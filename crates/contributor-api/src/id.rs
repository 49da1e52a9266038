use crate::descriptor::ContributorDescriptor;

/// Identifies a contributor registered with the search.
///
/// Identity is the address of the static descriptor, which keeps the handle
/// `Copy` and lets it double as the route to the contributor metadata.
#[derive(Clone, Copy)]
pub struct ContributorId {
    descriptor: &'static ContributorDescriptor,
}

impl std::fmt::Debug for ContributorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContributorId").field(&self.id()).finish()
    }
}

impl std::fmt::Display for ContributorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl PartialEq for ContributorId {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.descriptor, other.descriptor)
    }
}

impl Eq for ContributorId {}

impl std::hash::Hash for ContributorId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&(self.descriptor as *const ContributorDescriptor), state);
    }
}

impl ContributorId {
    /// Create an identifier backed by a contributor descriptor.
    #[must_use]
    pub const fn from_descriptor(descriptor: &'static ContributorDescriptor) -> Self {
        Self { descriptor }
    }

    /// Return the stable string identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        self.descriptor.id
    }

    /// Access the descriptor backing this identifier.
    #[must_use]
    pub const fn descriptor(self) -> &'static ContributorDescriptor {
        self.descriptor
    }

    #[must_use]
    pub const fn sort_weight(self) -> i32 {
        self.descriptor.sort_weight
    }

    #[must_use]
    pub const fn group_name(self) -> &'static str {
        self.descriptor.group_name
    }
}
