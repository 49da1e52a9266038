use thiserror::Error;

use crate::id::ContributorId;

/// Errors that can occur when mutating the [`ContributorCatalog`](crate::ContributorCatalog).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A contributor attempted to register an identifier that already exists.
    #[error("contributor id '{id}' is already registered")]
    DuplicateId { id: &'static str },

    /// A contributor attempted to register a descriptor that is already present.
    #[error("contributor {contributor:?} is already registered")]
    DuplicateContributor { contributor: ContributorId },

    /// An equality provider was registered twice under the same name.
    #[error("equality provider '{name}' is already registered")]
    DuplicateEqualityProvider { name: &'static str },
}

/// Failures reported by contributors. They never abort sibling contributors.
#[derive(Debug, Error)]
pub enum ContributorError {
    /// The contributor could not be created for the current context.
    #[error("contributor '{id}' is unavailable: {reason}")]
    Unavailable { id: &'static str, reason: String },

    /// The fetch failed part way.
    #[error("contributor '{id}' failed to fetch: {reason}")]
    Fetch { id: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ContributorError {
    pub fn unavailable(id: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            id,
            reason: reason.into(),
        }
    }

    pub fn fetch(id: &'static str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            id,
            reason: reason.into(),
        }
    }
}
