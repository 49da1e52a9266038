mod catalog;
mod registered;

pub use catalog::ContributorCatalog;
pub use registered::RegisteredContributor;
