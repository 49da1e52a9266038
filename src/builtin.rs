//! Contributors shipped with everywhere.

use everywhere_contributor_api::{CatalogError, ContributorCatalog};
use everywhere_contributors_calculator::CalculatorFactory;
use everywhere_contributors_files::{FilesFactory, RecentFilesFactory};

use crate::search::RecentQueriesFactory;

/// Register the files, recent files, calculator and recent queries contributors.
pub fn register_builtin_contributors(
	catalog: &mut ContributorCatalog,
	files: FilesFactory,
) -> Result<(), CatalogError> {
	catalog.register(files)?;
	catalog.register(RecentFilesFactory)?;
	catalog.register(CalculatorFactory)?;
	catalog.register(RecentQueriesFactory)?;
	Ok(())
}

/// A catalog holding only the built-in contributors.
pub fn builtin_catalog(files: FilesFactory) -> Result<ContributorCatalog, CatalogError> {
	let mut catalog = ContributorCatalog::new();
	register_builtin_contributors(&mut catalog, files)?;
	Ok(catalog)
}

#[cfg(test)]
mod tests {
	use everywhere_contributors_calculator::CALCULATOR;
	use everywhere_contributors_files::{FILES, RECENT_FILES};
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::search::RECENT_QUERIES;

	#[test]
	fn builtins_register_in_order() {
		let catalog = builtin_catalog(FilesFactory::new()).unwrap();
		let ids: Vec<_> = catalog.descriptors().map(|descriptor| descriptor.id).collect();
		assert_eq!(ids, vec![FILES.id, RECENT_FILES.id, CALCULATOR.id, RECENT_QUERIES.id]);
	}

	#[test]
	fn builtins_cannot_register_twice() {
		let mut catalog = builtin_catalog(FilesFactory::new()).unwrap();
		assert!(matches!(
			register_builtin_contributors(&mut catalog, FilesFactory::new()),
			Err(CatalogError::DuplicateContributor { .. })
		));
	}
}
