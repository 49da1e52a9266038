use std::sync::Arc;

use everywhere_contributor_api::{
	ContributorCatalog, EqualityAction, EqualityProvider, FoundElementInfo,
};
use log::trace;

/// Ordered set of equality providers deciding how new items relate to the
/// ones already accepted.
#[derive(Clone, Default)]
pub struct EqualityEngine {
	providers: Vec<(&'static str, Arc<dyn EqualityProvider>)>,
}

impl EqualityEngine {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Engine with the providers every session relies on.
	#[must_use]
	pub fn with_defaults() -> Self {
		let mut engine = Self::new();
		engine.register("identity", Arc::new(IdentityEqualityProvider));
		engine.register("navigation-target", Arc::new(NavigationTargetEqualityProvider));
		engine
	}

	/// Default providers followed by the ones registered in `catalog`.
	#[must_use]
	pub fn from_catalog(catalog: &ContributorCatalog) -> Self {
		let mut engine = Self::with_defaults();
		for (name, provider) in catalog.equality_providers() {
			engine.register(name, provider);
		}
		engine
	}

	pub fn register(&mut self, name: &'static str, provider: Arc<dyn EqualityProvider>) {
		self.providers.push((name, provider));
	}

	/// First provider with an opinion decides.
	#[must_use]
	pub fn compare(&self, new_item: &FoundElementInfo, accepted: &[FoundElementInfo]) -> EqualityAction {
		for (name, provider) in &self.providers {
			let action = provider.compare_with_all(new_item, accepted);
			if !action.is_do_nothing() {
				trace!("equality provider '{name}' decided {action:?} for {}", new_item.description());
				return action;
			}
		}
		EqualityAction::DoNothing
	}

	/// Every provider is consulted and the verdicts are folded together.
	#[must_use]
	pub fn compare_combined(
		&self,
		new_item: &FoundElementInfo,
		accepted: &[FoundElementInfo],
	) -> EqualityAction {
		self.providers
			.iter()
			.map(|(_, provider)| provider.compare_with_all(new_item, accepted))
			.fold(EqualityAction::DoNothing, EqualityAction::combine)
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.providers.iter().map(|(name, _)| *name)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.providers.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}
}

/// Skips an item whose element is the very same allocation as an accepted one.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityEqualityProvider;

impl EqualityProvider for IdentityEqualityProvider {
	fn compare_items(&self, new_item: &FoundElementInfo, existing: &FoundElementInfo) -> EqualityAction {
		if new_item.item().same_element(existing.item()) {
			EqualityAction::Skip
		} else {
			EqualityAction::DoNothing
		}
	}
}

/// Merges items of different contributors that open the same file.
///
/// The contributor with the lower sort weight keeps the entry: a newcomer from
/// a heavier contributor is skipped, one from a lighter contributor replaces
/// the accepted entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationTargetEqualityProvider;

impl EqualityProvider for NavigationTargetEqualityProvider {
	fn compare_items(&self, new_item: &FoundElementInfo, existing: &FoundElementInfo) -> EqualityAction {
		if new_item.contributor() == existing.contributor() {
			return EqualityAction::DoNothing;
		}
		let (Some(new_target), Some(existing_target)) = (
			new_item.element().navigation_request(),
			existing.element().navigation_request(),
		) else {
			return EqualityAction::DoNothing;
		};
		if new_target.path != existing_target.path {
			return EqualityAction::DoNothing;
		}

		if new_item.contributor().sort_weight() < existing.contributor().sort_weight() {
			EqualityAction::replace(existing.clone())
		} else {
			EqualityAction::Skip
		}
	}
}
