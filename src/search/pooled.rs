use everywhere_contributor_api::{
	CancellationToken, Contributor, ContributorDescriptor, ContributorError, ElementRef, FoundItem,
	ResultSink, SelectionModifiers,
};
use log::warn;
use parking_lot::Mutex;

/// One backend of a [`PooledContributor`].
pub trait Fetcher: Send + Sync {
	fn name(&self) -> &'static str;

	/// Feed results to `consumer` until it answers `false`.
	fn fetch(
		&self,
		pattern: &str,
		token: &CancellationToken,
		consumer: &mut dyn FnMut(ElementRef, i32) -> bool,
	) -> Result<(), ContributorError>;

	fn process_selected_item(
		&self,
		_item: &FoundItem,
		_modifiers: SelectionModifiers,
		_search_text: &str,
	) -> bool {
		false
	}
}

/// Contributor serving one tab from several fetchers, such as a local index
/// and a remote backend.
///
/// All fetchers run to completion before anything reaches the sink. The pool
/// is then ordered by fetcher, keeping every fetcher's own order: fetchers
/// already sort their output, so weights are not merged across them.
pub struct PooledContributor {
	descriptor: &'static ContributorDescriptor,
	fetchers: Vec<Box<dyn Fetcher>>,
}

impl PooledContributor {
	#[must_use]
	pub fn new(descriptor: &'static ContributorDescriptor) -> Self {
		Self {
			descriptor,
			fetchers: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
		self.fetchers.push(Box::new(fetcher));
		self
	}

	#[must_use]
	pub fn fetcher_names(&self) -> Vec<&'static str> {
		self.fetchers.iter().map(|fetcher| fetcher.name()).collect()
	}
}

impl Contributor for PooledContributor {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		self.descriptor
	}

	fn fetch(&self, pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError> {
		let token = sink.token();
		let pool: Mutex<Vec<(usize, ElementRef, i32)>> = Mutex::new(Vec::new());
		let failures = Mutex::new(0usize);

		rayon::scope(|scope| {
			for (index, fetcher) in self.fetchers.iter().enumerate() {
				let pool = &pool;
				let failures = &failures;
				scope.spawn(move |_| {
					let mut local = Vec::new();
					let mut consumer = |element: ElementRef, weight: i32| {
						if token.is_cancelled() {
							return false;
						}
						local.push((index, element, weight));
						true
					};
					if let Err(err) = fetcher.fetch(pattern, token, &mut consumer) {
						warn!("fetcher '{}' of '{}' failed: {err}", fetcher.name(), self.descriptor.id);
						*failures.lock() += 1;
					}
					pool.lock().extend(local);
				});
			}
		});

		if token.is_cancelled() {
			return Ok(());
		}
		if !self.fetchers.is_empty() && failures.into_inner() == self.fetchers.len() {
			return Err(ContributorError::fetch(self.descriptor.id, "every fetcher failed"));
		}

		let mut pooled = pool.into_inner();
		pooled.sort_by_key(|(index, _, _)| *index);
		for (_, element, weight) in pooled {
			if !sink.push(element, weight) {
				break;
			}
		}
		Ok(())
	}

	fn process_selected_item(
		&self,
		item: &FoundItem,
		modifiers: SelectionModifiers,
		search_text: &str,
	) -> bool {
		self.fetchers
			.iter()
			.any(|fetcher| fetcher.process_selected_item(item, modifiers, search_text))
	}
}
