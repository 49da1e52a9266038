use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use everywhere_contributor_api::{
	CancellationToken, Contributor, ContributorId, FoundItem, ModelLock, ResultSink,
};
use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Receiver of everything contributors produce during one search.
pub trait FetchEvents: Sync {
	/// A contributor found `item`. Returns `false` to stop that contributor.
	fn item_found(&self, item: FoundItem) -> bool;

	fn contributor_waits(&self, contributor: ContributorId);

	fn contributor_finished(&self, contributor: ContributorId, has_more: bool);
}

/// Runs contributors concurrently on a bounded pool.
///
/// Each contributor is fetched on one pool thread, so its items arrive in
/// emission order. Failures stay with the contributor that caused them.
pub struct FetchCoordinator {
	pool: ThreadPool,
	model_lock: Arc<ModelLock>,
}

impl FetchCoordinator {
	pub fn new(parallelism: usize, model_lock: Arc<ModelLock>) -> Result<Self, ThreadPoolBuildError> {
		let pool = ThreadPoolBuilder::new()
			.num_threads(parallelism.max(1))
			.thread_name(|index| format!("everywhere-fetch-{index}"))
			.build()?;
		Ok(Self { pool, model_lock })
	}

	#[must_use]
	pub fn parallelism(&self) -> usize {
		self.pool.current_num_threads()
	}

	/// Fetch `pattern` from every contributor and wait until all of them are done.
	pub fn run(
		&self,
		pattern: &str,
		contributors: &[Arc<dyn Contributor>],
		limit: usize,
		token: &CancellationToken,
		events: &dyn FetchEvents,
	) {
		debug!(
			"search {} for '{pattern}' across {} contributor(s)",
			token.id(),
			contributors.len()
		);
		self.pool.scope(|scope| {
			for contributor in contributors {
				scope.spawn(move |_| {
					self.fetch_one(pattern, contributor.as_ref(), limit, token, events);
				});
			}
		});
	}

	fn fetch_one(
		&self,
		pattern: &str,
		contributor: &dyn Contributor,
		limit: usize,
		token: &CancellationToken,
		events: &dyn FetchEvents,
	) {
		let id = contributor.id();
		if token.is_cancelled() {
			return;
		}
		if !contributor.is_ready() {
			debug!("contributor '{id}' is not ready; waiting");
			events.contributor_waits(id);
			return;
		}
		if pattern.trim().is_empty() && !contributor.supports_empty_pattern() {
			events.contributor_finished(id, false);
			return;
		}

		let limit = id.descriptor().max_results.unwrap_or(limit);
		let mut consumer = |item: FoundItem| events.item_found(item);
		let mut sink = ResultSink::new(id, token, &mut consumer).with_limit(limit);
		let started = Instant::now();

		let result = panic::catch_unwind(AssertUnwindSafe(|| {
			if contributor.needs_model_lock() {
				if self.model_lock.yield_to_writers() {
					debug!("contributor '{id}' yielded to a pending model writer");
				}
				self.model_lock.read(|| contributor.fetch(pattern, &mut sink))
			} else {
				contributor.fetch(pattern, &mut sink)
			}
		}));

		let completed = match result {
			Ok(Ok(())) => true,
			Ok(Err(err)) => {
				warn!("{err}");
				false
			}
			Err(_) => {
				warn!("contributor '{id}' panicked while fetching '{pattern}'");
				false
			}
		};
		let has_more = completed && sink.has_more();
		debug!(
			"contributor '{id}' pushed {} item(s) in {:?}",
			sink.accepted(),
			started.elapsed()
		);
		drop(sink);

		if token.is_cancelled() {
			debug!("contributor '{id}' stopped: search {} was cancelled", token.id());
			return;
		}
		events.contributor_finished(id, has_more);
	}
}
