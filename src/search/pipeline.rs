use std::slice;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use everywhere_contributor_api::{
	CancellationToken, Contributor, ContributorId, FoundElementInfo, FoundItem, SearchListener,
};
use indexmap::IndexMap;
use log::debug;
use parking_lot::Mutex;

use super::buffer::EventBuffer;
use super::fetch::{FetchCoordinator, FetchEvents};
use super::mixer::ResultMixer;

/// Everything the worker needs to run one search.
pub(crate) struct SearchRequest {
	pub(crate) id: u64,
	pub(crate) pattern: String,
	pub(crate) contributors: Vec<Arc<dyn Contributor>>,
	pub(crate) limit: usize,
	/// Contributor delays are measured from here.
	pub(crate) started: Instant,
}

struct StartedSearch {
	pattern: String,
	contributors: Vec<ContributorId>,
}

#[derive(Default)]
struct Lifecycle {
	started: Option<StartedSearch>,
	finished: Option<bool>,
	more: IndexMap<ContributorId, bool>,
}

/// Shared state of a session: fetching on worker threads, flushing on the
/// consumer thread.
pub(crate) struct Pipeline {
	coordinator: FetchCoordinator,
	mixer: ResultMixer,
	buffer: EventBuffer,
	latest: Arc<AtomicU64>,
	lifecycle: Mutex<Lifecycle>,
}

impl Pipeline {
	pub(crate) fn new(coordinator: FetchCoordinator, mixer: ResultMixer) -> Self {
		Self {
			coordinator,
			mixer,
			buffer: EventBuffer::new(),
			latest: Arc::new(AtomicU64::new(0)),
			lifecycle: Mutex::new(Lifecycle::default()),
		}
	}

	/// Cancel the running search and reset the state for a new one.
	pub(crate) fn begin(
		&self,
		pattern: &str,
		contributors: Vec<Arc<dyn Contributor>>,
		limit: usize,
	) -> SearchRequest {
		let started = Instant::now();
		let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
		let ids = contributors.iter().map(|contributor| contributor.id()).collect();
		self.mixer.restart(|| {
			self.buffer.clear_buffer();
			*self.lifecycle.lock() = Lifecycle {
				started: Some(StartedSearch {
					pattern: pattern.to_string(),
					contributors: ids,
				}),
				..Lifecycle::default()
			};
		});
		SearchRequest {
			id,
			pattern: pattern.to_string(),
			contributors,
			limit,
			started,
		}
	}

	pub(crate) fn cancel(&self) {
		self.latest.fetch_add(1, Ordering::AcqRel);
	}

	pub(crate) fn token(&self, search: u64) -> CancellationToken {
		CancellationToken::from_parts(search, Arc::clone(&self.latest))
	}

	pub(crate) fn run(&self, request: &SearchRequest) {
		let token = self.token(request.id);
		if token.is_cancelled() {
			debug!("search {} superseded before it started", request.id);
			return;
		}
		let run = SearchRun {
			pipeline: self,
			token: &token,
			started: request.started,
		};
		self.coordinator.run(
			&request.pattern,
			&request.contributors,
			request.limit,
			&token,
			&run,
		);

		self.mixer.exclusive(|| {
			if token.is_cancelled() {
				return;
			}
			let mut lifecycle = self.lifecycle.lock();
			let has_more = lifecycle.more.values().any(|more| *more);
			lifecycle.finished = Some(has_more);
		});
	}

	/// Deliver pending events: start, buffered events, then completion.
	///
	/// Returns `false` when there was nothing to deliver.
	pub(crate) fn flush(&self, listener: &mut dyn SearchListener) -> bool {
		let (started, events, finished) = self.mixer.exclusive(|| {
			let mut lifecycle = self.lifecycle.lock();
			let finished = lifecycle.finished.take();
			let started = lifecycle.started.take();
			drop(lifecycle);
			(started, self.buffer.drain(), finished)
		});

		let delivered = started.is_some() || !events.is_empty() || finished.is_some();
		if let Some(started) = started {
			listener.search_started(&started.pattern, &started.contributors);
		}
		events.deliver(listener);
		if let Some(has_more) = finished {
			listener.search_finished(has_more);
		}
		delivered
	}

	pub(crate) fn accepted(&self) -> Vec<FoundElementInfo> {
		self.mixer.accepted()
	}

	pub(crate) fn contributors_with_more(&self) -> Vec<ContributorId> {
		self.lifecycle
			.lock()
			.more
			.iter()
			.filter(|(_, more)| **more)
			.map(|(contributor, _)| *contributor)
			.collect()
	}
}

/// Publishes the events of one search unless it has been superseded.
struct SearchRun<'a> {
	pipeline: &'a Pipeline,
	token: &'a CancellationToken,
	started: Instant,
}

impl FetchEvents for SearchRun<'_> {
	fn item_found(&self, item: FoundItem) -> bool {
		let buffer = &self.pipeline.buffer;
		self.pipeline.mixer.accept(item, |outcome| {
			if self.token.is_cancelled() {
				return false;
			}
			if !outcome.removed.is_empty() {
				buffer.remove_elements(&outcome.removed);
			}
			buffer.add_elements(slice::from_ref(&outcome.added));
			true
		})
	}

	fn contributor_waits(&self, contributor: ContributorId) {
		self.pipeline.mixer.exclusive(|| {
			if !self.token.is_cancelled() {
				let buffer = &self.pipeline.buffer;
				buffer.contributor_timed(contributor, self.started.elapsed());
				buffer.contributor_waits(contributor);
			}
		});
	}

	fn contributor_finished(&self, contributor: ContributorId, has_more: bool) {
		self.pipeline.mixer.exclusive(|| {
			if self.token.is_cancelled() {
				return;
			}
			self.pipeline.lifecycle.lock().more.insert(contributor, has_more);
			let buffer = &self.pipeline.buffer;
			buffer.contributor_timed(contributor, self.started.elapsed());
			buffer.contributor_finished(contributor, has_more);
		});
	}
}

#[cfg(test)]
mod tests {
	use std::thread;
	use std::time::Duration;

	use everywhere_contributor_api::ModelLock;

	use super::*;
	use crate::search::equality::EqualityEngine;
	use crate::search::test_support::{ALPHA, ScriptedContributor, contributor};

	#[derive(Default)]
	struct Delays(Vec<(ContributorId, Duration)>);

	impl SearchListener for Delays {
		fn contributor_timed(&mut self, contributor: ContributorId, delay: Duration) {
			self.0.push((contributor, delay));
		}
	}

	#[test]
	fn delays_are_measured_when_contributors_finish_not_when_flushed() {
		let coordinator = FetchCoordinator::new(1, Arc::new(ModelLock::new())).expect("pool");
		let pipeline = Pipeline::new(coordinator, ResultMixer::new(EqualityEngine::with_defaults()));
		let contributors: Vec<Arc<dyn Contributor>> = vec![Arc::new(
			ScriptedContributor::new(&ALPHA)
				.emitting(&[("a", 1)])
				.sleeping(Duration::from_millis(60)),
		)];

		let request = pipeline.begin("a", contributors, 10);
		pipeline.run(&request);
		thread::sleep(Duration::from_millis(400));

		let mut delays = Delays::default();
		assert!(pipeline.flush(&mut delays));
		assert_eq!(delays.0.len(), 1);
		let (timed, delay) = delays.0[0];
		assert_eq!(timed, contributor(&ALPHA));
		assert!(delay >= Duration::from_millis(60), "{delay:?}");
		assert!(delay < Duration::from_millis(400), "{delay:?}");
	}
}
