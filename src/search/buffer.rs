use std::mem;
use std::time::Duration;

use everywhere_contributor_api::{ContributorId, ContributorStatus, FoundElementInfo, SearchListener};
use indexmap::IndexMap;
use parking_lot::Mutex;

/// Events collected between two flushes.
#[derive(Debug, Default)]
pub struct BufferedEvents {
	added: IndexMap<u64, FoundElementInfo>,
	removed: IndexMap<u64, FoundElementInfo>,
	statuses: IndexMap<ContributorId, ContributorStatus>,
	delays: IndexMap<ContributorId, Duration>,
}

impl BufferedEvents {
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.added.is_empty() && self.removed.is_empty() && self.statuses.is_empty() && self.delays.is_empty()
	}

	#[must_use]
	pub fn added(&self) -> Vec<FoundElementInfo> {
		self.added.values().cloned().collect()
	}

	#[must_use]
	pub fn removed(&self) -> Vec<FoundElementInfo> {
		self.removed.values().cloned().collect()
	}

	#[must_use]
	pub fn statuses(&self) -> Vec<(ContributorId, ContributorStatus)> {
		self.statuses
			.iter()
			.map(|(contributor, status)| (*contributor, *status))
			.collect()
	}

	/// Delay that came with the pending status of `contributor`.
	#[must_use]
	pub fn delay(&self, contributor: ContributorId) -> Option<Duration> {
		self.delays.get(&contributor).copied()
	}

	/// Hand every event to `listener`: additions, removals, then statuses.
	pub fn deliver(self, listener: &mut dyn SearchListener) {
		if !self.added.is_empty() {
			let added: Vec<_> = self.added.into_values().collect();
			listener.elements_added(&added);
		}
		if !self.removed.is_empty() {
			let removed: Vec<_> = self.removed.into_values().collect();
			listener.elements_removed(&removed);
		}
		for (contributor, status) in self.statuses {
			if let Some(delay) = self.delays.get(&contributor) {
				listener.contributor_timed(contributor, *delay);
			}
			match status {
				ContributorStatus::Waiting => listener.contributor_waits(contributor),
				ContributorStatus::Finished { has_more } => {
					listener.contributor_finished(contributor, has_more);
				}
			}
		}
	}

	fn add(&mut self, list: &[FoundElementInfo]) {
		for info in list {
			let contributor = info.contributor();
			if self.statuses.get(&contributor) == Some(&ContributorStatus::Waiting) {
				self.statuses.shift_remove(&contributor);
				self.delays.shift_remove(&contributor);
			}
			if self.removed.shift_remove(&info.id()).is_none() {
				self.added.insert(info.id(), info.clone());
			}
		}
	}

	fn remove(&mut self, list: &[FoundElementInfo]) {
		for info in list {
			if self.added.shift_remove(&info.id()).is_none() {
				self.removed.insert(info.id(), info.clone());
			}
		}
	}
}

/// Coalesces search events produced by many fetch threads so that the
/// consuming thread receives them in batches.
///
/// An element added and removed inside the same window is never delivered.
#[derive(Debug, Default)]
pub struct EventBuffer {
	state: Mutex<BufferedEvents>,
}

impl EventBuffer {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_elements(&self, list: &[FoundElementInfo]) {
		self.state.lock().add(list);
	}

	pub fn remove_elements(&self, list: &[FoundElementInfo]) {
		self.state.lock().remove(list);
	}

	pub fn contributor_waits(&self, contributor: ContributorId) {
		self.state
			.lock()
			.statuses
			.insert(contributor, ContributorStatus::Waiting);
	}

	pub fn contributor_finished(&self, contributor: ContributorId, has_more: bool) {
		self.state
			.lock()
			.statuses
			.insert(contributor, ContributorStatus::Finished { has_more });
	}

	/// Attach the time `contributor` needed to reach its pending status.
	pub fn contributor_timed(&self, contributor: ContributorId, delay: Duration) {
		self.state.lock().delays.insert(contributor, delay);
	}

	/// Take the pending events, leaving the buffer empty.
	#[must_use]
	pub fn drain(&self) -> BufferedEvents {
		mem::take(&mut *self.state.lock())
	}

	/// Deliver the pending events to `listener` and clear them.
	///
	/// Returns `false` when nothing was pending.
	pub fn flush_buffer(&self, listener: &mut dyn SearchListener) -> bool {
		let events = self.drain();
		if events.is_empty() {
			return false;
		}
		events.deliver(listener);
		true
	}

	pub fn clear_buffer(&self) {
		*self.state.lock() = BufferedEvents::default();
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.state.lock().is_empty()
	}

	#[must_use]
	pub fn pending_added(&self) -> Vec<FoundElementInfo> {
		self.state.lock().added()
	}

	#[must_use]
	pub fn pending_removed(&self) -> Vec<FoundElementInfo> {
		self.state.lock().removed()
	}

	#[must_use]
	pub fn pending_statuses(&self) -> Vec<(ContributorId, ContributorStatus)> {
		self.state.lock().statuses()
	}
}
