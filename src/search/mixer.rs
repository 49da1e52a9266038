use everywhere_contributor_api::{EqualityAction, FoundElementInfo, FoundItem};
use log::trace;
use parking_lot::Mutex;

use super::equality::EqualityEngine;

/// Change to the accepted list caused by one found item.
#[derive(Debug, Clone)]
pub struct MixOutcome {
	pub added: FoundElementInfo,
	pub removed: Vec<FoundElementInfo>,
}

#[derive(Debug, Default)]
struct MixerState {
	accepted: Vec<FoundElementInfo>,
	next_id: u64,
}

/// Accepted results of the running search.
///
/// Every new item is checked against the accepted ones by the equality
/// engine, then assigned its correlation id. The mixer lock also orders the
/// events published for a search against restarts of the session.
pub struct ResultMixer {
	equality: EqualityEngine,
	state: Mutex<MixerState>,
}

impl ResultMixer {
	#[must_use]
	pub fn new(equality: EqualityEngine) -> Self {
		Self {
			equality,
			state: Mutex::new(MixerState {
				accepted: Vec::new(),
				next_id: 1,
			}),
		}
	}

	/// Offer `item` to the accepted list.
	///
	/// `publish` runs under the mixer lock once the item is known to change
	/// the list; returning `false` from it discards the change. The return
	/// value tells the contributor whether to keep going.
	pub fn accept<F>(&self, item: FoundItem, publish: F) -> bool
	where
		F: FnOnce(&MixOutcome) -> bool,
	{
		let mut state = self.state.lock();
		let info = FoundElementInfo::new(state.next_id, item);
		state.next_id += 1;

		let removed = match self.equality.compare(&info, &state.accepted) {
			EqualityAction::Skip => {
				trace!("skipping duplicate {}", info.description());
				return true;
			}
			EqualityAction::DoNothing => Vec::new(),
			EqualityAction::Replace(evicted) => evicted
				.into_iter()
				.filter(|candidate| state.accepted.contains(candidate))
				.collect(),
		};

		let outcome = MixOutcome {
			added: info,
			removed,
		};
		if !publish(&outcome) {
			return false;
		}
		let MixOutcome { added, removed } = outcome;
		if !removed.is_empty() {
			state.accepted.retain(|accepted| !removed.contains(accepted));
		}
		state.accepted.push(added);
		true
	}

	/// Run `f` while no item can be accepted.
	pub fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
		let _state = self.state.lock();
		f()
	}

	/// Forget the accepted items and run `f` before any new item gets in.
	pub fn restart<R>(&self, f: impl FnOnce() -> R) -> R {
		let mut state = self.state.lock();
		state.accepted.clear();
		f()
	}

	/// Snapshot of the accepted items in acceptance order.
	#[must_use]
	pub fn accepted(&self) -> Vec<FoundElementInfo> {
		self.state.lock().accepted.clone()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.state.lock().accepted.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.state.lock().accepted.is_empty()
	}

	#[must_use]
	pub fn equality(&self) -> &EqualityEngine {
		&self.equality
	}
}
