use std::num::NonZeroUsize;
use std::thread;

use super::history::HistoryOrder;
use super::slow::SlowContributorThresholds;

/// Results a contributor may emit when every contributor shares the "All" tab.
pub const MULTIPLE_CONTRIBUTORS_ELEMENTS_LIMIT: usize = 15;
/// Results a contributor may emit when searched in its own tab.
pub const SINGLE_CONTRIBUTOR_ELEMENTS_LIMIT: usize = 30;

const MAX_DEFAULT_PARALLELISM: usize = 8;

/// Knobs applied to every search of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
	/// Number of contributors fetched at the same time.
	pub parallelism: usize,
	/// Default per-contributor limit for searches spanning every contributor.
	pub max_results_per_contributor: usize,
	/// Default per-contributor limit for searches targeting a single tab.
	pub max_results_single_tab: usize,
	pub history_order: HistoryOrder,
	pub slow: SlowContributorThresholds,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			parallelism: default_parallelism(),
			max_results_per_contributor: MULTIPLE_CONTRIBUTORS_ELEMENTS_LIMIT,
			max_results_single_tab: SINGLE_CONTRIBUTOR_ELEMENTS_LIMIT,
			history_order: HistoryOrder::default(),
			slow: SlowContributorThresholds::default(),
		}
	}
}

/// Available cores, capped so that a session never floods the machine.
#[must_use]
pub fn default_parallelism() -> usize {
	thread::available_parallelism()
		.map(NonZeroUsize::get)
		.unwrap_or(4)
		.min(MAX_DEFAULT_PARALLELISM)
}
