//! Multi-contributor search pipeline.
//!
//! Contributors are fetched concurrently by the [`FetchCoordinator`], their
//! items deduplicated by the [`EqualityEngine`] inside the [`ResultMixer`],
//! and the resulting events coalesced by the [`EventBuffer`] until the
//! consumer flushes them. [`SearchSession`] ties these together for one popup.

mod buffer;
mod equality;
mod fetch;
mod history;
mod mixer;
mod navigation;
mod options;
mod pipeline;
mod pooled;
mod recent;
mod reorder;
mod session;
mod slow;
mod worker;

#[cfg(test)]
pub(crate) mod test_support;

pub use buffer::{BufferedEvents, EventBuffer};
pub use equality::{EqualityEngine, IdentityEqualityProvider, NavigationTargetEqualityProvider};
pub use fetch::{FetchCoordinator, FetchEvents};
pub use history::{
	ALL_CONTRIBUTORS_GROUP_ID, HistoryItem, HistoryIterator, HistoryOrder,
	MAX_SEARCH_EVERYWHERE_HISTORY, ProjectHistory, SearchHistoryList,
};
pub use mixer::{MixOutcome, ResultMixer};
pub use navigation::{
	NavigationError, NavigationHandler, NavigationOutcome, NavigationState, Navigator,
};
pub use options::{
	MULTIPLE_CONTRIBUTORS_ELEMENTS_LIMIT, SINGLE_CONTRIBUTOR_ELEMENTS_LIMIT, SessionOptions,
	default_parallelism,
};
pub use pooled::{Fetcher, PooledContributor};
pub use recent::{RECENT_QUERIES, RecentQueriesContributor, RecentQueriesFactory, RestoredQuery};
pub use reorder::{GroupReorderer, ResultReorderer, WeightReorderer};
pub use session::{
	ALL_TAB_TITLE, SearchSession, SearchTab, SelectionOutcome, SessionBuilder, SessionError,
};
pub use slow::{
	ContributorTiming, SlowContributorDetector, SlowContributorReport, SlowContributorThresholds,
	detect,
};
