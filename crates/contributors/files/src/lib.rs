//! File contributor for everywhere.
//!
//! Lists the files below the session root and fuzzy matches their relative
//! paths against the query. Selecting a file navigates to it. Files opened
//! earlier in the project are listed by the recent files contributor, even
//! for a blank query.

mod contributor;
mod element;
mod matcher;
mod recent;
mod walk;

pub use contributor::{FILES, FilesContributor, FilesFactory};
pub use element::FileElement;
pub use matcher::{
	MATCH_CHUNK_SIZE, PREFILTER_ENABLE_THRESHOLD, config_for_query, rank_matches, rank_matches_with,
};
pub use recent::{MAX_RECENT_FILES, RECENT_FILES, RecentFilesContributor, RecentFilesFactory};
pub use walk::{FileScope, UnknownScope, walk_files};
