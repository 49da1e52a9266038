//! Search-everywhere pipeline for the `everywhere` binary and embedders.
//!
//! The root module re-exports the session API from [`search`] together with
//! the built-in contributors so that embedders can open a session without
//! digging through the module hierarchy.

pub mod app_dirs;
pub mod builtin;
pub mod logging;
pub mod search;

pub use builtin::{builtin_catalog, register_builtin_contributors};
pub use everywhere_contributor_api as api;
pub use everywhere_contributors_calculator::{CALCULATOR, CalculatorFactory};
pub use everywhere_contributors_files::{FILES, FileScope, FilesFactory};
pub use search::{
	NavigationError, NavigationOutcome, Navigator, SearchSession, SearchTab, SelectionOutcome,
	SessionBuilder, SessionError, SessionOptions,
};
