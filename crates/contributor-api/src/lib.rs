//! Shared interfaces for search-everywhere contributors.
//!
//! A contributor is a single source of search results (files, a calculator,
//! recent queries, ...). This crate holds the capability traits contributors
//! implement together with the data model that flows between contributors and
//! the pipeline that merges their results, so that contributor crates do not
//! need to depend on the pipeline itself.

pub mod cancel;
pub mod context;
pub mod contributor;
pub mod descriptor;
pub mod element;
pub mod equality;
pub mod error;
pub mod id;
pub mod item;
pub mod listener;
pub mod recent;
pub mod registry;
pub mod sink;

pub use cancel::CancellationToken;
pub use context::{ModelLock, SessionContext};
pub use contributor::{Contributor, ContributorFactory, SelectionModifiers};
pub use descriptor::ContributorDescriptor;
pub use element::{Element, ElementRef, NavigationRequest, TextElement};
pub use equality::{EqualityAction, EqualityProvider};
pub use error::{CatalogError, ContributorError};
pub use id::ContributorId;
pub use item::{FoundElementInfo, FoundItem, sort_by_weight};
pub use listener::{ContributorStatus, SearchListener};
pub use recent::{RECENT_TARGETS_CAPACITY, RecentTargets};
pub use registry::{ContributorCatalog, RegisteredContributor};
pub use sink::ResultSink;
