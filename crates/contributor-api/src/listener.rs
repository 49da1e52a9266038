use std::time::Duration;

use crate::id::ContributorId;
use crate::item::FoundElementInfo;

/// Terminal state a contributor reported for the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributorStatus {
    /// The contributor cannot search yet and waits for its data to become ready.
    Waiting,
    /// The contributor finished. `has_more` is set when its limit cut the stream.
    Finished { has_more: bool },
}

/// Consumer of search progress, typically the presentation layer.
///
/// Every method has an empty default so listeners only implement what they
/// care about.
pub trait SearchListener {
    fn search_started(&mut self, _pattern: &str, _contributors: &[ContributorId]) {}

    fn elements_added(&mut self, _list: &[FoundElementInfo]) {}

    fn elements_removed(&mut self, _list: &[FoundElementInfo]) {}

    /// `contributor` reached its current status `delay` after the search
    /// started. Delivered just before the status event itself.
    fn contributor_timed(&mut self, _contributor: ContributorId, _delay: Duration) {}

    fn contributor_waits(&mut self, _contributor: ContributorId) {}

    fn contributor_finished(&mut self, _contributor: ContributorId, _has_more: bool) {}

    fn search_finished(&mut self, _has_more_contributors: bool) {}
}
