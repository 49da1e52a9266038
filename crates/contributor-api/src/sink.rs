use log::warn;

use crate::cancel::CancellationToken;
use crate::element::ElementRef;
use crate::id::ContributorId;
use crate::item::FoundItem;

/// Handle used by contributors to push results into the search.
///
/// Every push reports whether the contributor should keep going. A `false`
/// answer means the search was cancelled, the consumer is full, or the
/// contributor reached its result limit; contributors must stop fetching when
/// they see it.
pub struct ResultSink<'a> {
    contributor: ContributorId,
    token: &'a CancellationToken,
    consumer: &'a mut dyn FnMut(FoundItem) -> bool,
    limit: Option<usize>,
    accepted: usize,
    has_more: bool,
    violations: usize,
}

impl<'a> ResultSink<'a> {
    #[must_use]
    pub fn new(
        contributor: ContributorId,
        token: &'a CancellationToken,
        consumer: &'a mut dyn FnMut(FoundItem) -> bool,
    ) -> Self {
        Self {
            contributor,
            token,
            consumer,
            limit: None,
            accepted: 0,
            has_more: false,
            violations: 0,
        }
    }

    /// Refuse items beyond `limit`.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn contributor(&self) -> ContributorId {
        self.contributor
    }

    #[must_use]
    pub fn token(&self) -> &'a CancellationToken {
        self.token
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Push a result. Returns `false` when the contributor must stop.
    pub fn push(&mut self, element: ElementRef, weight: i32) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        if let Some(limit) = self.limit
            && self.accepted >= limit
        {
            self.has_more = true;
            return false;
        }
        self.accepted += 1;
        (self.consumer)(FoundItem::new(element, weight, self.contributor))
    }

    /// Push a result coming from a source that may yield nothing.
    ///
    /// A missing element is a contributor bug: it is logged and skipped, and
    /// the fetch carries on.
    pub fn offer(&mut self, element: Option<ElementRef>, weight: i32) -> bool {
        match element {
            Some(element) => self.push(element, weight),
            None => {
                self.violations += 1;
                warn!(
                    "contributor '{}' produced an empty item; skipping it",
                    self.contributor
                );
                !self.token.is_cancelled()
            }
        }
    }

    /// Number of items accepted so far.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Whether the limit cut off at least one item.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of empty items the contributor offered.
    #[must_use]
    pub fn violations(&self) -> usize {
        self.violations
    }
}
