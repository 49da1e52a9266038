use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cancellation signal shared by everything working on one search.
///
/// A token stays live while the shared counter still holds its search id.
/// Starting a newer search, or cancelling, moves the counter on and thereby
/// cancels every token handed out for older searches.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl CancellationToken {
    /// Standalone token, not tied to any session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: 1,
            latest: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Token for search `id` watching the session's `latest` counter.
    #[must_use]
    pub fn from_parts(id: u64, latest: Arc<AtomicU64>) -> Self {
        Self { id, latest }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.id
    }

    pub fn cancel(&self) {
        self.latest.fetch_max(self.id + 1, Ordering::AcqRel);
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
