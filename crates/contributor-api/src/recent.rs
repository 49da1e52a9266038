use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::element::NavigationRequest;

/// Locations kept by [`RecentTargets`].
pub const RECENT_TARGETS_CAPACITY: usize = 50;

/// Files the user navigated to in a project, newest first.
///
/// Lives in the project state of a
/// [`SessionContext`](crate::context::SessionContext) so that every session
/// of the project, and every contributor created for it, sees the same list.
/// A path appears at most once; navigating to it again moves it to the front.
#[derive(Debug)]
pub struct RecentTargets {
    capacity: usize,
    targets: Mutex<VecDeque<NavigationRequest>>,
}

impl Default for RecentTargets {
    fn default() -> Self {
        Self::with_capacity(RECENT_TARGETS_CAPACITY)
    }
}

impl RecentTargets {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            targets: Mutex::new(VecDeque::new()),
        }
    }

    pub fn record(&self, request: &NavigationRequest) {
        let mut targets = self.targets.lock();
        targets.retain(|target| target.path != request.path);
        targets.push_front(request.clone());
        targets.truncate(self.capacity);
    }

    /// Recorded locations, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NavigationRequest> {
        self.targets.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revisits_move_to_the_front() {
        let recent = RecentTargets::default();
        recent.record(&NavigationRequest::file("/p/a.rs"));
        recent.record(&NavigationRequest::file("/p/b.rs"));
        recent.record(&NavigationRequest::file("/p/a.rs").with_line(4));

        assert_eq!(
            recent.snapshot(),
            vec![
                NavigationRequest::file("/p/a.rs").with_line(4),
                NavigationRequest::file("/p/b.rs"),
            ]
        );
    }

    #[test]
    fn oldest_targets_fall_off() {
        let recent = RecentTargets::with_capacity(2);
        for name in ["a", "b", "c"] {
            recent.record(&NavigationRequest::file(format!("/p/{name}.rs")));
        }
        assert_eq!(recent.len(), 2);
        assert_eq!(
            recent.snapshot()[1],
            NavigationRequest::file("/p/b.rs")
        );
    }
}
