use std::sync::Arc;

use everywhere_contributor_api::{
	Contributor, ContributorDescriptor, ContributorError, ContributorFactory, FoundItem,
	ResultSink, SelectionModifiers, SessionContext, TextElement,
};
use log::debug;
use parking_lot::Mutex;

use super::history::{ALL_CONTRIBUTORS_GROUP_ID, ProjectHistory};

pub static RECENT_QUERIES: ContributorDescriptor =
	ContributorDescriptor::new("recent", "Recent Searches", 900).hidden_tab();

/// Query picked from the history, waiting to become the next search text.
#[derive(Debug, Default)]
pub struct RestoredQuery(Mutex<Option<String>>);

impl RestoredQuery {
	pub fn set(&self, text: &str) {
		*self.0.lock() = Some(text.to_string());
	}

	/// Take the restored text, leaving nothing behind.
	pub fn take(&self) -> Option<String> {
		self.0.lock().take()
	}
}

/// Creates [`RecentQueriesContributor`] instances bound to the project history.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentQueriesFactory;

impl ContributorFactory for RecentQueriesFactory {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&RECENT_QUERIES
	}

	fn create(&self, context: &Arc<SessionContext>) -> Result<Arc<dyn Contributor>, ContributorError> {
		Ok(Arc::new(
			RecentQueriesContributor::new(context.project_state::<ProjectHistory>())
				.restoring_into(context.project_state::<RestoredQuery>()),
		))
	}
}

/// Serves previous queries of the project, newest first.
///
/// A blank pattern lists the whole history; otherwise queries containing the
/// pattern (ignoring case) are returned. Selecting one restores it as the
/// query instead of navigating anywhere.
pub struct RecentQueriesContributor {
	history: Arc<ProjectHistory>,
	restored: Arc<RestoredQuery>,
}

impl RecentQueriesContributor {
	#[must_use]
	pub fn new(history: Arc<ProjectHistory>) -> Self {
		Self {
			history,
			restored: Arc::default(),
		}
	}

	#[must_use]
	pub fn restoring_into(mut self, restored: Arc<RestoredQuery>) -> Self {
		self.restored = restored;
		self
	}

	#[must_use]
	pub fn restored(&self) -> &Arc<RestoredQuery> {
		&self.restored
	}
}

impl Contributor for RecentQueriesContributor {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&RECENT_QUERIES
	}

	fn fetch(&self, pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError> {
		let needle = pattern.trim().to_lowercase();
		let recent = self.history.recent(ALL_CONTRIBUTORS_GROUP_ID);
		let total = recent.len();
		for (rank, text) in recent.into_iter().enumerate() {
			if !needle.is_empty() && !text.to_lowercase().contains(&needle) {
				continue;
			}
			let weight = i32::try_from(total - rank).unwrap_or(i32::MAX);
			if !sink.push(TextElement::shared(text), weight) {
				break;
			}
		}
		Ok(())
	}

	fn process_selected_item(
		&self,
		item: &FoundItem,
		_modifiers: SelectionModifiers,
		_search_text: &str,
	) -> bool {
		debug!("restoring query '{}' from history", item.text());
		self.restored.set(item.text());
		true
	}

	fn supports_empty_pattern(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use everywhere_contributor_api::{CancellationToken, ContributorId};
	use pretty_assertions::assert_eq;

	use super::*;

	fn fetch(contributor: &RecentQueriesContributor, pattern: &str) -> Vec<(String, i32)> {
		let token = CancellationToken::new();
		let mut received = Vec::new();
		let mut consumer = |item: FoundItem| {
			received.push((item.text().to_string(), item.weight()));
			true
		};
		let mut sink = ResultSink::new(ContributorId::from_descriptor(&RECENT_QUERIES), &token, &mut consumer);
		contributor.fetch(pattern, &mut sink).expect("fetch");
		drop(sink);
		received
	}

	#[test]
	fn lists_history_newest_first() {
		let context = Arc::new(SessionContext::new("demo", "/tmp"));
		let history = context.project_state::<ProjectHistory>();
		history.save_text("cargo toml", ALL_CONTRIBUTORS_GROUP_ID);
		history.save_text("main", "files");

		let contributor = RecentQueriesFactory.create(&context).expect("create");
		let recent = RecentQueriesContributor::new(history);
		assert!(contributor.supports_empty_pattern());
		assert_eq!(
			fetch(&recent, ""),
			vec![("main".to_string(), 2), ("cargo toml".to_string(), 1)]
		);
	}

	#[test]
	fn filters_by_pattern_ignoring_case() {
		let history = Arc::new(ProjectHistory::default());
		history.save_text("Cargo.toml", "files");
		history.save_text("main.rs", "files");
		let recent = RecentQueriesContributor::new(history);
		assert_eq!(fetch(&recent, "CARGO"), vec![("Cargo.toml".to_string(), 1)]);
	}

	#[test]
	fn selecting_a_query_restores_it() {
		let context = Arc::new(SessionContext::new("demo", "/tmp"));
		context
			.project_state::<ProjectHistory>()
			.save_text("cargo toml", ALL_CONTRIBUTORS_GROUP_ID);
		let contributor = RecentQueriesFactory.create(&context).expect("create");
		let item = FoundItem::new(
			TextElement::shared("cargo toml"),
			1,
			ContributorId::from_descriptor(&RECENT_QUERIES),
		);

		assert!(contributor.process_selected_item(&item, SelectionModifiers::default(), "car"));
		let restored = context.project_state::<RestoredQuery>();
		assert_eq!(restored.take().as_deref(), Some("cargo toml"));
		assert_eq!(restored.take(), None);
	}
}
