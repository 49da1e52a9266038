use std::sync::Arc;
use std::time::Duration;

use everywhere_contributor_api::{
	Contributor, ContributorCatalog, ContributorId, FoundElementInfo, RecentTargets, SearchListener,
	SelectionModifiers, SessionContext,
};
use log::{debug, warn};
use parking_lot::Mutex;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

use super::equality::EqualityEngine;
use super::fetch::FetchCoordinator;
use super::history::{ALL_CONTRIBUTORS_GROUP_ID, HistoryIterator, ProjectHistory};
use super::mixer::ResultMixer;
use super::navigation::{NavigationHandler, NavigationOutcome, Navigator};
use super::options::SessionOptions;
use super::pipeline::{Pipeline, SearchRequest};
use super::recent::RestoredQuery;
use super::reorder::{ResultReorderer, WeightReorderer};
use super::slow::{SlowContributorDetector, SlowContributorReport};
use super::worker::SearchWorker;

pub const ALL_TAB_TITLE: &str = "All";

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("failed to start the fetch pool: {0}")]
	Pool(#[from] ThreadPoolBuildError),

	#[error("failed to spawn the search worker: {0}")]
	Worker(#[source] std::io::Error),

	#[error("unknown search tab '{0}'")]
	UnknownTab(String),

	#[error("the search worker has stopped")]
	WorkerStopped,
}

/// A tab of the search popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTab {
	pub id: &'static str,
	pub title: &'static str,
	pub contributors: Vec<ContributorId>,
}

/// What happened after the user picked a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
	/// The owning contributor handled the selection itself.
	Handled,
	Navigated(NavigationOutcome),
}

struct CurrentSearch {
	id: u64,
	pattern: String,
	tab: &'static str,
}

/// Configures and opens a [`SearchSession`].
pub struct SessionBuilder<'a> {
	catalog: &'a ContributorCatalog,
	context: Arc<SessionContext>,
	navigator: Arc<dyn Navigator>,
	options: SessionOptions,
	equality: Option<EqualityEngine>,
	reorderer: Box<dyn ResultReorderer>,
}

impl<'a> SessionBuilder<'a> {
	#[must_use]
	pub fn new(
		catalog: &'a ContributorCatalog,
		context: Arc<SessionContext>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			catalog,
			context,
			navigator,
			options: SessionOptions::default(),
			equality: None,
			reorderer: Box::new(WeightReorderer),
		}
	}

	#[must_use]
	pub fn with_options(mut self, options: SessionOptions) -> Self {
		self.options = options;
		self
	}

	/// Replace the equality engine built from the catalog.
	#[must_use]
	pub fn with_equality(mut self, equality: EqualityEngine) -> Self {
		self.equality = Some(equality);
		self
	}

	#[must_use]
	pub fn with_reorderer(mut self, reorderer: impl ResultReorderer + 'static) -> Self {
		self.reorderer = Box::new(reorderer);
		self
	}

	/// Create the contributors and start the worker.
	///
	/// Contributors that fail to create are left out of the session.
	pub fn open(self) -> Result<SearchSession, SessionError> {
		let mut contributors: Vec<Arc<dyn Contributor>> = Vec::new();
		for registered in self.catalog.iter() {
			match registered.factory().create(&self.context) {
				Ok(contributor) => contributors.push(contributor),
				Err(err) => warn!("leaving contributor '{}' out of the session: {err}", registered.id()),
			}
		}
		contributors.sort_by_key(|contributor| contributor.descriptor().sort_weight);

		let equality = self
			.equality
			.unwrap_or_else(|| EqualityEngine::from_catalog(self.catalog));
		let model_lock = Arc::clone(self.context.model_lock());
		let coordinator = FetchCoordinator::new(self.options.parallelism, Arc::clone(&model_lock))?;
		let pipeline = Arc::new(Pipeline::new(coordinator, ResultMixer::new(equality)));
		let worker = SearchWorker::spawn(Arc::clone(&pipeline)).map_err(SessionError::Worker)?;

		let history = self.context.project_state::<ProjectHistory>();
		history.lock().set_order(self.options.history_order);

		debug!(
			"opened session for '{}' with {} contributor(s)",
			self.context.project(),
			contributors.len()
		);

		Ok(SearchSession {
			navigation: NavigationHandler::new(self.navigator, model_lock),
			detector: Mutex::new(SlowContributorDetector::new(self.options.slow)),
			current: Mutex::new(CurrentSearch {
				id: 0,
				pattern: String::new(),
				tab: ALL_CONTRIBUTORS_GROUP_ID,
			}),
			context: self.context,
			options: self.options,
			reorderer: self.reorderer,
			contributors,
			pipeline,
			history,
			worker,
		})
	}
}

/// One search popup: contributors created for it, the running search and the
/// results accepted so far.
///
/// Searches run on a background worker; a single consumer thread calls
/// [`SearchSession::flush`] to receive their events.
pub struct SearchSession {
	context: Arc<SessionContext>,
	options: SessionOptions,
	contributors: Vec<Arc<dyn Contributor>>,
	pipeline: Arc<Pipeline>,
	worker: SearchWorker,
	history: Arc<ProjectHistory>,
	navigation: NavigationHandler,
	reorderer: Box<dyn ResultReorderer>,
	detector: Mutex<SlowContributorDetector>,
	current: Mutex<CurrentSearch>,
}

impl SearchSession {
	#[must_use]
	pub fn builder(
		catalog: &ContributorCatalog,
		context: Arc<SessionContext>,
		navigator: Arc<dyn Navigator>,
	) -> SessionBuilder<'_> {
		SessionBuilder::new(catalog, context, navigator)
	}

	#[must_use]
	pub fn context(&self) -> &Arc<SessionContext> {
		&self.context
	}

	#[must_use]
	pub fn options(&self) -> &SessionOptions {
		&self.options
	}

	/// Contributors of the session in tab order.
	#[must_use]
	pub fn contributors(&self) -> Vec<ContributorId> {
		self.contributors.iter().map(|contributor| contributor.id()).collect()
	}

	/// The "All" tab followed by every contributor shown in a tab of its own.
	#[must_use]
	pub fn tabs(&self) -> Vec<SearchTab> {
		let mut tabs = vec![SearchTab {
			id: ALL_CONTRIBUTORS_GROUP_ID,
			title: ALL_TAB_TITLE,
			contributors: self.contributors(),
		}];
		tabs.extend(
			self.contributors
				.iter()
				.filter(|contributor| contributor.descriptor().separate_tab)
				.map(|contributor| SearchTab {
					id: contributor.descriptor().id,
					title: contributor.descriptor().group_name,
					contributors: vec![contributor.id()],
				}),
		);
		tabs
	}

	/// Start searching every contributor in the background.
	pub fn search(&self, pattern: &str) -> Result<u64, SessionError> {
		self.search_in_tab(ALL_CONTRIBUTORS_GROUP_ID, pattern)
	}

	/// Start searching the contributors of `tab` in the background.
	pub fn search_in_tab(&self, tab: &str, pattern: &str) -> Result<u64, SessionError> {
		let request = self.prepare(tab, pattern)?;
		let id = request.id;
		if !self.worker.submit(request) {
			return Err(SessionError::WorkerStopped);
		}
		Ok(id)
	}

	/// Search every contributor on the calling thread.
	pub fn search_blocking(&self, pattern: &str) -> Result<u64, SessionError> {
		self.search_in_tab_blocking(ALL_CONTRIBUTORS_GROUP_ID, pattern)
	}

	pub fn search_in_tab_blocking(&self, tab: &str, pattern: &str) -> Result<u64, SessionError> {
		let request = self.prepare(tab, pattern)?;
		self.pipeline.run(&request);
		Ok(request.id)
	}

	/// Block until background search `search` is done or `timeout` elapses.
	pub fn wait_for_search(&self, search: u64, timeout: Duration) -> bool {
		self.worker.wait_for(search, timeout)
	}

	/// Stop the running search. Results already buffered stay.
	pub fn cancel(&self) {
		self.pipeline.cancel();
	}

	/// Deliver pending events to `listener`. Returns `false` when nothing was pending.
	pub fn flush(&self, listener: &mut dyn SearchListener) -> bool {
		let mut detector = self.detector.lock();
		let mut tee = ListenerTee {
			primary: listener,
			detector: &mut detector,
		};
		self.pipeline.flush(&mut tee)
	}

	/// Accepted results of the current search, in presentation order.
	#[must_use]
	pub fn results(&self) -> Vec<FoundElementInfo> {
		let mut items = self.pipeline.accepted();
		let pattern = self.current.lock().pattern.clone();
		self.reorderer.reorder(&pattern, &mut items);
		items
	}

	/// Id of the most recently started search.
	#[must_use]
	pub fn current_search(&self) -> u64 {
		self.current.lock().id
	}

	/// Contributors whose limit cut their results in the current search.
	#[must_use]
	pub fn tabs_with_more(&self) -> Vec<ContributorId> {
		self.pipeline.contributors_with_more()
	}

	/// Act on the result the user picked.
	///
	/// The query is remembered for the active tab. The owning contributor
	/// gets the first chance to handle the item; otherwise it is navigated to
	/// and, once opened, joins the project's recent targets.
	pub fn select(&self, info: &FoundElementInfo, modifiers: SelectionModifiers) -> SelectionOutcome {
		let (pattern, tab) = {
			let current = self.current.lock();
			(current.pattern.clone(), current.tab)
		};
		self.history.save_text(&pattern, tab);

		let owner = self
			.contributors
			.iter()
			.find(|contributor| contributor.id() == info.contributor());
		if let Some(contributor) = owner
			&& contributor.process_selected_item(info.item(), modifiers, &pattern)
		{
			return SelectionOutcome::Handled;
		}
		let outcome = self.navigation.navigate(info.element());
		if let NavigationOutcome::ViaRequest(request) = &outcome {
			self.context.project_state::<RecentTargets>().record(request);
		}
		SelectionOutcome::Navigated(outcome)
	}

	/// Query text a history selection asked to search next.
	pub fn take_restored_query(&self) -> Option<String> {
		self.context.project_state::<RestoredQuery>().take()
	}

	#[must_use]
	pub fn navigation(&self) -> &NavigationHandler {
		&self.navigation
	}

	#[must_use]
	pub fn history_iterator(&self, contributor: &str) -> HistoryIterator {
		self.history.iterator(contributor)
	}

	/// Slow contributor analysis of the last search delivered through [`Self::flush`].
	#[must_use]
	pub fn slow_contributor_report(&self) -> Option<SlowContributorReport> {
		self.detector.lock().report().cloned()
	}

	/// Close the session, remembering the last query in the shared history.
	pub fn close(self) {
		let pattern = self.current.lock().pattern.clone();
		self.history.save_text(&pattern, ALL_CONTRIBUTORS_GROUP_ID);
		debug!("closed session for '{}'", self.context.project());
	}

	fn prepare(&self, tab: &str, pattern: &str) -> Result<SearchRequest, SessionError> {
		let (tab, contributors, limit) = if tab == ALL_CONTRIBUTORS_GROUP_ID {
			(
				ALL_CONTRIBUTORS_GROUP_ID,
				self.contributors.clone(),
				self.options.max_results_per_contributor,
			)
		} else {
			let contributor = self
				.contributors
				.iter()
				.find(|contributor| {
					let descriptor = contributor.descriptor();
					descriptor.separate_tab && descriptor.id == tab
				})
				.ok_or_else(|| SessionError::UnknownTab(tab.to_string()))?;
			(
				contributor.descriptor().id,
				vec![Arc::clone(contributor)],
				self.options.max_results_single_tab,
			)
		};

		let request = self.pipeline.begin(pattern, contributors, limit);
		*self.current.lock() = CurrentSearch {
			id: request.id,
			pattern: pattern.to_string(),
			tab,
		};
		Ok(request)
	}
}

impl Drop for SearchSession {
	fn drop(&mut self) {
		self.pipeline.cancel();
	}
}

/// Forwards every event to the consumer and to the slow contributor detector.
struct ListenerTee<'a> {
	primary: &'a mut dyn SearchListener,
	detector: &'a mut SlowContributorDetector,
}

impl SearchListener for ListenerTee<'_> {
	fn search_started(&mut self, pattern: &str, contributors: &[ContributorId]) {
		self.detector.search_started(pattern, contributors);
		self.primary.search_started(pattern, contributors);
	}

	fn elements_added(&mut self, list: &[FoundElementInfo]) {
		self.detector.elements_added(list);
		self.primary.elements_added(list);
	}

	fn elements_removed(&mut self, list: &[FoundElementInfo]) {
		self.detector.elements_removed(list);
		self.primary.elements_removed(list);
	}

	fn contributor_timed(&mut self, contributor: ContributorId, delay: Duration) {
		self.detector.contributor_timed(contributor, delay);
		self.primary.contributor_timed(contributor, delay);
	}

	fn contributor_waits(&mut self, contributor: ContributorId) {
		self.detector.contributor_waits(contributor);
		self.primary.contributor_waits(contributor);
	}

	fn contributor_finished(&mut self, contributor: ContributorId, has_more: bool) {
		self.detector.contributor_finished(contributor, has_more);
		self.primary.contributor_finished(contributor, has_more);
	}

	fn search_finished(&mut self, has_more_contributors: bool) {
		self.detector.search_finished(has_more_contributors);
		self.primary.search_finished(has_more_contributors);
	}
}
