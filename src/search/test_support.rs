//! Fixtures shared by the search unit tests.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use everywhere_contributor_api::{
	Contributor, ContributorDescriptor, ContributorError, ContributorId, Element, ElementRef,
	FoundElementInfo, FoundItem, NavigationRequest, ResultSink, SearchListener,
	SelectionModifiers,
};
use parking_lot::Mutex;

pub(crate) static ALPHA: ContributorDescriptor =
	ContributorDescriptor::new("alpha", "Alpha", 10).essential();
pub(crate) static BETA: ContributorDescriptor = ContributorDescriptor::new("beta", "Beta", 20);
pub(crate) static GAMMA: ContributorDescriptor =
	ContributorDescriptor::new("gamma", "Gamma", 30).hidden_tab();

pub(crate) fn contributor(descriptor: &'static ContributorDescriptor) -> ContributorId {
	ContributorId::from_descriptor(descriptor)
}

/// Element with an optional file location and a switchable validity flag.
#[derive(Debug)]
pub(crate) struct TestElement {
	text: String,
	path: Option<PathBuf>,
	valid: AtomicBool,
}

impl TestElement {
	pub(crate) fn new(text: &str) -> Self {
		Self {
			text: text.to_string(),
			path: None,
			valid: AtomicBool::new(true),
		}
	}

	pub(crate) fn at(text: &str, path: &str) -> Self {
		Self {
			path: Some(PathBuf::from(path)),
			..Self::new(text)
		}
	}

	pub(crate) fn invalidate(&self) {
		self.valid.store(false, Ordering::Release);
	}
}

impl Element for TestElement {
	fn text(&self) -> &str {
		&self.text
	}

	fn navigation_request(&self) -> Option<NavigationRequest> {
		self.path.clone().map(NavigationRequest::file)
	}

	fn is_valid(&self) -> bool {
		self.valid.load(Ordering::Acquire)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

pub(crate) fn item(descriptor: &'static ContributorDescriptor, text: &str, weight: i32) -> FoundItem {
	FoundItem::new(Arc::new(TestElement::new(text)), weight, contributor(descriptor))
}

pub(crate) fn info(
	id: u64,
	descriptor: &'static ContributorDescriptor,
	text: &str,
	weight: i32,
) -> FoundElementInfo {
	FoundElementInfo::new(id, item(descriptor, text, weight))
}

pub(crate) fn located(
	id: u64,
	descriptor: &'static ContributorDescriptor,
	text: &str,
	path: &str,
) -> FoundElementInfo {
	FoundElementInfo::new(
		id,
		FoundItem::new(
			Arc::new(TestElement::at(text, path)),
			0,
			contributor(descriptor),
		),
	)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListenerEvent {
	Started(String, Vec<ContributorId>),
	Added(Vec<String>),
	Removed(Vec<String>),
	Waits(ContributorId),
	Finished(ContributorId, bool),
	SearchFinished(bool),
}

/// Listener that keeps every event it sees, rendered with element descriptions.
#[derive(Debug, Default)]
pub(crate) struct RecordingListener {
	pub(crate) events: Vec<ListenerEvent>,
}

impl RecordingListener {
	pub(crate) fn added(&self) -> Vec<String> {
		self.events
			.iter()
			.filter_map(|event| match event {
				ListenerEvent::Added(list) => Some(list.clone()),
				_ => None,
			})
			.flatten()
			.collect()
	}

	pub(crate) fn removed(&self) -> Vec<String> {
		self.events
			.iter()
			.filter_map(|event| match event {
				ListenerEvent::Removed(list) => Some(list.clone()),
				_ => None,
			})
			.flatten()
			.collect()
	}

	pub(crate) fn finished(&self) -> Vec<(ContributorId, bool)> {
		self.events
			.iter()
			.filter_map(|event| match event {
				ListenerEvent::Finished(contributor, has_more) => Some((*contributor, *has_more)),
				_ => None,
			})
			.collect()
	}

	pub(crate) fn search_finished(&self) -> Option<bool> {
		self.events.iter().find_map(|event| match event {
			ListenerEvent::SearchFinished(more) => Some(*more),
			_ => None,
		})
	}
}

fn describe(list: &[FoundElementInfo]) -> Vec<String> {
	list.iter().map(|info| info.description().to_string()).collect()
}

impl SearchListener for RecordingListener {
	fn search_started(&mut self, pattern: &str, contributors: &[ContributorId]) {
		self.events
			.push(ListenerEvent::Started(pattern.to_string(), contributors.to_vec()));
	}

	fn elements_added(&mut self, list: &[FoundElementInfo]) {
		self.events.push(ListenerEvent::Added(describe(list)));
	}

	fn elements_removed(&mut self, list: &[FoundElementInfo]) {
		self.events.push(ListenerEvent::Removed(describe(list)));
	}

	fn contributor_waits(&mut self, contributor: ContributorId) {
		self.events.push(ListenerEvent::Waits(contributor));
	}

	fn contributor_finished(&mut self, contributor: ContributorId, has_more: bool) {
		self.events.push(ListenerEvent::Finished(contributor, has_more));
	}

	fn search_finished(&mut self, has_more_contributors: bool) {
		self.events
			.push(ListenerEvent::SearchFinished(has_more_contributors));
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
	Error,
	Panic,
}

/// Contributor replaying a fixed list of elements.
pub(crate) struct ScriptedContributor {
	descriptor: &'static ContributorDescriptor,
	items: Vec<(ElementRef, i32)>,
	ready: bool,
	failure: Option<Failure>,
	empty_pattern: bool,
	needs_model_lock: bool,
	handles_selection: bool,
	pause: Duration,
	pub(crate) fetches: AtomicUsize,
	pub(crate) selections: Mutex<Vec<String>>,
}

impl ScriptedContributor {
	pub(crate) fn new(descriptor: &'static ContributorDescriptor) -> Self {
		Self {
			descriptor,
			items: Vec::new(),
			ready: true,
			failure: None,
			empty_pattern: false,
			needs_model_lock: false,
			handles_selection: false,
			pause: Duration::ZERO,
			fetches: AtomicUsize::new(0),
			selections: Mutex::new(Vec::new()),
		}
	}

	pub(crate) fn emitting(mut self, items: &[(&str, i32)]) -> Self {
		self.items.extend(
			items
				.iter()
				.map(|(text, weight)| (Arc::new(TestElement::new(text)) as ElementRef, *weight)),
		);
		self
	}

	pub(crate) fn emitting_element(mut self, element: ElementRef, weight: i32) -> Self {
		self.items.push((element, weight));
		self
	}

	pub(crate) fn not_ready(mut self) -> Self {
		self.ready = false;
		self
	}

	pub(crate) fn failing(mut self, failure: Failure) -> Self {
		self.failure = Some(failure);
		self
	}

	pub(crate) fn with_empty_pattern(mut self) -> Self {
		self.empty_pattern = true;
		self
	}

	pub(crate) fn under_model_lock(mut self) -> Self {
		self.needs_model_lock = true;
		self
	}

	pub(crate) fn handling_selection(mut self) -> Self {
		self.handles_selection = true;
		self
	}

	/// Sleep for `pause` before emitting anything.
	pub(crate) fn sleeping(mut self, pause: Duration) -> Self {
		self.pause = pause;
		self
	}

	pub(crate) fn fetch_count(&self) -> usize {
		self.fetches.load(Ordering::Acquire)
	}
}

impl Contributor for ScriptedContributor {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		self.descriptor
	}

	fn fetch(&self, _pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError> {
		self.fetches.fetch_add(1, Ordering::AcqRel);
		if self.failure == Some(Failure::Panic) {
			panic!("scripted contributor '{}' panicked", self.descriptor.id);
		}
		if !self.pause.is_zero() {
			thread::sleep(self.pause);
		}
		for (element, weight) in &self.items {
			if !sink.push(Arc::clone(element), *weight) {
				break;
			}
		}
		match self.failure {
			Some(Failure::Error) => Err(ContributorError::fetch(self.descriptor.id, "scripted failure")),
			_ => Ok(()),
		}
	}

	fn process_selected_item(
		&self,
		item: &FoundItem,
		_modifiers: SelectionModifiers,
		search_text: &str,
	) -> bool {
		self.selections
			.lock()
			.push(format!("{search_text}->{}", item.text()));
		self.handles_selection
	}

	fn is_ready(&self) -> bool {
		self.ready
	}

	fn needs_model_lock(&self) -> bool {
		self.needs_model_lock
	}

	fn supports_empty_pattern(&self) -> bool {
		self.empty_pattern
	}
}
