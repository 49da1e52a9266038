use std::sync::Arc;

use everywhere_contributor_api::{Element, ElementRef, ModelLock, NavigationRequest};
use log::{debug, warn};
use parking_lot::Mutex;
use thiserror::Error;

/// Serializes every navigation in the process; later callers queue behind it.
static NAVIGATION_PERMIT: Mutex<()> = Mutex::new(());

#[derive(Debug, Error)]
pub enum NavigationError {
	#[error("cannot navigate to {target}: {reason}")]
	Unreachable { target: String, reason: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Service that actually opens elements.
pub trait Navigator: Send + Sync {
	fn navigate(&self, request: &NavigationRequest) -> Result<(), NavigationError>;

	/// Open an element that carries no navigation request.
	fn navigate_raw(&self, element: &dyn Element) -> Result<(), NavigationError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationState {
	#[default]
	Idle,
	Resolving,
	NavigatingViaRequest,
	NavigatingViaRawFallback,
	Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	ViaRequest(NavigationRequest),
	ViaRawFallback,
	/// The element went stale before it could be opened.
	Aborted,
	Failed(String),
}

/// Opens selected elements one at a time.
pub struct NavigationHandler {
	navigator: Arc<dyn Navigator>,
	model_lock: Arc<ModelLock>,
	state: Mutex<NavigationState>,
	transitions: Mutex<Vec<NavigationState>>,
}

impl NavigationHandler {
	#[must_use]
	pub fn new(navigator: Arc<dyn Navigator>, model_lock: Arc<ModelLock>) -> Self {
		Self {
			navigator,
			model_lock,
			state: Mutex::new(NavigationState::Idle),
			transitions: Mutex::new(Vec::new()),
		}
	}

	#[must_use]
	pub fn state(&self) -> NavigationState {
		*self.state.lock()
	}

	/// States visited by the most recent navigation, starting and ending at idle.
	#[must_use]
	pub fn last_transitions(&self) -> Vec<NavigationState> {
		self.transitions.lock().clone()
	}

	pub fn navigate(&self, element: &ElementRef) -> NavigationOutcome {
		let _permit = NAVIGATION_PERMIT.lock();
		let mut visited = vec![NavigationState::Idle];
		let mut enter = |state: NavigationState| {
			*self.state.lock() = state;
			visited.push(state);
		};

		enter(NavigationState::Resolving);
		let resolved = self
			.model_lock
			.read(|| element.is_valid().then(|| element.navigation_request()));

		let outcome = match resolved {
			None => {
				warn!("'{}' is no longer valid; navigation aborted", element.text());
				enter(NavigationState::Aborted);
				NavigationOutcome::Aborted
			}
			Some(Some(request)) => {
				enter(NavigationState::NavigatingViaRequest);
				debug!("navigating to {request}");
				match self.navigator.navigate(&request) {
					Ok(()) => NavigationOutcome::ViaRequest(request),
					Err(err) => failed(err),
				}
			}
			Some(None) => {
				enter(NavigationState::NavigatingViaRawFallback);
				match self.navigator.navigate_raw(element.as_ref()) {
					Ok(()) => NavigationOutcome::ViaRawFallback,
					Err(err) => failed(err),
				}
			}
		};

		enter(NavigationState::Idle);
		*self.transitions.lock() = visited;
		outcome
	}
}

fn failed(err: NavigationError) -> NavigationOutcome {
	warn!("navigation failed: {err}");
	NavigationOutcome::Failed(err.to_string())
}
