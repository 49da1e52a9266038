use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::debug;
use parking_lot::Mutex;

use super::pipeline::{Pipeline, SearchRequest};

/// Commands understood by the background search worker.
pub(crate) enum SearchCommand {
	/// Run a search; its id is reported on the completion channel afterwards.
	Search(SearchRequest),
	/// Stop the background worker thread.
	Shutdown,
}

struct Completions {
	rx: Receiver<u64>,
	last: u64,
}

/// Background thread running the searches of one session.
pub(crate) struct SearchWorker {
	commands: Sender<SearchCommand>,
	completions: Mutex<Completions>,
	handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
	pub(crate) fn spawn(pipeline: Arc<Pipeline>) -> io::Result<Self> {
		let (command_tx, command_rx) = mpsc::channel();
		let (completed_tx, completed_rx) = mpsc::channel();
		let handle = thread::Builder::new()
			.name("everywhere-search".into())
			.spawn(move || worker_loop(&pipeline, command_rx, completed_tx))?;

		Ok(Self {
			commands: command_tx,
			completions: Mutex::new(Completions {
				rx: completed_rx,
				last: 0,
			}),
			handle: Some(handle),
		})
	}

	/// Queue a search. Returns `false` when the worker is gone.
	pub(crate) fn submit(&self, request: SearchRequest) -> bool {
		self.commands.send(SearchCommand::Search(request)).is_ok()
	}

	/// Block until search `id`, or a newer one, has completed.
	pub(crate) fn wait_for(&self, id: u64, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		let mut completions = self.completions.lock();
		while completions.last < id {
			let remaining = deadline.saturating_duration_since(Instant::now());
			match completions.rx.recv_timeout(remaining) {
				Ok(done) => completions.last = completions.last.max(done),
				Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
			}
		}
		true
	}
}

impl Drop for SearchWorker {
	fn drop(&mut self) {
		let _ = self.commands.send(SearchCommand::Shutdown);
		if let Some(handle) = self.handle.take()
			&& handle.join().is_err()
		{
			debug!("search worker exited with a panic");
		}
	}
}

fn worker_loop(pipeline: &Pipeline, command_rx: Receiver<SearchCommand>, completed_tx: Sender<u64>) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(pipeline, &completed_tx, command) {
			break;
		}
	}
}

fn handle_command(pipeline: &Pipeline, completed_tx: &Sender<u64>, command: SearchCommand) -> bool {
	match command {
		SearchCommand::Search(request) => {
			pipeline.run(&request);
			let _ = completed_tx.send(request.id);
			true
		}
		SearchCommand::Shutdown => false,
	}
}
