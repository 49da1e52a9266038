use std::sync::Arc;

use anyhow::{Context, Result, bail};
use everywhere::api::{
	ContributorId, Element, FoundElementInfo, NavigationRequest, SearchListener, SelectionModifiers,
	SessionContext,
};
use everywhere::search::{ALL_CONTRIBUTORS_GROUP_ID, GroupReorderer};
use everywhere::{
	FilesFactory, NavigationError, NavigationOutcome, Navigator, SearchSession, SelectionOutcome,
	builtin_catalog,
};
use log::{info, warn};
use parking_lot::Mutex;

use crate::settings::ResolvedConfig;

/// One result as printed by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportItem {
	pub(crate) contributor: &'static str,
	pub(crate) group: &'static str,
	pub(crate) text: String,
	pub(crate) weight: i32,
	pub(crate) target: Option<String>,
}

/// What `--select` led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectionReport {
	Handled { text: String },
	Opened { target: String },
	Aborted { text: String },
	Failed { reason: String },
}

/// Everything a run of the binary prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchReport {
	pub(crate) query: String,
	pub(crate) tab: String,
	pub(crate) items: Vec<ReportItem>,
	pub(crate) more: Vec<&'static str>,
	pub(crate) waiting: Vec<&'static str>,
	pub(crate) slow: Vec<&'static str>,
	pub(crate) selection: Option<SelectionReport>,
}

/// Runs one blocking search over the built-in contributors.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(self, query: &str, tab: Option<&str>, select: Option<usize>) -> Result<SearchReport> {
		let ResolvedConfig {
			root,
			scope,
			options,
		} = self.config;

		let project = root
			.file_name()
			.map_or_else(|| root.display().to_string(), |name| name.to_string_lossy().into_owned());
		let context = Arc::new(SessionContext::new(project, root));
		let files = FilesFactory::new()
			.with_scope(scope)
			.with_threads(options.parallelism);
		let catalog = builtin_catalog(files).context("failed to register built-in contributors")?;
		let navigator = Arc::new(TargetNavigator::default());
		let session = SearchSession::builder(&catalog, context, navigator.clone())
			.with_options(options)
			.with_reorderer(GroupReorderer)
			.open()?;

		let tab = tab.unwrap_or(ALL_CONTRIBUTORS_GROUP_ID);
		session.search_in_tab_blocking(tab, query)?;
		let mut progress = ProgressListener::default();
		session.flush(&mut progress);

		let results = session.results();
		let items = results.iter().map(report_item).collect();
		let slow = session
			.slow_contributor_report()
			.map(|report| report.slow.iter().map(|contributor| contributor.id()).collect())
			.unwrap_or_default();

		let selection = match select {
			None => None,
			Some(0) => bail!("--select counts from 1"),
			Some(index) => {
				let Some(info) = results.get(index - 1) else {
					bail!("--select {index} is out of range ({} result(s))", results.len());
				};
				Some(select_result(&session, info, &navigator))
			}
		};

		session.close();

		Ok(SearchReport {
			query: query.to_string(),
			tab: tab.to_string(),
			items,
			more: progress.more,
			waiting: progress.waiting,
			slow,
			selection,
		})
	}
}

fn report_item(info: &FoundElementInfo) -> ReportItem {
	let descriptor = info.contributor().descriptor();
	ReportItem {
		contributor: descriptor.id,
		group: descriptor.group_name,
		text: info.element().text().to_string(),
		weight: info.weight(),
		target: info
			.element()
			.navigation_request()
			.map(|request| request.to_string()),
	}
}

fn select_result(
	session: &SearchSession,
	info: &FoundElementInfo,
	navigator: &TargetNavigator,
) -> SelectionReport {
	let text = info.element().text().to_string();
	match session.select(info, SelectionModifiers::default()) {
		SelectionOutcome::Handled => SelectionReport::Handled { text },
		SelectionOutcome::Navigated(NavigationOutcome::ViaRequest(request)) => SelectionReport::Opened {
			target: request.to_string(),
		},
		SelectionOutcome::Navigated(NavigationOutcome::ViaRawFallback) => SelectionReport::Opened {
			target: navigator.last().unwrap_or(text),
		},
		SelectionOutcome::Navigated(NavigationOutcome::Aborted) => SelectionReport::Aborted { text },
		SelectionOutcome::Navigated(NavigationOutcome::Failed(reason)) => {
			SelectionReport::Failed { reason }
		}
	}
}

/// Remembers where the last navigation led; the binary prints it.
#[derive(Debug, Default)]
struct TargetNavigator {
	last: Mutex<Option<String>>,
}

impl TargetNavigator {
	fn last(&self) -> Option<String> {
		self.last.lock().clone()
	}
}

impl Navigator for TargetNavigator {
	fn navigate(&self, request: &NavigationRequest) -> Result<(), NavigationError> {
		if !request.path.exists() {
			return Err(NavigationError::Unreachable {
				target: request.to_string(),
				reason: "file does not exist".into(),
			});
		}
		info!("opening {request}");
		*self.last.lock() = Some(request.to_string());
		Ok(())
	}

	fn navigate_raw(&self, element: &dyn Element) -> Result<(), NavigationError> {
		*self.last.lock() = Some(element.text().to_string());
		Ok(())
	}
}

/// Collects terminal contributor states from the flushed events.
#[derive(Debug, Default)]
struct ProgressListener {
	more: Vec<&'static str>,
	waiting: Vec<&'static str>,
}

impl SearchListener for ProgressListener {
	fn contributor_waits(&mut self, contributor: ContributorId) {
		warn!("contributor '{contributor}' is not ready yet");
		self.waiting.push(contributor.id());
	}

	fn contributor_finished(&mut self, contributor: ContributorId, has_more: bool) {
		if has_more {
			self.more.push(contributor.id());
		}
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::PathBuf;

	use everywhere::{FileScope, SessionOptions};
	use pretty_assertions::assert_eq;
	use tempfile::{TempDir, tempdir};

	use super::*;

	fn project() -> (TempDir, ResolvedConfig) {
		let dir = tempdir().unwrap();
		fs::create_dir_all(dir.path().join("src")).unwrap();
		fs::write(dir.path().join("src/main.rs"), "").unwrap();
		fs::write(dir.path().join("src/mixer.rs"), "").unwrap();
		let config = ResolvedConfig {
			root: dir.path().canonicalize().unwrap(),
			scope: FileScope::Project,
			options: SessionOptions {
				parallelism: 2,
				..SessionOptions::default()
			},
		};
		(dir, config)
	}

	#[test]
	fn arithmetic_queries_are_answered_by_the_calculator() {
		let (_dir, config) = project();
		let report = SearchWorkflow::from_config(config).run("6*7", None, Some(1)).unwrap();
		let first = report.items.first().expect("calculator result");
		assert_eq!(first.contributor, "calculator");
		assert_eq!(first.text, "42");
		assert_eq!(
			report.selection,
			Some(SelectionReport::Handled { text: "42".into() })
		);
	}

	#[test]
	fn selecting_a_file_opens_it() {
		let (dir, config) = project();
		let report = SearchWorkflow::from_config(config)
			.run("mixer", Some("files"), Some(1))
			.unwrap();
		assert_eq!(report.tab, "files");
		assert!(report.items.iter().all(|item| item.contributor == "files"));
		let expected: PathBuf = dir.path().canonicalize().unwrap().join("src/mixer.rs");
		assert_eq!(
			report.selection,
			Some(SelectionReport::Opened {
				target: expected.display().to_string()
			})
		);
	}

	#[test]
	fn out_of_range_selection_is_an_error() {
		let (_dir, config) = project();
		assert!(SearchWorkflow::from_config(config.clone()).run("mixer", None, Some(0)).is_err());
		assert!(SearchWorkflow::from_config(config).run("mixer", None, Some(99)).is_err());
	}

	#[test]
	fn unknown_tabs_are_rejected() {
		let (_dir, config) = project();
		assert!(SearchWorkflow::from_config(config).run("x", Some("nope"), None).is_err());
	}
}
