use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use everywhere_contributor_api::{
	Contributor, ContributorDescriptor, ContributorError, ContributorFactory, ElementRef,
	RecentTargets, ResultSink, SessionContext,
};
use frizbee::Config;

use crate::element::FileElement;
use crate::matcher::{config_for_query, rank_matches_with};

/// Recent files listed per search.
pub const MAX_RECENT_FILES: usize = 10;

/// Keeps recent files above fuzzy file matches when results are ordered by weight.
const RECENT_WEIGHT_BASE: i32 = 100_000;

/// Sorted ahead of [`FILES`](crate::FILES) so that a recent file replaces the
/// plain match for the same path.
pub static RECENT_FILES: ContributorDescriptor =
	ContributorDescriptor::new("recent-files", "Recent Files", 150)
		.hidden_tab()
		.with_max_results(MAX_RECENT_FILES);

#[derive(Debug, Clone, Copy, Default)]
pub struct RecentFilesFactory;

impl ContributorFactory for RecentFilesFactory {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&RECENT_FILES
	}

	fn create(
		&self,
		context: &Arc<SessionContext>,
	) -> Result<Arc<dyn Contributor>, ContributorError> {
		Ok(Arc::new(RecentFilesContributor::new(
			context.root().to_path_buf(),
			context.project_state::<RecentTargets>(),
		)))
	}
}

/// Files of the project the user recently navigated to, newest first.
///
/// A blank pattern lists all of them; otherwise only the ones whose relative
/// path holds every pattern character in order, still in recency order. Files
/// outside the root or no longer on disk are left out.
pub struct RecentFilesContributor {
	root: PathBuf,
	targets: Arc<RecentTargets>,
}

impl RecentFilesContributor {
	#[must_use]
	pub fn new(root: PathBuf, targets: Arc<RecentTargets>) -> Self {
		Self { root, targets }
	}

	fn recent_files(&self) -> Vec<FileElement> {
		let mut seen = HashSet::new();
		self.targets
			.snapshot()
			.into_iter()
			.filter(|target| target.path.is_file())
			.filter_map(|target| {
				let relative = target.path.strip_prefix(&self.root).ok()?.to_path_buf();
				seen.insert(relative.clone()).then(|| FileElement::new(&self.root, &relative))
			})
			.collect()
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl Contributor for RecentFilesContributor {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&RECENT_FILES
	}

	fn fetch(&self, pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError> {
		let mut files = self.recent_files();
		if !pattern.trim().is_empty() {
			let texts: Vec<&str> = files.iter().map(FileElement::relative).collect();
			let token = sink.token();
			let config = Config {
				max_typos: Some(0),
				..config_for_query(pattern.trim(), texts.len())
			};
			let Some(ranked) = rank_matches_with(pattern, &texts, &config, || token.is_cancelled()) else {
				return Ok(());
			};
			let matched: HashSet<usize> = ranked.into_iter().map(|(index, _)| index).collect();
			files = files
				.into_iter()
				.enumerate()
				.filter(|(index, _)| matched.contains(index))
				.map(|(_, file)| file)
				.collect();
		}

		let total = files.len().min(MAX_RECENT_FILES);
		for (rank, file) in files.into_iter().take(MAX_RECENT_FILES).enumerate() {
			let weight = RECENT_WEIGHT_BASE + i32::try_from(total - rank).unwrap_or(0);
			if !sink.push(Arc::new(file) as ElementRef, weight) {
				break;
			}
		}
		Ok(())
	}

	fn supports_empty_pattern(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use everywhere_contributor_api::{CancellationToken, FoundItem, NavigationRequest};
	use tempfile::{TempDir, tempdir};

	use super::*;

	fn project() -> TempDir {
		let dir = tempdir().unwrap();
		fs::create_dir_all(dir.path().join("src")).unwrap();
		for name in ["src/lib.rs", "src/main.rs", "README.md"] {
			fs::write(dir.path().join(name), "").unwrap();
		}
		dir
	}

	fn texts(contributor: &RecentFilesContributor, pattern: &str) -> Vec<(String, i32)> {
		let token = CancellationToken::new();
		let mut found = Vec::new();
		let mut consumer = |item: FoundItem| {
			found.push((item.text().to_string(), item.weight()));
			true
		};
		let mut sink = ResultSink::new(contributor.id(), &token, &mut consumer);
		contributor.fetch(pattern, &mut sink).unwrap();
		drop(sink);
		found
	}

	#[test]
	fn blank_pattern_lists_recent_files_newest_first() {
		let dir = project();
		let context = Arc::new(SessionContext::new("demo", dir.path()));
		let targets = context.project_state::<RecentTargets>();
		targets.record(&NavigationRequest::file(dir.path().join("README.md")));
		targets.record(&NavigationRequest::file(dir.path().join("src/lib.rs")));
		targets.record(&NavigationRequest::file("/elsewhere/outside.rs"));
		targets.record(&NavigationRequest::file(dir.path().join("gone.rs")));

		let contributor = RecentFilesFactory.create(&context).unwrap();
		assert!(contributor.supports_empty_pattern());
		let recent = RecentFilesContributor::new(dir.path().to_path_buf(), targets);
		assert_eq!(
			texts(&recent, ""),
			vec![
				("src/lib.rs".to_string(), RECENT_WEIGHT_BASE + 2),
				("README.md".to_string(), RECENT_WEIGHT_BASE + 1),
			]
		);
	}

	#[test]
	fn patterns_filter_but_keep_recency_order() {
		let dir = project();
		let targets = Arc::new(RecentTargets::default());
		for name in ["src/main.rs", "README.md", "src/lib.rs"] {
			targets.record(&NavigationRequest::file(dir.path().join(name)));
		}
		let recent = RecentFilesContributor::new(dir.path().to_path_buf(), targets);

		let found: Vec<String> = texts(&recent, "src").into_iter().map(|(text, _)| text).collect();
		assert_eq!(found, vec!["src/lib.rs", "src/main.rs"]);
	}

	#[test]
	fn listing_stops_at_the_recent_files_cap() {
		let dir = tempdir().unwrap();
		let targets = Arc::new(RecentTargets::default());
		for index in 0..MAX_RECENT_FILES + 3 {
			let path = dir.path().join(format!("f{index}.txt"));
			fs::write(&path, "").unwrap();
			targets.record(&NavigationRequest::file(path));
		}
		let recent = RecentFilesContributor::new(dir.path().to_path_buf(), targets);
		let found = texts(&recent, "");
		assert_eq!(found.len(), MAX_RECENT_FILES);
		assert_eq!(found[0].0, format!("f{}.txt", MAX_RECENT_FILES + 2));
	}
}
