use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use everywhere_contributor_api::{
	Contributor, ContributorDescriptor, ContributorError, ContributorFactory, ElementRef,
	FoundItem, ResultSink, SelectionModifiers, SessionContext,
};
use log::debug;

use crate::element::FileElement;
use crate::matcher::rank_matches;
use crate::walk::{FileScope, walk_files};

pub static FILES: ContributorDescriptor =
	ContributorDescriptor::new("files", "Files", 200).essential();

/// Creates [`FilesContributor`] instances for the session root.
///
/// The scope selected for the files contributor in the session context wins
/// over the factory default.
#[derive(Debug, Clone)]
pub struct FilesFactory {
	root: Option<PathBuf>,
	scope: FileScope,
	threads: usize,
}

impl Default for FilesFactory {
	fn default() -> Self {
		Self {
			root: None,
			scope: FileScope::Project,
			threads: 1,
		}
	}
}

impl FilesFactory {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Walk `root` instead of the session root.
	#[must_use]
	pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.root = Some(root.into());
		self
	}

	#[must_use]
	pub fn with_scope(mut self, scope: FileScope) -> Self {
		self.scope = scope;
		self
	}

	#[must_use]
	pub fn with_threads(mut self, threads: usize) -> Self {
		self.threads = threads.max(1);
		self
	}
}

impl ContributorFactory for FilesFactory {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&FILES
	}

	fn create(
		&self,
		context: &Arc<SessionContext>,
	) -> Result<Arc<dyn Contributor>, ContributorError> {
		let scope = match context.selected_scope(self.id()) {
			Some(name) => name
				.parse::<FileScope>()
				.map_err(|err| ContributorError::unavailable(FILES.id, err.to_string()))?,
			None => self.scope,
		};
		let root = self
			.root
			.clone()
			.unwrap_or_else(|| context.root().to_path_buf());
		Ok(Arc::new(FilesContributor::new(root, scope, self.threads)))
	}
}

/// Fuzzy matches file paths below a root.
///
/// The tree is walked on the first fetch and reused for later searches of the
/// same session.
pub struct FilesContributor {
	root: PathBuf,
	scope: FileScope,
	threads: usize,
	files: OnceLock<Vec<ElementRef>>,
}

impl FilesContributor {
	#[must_use]
	pub fn new(root: PathBuf, scope: FileScope, threads: usize) -> Self {
		Self {
			root,
			scope,
			threads,
			files: OnceLock::new(),
		}
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	#[must_use]
	pub fn scope(&self) -> FileScope {
		self.scope
	}

	fn files(&self) -> Result<&[ElementRef], ContributorError> {
		if let Some(files) = self.files.get() {
			return Ok(files);
		}
		let walked = walk_files(&self.root, self.scope, self.threads)
			.map_err(|err| ContributorError::fetch(FILES.id, err.to_string()))?;
		debug!(
			"indexed {} files below {} ({} scope)",
			walked.len(),
			self.root.display(),
			self.scope
		);
		let elements = walked
			.iter()
			.map(|relative| Arc::new(FileElement::new(&self.root, relative)) as ElementRef)
			.collect();
		Ok(self.files.get_or_init(|| elements))
	}
}

impl Contributor for FilesContributor {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&FILES
	}

	fn fetch(&self, pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError> {
		let files = self.files()?;
		let texts: Vec<&str> = files.iter().map(|file| file.text()).collect();
		let token = sink.token();
		let Some(ranked) = rank_matches(pattern, &texts, || token.is_cancelled()) else {
			return Ok(());
		};
		for (index, score) in ranked {
			if !sink.push(Arc::clone(&files[index]), i32::from(score)) {
				break;
			}
		}
		Ok(())
	}

	fn process_selected_item(
		&self,
		_item: &FoundItem,
		_modifiers: SelectionModifiers,
		_search_text: &str,
	) -> bool {
		false
	}

	fn needs_model_lock(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use everywhere_contributor_api::CancellationToken;
	use tempfile::{TempDir, tempdir};

	use super::*;

	fn project() -> TempDir {
		let dir = tempdir().unwrap();
		fs::create_dir_all(dir.path().join("src/search")).unwrap();
		fs::write(dir.path().join("src/search/mixer.rs"), "").unwrap();
		fs::write(dir.path().join("src/lib.rs"), "").unwrap();
		fs::write(dir.path().join("README.md"), "").unwrap();
		dir
	}

	fn fetch(contributor: &dyn Contributor, pattern: &str, limit: usize) -> (Vec<FoundItem>, bool) {
		let token = CancellationToken::new();
		let mut found = Vec::new();
		let mut consumer = |item: FoundItem| {
			found.push(item);
			true
		};
		let mut sink = ResultSink::new(contributor.id(), &token, &mut consumer).with_limit(limit);
		contributor.fetch(pattern, &mut sink).unwrap();
		let has_more = sink.has_more();
		drop(sink);
		(found, has_more)
	}

	#[test]
	fn matching_files_navigate_to_their_path() {
		let dir = project();
		let contributor = FilesContributor::new(dir.path().to_path_buf(), FileScope::Project, 1);

		let (found, _) = fetch(&contributor, "mixer", 10);
		let first = found.first().expect("mixer.rs should match");
		assert_eq!(first.text(), "src/search/mixer.rs");
		let request = first.element().navigation_request().unwrap();
		assert_eq!(request.path, dir.path().join("src/search/mixer.rs"));
		assert!(first.element().is_valid());
	}

	#[test]
	fn blank_pattern_lists_nothing() {
		let dir = project();
		let contributor = FilesContributor::new(dir.path().to_path_buf(), FileScope::Project, 1);
		let (found, has_more) = fetch(&contributor, "", 10);
		assert!(found.is_empty());
		assert!(!has_more);
	}

	#[test]
	fn limit_cuts_the_stream() {
		let dir = project();
		for index in 0..5 {
			fs::write(dir.path().join(format!("note{index}.txt")), "").unwrap();
		}
		let contributor = FilesContributor::new(dir.path().to_path_buf(), FileScope::Project, 1);
		let (found, has_more) = fetch(&contributor, "note", 2);
		assert_eq!(found.len(), 2);
		assert!(has_more);
	}

	#[test]
	fn deleted_files_become_invalid() {
		let dir = project();
		let contributor = FilesContributor::new(dir.path().to_path_buf(), FileScope::Project, 1);
		let (found, _) = fetch(&contributor, "readme", 10);
		let readme = found
			.iter()
			.find(|item| item.text() == "README.md")
			.expect("README.md should match");
		fs::remove_file(dir.path().join("README.md")).unwrap();
		assert!(!readme.element().is_valid());
	}

	#[test]
	fn factory_follows_the_selected_scope() {
		let dir = project();
		let context = Arc::new(SessionContext::new("demo", dir.path()));
		let factory = FilesFactory::new();

		let contributor = factory.create(&context).unwrap();
		assert!(contributor.needs_model_lock());

		context.select_scope(factory.id(), "nowhere");
		assert!(matches!(
			factory.create(&context),
			Err(ContributorError::Unavailable { id: "files", .. })
		));
	}

	#[test]
	fn missing_root_fails_the_fetch() {
		let dir = tempdir().unwrap();
		let contributor = FilesContributor::new(dir.path().join("gone"), FileScope::Project, 1);
		let token = CancellationToken::new();
		let mut consumer = |_item: FoundItem| true;
		let mut sink = ResultSink::new(contributor.id(), &token, &mut consumer);
		assert!(matches!(
			contributor.fetch("x", &mut sink),
			Err(ContributorError::Fetch { id: "files", .. })
		));
	}
}
