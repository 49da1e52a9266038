use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, mpsc};

use ignore::{DirEntry, Error as IgnoreError, WalkBuilder, WalkState};
use log::debug;

/// Which files the contributor lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileScope {
	/// Files of the project, honouring `.gitignore` and `.ignore` files.
	#[default]
	Project,
	/// Every file below the root.
	Everywhere,
}

impl FileScope {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Project => "project",
			Self::Everywhere => "everywhere",
		}
	}
}

impl fmt::Display for FileScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a scope name is neither `project` nor `everywhere`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScope(pub String);

impl fmt::Display for UnknownScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown file scope '{}' (expected 'project' or 'everywhere')", self.0)
	}
}

impl std::error::Error for UnknownScope {}

impl FromStr for FileScope {
	type Err = UnknownScope;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"project" => Ok(Self::Project),
			"everywhere" | "all" => Ok(Self::Everywhere),
			_ => Err(UnknownScope(value.to_string())),
		}
	}
}

/// Collect the files below `root`, relative to it and sorted.
///
/// Entries that cannot be read are logged and skipped. A root that is not a
/// directory is an error.
pub fn walk_files(root: &Path, scope: FileScope, threads: usize) -> io::Result<Vec<PathBuf>> {
	if !root.is_dir() {
		return Err(io::Error::new(
			io::ErrorKind::NotFound,
			format!("{} is not a directory", root.display()),
		));
	}

	let respect_ignores = scope == FileScope::Project;
	let walker_root = Arc::new(root.to_path_buf());
	let (tx, rx) = mpsc::channel();

	let walker = WalkBuilder::new(walker_root.as_path())
		.hidden(false)
		.git_ignore(respect_ignores)
		.git_global(respect_ignores)
		.git_exclude(respect_ignores)
		.ignore(respect_ignores)
		.parents(respect_ignores)
		.require_git(false)
		.filter_entry(|entry| entry.file_name() != ".git")
		.threads(threads.max(1))
		.build_parallel();

	walker.run(|| {
		let sender = tx.clone();
		let root = Arc::clone(&walker_root);
		Box::new(move |entry: Result<DirEntry, IgnoreError>| {
			match entry {
				Ok(entry) => {
					if !entry.file_type().is_some_and(|kind| kind.is_file()) {
						return WalkState::Continue;
					}
					let path = entry.path();
					let relative = path.strip_prefix(root.as_path()).unwrap_or(path);
					if sender.send(relative.to_path_buf()).is_err() {
						return WalkState::Quit;
					}
				}
				Err(err) => debug!("skipping unreadable entry: {err}"),
			}
			WalkState::Continue
		})
	});
	drop(tx);

	let mut files: Vec<PathBuf> = rx.into_iter().collect();
	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	use super::*;

	fn names(files: &[PathBuf]) -> Vec<String> {
		files
			.iter()
			.map(|path| path.to_string_lossy().replace('\\', "/"))
			.collect()
	}

	#[test]
	fn project_scope_honours_ignore_files() {
		let dir = tempdir().unwrap();
		fs::create_dir_all(dir.path().join("src")).unwrap();
		fs::create_dir_all(dir.path().join("target")).unwrap();
		fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
		fs::write(dir.path().join("src/main.rs"), "").unwrap();
		fs::write(dir.path().join("target/out.bin"), "").unwrap();

		let project = walk_files(dir.path(), FileScope::Project, 2).unwrap();
		assert_eq!(names(&project), vec![".gitignore", "src/main.rs"]);

		let everywhere = walk_files(dir.path(), FileScope::Everywhere, 2).unwrap();
		assert_eq!(
			names(&everywhere),
			vec![".gitignore", "src/main.rs", "target/out.bin"]
		);
	}

	#[test]
	fn missing_root_is_an_error() {
		let dir = tempdir().unwrap();
		let missing = dir.path().join("nope");
		assert!(walk_files(&missing, FileScope::Project, 1).is_err());
	}

	#[test]
	fn scopes_parse_from_names() {
		assert_eq!("Project".parse::<FileScope>(), Ok(FileScope::Project));
		assert_eq!("everywhere".parse::<FileScope>(), Ok(FileScope::Everywhere));
		assert!("galaxy".parse::<FileScope>().is_err());
	}
}
