use std::any::Any;
use std::path::{Path, PathBuf};

use everywhere_contributor_api::{Element, NavigationRequest};

/// A file found below the session root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileElement {
	relative: String,
	path: PathBuf,
}

impl FileElement {
	#[must_use]
	pub fn new(root: &Path, relative: &Path) -> Self {
		Self {
			relative: relative.to_string_lossy().replace('\\', "/"),
			path: root.join(relative),
		}
	}

	/// Path relative to the root, with `/` separators.
	#[must_use]
	pub fn relative(&self) -> &str {
		&self.relative
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Element for FileElement {
	fn text(&self) -> &str {
		&self.relative
	}

	fn navigation_request(&self) -> Option<NavigationRequest> {
		Some(NavigationRequest::file(self.path.clone()))
	}

	fn is_valid(&self) -> bool {
		self.path.is_file()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
