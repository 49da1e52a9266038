use std::path::PathBuf;

use everywhere::{FileScope, SessionOptions};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Everything one search run needs: the project to index, how far the file
/// walk reaches, and the session tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
	/// Canonical project directory.
	pub root: PathBuf,
	pub scope: FileScope,
	pub options: SessionOptions,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Write the effective settings to stdout for `--print-config`.
	pub fn print_summary(&self) {
		print!("{}", summary::render_summary(self));
	}
}
