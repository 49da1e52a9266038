use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[files]` table as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FilesSection {
	pub(super) root: Option<PathBuf>,
	pub(super) scope: Option<String>,
}

impl FilesSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.root = Some(root);
		}
		if let Some(scope) = cli.scope {
			self.scope = Some(scope.as_str().to_string());
		}
	}

	/// Absolute, canonical search root. Defaults to the working directory.
	pub(super) fn resolve_root(&self) -> Result<PathBuf> {
		let mut root = match &self.root {
			Some(path) => path.clone(),
			None => env::current_dir().context("failed to determine working directory")?,
		};
		if root.is_relative() {
			root = env::current_dir()
				.context("failed to resolve current directory for root")?
				.join(root);
		}
		root = fs::canonicalize(&root)
			.with_context(|| format!("failed to canonicalize search root {}", root.display()))?;

		let metadata = fs::metadata(&root)
			.with_context(|| format!("failed to inspect search root {}", root.display()))?;
		ensure!(metadata.is_dir(), "search root must be a directory");
		Ok(root)
	}
}
