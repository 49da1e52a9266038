use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` table as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) parallelism: Option<usize>,
	pub(super) max_results_per_contributor: Option<usize>,
	pub(super) max_results_single_tab: Option<usize>,
	pub(super) history_order: Option<String>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(threads) = cli.threads {
			self.parallelism = Some(threads);
		}
		if let Some(limit) = cli.limit {
			self.max_results_per_contributor = Some(limit);
			self.max_results_single_tab = Some(limit);
		}
	}
}

/// `[slow]` table as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SlowSection {
	pub(super) warning_threshold_ms: Option<u64>,
	pub(super) empty_result_threshold_ms: Option<u64>,
}
