use std::env;
use std::time::Duration;

use anyhow::{Error, Result};
use everywhere::search::HistoryOrder;
use everywhere::{FileScope, SessionOptions};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};
use super::sources::env_var_for;

mod files;
mod search;

use files::FilesSection;
use search::{SearchSection, SlowSection};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	slow: SlowSection,
	files: FilesSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.files.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = self.sources(cli);
		let defaults = SessionOptions::default();

		let history_order = match self.search.history_order.as_deref() {
			None => defaults.history_order,
			Some(value) => parse_history_order(value).ok_or_else(|| {
				ConfigError::unrecognized(
					"search.history_order",
					value,
					sources.source_for("search.history_order"),
					&["append", "prepend"],
				)
			})?,
		};
		let scope = match self.files.scope.as_deref() {
			None => FileScope::default(),
			Some(value) => value.parse::<FileScope>().map_err(|_| {
				ConfigError::unrecognized(
					"files.scope",
					value,
					sources.source_for("files.scope"),
					&["project", "everywhere"],
				)
			})?,
		};

		let mut slow = defaults.slow;
		if let Some(ms) = self.slow.warning_threshold_ms {
			slow.warning = Duration::from_millis(ms);
		}
		if let Some(ms) = self.slow.empty_result_threshold_ms {
			slow.empty_result = Duration::from_millis(ms);
		}

		let options = SessionOptions {
			parallelism: self.search.parallelism.unwrap_or(defaults.parallelism),
			max_results_per_contributor: self
				.search
				.max_results_per_contributor
				.unwrap_or(defaults.max_results_per_contributor),
			max_results_single_tab: self
				.search
				.max_results_single_tab
				.unwrap_or(defaults.max_results_single_tab),
			history_order,
			slow,
		};

		let config = ResolvedConfig {
			root: self.files.resolve_root()?,
			scope,
			options,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}

	fn sources(&self, cli: &CliArgs) -> ConfigSources {
		let search = &self.search;
		let mut sources = ConfigSources::default();
		sources.record(
			"search.parallelism",
			detect_source(
				cli.threads.is_some(),
				search.parallelism.is_some(),
				"--threads",
				"search.parallelism",
			),
		);
		sources.record(
			"search.max_results_per_contributor",
			detect_source(
				cli.limit.is_some(),
				search.max_results_per_contributor.is_some(),
				"--limit",
				"search.max_results_per_contributor",
			),
		);
		sources.record(
			"search.max_results_single_tab",
			detect_source(
				cli.limit.is_some(),
				search.max_results_single_tab.is_some(),
				"--limit",
				"search.max_results_single_tab",
			),
		);
		sources.record(
			"search.history_order",
			detect_source(false, search.history_order.is_some(), "", "search.history_order"),
		);
		sources.record(
			"slow.warning_threshold_ms",
			detect_source(
				false,
				self.slow.warning_threshold_ms.is_some(),
				"",
				"slow.warning_threshold_ms",
			),
		);
		sources.record(
			"files.scope",
			detect_source(
				cli.scope.is_some(),
				self.files.scope.is_some(),
				"--scope",
				"files.scope",
			),
		);
		sources
	}
}

fn parse_history_order(value: &str) -> Option<HistoryOrder> {
	match value.trim().to_ascii_lowercase().as_str() {
		"append" => Some(HistoryOrder::Append),
		"prepend" => Some(HistoryOrder::Prepend),
		_ => None,
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	let env_var = env_var_for(key);
	if env::var_os(&env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
