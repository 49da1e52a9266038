use std::time::Duration;

use clap::Parser;
use everywhere::FileScope;
use everywhere::search::HistoryOrder;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use super::RawConfig;
use crate::cli::CliArgs;

fn raw_from_toml(text: &str) -> RawConfig {
	config::Config::builder()
		.add_source(config::File::from_str(text, config::FileFormat::Toml))
		.build()
		.unwrap()
		.try_deserialize()
		.unwrap()
}

#[test]
fn cli_overrides_take_precedence() {
	let dir = tempdir().unwrap();
	let root = dir.path().to_str().unwrap();
	let cli = CliArgs::parse_from([
		"everywhere",
		"--root",
		root,
		"--threads",
		"3",
		"--limit",
		"7",
		"--scope",
		"everywhere",
	]);

	let mut config = raw_from_toml(
		r#"
		[search]
		parallelism = 12
		max_results_per_contributor = 40

		[files]
		scope = "project"
		"#,
	);
	config.apply_cli_overrides(&cli);
	let resolved = config.resolve(&cli).unwrap();

	assert_eq!(resolved.root, dir.path().canonicalize().unwrap());
	assert_eq!(resolved.scope, FileScope::Everywhere);
	assert_eq!(resolved.options.parallelism, 3);
	assert_eq!(resolved.options.max_results_per_contributor, 7);
	assert_eq!(resolved.options.max_results_single_tab, 7);
}

#[test]
fn file_values_fill_the_options() {
	let dir = tempdir().unwrap();
	let cli = CliArgs::parse_from(["everywhere", "--root", dir.path().to_str().unwrap()]);

	let config = raw_from_toml(
		r#"
		[search]
		max_results_single_tab = 50
		history_order = "append"

		[slow]
		warning_threshold_ms = 250
		empty_result_threshold_ms = 20
		"#,
	);
	let resolved = config.resolve(&cli).unwrap();

	assert_eq!(resolved.options.max_results_per_contributor, 15);
	assert_eq!(resolved.options.max_results_single_tab, 50);
	assert_eq!(resolved.options.history_order, HistoryOrder::Append);
	assert_eq!(resolved.options.slow.warning, Duration::from_millis(250));
	assert_eq!(resolved.options.slow.empty_result, Duration::from_millis(20));
}

#[test]
fn invalid_values_name_their_key() {
	let dir = tempdir().unwrap();
	let cli = CliArgs::parse_from(["everywhere", "--root", dir.path().to_str().unwrap()]);

	let config = raw_from_toml("[files]\nscope = \"galaxy\"\n");
	let message = config.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("files.scope"));
	assert!(message.contains("configuration key"));

	let config = raw_from_toml("[search]\nhistory_order = \"sideways\"\n");
	let message = config.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("search.history_order"));

	let cli = CliArgs::parse_from([
		"everywhere",
		"--root",
		dir.path().to_str().unwrap(),
		"--threads",
		"0",
	]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);
	let message = config.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("search.parallelism"));
	assert!(message.contains("--threads"));
}

#[test]
fn missing_root_is_rejected() {
	let dir = tempdir().unwrap();
	let missing = dir.path().join("missing");
	let cli = CliArgs::parse_from(["everywhere", "--root", missing.to_str().unwrap()]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);
	assert!(config.resolve(&cli).is_err());
}
