use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use everywhere::app_dirs;

use crate::cli::CliArgs;

/// Prefix of environment variables read as configuration keys.
pub(super) const ENV_PREFIX: &str = "EVERYWHERE";
pub(super) const ENV_SEPARATOR: &str = "__";

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		Environment::with_prefix(ENV_PREFIX)
			.separator(ENV_SEPARATOR)
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Discover the default configuration file locations that should be consulted.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(file) = app_dirs::config_file() {
		files.push(file);
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".everywhere.toml"));
	}

	files
}

/// Environment variable that sets configuration key `key`.
pub(super) fn env_var_for(key: &str) -> String {
	let mut name = String::from(ENV_PREFIX);
	for part in key.split('.') {
		name.push_str(ENV_SEPARATOR);
		name.push_str(&part.to_ascii_uppercase());
	}
	name
}
