use anyhow::{Context, Result};
use log::debug;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Resolve the effective configuration: defaults, then config files, then
/// `EVERYWHERE__*` variables, then CLI flags.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let mut raw: RawConfig = build_config(cli)?
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	raw.apply_cli_overrides(cli);
	let resolved = raw.resolve(cli)?;
	debug!("resolved configuration: {resolved:?}");
	Ok(resolved)
}
