use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
	let options = &config.options;
	let positive = [
		("search.parallelism", options.parallelism),
		(
			"search.max_results_per_contributor",
			options.max_results_per_contributor,
		),
		("search.max_results_single_tab", options.max_results_single_tab),
	];
	for (key, value) in positive {
		if value == 0 {
			return Err(ConfigError::invalid(
				key,
				value.to_string(),
				sources.source_for(key),
				"must be greater than zero",
			));
		}
	}

	if options.slow.warning.is_zero() {
		let key = "slow.warning_threshold_ms";
		return Err(ConfigError::invalid(
			key,
			"0",
			sources.source_for(key),
			"must be greater than zero",
		));
	}

	Ok(())
}
