use std::fmt;

/// Where the effective value of a setting came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	Default,
	CliFlag(&'static str),
	Environment(String),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Default => f.write_str("built-in default"),
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origins of the settings that were set explicitly.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	entries: Vec<(&'static str, SettingSource)>,
}

impl ConfigSources {
	pub(crate) fn record(&mut self, key: &'static str, source: Option<SettingSource>) {
		if let Some(source) = source {
			self.entries.push((key, source));
		}
	}

	/// Origin of `key`; unset keys report their built-in default.
	pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
		self.entries
			.iter()
			.find(|(candidate, _)| *candidate == key)
			.map_or(SettingSource::Default, |(_, source)| source.clone())
	}
}
