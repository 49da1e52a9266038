use thiserror::Error;

use super::SettingSource;

/// A setting whose value cannot be used, with where the value came from.
#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct ConfigError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl ConfigError {
	pub(crate) fn invalid(
		key: &'static str,
		value: impl Into<String>,
		origin: SettingSource,
		reason: impl Into<String>,
	) -> Self {
		Self {
			key,
			value: value.into(),
			origin,
			reason: reason.into(),
		}
	}

	/// `value` is not one of the names `key` accepts.
	pub(crate) fn unrecognized(
		key: &'static str,
		value: impl Into<String>,
		origin: SettingSource,
		accepted: &[&str],
	) -> Self {
		let quoted: Vec<String> = accepted.iter().map(|name| format!("'{name}'")).collect();
		Self::invalid(key, value, origin, format!("expected one of {}", quoted.join(", ")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unrecognized_values_list_the_choices() {
		let err = ConfigError::unrecognized(
			"files.scope",
			"galaxy",
			SettingSource::ConfigKey("files.scope"),
			&["project", "everywhere"],
		);
		assert_eq!(
			err.to_string(),
			"invalid value for files.scope from configuration key `files.scope`: \
			 expected one of 'project', 'everywhere' (value: galaxy)"
		);
	}
}
