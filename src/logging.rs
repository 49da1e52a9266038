//! Process-wide logger setup for the binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable consulted for log filters, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "EVERYWHERE_LOG";
pub const LOG_STYLE_ENV: &str = "EVERYWHERE_LOG_STYLE";

/// Map the number of `-v` flags to the default level.
#[must_use]
pub fn level_for(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the logger. Filters in `EVERYWHERE_LOG` win over the level chosen
/// by `verbosity`. Calling this twice keeps the first logger.
pub fn initialize(verbosity: u8) {
	let env = Env::new().filter(LOG_ENV).write_style(LOG_STYLE_ENV);
	let mut builder = Builder::new();
	builder.filter_level(level_for(verbosity));
	builder.parse_env(env);
	builder.format_timestamp_millis();
	if builder.try_init().is_err() {
		log::debug!("logger already initialized");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_raises_the_level() {
		assert_eq!(level_for(0), LevelFilter::Warn);
		assert_eq!(level_for(2), LevelFilter::Debug);
		assert_eq!(level_for(9), LevelFilter::Trace);
	}

	#[test]
	fn initializing_twice_is_harmless() {
		initialize(0);
		initialize(3);
	}
}
