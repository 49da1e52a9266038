use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects, Style};
use everywhere::app_dirs;

const HEADING: Style = AnsiColor::Blue.on_default().effects(Effects::BOLD);

/// Version banner followed by where configuration is read from.
pub(super) fn long_version() -> &'static str {
	let describe = |path: anyhow::Result<std::path::PathBuf>| match path {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let lines = [
		format!("everywhere {}", env!("CARGO_PKG_VERSION")),
		format!("config file: {}", describe(app_dirs::config_file())),
		format!("data directory: {}", describe(app_dirs::get_data_dir())),
		format!(
			"overrides: {}, {}, EVERYWHERE__<SECTION>__<KEY>",
			app_dirs::CONFIG_DIR_ENV,
			app_dirs::DATA_DIR_ENV
		),
	];

	Box::leak(lines.join("\n").into_boxed_str())
}

/// Colours for help output.
pub(super) fn cli_styles() -> Styles {
	Styles::styled()
		.header(HEADING)
		.usage(HEADING)
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Magenta.on_default())
		.invalid(AnsiColor::Red.on_default().effects(Effects::BOLD))
}
