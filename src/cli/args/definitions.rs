use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{OutputFormat, ScopeArg};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `everywhere` binary.
#[derive(Parser, Debug)]
#[command(
	name = "everywhere",
	version,
	long_version = long_version(),
	about = "Search files, arithmetic and recent queries at once",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(value_name = "QUERY", help = "Text to search for (default: empty)")]
	pub(crate) query: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "EVERYWHERE_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Directory searched by the files contributor (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 't',
		long,
		value_name = "TAB",
		help = "Search a single tab such as `files` (default: all contributors)"
	)]
	pub(crate) tab: Option<String>,
	#[arg(
		short = 'l',
		long,
		value_name = "NUM",
		help = "Maximum results per contributor (default: 15, or 30 for a single tab)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		short = 'j',
		long,
		value_name = "NUM",
		help = "Contributors fetched at the same time (default: automatic)"
	)]
	pub(crate) threads: Option<usize>,
	#[arg(
		short = 's',
		long,
		value_enum,
		help = "Which files are listed (default: project)"
	)]
	pub(crate) scope: Option<ScopeArg>,
	#[arg(
		long,
		value_name = "N",
		help = "Select the N-th result, counting from 1 (default: none)"
	)]
	pub(crate) select: Option<usize>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the results"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Log more; repeat for debug and trace output"
	)]
	pub(crate) verbose: u8,
}
