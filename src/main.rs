mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	everywhere::logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let query = cli.query.clone().unwrap_or_default();
	let report = SearchWorkflow::from_config(resolved).run(&query, cli.tab.as_deref(), cli.select)?;

	match cli.output {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}
