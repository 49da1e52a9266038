use clap::{CommandFactory, FromArgMatches, Parser};

use super::{CliArgs, OutputFormat, ScopeArg};

#[test]
fn command_is_well_formed() {
	CliArgs::command().debug_assert();
}

#[test]
fn parse_cli_accepts_default_arguments() {
	let command = CliArgs::command();
	let mut matches = command.get_matches_from(vec!["everywhere"]);
	let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert_eq!(parsed.query, None);
	assert_eq!(parsed.verbose, 0);
}

#[test]
fn flags_are_parsed() {
	let parsed = CliArgs::parse_from([
		"everywhere",
		"main",
		"--tab",
		"files",
		"--scope",
		"everywhere",
		"--select",
		"2",
		"-o",
		"json",
		"-vv",
	]);
	assert_eq!(parsed.query.as_deref(), Some("main"));
	assert_eq!(parsed.tab.as_deref(), Some("files"));
	assert_eq!(parsed.scope, Some(ScopeArg::Everywhere));
	assert_eq!(parsed.select, Some(2));
	assert_eq!(parsed.output, OutputFormat::Json);
	assert_eq!(parsed.verbose, 2);
}
