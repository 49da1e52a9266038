use std::fmt::Write;

use super::ResolvedConfig;

pub(super) fn render_summary(config: &ResolvedConfig) -> String {
	let options = &config.options;
	let mut out = String::from("Effective configuration:\n");
	let _ = writeln!(out, "  Root: {}", config.root.display());
	let _ = writeln!(out, "  File scope: {}", config.scope);
	let _ = writeln!(out, "  Parallelism: {}", options.parallelism);
	let _ = writeln!(
		out,
		"  Results per contributor: {} (single tab: {})",
		options.max_results_per_contributor, options.max_results_single_tab
	);
	let _ = writeln!(out, "  History order: {}", options.history_order.as_str());
	let _ = writeln!(
		out,
		"  Slow contributor warning: {} ms",
		options.slow.warning.as_millis()
	);
	let _ = writeln!(
		out,
		"  Quick empty result: {} ms",
		options.slow.empty_result.as_millis()
	);
	out
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use everywhere::{FileScope, SessionOptions};

	use super::*;

	#[test]
	fn summary_lists_every_setting() {
		let config = ResolvedConfig {
			root: PathBuf::from("/tmp"),
			scope: FileScope::Everywhere,
			options: SessionOptions {
				parallelism: 3,
				..SessionOptions::default()
			},
		};

		let summary = render_summary(&config);
		assert!(summary.contains("File scope: everywhere"));
		assert!(summary.contains("Parallelism: 3"));
		assert!(summary.contains("Results per contributor: 15 (single tab: 30)"));
		assert!(summary.contains("History order: prepend"));
		assert!(summary.contains("Slow contributor warning: 1000 ms"));
	}
}
