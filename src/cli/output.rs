use anyhow::Result;
use serde_json::{Value, json};

use crate::workflow::{SearchReport, SelectionReport};

/// Render results grouped by contributor, in presentation order.
pub(crate) fn format_plain(report: &SearchReport) -> String {
	let mut lines = Vec::new();
	if report.items.is_empty() {
		lines.push(format!("No results for '{}'", report.query));
	}

	let mut current_group = None;
	for item in &report.items {
		if current_group != Some(item.group) {
			current_group = Some(item.group);
			let marker = if report.more.contains(&item.contributor) {
				" (more available)"
			} else {
				""
			};
			lines.push(format!("{}{marker}:", item.group));
		}
		match &item.target {
			Some(target) if target != &item.text => {
				lines.push(format!("  {}  [{}]  {target}", item.text, item.weight));
			}
			_ => lines.push(format!("  {}  [{}]", item.text, item.weight)),
		}
	}

	for contributor in &report.waiting {
		lines.push(format!("{contributor}: not ready"));
	}
	for contributor in &report.slow {
		lines.push(format!("{contributor}: slow"));
	}

	match &report.selection {
		Some(SelectionReport::Handled { text }) => lines.push(format!("Selected {text}")),
		Some(SelectionReport::Opened { target }) => lines.push(format!("Opened {target}")),
		Some(SelectionReport::Aborted { text }) => {
			lines.push(format!("'{text}' is gone; nothing opened"));
		}
		Some(SelectionReport::Failed { reason }) => lines.push(format!("Navigation failed: {reason}")),
		None => {}
	}

	lines.join("\n")
}

/// Print a plain-text representation of the search report.
pub(crate) fn print_plain(report: &SearchReport) {
	println!("{}", format_plain(report));
}

/// Format the search report as a JSON string.
pub(crate) fn format_report_json(report: &SearchReport) -> Result<String> {
	let items: Vec<Value> = report
		.items
		.iter()
		.map(|item| {
			json!({
				"contributor": item.contributor,
				"group": item.group,
				"text": item.text,
				"weight": item.weight,
				"target": item.target,
			})
		})
		.collect();

	let selection = match &report.selection {
		Some(SelectionReport::Handled { text }) => json!({ "type": "handled", "text": text }),
		Some(SelectionReport::Opened { target }) => json!({ "type": "opened", "target": target }),
		Some(SelectionReport::Aborted { text }) => json!({ "type": "aborted", "text": text }),
		Some(SelectionReport::Failed { reason }) => json!({ "type": "failed", "reason": reason }),
		None => Value::Null,
	};

	let payload = json!({
		"query": report.query,
		"tab": report.tab,
		"results": items,
		"more": report.more,
		"waiting": report.waiting,
		"slow": report.slow,
		"selection": selection,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search report.
pub(crate) fn print_json(report: &SearchReport) -> Result<()> {
	println!("{}", format_report_json(report)?);
	Ok(())
}
