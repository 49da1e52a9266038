use std::mem;
use std::time::Duration;

use everywhere_contributor_api::{ContributorId, FoundElementInfo, SearchListener};
use indexmap::IndexMap;
use log::{debug, warn};

/// Absolute limits used by [`SlowContributorDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowContributorThresholds {
	/// Essential contributors slower than this may be reported.
	pub warning: Duration,
	/// Contributors that found nothing faster than this are left out of the statistics.
	pub empty_result: Duration,
}

impl Default for SlowContributorThresholds {
	fn default() -> Self {
		Self {
			warning: Duration::from_millis(1000),
			empty_result: Duration::from_millis(100),
		}
	}
}

/// Time a contributor needed to reach its terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorTiming {
	pub contributor: ContributorId,
	pub delay: Duration,
	/// Element events (added or removed) seen for the contributor.
	pub events: usize,
	pub essential: bool,
}

/// Result of one slow contributor analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlowContributorReport {
	/// Mean plus one standard deviation. The only edge that triggers warnings.
	pub edge: Option<Duration>,
	/// Mean plus two standard deviations, logged for comparison.
	pub two_sigma_edge: Option<Duration>,
	/// Tukey fence `Q3 + 1.5 * IQR`, logged for comparison.
	pub tukey_fence: Option<Duration>,
	pub slow: Vec<ContributorId>,
}

/// Flag essential contributors that are both statistical outliers and slow in
/// absolute terms.
#[must_use]
pub fn detect(timings: &[ContributorTiming], thresholds: &SlowContributorThresholds) -> SlowContributorReport {
	let mut delays: Vec<f64> = timings
		.iter()
		.filter(|timing| !(timing.events == 0 && timing.delay < thresholds.empty_result))
		.map(|timing| millis(timing.delay))
		.collect();
	if delays.is_empty() {
		return SlowContributorReport::default();
	}

	let count = delays.len() as f64;
	let mean = delays.iter().sum::<f64>() / count;
	let variance = delays.iter().map(|delay| (delay - mean).powi(2)).sum::<f64>() / count;
	let sigma = variance.sqrt();
	let edge = mean + sigma;

	delays.sort_by(f64::total_cmp);
	let q1 = percentile(&delays, 25.0);
	let q3 = percentile(&delays, 75.0);

	let slow = timings
		.iter()
		.filter(|timing| {
			timing.essential && millis(timing.delay) > edge && timing.delay > thresholds.warning
		})
		.map(|timing| timing.contributor)
		.collect();

	SlowContributorReport {
		edge: Some(duration(edge)),
		two_sigma_edge: Some(duration(mean + 2.0 * sigma)),
		tukey_fence: Some(duration(q3 + 1.5 * (q3 - q1))),
		slow,
	}
}

/// Linear interpolation between the closest ranks of sorted `values`.
fn percentile(values: &[f64], percent: f64) -> f64 {
	match values {
		[] => 0.0,
		[single] => *single,
		_ => {
			let rank = percent / 100.0 * (values.len() - 1) as f64;
			let lower = rank.floor() as usize;
			let upper = rank.ceil() as usize;
			values[lower] + (values[upper] - values[lower]) * (rank - lower as f64)
		}
	}
}

fn millis(delay: Duration) -> f64 {
	delay.as_secs_f64() * 1000.0
}

fn duration(millis: f64) -> Duration {
	Duration::from_secs_f64(millis.max(0.0) / 1000.0)
}

/// Listener collecting how long each contributor took to finish.
///
/// Delays arrive with `contributor_timed` and were measured on the fetch
/// thread when the contributor reached its terminal state, so they do not
/// depend on how often the consumer flushes. The analysis happens on
/// `search_finished`.
#[derive(Debug, Default)]
pub struct SlowContributorDetector {
	thresholds: SlowContributorThresholds,
	active: bool,
	pattern: String,
	events: IndexMap<ContributorId, usize>,
	timings: IndexMap<ContributorId, ContributorTiming>,
	report: Option<SlowContributorReport>,
}

impl SlowContributorDetector {
	#[must_use]
	pub fn new(thresholds: SlowContributorThresholds) -> Self {
		Self {
			thresholds,
			..Self::default()
		}
	}

	#[must_use]
	pub fn thresholds(&self) -> &SlowContributorThresholds {
		&self.thresholds
	}

	/// Timings recorded for the current search.
	#[must_use]
	pub fn timings(&self) -> Vec<ContributorTiming> {
		self.timings.values().cloned().collect()
	}

	/// Analysis of the last finished search.
	#[must_use]
	pub fn report(&self) -> Option<&SlowContributorReport> {
		self.report.as_ref()
	}

	fn count(&mut self, list: &[FoundElementInfo]) {
		for info in list {
			*self.events.entry(info.contributor()).or_default() += 1;
			if let Some(timing) = self.timings.get_mut(&info.contributor()) {
				timing.events += 1;
			}
		}
	}

	fn record(&mut self, contributor: ContributorId, delay: Duration) {
		if !self.active {
			return;
		}
		let timing = ContributorTiming {
			contributor,
			delay,
			events: self.events.get(&contributor).copied().unwrap_or(0),
			essential: contributor.descriptor().essential,
		};
		self.timings.insert(contributor, timing);
	}
}

impl SearchListener for SlowContributorDetector {
	fn search_started(&mut self, pattern: &str, _contributors: &[ContributorId]) {
		self.active = true;
		self.pattern = pattern.to_string();
		self.events.clear();
		self.timings.clear();
	}

	fn elements_added(&mut self, list: &[FoundElementInfo]) {
		self.count(list);
	}

	fn elements_removed(&mut self, list: &[FoundElementInfo]) {
		self.count(list);
	}

	fn contributor_timed(&mut self, contributor: ContributorId, delay: Duration) {
		self.record(contributor, delay);
	}

	fn search_finished(&mut self, _has_more_contributors: bool) {
		if !mem::take(&mut self.active) {
			return;
		}
		let timings = self.timings();
		let report = detect(&timings, &self.thresholds);
		debug!(
			"contributor delays for '{}': edge {:?}, two sigma {:?}, tukey {:?}",
			self.pattern, report.edge, report.two_sigma_edge, report.tukey_fence
		);
		for contributor in &report.slow {
			if let Some(timing) = self.timings.get(contributor) {
				warn!(
					"contributor '{contributor}' is slow: {:?} for '{}'",
					timing.delay, self.pattern
				);
			}
		}
		self.report = Some(report);
	}
}
