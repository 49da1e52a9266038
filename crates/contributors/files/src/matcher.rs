use frizbee::{Config, match_list};

/// Haystacks are matched in chunks of this size so cancellation is noticed
/// between chunks.
pub const MATCH_CHUNK_SIZE: usize = 2048;

/// Datasets at least this large are prefiltered with a typo budget.
pub const PREFILTER_ENABLE_THRESHOLD: usize = 10_000;

/// Builds fuzzy matching options for the provided query and dataset size.
#[must_use]
pub fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let mut config = Config {
		prefilter: false,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
		config.prefilter = true;
		config.max_typos = Some(allowed_typos);
	} else {
		config.max_typos = None;
	}
	config.sort = false;

	config
}

/// Match `query` against `haystacks`, best score first.
///
/// Returns `(index, score)` pairs; equal scores keep haystack order. `None`
/// means `should_stop` asked to abandon the match part way.
pub fn rank_matches<S, F>(query: &str, haystacks: &[S], should_stop: F) -> Option<Vec<(usize, u16)>>
where
	S: AsRef<str>,
	F: FnMut() -> bool,
{
	let config = config_for_query(query.trim(), haystacks.len());
	rank_matches_with(query, haystacks, &config, should_stop)
}

/// [`rank_matches`] with caller supplied matching options.
pub fn rank_matches_with<S, F>(
	query: &str,
	haystacks: &[S],
	config: &Config,
	mut should_stop: F,
) -> Option<Vec<(usize, u16)>>
where
	S: AsRef<str>,
	F: FnMut() -> bool,
{
	let trimmed = query.trim();
	if trimmed.is_empty() {
		return Some(Vec::new());
	}

	let mut ranked = Vec::new();
	let mut chunk = Vec::with_capacity(MATCH_CHUNK_SIZE);
	for (chunk_index, slice) in haystacks.chunks(MATCH_CHUNK_SIZE).enumerate() {
		if should_stop() {
			return None;
		}
		let offset = chunk_index * MATCH_CHUNK_SIZE;
		chunk.clear();
		chunk.extend(slice.iter().map(AsRef::as_ref));
		for entry in match_list(trimmed, &chunk, config) {
			if entry.score == 0 {
				continue;
			}
			ranked.push((offset + entry.index as usize, entry.score));
		}
	}

	ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	Some(ranked)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn enables_prefilter_for_large_datasets() {
		let config = config_for_query("example", PREFILTER_ENABLE_THRESHOLD);
		assert!(config.prefilter);
		assert_eq!(config.max_typos, Some(2));
	}

	#[test]
	fn disables_prefilter_for_small_datasets() {
		let config = config_for_query("example", PREFILTER_ENABLE_THRESHOLD - 1);
		assert!(!config.prefilter);
		assert_eq!(config.max_typos, None);
	}

	#[test]
	fn contiguous_matches_rank_first() {
		let haystacks = ["docs/readme.md", "src/main.rs", "src/mixer/main_loop.rs"];
		let ranked = rank_matches("main.rs", &haystacks, || false).unwrap();
		assert_eq!(ranked.first().map(|(index, _)| *index), Some(1));
	}

	#[test]
	fn blank_queries_match_nothing() {
		let ranked = rank_matches("  ", &["a", "b"], || false).unwrap();
		assert!(ranked.is_empty());
	}

	#[test]
	fn stopping_abandons_the_match() {
		assert_eq!(rank_matches("a", &["a"], || true), None);
	}
}
