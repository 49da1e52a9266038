use everywhere_contributor_api::FoundElementInfo;

/// Final ordering step applied before results are presented.
pub trait ResultReorderer: Send + Sync {
	fn reorder(&self, pattern: &str, items: &mut Vec<FoundElementInfo>);
}

/// Best matches first; equal weights keep acceptance order.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightReorderer;

impl ResultReorderer for WeightReorderer {
	fn reorder(&self, _pattern: &str, items: &mut Vec<FoundElementInfo>) {
		items.sort_by(|a, b| b.weight().cmp(&a.weight()));
	}
}

/// Groups results by contributor, in tab order, best matches first in each group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupReorderer;

impl ResultReorderer for GroupReorderer {
	fn reorder(&self, _pattern: &str, items: &mut Vec<FoundElementInfo>) {
		items.sort_by(|a, b| {
			a.contributor()
				.sort_weight()
				.cmp(&b.contributor().sort_weight())
				.then_with(|| a.contributor().id().cmp(b.contributor().id()))
				.then_with(|| b.weight().cmp(&a.weight()))
		});
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::search::test_support::{ALPHA, BETA, info};

	fn descriptions(items: &[FoundElementInfo]) -> Vec<&str> {
		items.iter().map(FoundElementInfo::description).collect()
	}

	#[test]
	fn weight_order_is_stable() {
		let mut items = vec![
			info(1, &BETA, "b", 1),
			info(2, &ALPHA, "a", 5),
			info(3, &ALPHA, "c", 1),
		];
		WeightReorderer.reorder("", &mut items);
		assert_eq!(descriptions(&items), vec!["alpha:a (5)", "beta:b (1)", "alpha:c (1)"]);
	}

	#[test]
	fn groups_follow_tab_order() {
		let mut items = vec![
			info(1, &BETA, "b", 9),
			info(2, &ALPHA, "a", 1),
			info(3, &ALPHA, "c", 4),
		];
		GroupReorderer.reorder("", &mut items);
		assert_eq!(descriptions(&items), vec!["alpha:c (4)", "alpha:a (1)", "beta:b (9)"]);
	}
}
