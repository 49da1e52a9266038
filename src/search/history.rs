use parking_lot::{Mutex, MutexGuard};
use serde::Deserialize;

/// History key that stands for every contributor at once.
pub const ALL_CONTRIBUTORS_GROUP_ID: &str = "all";

/// Entries kept per contributor, and in the combined view.
pub const MAX_SEARCH_EVERYWHERE_HISTORY: usize = 50;

/// Where new history entries go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryOrder {
	Append,
	#[default]
	Prepend,
}

impl HistoryOrder {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Append => "append",
			Self::Prepend => "prepend",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
	pub text: String,
	pub contributor: String,
}

/// Past queries, remembered per contributor.
#[derive(Debug, Clone)]
pub struct SearchHistoryList {
	items: Vec<HistoryItem>,
	order: HistoryOrder,
	limit: usize,
}

impl Default for SearchHistoryList {
	fn default() -> Self {
		Self::new(HistoryOrder::default())
	}
}

impl SearchHistoryList {
	#[must_use]
	pub fn new(order: HistoryOrder) -> Self {
		Self {
			items: Vec::new(),
			order,
			limit: MAX_SEARCH_EVERYWHERE_HISTORY,
		}
	}

	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit.max(1);
		self
	}

	#[must_use]
	pub fn order(&self) -> HistoryOrder {
		self.order
	}

	pub fn set_order(&mut self, order: HistoryOrder) {
		if self.order != order {
			self.items.reverse();
			self.order = order;
		}
	}

	/// Remember `text` for `contributor`, moving an existing copy to the newest slot.
	pub fn save_text(&mut self, text: &str, contributor: &str) {
		let text = text.trim();
		if text.is_empty() {
			return;
		}
		self.items
			.retain(|item| !(item.text == text && item.contributor == contributor));
		let item = HistoryItem {
			text: text.to_string(),
			contributor: contributor.to_string(),
		};
		match self.order {
			HistoryOrder::Append => self.items.push(item),
			HistoryOrder::Prepend => self.items.insert(0, item),
		}

		while self.count(contributor) > self.limit {
			let oldest = match self.order {
				HistoryOrder::Append => self.items.iter().position(|item| item.contributor == contributor),
				HistoryOrder::Prepend => self.items.iter().rposition(|item| item.contributor == contributor),
			};
			match oldest {
				Some(index) => {
					self.items.remove(index);
				}
				None => break,
			}
		}
	}

	/// Number of entries stored for `contributor`.
	#[must_use]
	pub fn count(&self, contributor: &str) -> usize {
		self.items
			.iter()
			.filter(|item| item.contributor == contributor)
			.count()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Texts visible to `contributor`, in storage order.
	///
	/// The combined key sees the newest bounded slice of the whole list, with
	/// repeated texts collapsed onto their most recent entry.
	#[must_use]
	pub fn texts(&self, contributor: &str) -> Vec<String> {
		if contributor != ALL_CONTRIBUTORS_GROUP_ID {
			return self
				.items
				.iter()
				.filter(|item| item.contributor == contributor)
				.map(|item| item.text.clone())
				.collect();
		}

		let mut newest_first: Vec<String> = Vec::new();
		let ordered: Box<dyn Iterator<Item = &HistoryItem> + '_> = match self.order {
			HistoryOrder::Append => Box::new(self.items.iter().rev()),
			HistoryOrder::Prepend => Box::new(self.items.iter()),
		};
		for item in ordered {
			if newest_first.len() == self.limit {
				break;
			}
			if !newest_first.contains(&item.text) {
				newest_first.push(item.text.clone());
			}
		}
		if self.order == HistoryOrder::Append {
			newest_first.reverse();
		}
		newest_first
	}

	/// Texts visible to `contributor`, most recent first.
	#[must_use]
	pub fn recent(&self, contributor: &str) -> Vec<String> {
		let mut texts = self.texts(contributor);
		if self.order == HistoryOrder::Append {
			texts.reverse();
		}
		texts
	}

	#[must_use]
	pub fn iterator(&self, contributor: &str) -> HistoryIterator {
		HistoryIterator::new(self.texts(contributor))
	}
}

/// Cyclic cursor over a snapshot of history texts.
#[derive(Debug, Clone, Default)]
pub struct HistoryIterator {
	texts: Vec<String>,
	position: Option<usize>,
}

impl HistoryIterator {
	#[must_use]
	pub fn new(texts: Vec<String>) -> Self {
		Self {
			texts,
			position: None,
		}
	}

	/// Next text, wrapping to the first one. Empty when there is no history.
	pub fn next_text(&mut self) -> String {
		if self.texts.is_empty() {
			return String::new();
		}
		let next = match self.position {
			Some(position) if position + 1 < self.texts.len() => position + 1,
			_ => 0,
		};
		self.position = Some(next);
		self.texts[next].clone()
	}

	/// Previous text, wrapping to the last one. Empty when there is no history.
	pub fn prev_text(&mut self) -> String {
		if self.texts.is_empty() {
			return String::new();
		}
		let prev = match self.position {
			Some(position) if position > 0 => position - 1,
			_ => self.texts.len() - 1,
		};
		self.position = Some(prev);
		self.texts[prev].clone()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.texts.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.texts.is_empty()
	}
}

/// History shared by every session of a project.
#[derive(Debug, Default)]
pub struct ProjectHistory {
	list: Mutex<SearchHistoryList>,
}

impl ProjectHistory {
	pub fn lock(&self) -> MutexGuard<'_, SearchHistoryList> {
		self.list.lock()
	}

	pub fn save_text(&self, text: &str, contributor: &str) {
		self.list.lock().save_text(text, contributor);
	}

	#[must_use]
	pub fn iterator(&self, contributor: &str) -> HistoryIterator {
		self.list.lock().iterator(contributor)
	}

	#[must_use]
	pub fn recent(&self, contributor: &str) -> Vec<String> {
		self.list.lock().recent(contributor)
	}
}
