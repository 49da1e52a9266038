use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::element::ElementRef;
use crate::id::ContributorId;

/// A weighted result emitted by a contributor.
///
/// Higher weights are better matches.
#[derive(Debug, Clone)]
pub struct FoundItem {
    element: ElementRef,
    weight: i32,
    contributor: ContributorId,
}

impl FoundItem {
    #[must_use]
    pub fn new(element: ElementRef, weight: i32, contributor: ContributorId) -> Self {
        Self {
            element,
            weight,
            contributor,
        }
    }

    #[must_use]
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    #[must_use]
    pub fn weight(&self) -> i32 {
        self.weight
    }

    #[must_use]
    pub fn contributor(&self) -> ContributorId {
        self.contributor
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.element.text()
    }

    /// Returns `true` when both items share the same element allocation.
    #[must_use]
    pub fn same_element(&self, other: &FoundItem) -> bool {
        Arc::ptr_eq(&self.element, &other.element)
    }
}

/// Sort items by descending weight, keeping emission order for equal weights.
pub fn sort_by_weight(items: &mut [FoundItem]) {
    items.sort_by(|a, b| b.weight.cmp(&a.weight));
}

/// A [`FoundItem`] accepted by a search session.
///
/// The correlation id is unique within a session and is the identity of the
/// info: two infos are equal exactly when their ids are.
#[derive(Debug, Clone)]
pub struct FoundElementInfo {
    id: u64,
    item: FoundItem,
    description: String,
}

impl FoundElementInfo {
    #[must_use]
    pub fn new(id: u64, item: FoundItem) -> Self {
        let description = format!(
            "{}:{} ({})",
            item.contributor().id(),
            item.text(),
            item.weight()
        );
        Self {
            id,
            item,
            description,
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn item(&self) -> &FoundItem {
        &self.item
    }

    #[must_use]
    pub fn element(&self) -> &ElementRef {
        self.item.element()
    }

    #[must_use]
    pub fn weight(&self) -> i32 {
        self.item.weight()
    }

    #[must_use]
    pub fn contributor(&self) -> ContributorId {
        self.item.contributor()
    }

    /// Diagnostic rendering used in logs.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn into_item(self) -> FoundItem {
        self.item
    }
}

impl PartialEq for FoundElementInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FoundElementInfo {}

impl Hash for FoundElementInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ContributorDescriptor;
    use crate::element::TextElement;

    static DESCRIPTOR: ContributorDescriptor = ContributorDescriptor::new("items", "Items", 0);

    fn item(text: &str, weight: i32) -> FoundItem {
        FoundItem::new(
            TextElement::shared(text),
            weight,
            ContributorId::from_descriptor(&DESCRIPTOR),
        )
    }

    #[test]
    fn sorting_is_descending_and_stable() {
        let mut items = vec![item("a", 1), item("b", 5), item("c", 1), item("d", 5)];
        sort_by_weight(&mut items);
        let texts: Vec<_> = items.iter().map(FoundItem::text).collect();
        assert_eq!(texts, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn infos_compare_by_correlation_id() {
        let first = FoundElementInfo::new(1, item("same", 3));
        let second = FoundElementInfo::new(2, item("same", 3));
        assert_ne!(first, second);
        assert_eq!(first, FoundElementInfo::new(1, item("other", 0)));
        assert_eq!(first.description(), "items:same (3)");
    }
}
