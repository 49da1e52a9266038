use crate::item::FoundElementInfo;

/// Verdict of an equality provider about a newly found item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EqualityAction {
    /// The new item is unrelated to the accepted ones.
    #[default]
    DoNothing,
    /// The new item duplicates an accepted one and must be dropped.
    Skip,
    /// The new item supersedes the listed accepted items.
    Replace(Vec<FoundElementInfo>),
}

impl EqualityAction {
    #[must_use]
    pub fn replace(existing: FoundElementInfo) -> Self {
        Self::Replace(vec![existing])
    }

    /// Fold two verdicts into one.
    ///
    /// `Replace` dominates `Skip`, which dominates `DoNothing`. Two `Replace`
    /// verdicts evict the union of their lists, in order.
    #[must_use]
    pub fn combine(self, other: EqualityAction) -> EqualityAction {
        match (self, other) {
            (Self::Replace(mut first), Self::Replace(second)) => {
                for info in second {
                    if !first.contains(&info) {
                        first.push(info);
                    }
                }
                Self::Replace(first)
            }
            (replace @ Self::Replace(_), _) | (_, replace @ Self::Replace(_)) => replace,
            (Self::Skip, _) | (_, Self::Skip) => Self::Skip,
            (Self::DoNothing, Self::DoNothing) => Self::DoNothing,
        }
    }

    #[must_use]
    pub fn is_do_nothing(&self) -> bool {
        matches!(self, Self::DoNothing)
    }
}

/// Decides whether a new item duplicates items that were already accepted.
pub trait EqualityProvider: Send + Sync {
    /// Compare the new item against a single accepted item.
    fn compare_items(
        &self,
        new_item: &FoundElementInfo,
        existing: &FoundElementInfo,
    ) -> EqualityAction;

    /// Compare the new item against every accepted item and fold the verdicts.
    fn compare_with_all(
        &self,
        new_item: &FoundElementInfo,
        existing: &[FoundElementInfo],
    ) -> EqualityAction {
        existing
            .iter()
            .map(|info| self.compare_items(new_item, info))
            .fold(EqualityAction::DoNothing, EqualityAction::combine)
    }
}
