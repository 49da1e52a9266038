/// Static metadata describing a contributor taking part in the search.
#[derive(Debug)]
pub struct ContributorDescriptor {
    /// Stable identifier used to route searches, history and scope selections.
    pub id: &'static str,
    /// Human readable group (tab) name.
    pub group_name: &'static str,
    /// Tab ordering weight. Lower values are shown earlier.
    pub sort_weight: i32,
    /// Whether the contributor gets a tab of its own next to the "All" tab.
    pub separate_tab: bool,
    /// Essential contributors are watched by the slow contributor detector.
    pub essential: bool,
    /// Overrides the session-wide per-contributor result limit.
    pub max_results: Option<usize>,
}

impl ContributorDescriptor {
    /// Descriptor with default flags: shown in its own tab, not essential, no
    /// custom limit.
    #[must_use]
    pub const fn new(id: &'static str, group_name: &'static str, sort_weight: i32) -> Self {
        Self {
            id,
            group_name,
            sort_weight,
            separate_tab: true,
            essential: false,
            max_results: None,
        }
    }

    #[must_use]
    pub const fn essential(mut self) -> Self {
        self.essential = true;
        self
    }

    #[must_use]
    pub const fn hidden_tab(mut self) -> Self {
        self.separate_tab = false;
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, limit: usize) -> Self {
        self.max_results = Some(limit);
        self
    }
}
