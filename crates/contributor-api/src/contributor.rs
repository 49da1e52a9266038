use std::sync::Arc;

use crate::context::SessionContext;
use crate::descriptor::ContributorDescriptor;
use crate::error::ContributorError;
use crate::id::ContributorId;
use crate::item::FoundItem;
use crate::sink::ResultSink;

/// Keyboard modifiers held while the user confirmed a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

/// A source of search results.
///
/// Contributors live for one search session. They may be called from a
/// worker thread and must check the sink's answer after every push.
pub trait Contributor: Send + Sync {
    /// Static descriptor advertising contributor metadata.
    fn descriptor(&self) -> &'static ContributorDescriptor;

    fn id(&self) -> ContributorId {
        ContributorId::from_descriptor(self.descriptor())
    }

    /// Push every result matching `pattern` into `sink`, best matches first.
    fn fetch(&self, pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError>;

    /// React to the user picking `item`.
    ///
    /// Returns `true` when the contributor handled the selection itself;
    /// otherwise the pipeline navigates to the element.
    fn process_selected_item(
        &self,
        item: &FoundItem,
        modifiers: SelectionModifiers,
        search_text: &str,
    ) -> bool;

    /// `false` while the contributor's data is not searchable yet.
    fn is_ready(&self) -> bool {
        true
    }

    /// Whether fetching must happen under the shared model read lock.
    fn needs_model_lock(&self) -> bool {
        false
    }

    /// Whether the contributor produces results for a blank pattern.
    fn supports_empty_pattern(&self) -> bool {
        false
    }
}

/// Creates contributors when a search session opens.
pub trait ContributorFactory: Send + Sync {
    fn descriptor(&self) -> &'static ContributorDescriptor;

    fn id(&self) -> ContributorId {
        ContributorId::from_descriptor(self.descriptor())
    }

    fn create(
        &self,
        context: &Arc<SessionContext>,
    ) -> Result<Arc<dyn Contributor>, ContributorError>;
}
