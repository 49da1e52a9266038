use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Location an element can be opened at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationRequest {
    pub path: PathBuf,
    pub line: Option<u32>,
}

impl NavigationRequest {
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.path.display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Opaque result value produced by a contributor.
///
/// The pipeline never looks inside an element beyond this trait; contributors
/// recover their concrete type through [`Element::as_any`] when an item is
/// selected.
pub trait Element: fmt::Debug + Send + Sync + 'static {
    /// Presentable text of the element.
    fn text(&self) -> &str;

    /// Where selecting the element should lead, if it maps to a location.
    fn navigation_request(&self) -> Option<NavigationRequest> {
        None
    }

    /// Whether the element still refers to something that exists.
    fn is_valid(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to an element.
pub type ElementRef = Arc<dyn Element>;

/// Plain text element for contributors whose results are just strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    text: String,
}

impl TextElement {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn shared(text: impl Into<String>) -> ElementRef {
        Arc::new(Self::new(text))
    }
}

impl Element for TextElement {
    fn text(&self) -> &str {
        &self.text
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
