//! Rendered document types.

/// A heading collected for the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Element id derived from the heading text
    pub id: String,
    /// Heading level (2 or 3)
    pub level: u8,
    /// Plain heading text
    pub text: String,
}

/// The currently displayed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Document path relative to the repository root
    pub path: String,
    /// Sanitized HTML body
    pub html: String,
    /// Headings in document order
    pub headings: Vec<Heading>,
}

/// What the content pane is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentState {
    /// Nothing opened yet
    #[default]
    Welcome,
    /// Request in flight for this path
    Loading { path: String },
    /// Document rendered
    Ready(Document),
    /// Something failed (document fetch or directory listing)
    Failed { message: String },
}

impl ContentState {
    pub fn document(&self) -> Option<&Document> {
        match self {
            Self::Ready(doc) => Some(doc),
            _ => None,
        }
    }
}
