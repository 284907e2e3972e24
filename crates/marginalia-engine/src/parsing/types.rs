use serde::Serialize;

use super::span::Span;

/// One parsed occurrence of highlight markup, with or without an annotation.
///
/// Matches are derived data: they are recomputed from the document text on
/// every change and never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightMatch {
    /// Offset of the opening `==`.
    pub from: usize,
    /// Offset just past the closing `==` or `-->`.
    pub to: usize,
    /// Text between the highlight delimiters. Never empty, never contains `=`.
    pub highlight_text: String,
    /// Annotation comment, if the highlight is followed by `<!--…-->`.
    pub comment: Option<String>,
    /// The literal matched source, delimiters included.
    pub full_match: String,
}

impl HighlightMatch {
    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn has_annotation(&self) -> bool {
        self.comment.is_some()
    }
}
