//! Text edits for creating, commenting and removing highlights.
//!
//! Every operation here is pure: it validates its input and returns the exact
//! replacement to apply, or an [`AnnotationError`] with nothing applied.

use crate::editing::{AnnotationError, Cmd, Document, SelectionProblem, selection};
use crate::parsing::{Annotation, Highlight, HighlightMatch, Span};

/// Replace `range` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: std::ops::Range<usize>,
    pub text: String,
}

impl From<Edit> for Cmd {
    fn from(edit: Edit) -> Self {
        Cmd::ReplaceRange {
            range: edit.range,
            text: edit.text,
        }
    }
}

/// The edit that creates a highlight, plus the range the new highlight will
/// occupy once applied (where the comment popover should open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightEdit {
    pub edit: Edit,
    pub popover: Span,
}

/// Anything that identifies existing highlight markup in the document.
pub trait HighlightTarget {
    /// Full span of the markup, delimiters and comment included.
    fn span(&self) -> Span;
    /// The highlighted text without delimiters.
    fn highlight_text(&self) -> &str;
}

impl HighlightTarget for HighlightMatch {
    fn span(&self) -> Span {
        HighlightMatch::span(self)
    }

    fn highlight_text(&self) -> &str {
        &self.highlight_text
    }
}

/// Builds the edit that wraps `selection` in highlight delimiters.
///
/// The selection is clamped to the document, and must then be non-empty, on a
/// single line and aligned to character boundaries. With `expand`, it is
/// first grown to whole words within its line (see
/// [`selection::expand_selection_boundary`]). The final text must not already
/// contain `==`.
pub fn create_highlight(
    doc: &Document,
    selection: std::ops::Range<usize>,
    expand: bool,
) -> Result<HighlightEdit, AnnotationError> {
    let selection = doc.clamp(selection);
    if selection.is_empty() {
        return Err(AnnotationError::InvalidSelection(SelectionProblem::Empty));
    }
    if !doc.is_char_boundary(selection.start) || !doc.is_char_boundary(selection.end) {
        return Err(AnnotationError::InvalidSelection(
            SelectionProblem::SplitsCharacter,
        ));
    }
    if doc.slice_to_cow(selection.clone()).contains('\n') {
        return Err(AnnotationError::InvalidSelection(
            SelectionProblem::MultiLine,
        ));
    }

    let range = if expand {
        let line = doc.line_range(selection.start);
        let line_text = doc.slice_to_cow(line.clone());
        let local = selection::expand_selection_boundary(
            &line_text,
            (selection.start - line.start)..(selection.end - line.start),
        );
        (line.start + local.start)..(line.start + local.end)
    } else {
        selection
    };
    if range.is_empty() {
        return Err(AnnotationError::InvalidSelection(SelectionProblem::Empty));
    }

    let selected = doc.slice_to_cow(range.clone());
    if selected.contains(Highlight::MARK) {
        return Err(AnnotationError::AlreadyHighlighted);
    }

    let text = Highlight::wrap(&selected);
    let popover = Span::new(range.start, range.start + text.len());
    Ok(HighlightEdit {
        edit: Edit { range, text },
        popover,
    })
}

/// Builds the edit that sets, changes or clears the comment on a highlight.
///
/// A blank comment (empty or whitespace only) leaves a bare highlight.
pub fn update_comment(
    target: &impl HighlightTarget,
    comment: &str,
) -> Result<Edit, AnnotationError> {
    if !Annotation::is_valid_comment(comment) {
        return Err(AnnotationError::InvalidComment);
    }

    let mut text = Highlight::wrap(target.highlight_text());
    if !comment.trim().is_empty() {
        text.push_str(&Annotation::wrap(comment));
    }
    Ok(Edit {
        range: target.span().range(),
        text,
    })
}

/// Builds the edit that strips all markup, leaving the highlighted text.
pub fn remove_highlight(target: &impl HighlightTarget) -> Edit {
    Edit {
        range: target.span().range(),
        text: target.highlight_text().to_string(),
    }
}
