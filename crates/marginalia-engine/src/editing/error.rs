use thiserror::Error;

/// Validation failures for mutation operations.
///
/// Every variant is terminal: the caller shows the `Display` text as a
/// transient notice and performs no edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("{0}")]
    InvalidSelection(SelectionProblem),

    #[error("Selection already contains a highlight")]
    AlreadyHighlighted,

    #[error("Comment must not contain -->")]
    InvalidComment,

    #[error("Highlight has changed, try again")]
    StaleHighlight,
}

/// Why a selection cannot be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionProblem {
    #[error("No text selected")]
    Empty,

    #[error("Only same line highlights are supported. Sorry!")]
    MultiLine,

    #[error("Selection must not split a character")]
    SplitsCharacter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_text() {
        assert_eq!(
            AnnotationError::InvalidSelection(SelectionProblem::Empty).to_string(),
            "No text selected"
        );
        assert_eq!(
            AnnotationError::InvalidSelection(SelectionProblem::MultiLine).to_string(),
            "Only same line highlights are supported. Sorry!"
        );
        assert_eq!(
            AnnotationError::InvalidComment.to_string(),
            "Comment must not contain -->"
        );
        assert_eq!(
            AnnotationError::InvalidSelection(SelectionProblem::SplitsCharacter).to_string(),
            "Selection must not split a character"
        );
    }
}
