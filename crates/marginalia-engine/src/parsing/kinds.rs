//! # Markup Kinds
//!
//! Delimiter constants for the two markup constructs. The parser and the
//! mutation operations read these; neither hardcodes `==` or `<!--`.

/// Highlight markup: `==text==`.
pub struct Highlight;

impl Highlight {
    /// Opening and closing delimiter.
    pub const MARK: &'static str = "==";
    /// The byte the highlighted text may never contain.
    pub const EQ: u8 = b'=';

    /// Wraps `text` in highlight delimiters.
    pub fn wrap(text: &str) -> String {
        format!("{}{text}{}", Self::MARK, Self::MARK)
    }
}

/// Annotation markup: an HTML comment directly after a highlight,
/// `==text==<!--comment-->`.
pub struct Annotation;

impl Annotation {
    pub const OPEN: &'static str = "<!--";
    pub const CLOSE: &'static str = "-->";

    /// Wraps `comment` in annotation delimiters.
    pub fn wrap(comment: &str) -> String {
        format!("{}{comment}{}", Self::OPEN, Self::CLOSE)
    }

    /// A comment is storable only if it cannot terminate the annotation early.
    pub fn is_valid_comment(comment: &str) -> bool {
        !comment.contains(Self::CLOSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_compose() {
        let s = format!("{}{}", Highlight::wrap("world"), Annotation::wrap("note"));
        assert_eq!(s, "==world==<!--note-->");
    }

    #[test]
    fn comment_validity() {
        assert!(Annotation::is_valid_comment("fine -> arrow"));
        assert!(Annotation::is_valid_comment(""));
        assert!(!Annotation::is_valid_comment("a-->b"));
    }
}
