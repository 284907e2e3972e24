//! # Markup Parsing
//!
//! Cursor-based scanning for highlight (`==text==`) and annotated highlight
//! (`==text==<!--comment-->`) markup.
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges shared by every derived structure
//! - **`kinds`**: delimiter constants (`Highlight`, `Annotation`)
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`types`**: `HighlightMatch`
//! - **`parser`**: `parse_highlights_at()` and the `try_parse_*` helper
//!
//! The parser never fails: text without markup yields no matches, and
//! malformed markup is left as plain text.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod span;
pub mod types;

use xi_rope::Rope;

pub use kinds::{Annotation, Highlight};
pub use parser::parse_highlights_at;
pub use span::Span;
pub use types::HighlightMatch;

/// Parses the full document text.
pub fn parse_highlights(text: &str) -> Vec<HighlightMatch> {
    parse_highlights_at(0, text)
}

/// Parses the full contents of a rope buffer.
pub fn parse_rope(rope: &Rope) -> Vec<HighlightMatch> {
    let text = rope.slice_to_cow(..);
    parse_highlights_at(0, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rope_and_str_agree() {
        let text = "a ==b== c ==d==<!--e-->";
        assert_eq!(parse_rope(&Rope::from(text)), parse_highlights(text));
    }
}
