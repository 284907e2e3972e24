use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Document;

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText {
        at: usize,
        text: String,
    },
    DeleteRange {
        range: std::ops::Range<usize>,
    },
    ReplaceRange {
        range: std::ops::Range<usize>,
        text: String,
    },
}

/// Compile a command into a delta
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> Delta<RopeInfo> {
    let mut builder = Builder::new(doc.len());
    match cmd {
        Cmd::InsertText { at, text } => {
            let at = (*at).min(doc.len());
            builder.replace(at..at, Rope::from(text));
        }
        Cmd::DeleteRange { range } => {
            builder.delete(clamp_range(doc, range));
        }
        Cmd::ReplaceRange { range, text } => {
            builder.replace(clamp_range(doc, range), Rope::from(text));
        }
    }
    builder.build()
}

fn clamp_range(doc: &Document, range: &std::ops::Range<usize>) -> std::ops::Range<usize> {
    let start = range.start.min(doc.len());
    let end = range.end.min(doc.len()).max(start);
    start..end
}

/// Transform selection based on the command being applied
pub(crate) fn transform_selection_for_command(
    range: &std::ops::Range<usize>,
    cmd: &Cmd,
) -> std::ops::Range<usize> {
    match cmd {
        Cmd::InsertText { at, text } => {
            // If insertion point is before or at selection start, shift selection right
            let text_len = text.len();
            if *at <= range.start {
                (range.start + text_len)..(range.end + text_len)
            } else if *at < range.end {
                // Insertion is within selection - grow the end
                range.start..(range.end + text_len)
            } else {
                range.clone()
            }
        }
        Cmd::DeleteRange { range: del_range } => {
            transform_selection_for_command(
                range,
                &Cmd::ReplaceRange {
                    range: del_range.clone(),
                    text: String::new(),
                },
            )
        }
        Cmd::ReplaceRange {
            range: replace_range,
            text,
        } => {
            let del_len = replace_range.len();
            let insert_len = text.len();

            if replace_range.end <= range.start && !replace_range.is_empty() {
                // Replacement is before selection - shift by net change
                let start = (range.start + insert_len).saturating_sub(del_len);
                let end = (range.end + insert_len).saturating_sub(del_len);
                start..end
            } else if replace_range.start >= range.end && replace_range.start > range.start {
                // Replacement is after selection - no change
                range.clone()
            } else {
                // Replacement overlaps selection - collapse to end of inserted text
                let collapse_point = replace_range.start + insert_len;
                collapse_point..collapse_point
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Document;

    // ============ InsertText command tests ============

    #[test]
    fn test_insert_text_at_beginning() {
        let mut doc = Document::from_bytes(b"Hello World").unwrap();
        doc.set_selection(0..0);

        let patch = doc.apply(Cmd::InsertText {
            at: 0,
            text: "Start: ".to_string(),
        });

        assert_eq!(doc.text(), "Start: Hello World");
        assert_eq!(patch.version, 1);
        assert!(patch.doc_changed());
        assert_eq!(patch.new_selection, 7..7);
    }

    #[test]
    fn test_insert_text_in_middle() {
        let mut doc = Document::from_bytes(b"Hello World").unwrap();
        doc.set_selection(5..5);

        let patch = doc.apply(Cmd::InsertText {
            at: 5,
            text: " Beautiful".to_string(),
        });

        assert_eq!(doc.text(), "Hello Beautiful World");
        assert!(patch.doc_changed());
        assert_eq!(patch.new_selection, 15..15);
    }

    #[test]
    fn test_insert_past_end_is_clamped() {
        let mut doc = Document::from_bytes(b"Hello").unwrap();
        doc.apply(Cmd::InsertText {
            at: 99,
            text: "!".to_string(),
        });
        assert_eq!(doc.text(), "Hello!");
    }

    // ============ DeleteRange command tests ============

    #[test]
    fn test_delete_range_multiple_chars() {
        let mut doc = Document::from_bytes(b"Hello World").unwrap();
        doc.set_selection(11..11);

        let patch = doc.apply(Cmd::DeleteRange { range: 5..11 });

        assert_eq!(doc.text(), "Hello");
        assert_eq!(patch.new_selection, 5..5);
    }

    #[test]
    fn test_delete_range_before_selection_shifts_left() {
        let mut doc = Document::from_bytes(b"Hello World").unwrap();
        doc.set_selection(6..11);

        let patch = doc.apply(Cmd::DeleteRange { range: 0..6 });

        assert_eq!(doc.text(), "World");
        assert_eq!(patch.new_selection, 0..5);
    }

    // ============ ReplaceRange command tests ============

    #[test]
    fn test_replace_range_wraps_selection() {
        let mut doc = Document::from_bytes(b"Hello world").unwrap();
        doc.set_selection(6..11);

        let patch = doc.apply(Cmd::ReplaceRange {
            range: 6..11,
            text: "==world==".to_string(),
        });

        assert_eq!(doc.text(), "Hello ==world==");
        assert!(patch.doc_changed());
        assert_eq!(patch.new_selection, 15..15);
    }

    #[test]
    fn test_replace_range_with_shorter_text_before_selection() {
        let mut doc = Document::from_bytes(b"==ab== tail").unwrap();
        doc.set_selection(7..11);

        let patch = doc.apply(Cmd::ReplaceRange {
            range: 0..6,
            text: "ab".to_string(),
        });

        assert_eq!(doc.text(), "ab tail");
        assert_eq!(patch.new_selection, 3..7);
    }

    #[test]
    fn test_replace_range_after_selection_keeps_it() {
        let mut doc = Document::from_bytes(b"abc def").unwrap();
        doc.set_selection(0..3);

        let patch = doc.apply(Cmd::ReplaceRange {
            range: 4..7,
            text: "xyz".to_string(),
        });

        assert_eq!(doc.text(), "abc xyz");
        assert_eq!(patch.new_selection, 0..3);
    }
}
