use crate::parsing::Highlight;

/// Characters that extend a word when growing a selection: `[A-Za-z0-9_]`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expands a selection inside one line so it covers whole words.
///
/// `range` is a byte range local to `line`. Each boundary first grows outward
/// over word characters, stopping where it would touch a `==` delimiter, then
/// shrinks inward past whitespace. The result never leaves `line`; it can be
/// empty when the selection held only whitespace.
pub fn expand_selection_boundary(
    line: &str,
    range: std::ops::Range<usize>,
) -> std::ops::Range<usize> {
    let mut start = floor_char_boundary(line, range.start.min(line.len()));
    let mut end = floor_char_boundary(line, range.end.min(line.len())).max(start);

    // Grow to word boundaries
    while let Some(c) = line[..start].chars().next_back() {
        if !is_word_char(c) || line[..start].ends_with(Highlight::MARK) {
            break;
        }
        start -= c.len_utf8();
    }
    while let Some(c) = line[end..].chars().next() {
        if !is_word_char(c) || line[end..].starts_with(Highlight::MARK) {
            break;
        }
        end += c.len_utf8();
    }

    // Then shrink past whitespace
    while let Some(c) = line[start..end].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        start += c.len_utf8();
    }
    while let Some(c) = line[start..end].chars().next_back() {
        if !c.is_whitespace() {
            break;
        }
        end -= c.len_utf8();
    }

    start..end
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
