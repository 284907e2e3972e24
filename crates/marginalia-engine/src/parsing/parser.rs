use super::{
    cursor::Cursor,
    kinds::{Annotation, Highlight},
    types::HighlightMatch,
};

/// Scans `s` for highlight and annotation markup.
///
/// # Arguments
/// - `base`: Byte offset in the document where `s` begins
/// - `s`: The text to scan
///
/// # Matching rules
/// At every `==` the scanner tries `==TEXT==`, where `TEXT` is one or more
/// bytes other than `=` (newlines included). If `<!--` follows, the match
/// extends to the first `-->`; when that terminator is missing there is no
/// match at this position at all. A bare highlight whose text starts with
/// `<!--` is rejected.
///
/// The leftmost match wins. At a given `==` the annotated form is preferred
/// over the bare one, and on success scanning resumes after the match, so
/// markup inside a consumed comment is never reported. An annotation whose
/// opening `==` was already used as the closing delimiter of an earlier bare
/// highlight is not reported either. On failure the scanner moves on by one
/// byte.
///
/// # Returns
/// Non-overlapping matches in document order.
pub fn parse_highlights_at(base: usize, s: &str) -> Vec<HighlightMatch> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(m) = try_parse_highlight(&mut cur) {
            out.push(m);
            continue;
        }
        cur.bump();
    }

    out
}

/// Attempts to parse a highlight (optionally annotated) at the current
/// position. On failure the cursor is restored.
fn try_parse_highlight(cur: &mut Cursor<'_>) -> Option<HighlightMatch> {
    if !cur.starts_with(Highlight::MARK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.i;
    cur.bump_n(Highlight::MARK.len());

    let text_start = cur.i;
    if cur.eat_until_byte(Highlight::EQ) == 0 || !cur.starts_with(Highlight::MARK) {
        *cur = saved;
        return None;
    }
    let text_end = cur.i;
    cur.bump_n(Highlight::MARK.len());

    let highlight_text = cur.slice(text_start, text_end);
    let mut comment = None;

    if cur.starts_with(Annotation::OPEN) {
        cur.bump_n(Annotation::OPEN.len());
        let comment_start = cur.i;
        if !cur.seek(Annotation::CLOSE) {
            *cur = saved;
            return None;
        }
        comment = Some(cur.slice(comment_start, cur.i).to_string());
        cur.bump_n(Annotation::CLOSE.len());
    } else if highlight_text.starts_with(Annotation::OPEN) {
        *cur = saved;
        return None;
    }

    let end = cur.i;
    Some(HighlightMatch {
        from: cur.base + start,
        to: cur.base + end,
        highlight_text: highlight_text.to_string(),
        comment,
        full_match: cur.slice(start, end).to_string(),
    })
}
