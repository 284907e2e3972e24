//! Margin notes for read-only preview.
//!
//! A preview renders highlights as plain marks and loses the comments. This
//! module recovers each mark's comment from the section's source text and
//! lays the notes out alternately on either side of the page.

use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use serde::Serialize;

use crate::parsing::parse_highlights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A comment to place beside the `mark_index`th mark of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarginNote {
    pub mark_index: usize,
    pub comment: String,
    pub side: Side,
}

/// Assigns comments and sides to rendered marks.
///
/// The side alternates across every note the layout produces, starting on
/// the right, so one layout should live as long as the preview it serves.
#[derive(Debug, Default)]
pub struct MarginNoteLayout {
    placed: usize,
}

impl MarginNoteLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes for the marks rendered from `section_source`, given each mark's
    /// visible text in order.
    ///
    /// When several annotated highlights share the same text, each mark takes
    /// the first occurrence not yet used by an earlier mark with that text,
    /// falling back to the first occurrence. Marks without a comment get no
    /// note.
    pub fn annotate_section<S: AsRef<str>>(
        &mut self,
        section_source: &str,
        marks: &[S],
    ) -> Vec<MarginNote> {
        let mut used: HashMap<&str, usize> = HashMap::new();
        let mut notes = Vec::new();

        for (mark_index, mark) in marks.iter().enumerate() {
            let mark = mark.as_ref();
            let comments = annotated_occurrences(section_source, mark);
            if comments.is_empty() {
                continue;
            }

            let seen = used.entry(mark).or_insert(0);
            let comment = comments.get(*seen).unwrap_or(&comments[0]);
            *seen += 1;
            if comment.is_empty() {
                continue;
            }

            notes.push(MarginNote {
                mark_index,
                comment: comment.to_string(),
                side: self.next_side(),
            });
        }

        log::debug!("placed {} margin notes for {} marks", notes.len(), marks.len());
        notes
    }

    fn next_side(&mut self) -> Side {
        let side = if self.placed % 2 == 0 {
            Side::Right
        } else {
            Side::Left
        };
        self.placed += 1;
        side
    }
}

/// Comments attached to `==mark==` in `source`, in order.
///
/// Comments containing `>` are not matched, so such a highlight keeps the
/// `title` on its mark but gets no margin note.
fn annotated_occurrences<'s>(source: &'s str, mark: &str) -> Vec<&'s str> {
    let pattern = format!("=={}==<!--([^>]*)-->", regex::escape(mark));
    let Ok(re) = Regex::new(&pattern) else {
        log::warn!("could not build margin-note pattern for {mark:?}");
        return Vec::new();
    };
    re.captures_iter(source)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Read-only HTML for a whole document.
///
/// Blank lines split the text into sections. Each section becomes a
/// paragraph with highlights rendered as `<mark>` elements, followed by the
/// margin notes for its annotated marks.
pub fn render_preview(text: &str, layout: &mut MarginNoteLayout) -> String {
    let mut html = String::new();
    for section in text.split("\n\n").filter(|s| !s.trim().is_empty()) {
        let matches = parse_highlights(section);
        let marks: Vec<&str> = matches.iter().map(|m| m.highlight_text.as_str()).collect();

        html.push_str("<section><p>");
        let mut pos = 0;
        for m in &matches {
            html.push_str(&encode_text(&section[pos..m.from]));
            match m.comment.as_deref().filter(|c| !c.is_empty()) {
                Some(comment) => html.push_str(&format!(
                    r#"<mark title="{}">{}</mark>"#,
                    encode_double_quoted_attribute(comment),
                    encode_text(&m.highlight_text)
                )),
                None => html.push_str(&format!("<mark>{}</mark>", encode_text(&m.highlight_text))),
            }
            pos = m.to;
        }
        html.push_str(&encode_text(&section[pos..]));
        html.push_str("</p>");

        for note in layout.annotate_section(section, &marks) {
            html.push_str(&render_margin_note(&note.comment, note.side));
        }
        html.push_str("</section>\n");
    }
    html
}

/// Markup for one margin note.
pub fn render_margin_note(comment: &str, side: Side) -> String {
    format!(
        r#"<div class="marginalia-margin-note {side}" title="{title}"><span>{body}</span></div>"#,
        side = side.as_str(),
        title = encode_double_quoted_attribute(comment),
        body = encode_text(comment),
    )
}
