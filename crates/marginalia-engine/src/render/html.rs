use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::render::decorations::Region;

impl Region {
    /// Markup for the element that replaces the raw highlight source.
    ///
    /// Offsets are carried as `data-from` / `data-to` so a host can route a
    /// click back to [`RegionSet::at`](crate::render::RegionSet::at).
    pub fn to_html(&self) -> String {
        let mut attrs = format!(
            r#"class="{}" data-from="{}" data-to="{}""#,
            self.class_name(),
            self.from,
            self.to
        );
        if let Some(comment) = self.tooltip() {
            let comment = encode_double_quoted_attribute(comment);
            attrs.push_str(&format!(r#" data-comment="{comment}" title="{comment}""#));
        }
        format!("<span {attrs}>{}</span>", encode_text(&self.text))
    }
}

#[cfg(test)]
mod tests {
    use crate::parsing::parse_highlights;
    use crate::render::project;

    #[test]
    fn bare_region_html() {
        let set = project(&parse_highlights("==a & b=="));
        let html = set.iter().next().unwrap().to_html();
        assert_eq!(
            html,
            r#"<span class="marginalia-highlight" data-from="0" data-to="9">a &amp; b</span>"#
        );
    }

    #[test]
    fn annotated_region_html_escapes_comment() {
        let set = project(&parse_highlights(r#"==q==<!--say "hi" <b>-->"#));
        let html = set.iter().next().unwrap().to_html();
        assert_eq!(
            html,
            r#"<span class="marginalia-highlight annotated" data-from="0" data-to="24" data-comment="say &quot;hi&quot; &lt;b&gt;" title="say &quot;hi&quot; &lt;b&gt;">q</span>"#
        );
    }
}
