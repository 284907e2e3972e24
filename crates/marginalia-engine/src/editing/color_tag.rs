/// A trailing ` @colorname` token on a comment, naming one of the configured
/// highlight colors.
pub struct ColorTag;

impl ColorTag {
    pub const PREFIX: char = '@';

    /// Appends the color token to `comment`. Blank comments produce nothing,
    /// matching the annotate form which refuses to submit them.
    pub fn apply(comment: &str, color: Option<&str>) -> Option<String> {
        if comment.trim().is_empty() {
            return None;
        }
        Some(match color.filter(|c| !c.is_empty()) {
            Some(color) => format!("{comment} {}{color}", Self::PREFIX),
            None => comment.to_string(),
        })
    }

    /// Splits a trailing color token off `comment`, if it names one of
    /// `colors`. Returns the remaining comment and the color.
    pub fn split<'a, S: AsRef<str>>(comment: &'a str, colors: &[S]) -> (&'a str, Option<&'a str>) {
        let Some((rest, token)) = comment.rsplit_once(' ') else {
            return (comment, None);
        };
        let Some(color) = token.strip_prefix(Self::PREFIX) else {
            return (comment, None);
        };
        if colors.iter().any(|c| c.as_ref() == color) {
            (rest, Some(color))
        } else {
            (comment, None)
        }
    }
}
