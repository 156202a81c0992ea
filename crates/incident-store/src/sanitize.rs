//! Sanitization of client-supplied text.

use std::sync::LazyLock;

use regex::Regex;

/// Matches markup-like substrings such as `<b>` or `</script>`.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern compiles"));

/// Strip markup-like substrings and trim surrounding whitespace.
pub fn sanitize(input: &str) -> String {
    MARKUP.replace_all(input, "").trim().to_string()
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup() {
        assert_eq!(sanitize("<b>bold</b> text"), "bold text");
        assert_eq!(sanitize("<script>alert(1)</script>"), "alert(1)");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize("  padded  "), "padded");
        assert_eq!(sanitize(" <i>x</i> "), "x");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(sanitize("/var at 100%"), "/var at 100%");
    }

    #[test]
    fn empty_and_markup_only() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("<br>"), "");
    }

    #[test]
    fn unclosed_angle_bracket_kept() {
        // Only complete `<...>` pairs count as markup.
        assert_eq!(sanitize("a < b"), "a < b");
    }
}
