//! HTML escaping.

/// Escape text for HTML element content and quoted attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'`. Each input character is escaped
/// exactly once, so already-escaped input is escaped again (`&amp;` becomes
/// `&amp;amp;`).
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    push_escaped(&mut result, s);
    result
}

/// Append `s` to `out`, escaped.
pub(crate) fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("plain text, ünïcödé"), "plain text, ünïcödé");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_html_not_idempotent() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
