//! HTML escaping for user-supplied text.
//!
//! Message bodies are escaped once, before storage, so every downstream
//! renderer can embed them verbatim.

/// Replace the five HTML-significant characters with entity references.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(escape_html("hello world"), "hello world");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
    }

    #[test]
    fn ampersand_is_not_double_escaped_on_first_pass() {
        // Escaping already-escaped text does expand it again; callers
        // escape exactly once, at the storage boundary.
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn preserves_unicode() {
        assert_eq!(escape_html("héllo <wörld>"), "héllo &lt;wörld&gt;");
    }
}
