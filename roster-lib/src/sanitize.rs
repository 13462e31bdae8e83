//! Markup neutralisation for names before they reach any rendering layer.

/// Escape the five HTML-significant characters (`&`, `<`, `>`, `"`, `'`).
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }

    out
}

/// Turn names escaped by [`escape_html`] back into plain text for non-HTML output.
///
/// Each entity is decoded once, so `&amp;lt;` becomes `&lt;`. Anything that is not one
/// of the five entities is left as it is.
pub fn unescape_html(input: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);

        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, c)) => {
                out.push(*c);
                rest = tail.get(entity.len()..).unwrap_or_default();
            }
            None => {
                out.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x('y')">Tom & Jerry</b>"#),
            "&lt;b onclick=&quot;x(&#39;y&#39;)&quot;&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_html("João Silva"), "João Silva");
    }

    #[test]
    fn test_escaping_twice_escapes_entities() {
        // A second pass escapes the entity itself; callers must only escape raw input.
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_unescape_html() {
        let raw = r#"<b onclick="x('y')">Tom & Jerry</b>"#;

        assert_eq!(unescape_html(&escape_html(raw)), raw);
        assert_eq!(unescape_html("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_unescape_decodes_once() {
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html("R&D &copy; &"), "R&D &copy; &");
    }
}
