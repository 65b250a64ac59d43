use crate::entities::lookup_named_entity;

/// Escapes `&`, `<` and `>`. Ampersands go first so the entities produced
/// here are never escaped twice.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses [`escape`]. Only `&lt;`, `&gt;` and `&amp;` are recognised.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(stripped) = tail.strip_prefix("&lt;") {
            out.push('<');
            rest = stripped;
        } else if let Some(stripped) = tail.strip_prefix("&gt;") {
            out.push('>');
            rest = stripped;
        } else if let Some(stripped) = tail.strip_prefix("&amp;") {
            out.push('&');
            rest = stripped;
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Escapes text for use inside a double-quoted attribute value.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decodes named and numeric character references. Unknown or malformed
/// references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        match tail.find(';').filter(|end| *end > 0 && *end <= 32) {
            Some(end) => match decode_reference(&tail[..end]) {
                Some(decoded) => {
                    out.push_str(&decoded);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = tail;
                }
            },
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        // NUL and surrogates decode to the replacement character.
        let ch = match code {
            0 => '\u{fffd}',
            _ => char::from_u32(code).unwrap_or('\u{fffd}'),
        };
        return Some(ch.to_string());
    }
    lookup_named_entity(body).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{decode_entities, escape, escape_attr, unescape};

    #[test]
    fn escape_handles_ampersand_first() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn unescape_reverses_escape() {
        let raw = "if (a < b && b > c) { x = \"&amp;\"; }";
        assert_eq!(unescape(&escape(raw)), raw);
    }

    #[test]
    fn unescape_leaves_other_entities() {
        assert_eq!(unescape("&quot;x&quot; &amp;lt;"), "&quot;x&quot; &lt;");
    }

    #[test]
    fn attr_escape_covers_quotes() {
        assert_eq!(escape_attr("a\"b<c"), "a&quot;b&lt;c");
    }

    #[test]
    fn decode_named_and_numeric() {
        assert_eq!(decode_entities("&lt;b&gt; &amp; &quot;"), "<b> & \"");
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
    }

    #[test]
    fn decode_keeps_unknown_references() {
        assert_eq!(decode_entities("&bogus; & &;"), "&bogus; & &;");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }
}
