use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::{decode_entities, escape};
use crate::markup::{has_markup_tokens, render};

const EDITED_MARKER: &str = "<span class=\"c-message__edited_label\"";

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("line break pattern is valid"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Message text recovered from a host element's inner HTML.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extracted {
    pub text: String,
    /// The "edited" marker, kept as markup so it can be appended again.
    pub trailing_html: String,
}

/// Recovers plain text from a rendered message body. Line breaks become
/// `\n`, non-breaking spaces become spaces, every other tag is dropped and
/// entities are decoded.
pub fn extract_text(html: &str) -> Extracted {
    let (body, trailing) = match html.find(EDITED_MARKER) {
        Some(at) => html.split_at(at),
        None => (html, ""),
    };
    let text = LINE_BREAK.replace_all(body, "\n");
    let text = text.replace("&nbsp;", " ");
    let text = TAG.replace_all(&text, "");
    Extracted {
        text: decode_entities(&text),
        trailing_html: trailing.to_string(),
    }
}

/// Runs one message body through the whole pipeline. Returns `None` when the
/// body has no markup or rendering would not change it.
pub fn format_message(html: &str) -> Option<String> {
    let Extracted {
        text,
        trailing_html,
    } = extract_text(html);
    if !has_markup_tokens(&text) {
        trace!("no markup tokens, leaving message alone");
        return None;
    }
    let rendered = render(&text);
    if rendered == escape(&text) {
        debug!("markup tokens found but nothing rendered");
        return None;
    }
    Some(rendered + &trailing_html)
}

#[cfg(test)]
mod tests {
    use super::{Extracted, extract_text, format_message};

    #[test]
    fn breaks_and_entities() {
        let got = extract_text("a<br>b<BR/>c&nbsp;d &amp; <b>e</b> &lt;f&gt;");
        assert_eq!(got.text, "a\nb\nc d & e <f>");
        assert_eq!(got.trailing_html, "");
    }

    #[test]
    fn attributed_breaks_become_newlines() {
        let got = extract_text(
            "a<br class=\"x\">b<br data-stringify-type=\"paragraph-break\"/>c<BR >d",
        );
        assert_eq!(got.text, "a\nb\nc\nd");
    }

    #[test]
    fn break_prefix_is_not_a_break() {
        assert_eq!(extract_text("a<bra>b").text, "ab");
    }

    #[test]
    fn edited_label_is_split_off() {
        let html = "*hi*<span class=\"c-message__edited_label\">(edited)</span>";
        assert_eq!(
            extract_text(html),
            Extracted {
                text: "*hi*".to_string(),
                trailing_html: "<span class=\"c-message__edited_label\">(edited)</span>"
                    .to_string(),
            }
        );
    }

    #[test]
    fn plain_messages_are_left_alone() {
        assert_eq!(format_message("hello there"), None);
        // Tokens that do not render, such as an intra-word pair.
        assert_eq!(format_message("a*b*c"), None);
    }

    #[test]
    fn formatted_messages_keep_the_edited_label() {
        let html = "*hi*<span class=\"c-message__edited_label\"> (edited)</span>";
        assert_eq!(
            format_message(html).as_deref(),
            Some(
                "<strong class=\"mrkdwn-bold\">hi</strong>\
                 <span class=\"c-message__edited_label\"> (edited)</span>"
            )
        );
    }

    #[test]
    fn links_survive_the_host_escaping() {
        let html = format_message("see &lt;https://x.com|docs&gt;").unwrap_or_default();
        assert!(html.starts_with("see <a class=\"mrkdwn-link\" href=\"https://x.com\""));
    }
}
