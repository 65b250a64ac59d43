use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use crate::markup::{RenderOptions, render_with_options};

/// Renders `raw` and cleans the result against the allow-list of everything
/// the transformer can emit.
pub fn render_sanitized(raw: &str, options: &RenderOptions) -> String {
    sanitize(&render_with_options(raw, options))
}

/// Cleans a rendered fragment. Links keep their target and get ammonia's
/// `rel="noopener noreferrer"`; only http(s) and mailto URLs survive.
pub fn sanitize(html: &str) -> String {
    let tags: HashSet<&'static str> = [
        "a",
        "blockquote",
        "code",
        "del",
        "em",
        "input",
        "label",
        "pre",
        "span",
        "strong",
    ]
    .iter()
    .copied()
    .collect();

    let mut generic_attributes: HashSet<&'static str> = HashSet::new();
    generic_attributes.insert("class");

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href", "target"].iter().copied().collect());
    // Checkboxes are display only.
    tag_attributes.insert(
        "input",
        ["type", "checked", "disabled"].iter().copied().collect(),
    );

    let url_schemes: HashSet<&'static str> = ["http", "https", "mailto"].iter().copied().collect();

    Builder::new()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .url_schemes(url_schemes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{render_sanitized, sanitize};
    use crate::markup::RenderOptions;

    #[test]
    fn rendered_markup_survives() {
        let html = render_sanitized("*hi* `x` ~y~", &RenderOptions::default());
        assert!(html.contains("<strong class=\"mrkdwn-bold\">hi</strong>"));
        assert!(html.contains("<code class=\"mrkdwn-code\">x</code>"));
        assert!(html.contains("<del class=\"mrkdwn-strike\">y</del>"));
    }

    #[test]
    fn links_keep_target_and_rel() {
        let html = render_sanitized("<https://x.com|go>", &RenderOptions::default());
        assert!(html.contains("href=\"https://x.com\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn checkboxes_stay_disabled() {
        let html = render_sanitized("- [x] done", &RenderOptions::default());
        assert!(html.contains("<input"));
        assert!(html.contains("disabled"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn foreign_markup_is_dropped() {
        let html = sanitize("<strong onclick=\"x()\">a</strong><script>alert(1)</script>");
        assert_eq!(html, "<strong>a</strong>");
    }

    #[test]
    fn highlighted_spans_keep_their_classes() {
        let html = render_sanitized("```py\npass\n```", &RenderOptions::default());
        assert!(html.contains("<span class=\"mrkdwn-hl-keyword\">pass</span>"));
        assert!(html.contains("<span class=\"mrkdwn-lang-label\">py</span>"));
    }
}
