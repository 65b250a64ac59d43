use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::{escape, escape_attr, unescape};
use crate::highlight::highlight;
use crate::segment::{Guard, Matched, Segment, Segments};

/// Switches for [`render_with_options`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    /// Run fenced code through the highlighter. When off, code bodies are
    /// emitted escaped.
    pub highlight_code: bool,
    /// Show the fence tag as a label on top of the code block.
    pub language_label: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_code: true,
            language_label: true,
        }
    }
}

/// The transformer's rewrite rules in the order they run. A rule never sees
/// the inside of anything an earlier rule finished, so code is protected
/// from every emphasis rule and so on down the list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarkupRule {
    FencedCode,
    InlineCode,
    UncheckedBox,
    CheckedBox,
    Bold,
    Italic,
    Strikethrough,
    LabeledLink,
    BareLink,
    Blockquote,
}

impl MarkupRule {
    pub const ALL: [MarkupRule; 10] = [
        MarkupRule::FencedCode,
        MarkupRule::InlineCode,
        MarkupRule::UncheckedBox,
        MarkupRule::CheckedBox,
        MarkupRule::Bold,
        MarkupRule::Italic,
        MarkupRule::Strikethrough,
        MarkupRule::LabeledLink,
        MarkupRule::BareLink,
        MarkupRule::Blockquote,
    ];

    /// The pattern, written against escaped text.
    pub fn pattern(self) -> &'static str {
        match self {
            // A tag only counts when the fence line ends right after it.
            MarkupRule::FencedCode => r"(?s)```(?:(\w+)[ \t]*\r?\n|\r?\n)?(.*?)```",
            MarkupRule::InlineCode => r"`([^`\n]+)`",
            MarkupRule::UncheckedBox => r"(?m)^([ \t]*)-[ \t]?\[ \][ \t]?(.*)$",
            MarkupRule::CheckedBox => r"(?m)^([ \t]*)-[ \t]?\[[xX]\][ \t]?(.*)$",
            MarkupRule::Bold => r"\*([^*\n]+)\*",
            MarkupRule::Italic => r"_([^_\n]+)_",
            MarkupRule::Strikethrough => r"~([^~\n]+)~",
            MarkupRule::LabeledLink => r"&lt;(https?://[^|&\s]+)\|([^&\n]+)&gt;",
            MarkupRule::BareLink => r"&lt;(https?://[^&\s]+)&gt;",
            MarkupRule::Blockquote => r"(?m)^&gt;[ \t]?(.+)$",
        }
    }

    fn guard(self) -> Guard {
        match self {
            MarkupRule::Bold | MarkupRule::Italic | MarkupRule::Strikethrough => Guard::Delimited,
            _ => Guard::None,
        }
    }

    fn regex(self) -> &'static Regex {
        &RULE_REGEXES[self as usize]
    }

    fn rewrite(self, m: &Matched<'_>, options: &RenderOptions) -> Option<Vec<Segment>> {
        match self {
            MarkupRule::FencedCode => Some(vec![Segment::Html(code_block(m, options))]),
            MarkupRule::InlineCode => Some(vec![Segment::Html(format!(
                "<code class=\"mrkdwn-code\">{}</code>",
                m.html(1)
            ))]),
            MarkupRule::UncheckedBox => Some(checkbox(m, false)),
            MarkupRule::CheckedBox => Some(checkbox(m, true)),
            MarkupRule::Bold => Some(wrap(m, 1, "<strong class=\"mrkdwn-bold\">", "</strong>")),
            MarkupRule::Italic => Some(wrap(m, 1, "<em class=\"mrkdwn-italic\">", "</em>")),
            MarkupRule::Strikethrough => {
                Some(wrap(m, 1, "<del class=\"mrkdwn-strike\">", "</del>"))
            }
            MarkupRule::LabeledLink => link(m, 2),
            MarkupRule::BareLink => link(m, 1),
            MarkupRule::Blockquote => Some(wrap(
                m,
                1,
                "<blockquote class=\"mrkdwn-quote\">",
                "</blockquote>",
            )),
        }
    }
}

static RULE_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    MarkupRule::ALL
        .iter()
        .map(|rule| Regex::new(rule.pattern()).expect("markup pattern is valid"))
        .collect()
});

static MARKUP_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)\*[^*\n]+\*|_[^_\n]+_|~[^~\n]+~|`[^`\n]+`|(?s:```.*?```)|^>|<https?://|-\s?\[[ xX]\]",
    )
    .expect("markup token pattern is valid")
});

/// Cheap pre-check: does `text` contain anything [`render`] would convert?
pub fn has_markup_tokens(text: &str) -> bool {
    MARKUP_TOKENS.is_match(text)
}

/// Converts message text to markup with the default options.
pub fn render(raw: &str) -> String {
    render_with_options(raw, &RenderOptions::default())
}

pub fn render_with_options(raw: &str, options: &RenderOptions) -> String {
    let mut segments = Segments::from_text(escape(raw));
    for rule in MarkupRule::ALL {
        let hits = segments.apply(rule.regex(), rule.guard(), |m| rule.rewrite(m, options));
        if hits > 0 {
            trace!("{:?} rewrote {} span(s)", rule, hits);
        }
    }
    segments.into_html()
}

fn wrap(m: &Matched<'_>, group: usize, open: &str, close: &str) -> Vec<Segment> {
    let mut out = vec![Segment::Html(open.to_string())];
    out.extend(m.segments(group));
    out.push(Segment::Html(close.to_string()));
    out
}

fn code_block(m: &Matched<'_>, options: &RenderOptions) -> String {
    let lang = m.text(1).unwrap_or("");
    let source = unescape(&m.html(2));
    let source = source.trim();
    let body = if options.highlight_code {
        let hint = lang.to_ascii_lowercase();
        highlight(source, Some(hint.as_str()).filter(|hint| !hint.is_empty()))
    } else {
        escape(source)
    };
    let label = if options.language_label && !lang.is_empty() {
        format!("<span class=\"mrkdwn-lang-label\">{}</span>", lang)
    } else {
        String::new()
    };
    format!(
        "<pre class=\"mrkdwn-pre\">{}<code class=\"mrkdwn-code-block\">{}</code></pre>",
        label, body
    )
}

fn checkbox(m: &Matched<'_>, checked: bool) -> Vec<Segment> {
    let (input, box_class, label_class) = if checked {
        (
            "<input type=\"checkbox\" checked disabled />",
            "mrkdwn-cb-box mrkdwn-cb-checked",
            "mrkdwn-cb-label mrkdwn-cb-done",
        )
    } else {
        (
            "<input type=\"checkbox\" disabled />",
            "mrkdwn-cb-box",
            "mrkdwn-cb-label",
        )
    };
    let mut out = m.segments(1);
    out.push(Segment::Html(format!(
        "<label class=\"mrkdwn-checkbox\">{}<span class=\"{}\"></span><span class=\"{}\">",
        input, box_class, label_class
    )));
    out.extend(m.segments(2));
    out.push(Segment::Html("</span></label>".to_string()));
    out
}

fn link(m: &Matched<'_>, label_group: usize) -> Option<Vec<Segment>> {
    // A URL reaching across a finished fragment cannot become an attribute.
    if !m.is_plain(1) {
        return None;
    }
    let url = m.text(1)?;
    let mut out = vec![Segment::Html(format!(
        "<a class=\"mrkdwn-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
        escape_attr(url)
    ))];
    out.extend(m.segments(label_group));
    out.push(Segment::Html("</a>".to_string()));
    Some(out)
}
