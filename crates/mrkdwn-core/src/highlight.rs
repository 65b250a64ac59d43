use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::detect::detect_language;
use crate::escape::escape;
use crate::lang::{Language, LanguageDefinition, LineComment, SingleQuote, resolve_language};
use crate::segment::{Guard, Segment, Segments};

/// Lexical classes the highlighter emits, one CSS class each.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    String,
    Comment,
    Number,
    Boolean,
    Keyword,
    Builtin,
    Decorator,
}

impl TokenKind {
    pub fn class(self) -> &'static str {
        match self {
            TokenKind::String => "mrkdwn-hl-string",
            TokenKind::Comment => "mrkdwn-hl-comment",
            TokenKind::Number => "mrkdwn-hl-number",
            TokenKind::Boolean => "mrkdwn-hl-boolean",
            TokenKind::Keyword => "mrkdwn-hl-keyword",
            TokenKind::Builtin => "mrkdwn-hl-builtin",
            TokenKind::Decorator => "mrkdwn-hl-decorator",
        }
    }
}

const DOUBLE_QUOTED: &str = r#""(?:[^"\\]|\\.)*""#;
const SINGLE_QUOTED: &str = r"'(?:[^'\\]|\\.)*'";
const CHAR_LITERAL: &str = r"'(?:\\[^'\n]{1,8}|[^'\\\n])'";
const TEMPLATE: &str = r"`(?:[^`\\]|\\.)*`";
const TRIPLE_QUOTED: &str = r#"(?s)""".*?"""|'''.*?'''"#;
const BLOCK_COMMENT: &str = r"(?s)/\*.*?\*/";
// The first group of a prefixed comment is handed back untouched.
const HASH_COMMENT: &str = r"(?m)(^|\s)(#.*)$";
const SLASH_COMMENT: &str = r"(?m)(^|[^:])(//.*)$";
const DASH_COMMENT: &str = r"(?m)--.*$";
const NUMBER: &str = r"\b(?:0[xXoObB][0-9a-fA-F_]+|[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?)\b";
const JSON_NUMBER: &str = r"-?\b[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b";
const DECORATOR: &str = r"@\w+";

/// One step of a language's highlighting table.
#[derive(Debug)]
pub struct HighlightPass {
    pub kind: TokenKind,
    regex: Regex,
    /// The match carries a leading context group that is not part of the token.
    prefixed: bool,
}

impl HighlightPass {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("highlight pattern is valid"),
            prefixed: false,
        }
    }

    fn prefixed(kind: TokenKind, pattern: &str) -> Self {
        Self {
            prefixed: true,
            ..Self::new(kind, pattern)
        }
    }

    fn words(kind: TokenKind, words: &[&str], case_insensitive: bool) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        let alternation = words
            .iter()
            .map(|word| regex::escape(word))
            .collect::<Vec<_>>()
            .join("|");
        let flags = if case_insensitive { "(?i)" } else { "" };
        Some(Self::new(kind, &format!(r"{}\b(?:{})\b", flags, alternation)))
    }

    fn run(&self, segments: &mut Segments) -> usize {
        segments.apply(&self.regex, Guard::None, |m| {
            let mut out = Vec::with_capacity(2);
            let token = if self.prefixed {
                out.extend(m.segments(1));
                m.html(2)
            } else {
                m.html(0)
            };
            out.push(Segment::Html(wrap_token(self.kind, &token)));
            Some(out)
        })
    }
}

fn wrap_token(kind: TokenKind, html: &str) -> String {
    format!("<span class=\"{}\">{}</span>", kind.class(), html)
}

/// Builds the ordered pass table for a language. Strings and comments come
/// before everything else so nothing inside them is re-coloured, and
/// keywords come before builtins so a name in both lists stays a keyword.
pub fn highlight_passes(definition: &LanguageDefinition) -> Vec<HighlightPass> {
    let mut passes = Vec::new();

    if definition.triple_quoted_strings {
        passes.push(HighlightPass::new(TokenKind::String, TRIPLE_QUOTED));
    }
    passes.push(HighlightPass::new(TokenKind::String, DOUBLE_QUOTED));
    passes.push(HighlightPass::new(
        TokenKind::String,
        match definition.single_quote {
            SingleQuote::String => SINGLE_QUOTED,
            SingleQuote::Char => CHAR_LITERAL,
        },
    ));
    if definition.template_strings {
        passes.push(HighlightPass::new(TokenKind::String, TEMPLATE));
    }

    passes.push(HighlightPass::new(TokenKind::Comment, BLOCK_COMMENT));
    for style in definition.line_comments {
        passes.push(match style {
            LineComment::Hash => HighlightPass::prefixed(TokenKind::Comment, HASH_COMMENT),
            LineComment::DoubleSlash => HighlightPass::prefixed(TokenKind::Comment, SLASH_COMMENT),
            LineComment::DoubleDash => HighlightPass::new(TokenKind::Comment, DASH_COMMENT),
        });
    }

    passes.push(HighlightPass::new(TokenKind::Number, NUMBER));
    let ci = definition.case_insensitive;
    passes.extend(HighlightPass::words(TokenKind::Boolean, definition.literals, ci));
    passes.extend(HighlightPass::words(TokenKind::Keyword, definition.keywords, ci));
    passes.extend(HighlightPass::words(TokenKind::Builtin, definition.builtins, ci));
    passes.push(HighlightPass::new(TokenKind::Decorator, DECORATOR));
    passes
}

fn json_passes() -> Vec<HighlightPass> {
    vec![
        HighlightPass::new(TokenKind::String, DOUBLE_QUOTED),
        HighlightPass::new(TokenKind::Number, JSON_NUMBER),
        HighlightPass::new(TokenKind::Boolean, r"\b(?:true|false|null)\b"),
    ]
}

static PASSES: Lazy<HashMap<Language, Vec<HighlightPass>>> = Lazy::new(|| {
    Language::ALL
        .into_iter()
        .map(|language| {
            let passes = match language {
                Language::Json => json_passes(),
                _ => highlight_passes(language.definition()),
            };
            (language, passes)
        })
        .collect()
});

/// The pass table used for `language`.
pub fn passes_for(language: Language) -> &'static [HighlightPass] {
    PASSES.get(&language).map(Vec::as_slice).unwrap_or_default()
}

/// Highlights `code` and returns escaped markup. A hint is resolved through
/// the alias table; without one the language is guessed. A hint naming no
/// known language yields the escaped code with no highlighting.
pub fn highlight(code: &str, lang_hint: Option<&str>) -> String {
    let hint = lang_hint.map(str::trim).filter(|hint| !hint.is_empty());
    let language = match hint {
        Some(hint) => match resolve_language(hint) {
            Some(language) => language,
            None => {
                debug!("no highlighter for {:?}, emitting plain code", hint);
                return escape(code);
            }
        },
        None => detect_language(code),
    };
    highlight_as(code, language)
}

/// Highlights `code` as `language`, skipping resolution and detection.
pub fn highlight_as(code: &str, language: Language) -> String {
    let mut segments = Segments::from_text(escape(code));
    for pass in passes_for(language) {
        pass.run(&mut segments);
    }
    segments.into_html()
}
