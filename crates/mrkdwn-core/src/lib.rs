mod detect;
mod entities;
mod escape;
mod extract;
mod highlight;
mod lang;
mod markup;
mod sanitize;
mod segment;
mod span;

pub use detect::detect_language;
pub use escape::{decode_entities, escape, escape_attr, unescape};
pub use extract::{Extracted, extract_text, format_message};
pub use highlight::{HighlightPass, TokenKind, highlight, highlight_as, passes_for};
pub use lang::{Language, LanguageDefinition, LineComment, SingleQuote, resolve_language};
pub use markup::{MarkupRule, RenderOptions, has_markup_tokens, render, render_with_options};
pub use sanitize::{render_sanitized, sanitize};
pub use segment::{Guard, Matched, Segment, Segments};
pub use span::Span;
