use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lang::Language;

/// Shape heuristics, tried in order against the trimmed snippet. The first
/// hit wins.
const HEURISTICS: &[(Language, &str)] = &[
    (
        Language::JavaScript,
        r"^(?:(?:import|export|const|let|var|function)\b|=>|async\s)",
    ),
    (
        Language::Python,
        r"^(?:def |class |import |from |print\(|if __name__)",
    ),
    (
        Language::Rust,
        r"^(?:fn |let\s+mut|impl |use\s|pub\s|struct\s|enum\s|mod\s)",
    ),
    (Language::Go, r"^(?:func |package |import\s*\(|go\s|defer\s|chan\s)"),
    (
        Language::Java,
        r"^(?:public\s+class|private\s|protected\s|@Override|System\.)",
    ),
    (
        Language::Sql,
        r"(?i)^(?:SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER|DROP)\s",
    ),
    (Language::Bash, r"^(?:\$|#!/|echo |export |source |alias )"),
    (
        Language::Html,
        r"(?i)^(?:<!DOCTYPE|<html|<div|<span|<head|<body)",
    ),
    (Language::Json, r#"^\{\s*""#),
];

static COMPILED: Lazy<Vec<(Language, Regex)>> = Lazy::new(|| {
    HEURISTICS
        .iter()
        .map(|(language, pattern)| {
            let regex = Regex::new(pattern).expect("detection pattern is valid");
            (*language, regex)
        })
        .collect()
});

static CSS_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[{};]").expect("css punctuation pattern is valid"));
static CSS_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*[^;]+;").expect("css declaration pattern is valid"));

/// Guesses the language of an untagged snippet. Best effort and
/// deterministic; anything unrecognised is treated as JavaScript.
pub fn detect_language(code: &str) -> Language {
    let trimmed = code.trim();
    let language = COMPILED
        .iter()
        .find(|(_, regex)| regex.is_match(trimmed))
        .map(|(language, _)| *language)
        .or_else(|| {
            (CSS_PUNCTUATION.is_match(trimmed) && CSS_DECLARATION.is_match(trimmed))
                .then_some(Language::Css)
        })
        .unwrap_or(Language::JavaScript);
    trace!("detected {} for untagged snippet", language);
    language
}
