use regex::{Captures, Regex};

use crate::span::Span;

/// Stands in for a finished fragment inside the matching view. It is neither
/// alphanumeric nor a line break, so anchors, `\b` and the boundary guards
/// treat a fragment like the tag punctuation it will become.
pub(crate) const SENTINEL: char = '\u{fffc}';

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Escaped text that later passes may still rewrite.
    Text(String),
    /// A finished fragment. No later pass can match inside it.
    Html(String),
}

/// Extra conditions on the characters around a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Guard {
    None,
    /// Not preceded by an ASCII alphanumeric or a backslash, not followed by
    /// an ASCII alphanumeric.
    Delimited,
}

impl Guard {
    fn allows(self, view: &str, span: Span) -> bool {
        match self {
            Guard::None => true,
            Guard::Delimited => {
                let before = view[..span.start].chars().next_back();
                let after = view[span.end..].chars().next();
                !before.is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '\\')
                    && !after.is_some_and(|ch| ch.is_ascii_alphanumeric())
            }
        }
    }
}

/// An ordered list of text and finished fragments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Segments {
    items: Vec<Segment>,
}

impl Segments {
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut segments = Self::default();
        segments.push(Segment::Text(text.into()));
        segments
    }

    pub fn items(&self) -> &[Segment] {
        &self.items
    }

    pub fn push(&mut self, segment: Segment) {
        match (self.items.last_mut(), segment) {
            (_, Segment::Text(text)) if text.is_empty() => {}
            (Some(Segment::Text(last)), Segment::Text(text)) => last.push_str(&text),
            (_, segment) => self.items.push(segment),
        }
    }

    pub fn extend(&mut self, segments: impl IntoIterator<Item = Segment>) {
        for segment in segments {
            self.push(segment);
        }
    }

    /// Concatenates every segment into the final markup.
    pub fn into_html(self) -> String {
        let mut out = String::new();
        for segment in self.items {
            match segment {
                Segment::Text(text) | Segment::Html(text) => out.push_str(&text),
            }
        }
        out
    }

    /// Runs `regex` over the text with every fragment collapsed to one
    /// sentinel and splices in whatever `rewrite` returns. A match that fails
    /// the guard or that `rewrite` declines is retried one character later,
    /// which is how a look-behind engine would scan. Returns the number of
    /// rewritten matches.
    pub fn apply<F>(&mut self, regex: &Regex, guard: Guard, mut rewrite: F) -> usize
    where
        F: FnMut(&Matched<'_>) -> Option<Vec<Segment>>,
    {
        let mut out = Segments::default();
        let mut hits = 0;
        {
            let view = View::build(&self.items);
            let mut last = 0;
            let mut pos = 0;

            while pos <= view.text.len() {
                let Some(caps) = regex.captures_at(&view.text, pos) else {
                    break;
                };
                let Some(whole) = caps.get(0) else {
                    break;
                };
                let span = Span::new(whole.start(), whole.end());
                let replacement = if guard.allows(&view.text, span) {
                    rewrite(&Matched {
                        caps: &caps,
                        view: &view,
                    })
                } else {
                    None
                };

                match replacement {
                    Some(segments) => {
                        out.extend(view.slice(Span::new(last, span.start)));
                        out.extend(segments);
                        last = span.end;
                        hits += 1;
                        pos = if span.is_empty() {
                            next_boundary(&view.text, span.end)
                        } else {
                            span.end
                        };
                    }
                    None => pos = next_boundary(&view.text, span.start),
                }
            }

            if hits > 0 {
                out.extend(view.slice(Span::new(last, view.text.len())));
            }
        }
        if hits > 0 {
            self.items = out.items;
        }
        hits
    }
}

fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |ch| pos + ch.len_utf8())
}

/// The string a pass actually matches against, plus where each segment sits
/// inside it.
struct View<'a> {
    text: String,
    items: &'a [Segment],
    starts: Vec<usize>,
}

impl<'a> View<'a> {
    fn build(items: &'a [Segment]) -> Self {
        let mut text = String::new();
        let mut starts = Vec::with_capacity(items.len());
        for item in items {
            starts.push(text.len());
            match item {
                Segment::Text(value) => text.push_str(value),
                Segment::Html(_) => text.push(SENTINEL),
            }
        }
        Self {
            text,
            items,
            starts,
        }
    }

    fn slice(&self, span: Span) -> Vec<Segment> {
        let mut out = Vec::new();
        if span.is_empty() {
            return out;
        }
        // Segments ending before the span can be skipped outright.
        let first = self
            .starts
            .partition_point(|&start| start <= span.start)
            .saturating_sub(1);
        for (item, &start) in self.items[first..].iter().zip(&self.starts[first..]) {
            if start >= span.end {
                break;
            }
            match item {
                Segment::Text(value) => {
                    let own = Span::new(start, start + value.len());
                    if let Some(overlap) = own.intersect(span) {
                        out.push(Segment::Text(
                            value[overlap.start - start..overlap.end - start].to_string(),
                        ));
                    }
                }
                Segment::Html(value) => {
                    if span.covers(start, SENTINEL.len_utf8()) {
                        out.push(Segment::Html(value.clone()));
                    }
                }
            }
        }
        out
    }
}

/// One accepted match, resolved back to segments.
pub struct Matched<'a> {
    caps: &'a Captures<'a>,
    view: &'a View<'a>,
}

impl Matched<'_> {
    /// The matched view text of group `index`. Fragments show up as
    /// sentinels, so this is only meaningful for plain groups.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.caps.get(index).map(|group| group.as_str())
    }

    /// The segments covered by group `index`; empty when the group did not
    /// take part in the match.
    pub fn segments(&self, index: usize) -> Vec<Segment> {
        self.caps
            .get(index)
            .map(|group| self.view.slice(Span::new(group.start(), group.end())))
            .unwrap_or_default()
    }

    /// Group `index` flattened to markup, fragments included.
    pub fn html(&self, index: usize) -> String {
        let mut segments = Segments::default();
        segments.extend(self.segments(index));
        segments.into_html()
    }

    /// Whether group `index` covers text only.
    pub fn is_plain(&self, index: usize) -> bool {
        self.segments(index)
            .iter()
            .all(|segment| matches!(segment, Segment::Text(_)))
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::{Guard, Segment, Segments};

    fn wrap(tag: &str, inner: String) -> Vec<Segment> {
        vec![Segment::Html(format!("<{}>{}</{}>", tag, inner, tag))]
    }

    #[test]
    fn later_passes_skip_finished_fragments() {
        let mut segments = Segments::from_text("`*a*` and *b*");
        let code = Regex::new(r"`([^`]+)`").unwrap();
        let bold = Regex::new(r"\*([^*]+)\*").unwrap();

        assert_eq!(segments.apply(&code, Guard::None, |m| Some(wrap("code", m.html(1)))), 1);
        assert_eq!(segments.apply(&bold, Guard::None, |m| Some(wrap("b", m.html(1)))), 1);
        assert_eq!(segments.into_html(), "<code>*a*</code> and <b>b</b>");
    }

    #[test]
    fn matches_may_span_fragments() {
        let mut segments = Segments::from_text("*x `y` z*");
        let code = Regex::new(r"`([^`]+)`").unwrap();
        let bold = Regex::new(r"\*([^*]+)\*").unwrap();

        segments.apply(&code, Guard::None, |m| Some(wrap("code", m.html(1))));
        segments.apply(&bold, Guard::None, |m| {
            let mut out = vec![Segment::Html("<b>".to_string())];
            out.extend(m.segments(1));
            out.push(Segment::Html("</b>".to_string()));
            Some(out)
        });
        assert_eq!(segments.into_html(), "<b>x <code>y</code> z</b>");
    }

    #[test]
    fn sentinel_text_in_input_is_not_a_fragment() {
        let input = "a \u{fffc} b";
        let mut segments = Segments::from_text(input);
        let any = Regex::new(r"\u{fffc}").unwrap();

        segments.apply(&any, Guard::None, |m| Some(wrap("i", m.html(0))));
        assert_eq!(segments.into_html(), "a <i>\u{fffc}</i> b");
    }

    #[test]
    fn delimited_guard_retries_one_character_later() {
        let mut segments = Segments::from_text("a*b* *c*");
        let bold = Regex::new(r"\*([^*\n]+)\*").unwrap();

        let hits = segments.apply(&bold, Guard::Delimited, |m| Some(wrap("b", m.html(1))));
        assert_eq!(hits, 1);
        assert_eq!(segments.into_html(), "a*b* <b>c</b>");
    }

    #[test]
    fn slices_resolve_late_in_long_lists() {
        let source = "`c` ".repeat(500) + "*end*";
        let mut segments = Segments::from_text(source);
        let code = Regex::new(r"`([^`]+)`").unwrap();
        let bold = Regex::new(r"\*([^*]+)\*").unwrap();

        assert_eq!(segments.apply(&code, Guard::None, |m| Some(wrap("code", m.html(1)))), 500);
        assert_eq!(segments.items().len(), 1000);
        assert_eq!(segments.apply(&bold, Guard::None, |m| Some(wrap("b", m.html(1)))), 1);
        let html = segments.into_html();
        assert!(html.starts_with("<code>c</code> <code>c</code> "));
        assert!(html.ends_with("<code>c</code> <b>end</b>"));
    }

    #[test]
    fn declined_matches_leave_text_untouched() {
        let mut segments = Segments::from_text("keep this");
        let word = Regex::new(r"\w+").unwrap();

        assert_eq!(segments.apply(&word, Guard::None, |_| None), 0);
        assert_eq!(segments.items(), &[Segment::Text("keep this".to_string())]);
    }
}
