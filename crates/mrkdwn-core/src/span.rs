/// A byte range into the matching view of a segment list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted span {}..{}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `[start, start + len)` lies entirely inside this span.
    pub fn covers(&self, start: usize, len: usize) -> bool {
        self.start <= start && start + len <= self.end
    }

    /// The overlap of two spans, if they share at least one byte.
    pub fn intersect(&self, other: Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then(|| Span::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn intersect_requires_overlap() {
        let span = Span::new(2, 6);
        assert_eq!(span.intersect(Span::new(4, 9)), Some(Span::new(4, 6)));
        assert_eq!(span.intersect(Span::new(6, 9)), None);
        assert!(span.covers(2, 4));
        assert!(!span.covers(5, 3));
    }
}
