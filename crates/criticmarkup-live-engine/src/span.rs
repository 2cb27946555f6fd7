//! Byte ranges shared by the parser seam, the host seam and decorations.

/// A byte range `[start, end)` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Shift both ends by `by` bytes.
    #[must_use]
    pub fn offset(self, by: usize) -> Self {
        Self::new(self.start + by, self.end + by)
    }

    /// True if `other` lies entirely inside this span.
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One cursor or selection, normalised so that `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

impl SelectionRange {
    /// A selection between `anchor` and `head`, in either direction.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self {
            from: anchor.min(head),
            to: anchor.max(head),
        }
    }

    /// A zero-width cursor.
    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn is_cursor(self) -> bool {
        self.from == self.to
    }
}

/// All cursors and selections of a view, ordered by `from`.
///
/// An empty selection is allowed; it means nothing is selected or focused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
}

impl Selection {
    pub fn new(ranges: impl IntoIterator<Item = SelectionRange>) -> Self {
        let mut ranges: Vec<_> = ranges.into_iter().collect();
        ranges.sort();
        Self { ranges }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(range: SelectionRange) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::single(SelectionRange::cursor(pos))
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }
}

/// A byte range the host is currently drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    pub from: usize,
    pub to: usize,
}

impl VisibleRange {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_empty() {
        assert_eq!(Span::new(3, 8).len(), 5);
        assert!(Span::new(4, 4).is_empty());
        // Inverted spans are empty rather than underflowing
        assert!(Span::new(9, 2).is_empty());
    }

    #[test]
    fn span_offset_moves_both_ends() {
        assert_eq!(Span::new(0, 3).offset(10), Span::new(10, 13));
    }

    #[test]
    fn span_contains() {
        let outer = Span::new(0, 14);
        assert!(outer.contains(Span::new(6, 8)));
        assert!(outer.contains(outer));
        assert!(!outer.contains(Span::new(12, 15)));
    }

    #[test]
    fn selection_range_normalises_direction() {
        assert_eq!(SelectionRange::new(9, 2), SelectionRange { from: 2, to: 9 });
        assert!(SelectionRange::cursor(4).is_cursor());
    }

    #[test]
    fn selection_orders_ranges() {
        let selection = Selection::new([SelectionRange::cursor(20), SelectionRange::new(5, 1)]);
        assert_eq!(
            selection.ranges(),
            &[SelectionRange::new(1, 5), SelectionRange::cursor(20)]
        );
    }

    #[test]
    fn empty_selection_has_no_ranges() {
        assert!(Selection::empty().ranges().is_empty());
    }
}
