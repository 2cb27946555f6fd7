use crate::span::Selection;

/// Returns true if any selection range touches the closed interval
/// `[from, to]`.
///
/// Touching counts: a cursor sitting exactly on either boundary of an
/// annotation overlaps it, so the raw markup is revealed as soon as the cursor
/// reaches a fence.
pub fn overlaps(selection: &Selection, from: usize, to: usize) -> bool {
    selection
        .ranges()
        .iter()
        .any(|range| range.from <= to && range.to >= from)
}
