//! Read-only access to document text.

use std::borrow::Cow;

use xi_rope::Rope;

/// The document buffer as the engine sees it: a length and substrings.
///
/// `slice` returns `None` instead of panicking when the range is inverted,
/// runs past the end, or splits a character.
pub trait DocumentText {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slice(&self, from: usize, to: usize) -> Option<Cow<'_, str>>;
}

impl DocumentText for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn slice(&self, from: usize, to: usize) -> Option<Cow<'_, str>> {
        self.get(from..to).map(Cow::Borrowed)
    }
}

impl DocumentText for String {
    fn len(&self) -> usize {
        String::len(self)
    }

    fn slice(&self, from: usize, to: usize) -> Option<Cow<'_, str>> {
        self.as_str().slice(from, to)
    }
}

impl DocumentText for Rope {
    fn len(&self) -> usize {
        Rope::len(self)
    }

    fn slice(&self, from: usize, to: usize) -> Option<Cow<'_, str>> {
        if from > to || to > Rope::len(self) {
            return None;
        }
        // slice_to_cow panics inside a character
        if !self.is_codepoint_boundary(from) || !self.is_codepoint_boundary(to) {
            return None;
        }
        Some(self.slice_to_cow(from..to))
    }
}
