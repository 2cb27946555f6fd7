//! Editable text held in an `xi_rope::Rope`.

use std::ops::Range;

use criticmarkup_live_engine::Span;
use xi_rope::Rope;
use xi_rope::delta::Builder;

pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn slice(&self, span: Span) -> String {
        let end = span.end.min(self.len());
        let start = span.start.min(end);
        self.rope.slice_to_cow(start..end).into_owned()
    }

    /// Replace `range` with `text` and return the offset just after it.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> usize {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        let mut builder = Builder::new(self.rope.len());
        builder.replace(start..end, Rope::from(text));
        let delta = builder.build();
        self.rope = delta.apply(&self.rope);

        start + text.len()
    }

    pub fn line_count(&self) -> usize {
        self.rope.line_of_offset(self.rope.len()) + 1
    }

    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.rope.line_of_offset(offset.min(self.len()))
    }

    /// Byte span of `line` without its line ending.
    pub fn line_span(&self, line: usize) -> Span {
        let line = line.min(self.line_count() - 1);
        let start = self.rope.offset_of_line(line);
        let next = if line + 1 < self.line_count() {
            self.rope.offset_of_line(line + 1)
        } else {
            self.len()
        };
        let raw = self.rope.slice_to_cow(start..next);
        let content = raw.trim_end_matches(['\n', '\r']);
        Span::new(start, start + content.len())
    }

    /// Span from the start of `first` up to the end of `last`, line endings
    /// included except on the last line of the document.
    pub fn lines_span(&self, first: usize, last: usize) -> Span {
        let start = self.rope.offset_of_line(first.min(self.line_count() - 1));
        let end = if last + 1 < self.line_count() {
            self.rope.offset_of_line(last + 1)
        } else {
            self.len()
        };
        Span::new(start, end)
    }

    pub fn prev_grapheme(&self, offset: usize) -> usize {
        self.rope.prev_grapheme_offset(offset).unwrap_or(0)
    }

    pub fn next_grapheme(&self, offset: usize) -> usize {
        self.rope
            .next_grapheme_offset(offset)
            .unwrap_or_else(|| self.len())
    }

    /// Column of `offset` in characters from the start of its line.
    pub fn column_of(&self, offset: usize) -> usize {
        let line = self.line_span(self.line_of_offset(offset));
        let offset = offset.clamp(line.start, line.end);
        self.slice(Span::new(line.start, offset)).chars().count()
    }

    /// Offset of `column` on `line`, clamped to the line's end.
    pub fn offset_at(&self, line: usize, column: usize) -> usize {
        let span = self.line_span(line);
        let text = self.slice(span);
        let within = text
            .char_indices()
            .nth(column)
            .map_or(text.len(), |(index, _)| index);
        span.start + within
    }
}
