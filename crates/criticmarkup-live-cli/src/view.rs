//! The terminal's side of the engine's host seam.

use criticmarkup_live_engine::{DocumentText, EditorView, Selection, SelectionRange, VisibleRange};
use ratatui::layout::Rect;

use crate::buffer::Buffer;
use crate::screen::Row;

/// Buffer, cursor and scroll position of the one open document.
pub struct ViewState {
    pub buffer: Buffer,
    anchor: usize,
    head: usize,
    selection: Selection,
    top_line: usize,
    area: Rect,
    visible: Vec<VisibleRange>,
    /// Rows last laid out for `area`, used for hit-testing.
    pub rows: Vec<Row>,
}

impl ViewState {
    pub fn new(buffer: Buffer, area: Rect) -> Self {
        let mut view = Self {
            buffer,
            anchor: 0,
            head: 0,
            selection: Selection::cursor(0),
            top_line: 0,
            area,
            visible: Vec::new(),
            rows: Vec::new(),
        };
        view.refresh_visible();
        view
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn selected(&self) -> SelectionRange {
        SelectionRange::new(self.anchor, self.head)
    }

    /// Move the cursor, extending the selection when `extend` is set.
    /// Returns true if the selection changed.
    pub fn set_cursor(&mut self, pos: usize, extend: bool) -> bool {
        let pos = pos.min(self.buffer.len());
        let before = (self.anchor, self.head);
        self.head = pos;
        if !extend {
            self.anchor = pos;
        }
        self.selection = Selection::single(SelectionRange::new(self.anchor, self.head));
        before != (self.anchor, self.head)
    }

    /// Replace the selection with `text`, leaving a cursor after it.
    pub fn replace_selection(&mut self, text: &str) {
        let range = self.selected();
        let after = self.buffer.replace(range.from..range.to, text);
        self.set_cursor(after, false);
    }

    /// Delete the selection, or the grapheme before the cursor.
    pub fn delete_backward(&mut self) -> bool {
        let range = self.selected();
        let from = if range.is_cursor() {
            self.buffer.prev_grapheme(range.from)
        } else {
            range.from
        };
        if from == range.to {
            return false;
        }
        self.buffer.replace(from..range.to, "");
        self.set_cursor(from, false);
        true
    }

    /// Delete the selection, or the grapheme after the cursor.
    pub fn delete_forward(&mut self) -> bool {
        let range = self.selected();
        let to = if range.is_cursor() {
            self.buffer.next_grapheme(range.to)
        } else {
            range.to
        };
        if to == range.from {
            return false;
        }
        self.buffer.replace(range.from..to, "");
        self.set_cursor(range.from, false);
        true
    }

    pub fn cursor_line_offset(&self, lines: isize) -> usize {
        let line = self.buffer.line_of_offset(self.head);
        let column = self.buffer.column_of(self.head);
        let target = line
            .saturating_add_signed(lines)
            .min(self.buffer.line_count() - 1);
        self.buffer.offset_at(target, column)
    }

    /// Resize the text area. Returns true if the visible ranges moved.
    pub fn resize(&mut self, area: Rect) -> bool {
        self.area = area;
        self.scroll_to_cursor();
        self.refresh_visible()
    }

    /// Scroll so the cursor line is on screen and recompute the visible
    /// ranges. Returns true if they moved.
    pub fn follow_cursor(&mut self) -> bool {
        self.scroll_to_cursor();
        self.refresh_visible()
    }

    fn scroll_to_cursor(&mut self) {
        let line = self.buffer.line_of_offset(self.head);
        let height = usize::from(self.area.height.max(1));
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + height {
            self.top_line = line + 1 - height;
        }
    }

    /// Recompute the visible byte range from the lines on screen.
    pub fn refresh_visible(&mut self) -> bool {
        let height = usize::from(self.area.height.max(1));
        let span = self
            .buffer
            .lines_span(self.top_line, self.top_line + height - 1);
        let visible = vec![VisibleRange::new(span.start, span.end)];
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }
}

impl EditorView for ViewState {
    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn visible_ranges(&self) -> &[VisibleRange] {
        &self.visible
    }

    fn doc(&self) -> &dyn DocumentText {
        self.buffer.rope()
    }

    /// Terminal cell to document offset. Past the end of a row maps to the
    /// row's end; widget cells map to the start of the text they hide.
    fn pos_at_coords(&self, x: f64, y: f64) -> Option<usize> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as u16, y as u16);
        if !self.area.contains((x, y).into()) {
            return None;
        }
        let row = self.rows.get(usize::from(y - self.area.y))?;
        let column = usize::from(x - self.area.x);
        Some(row.cells.get(column).map_or(row.end, |cell| cell.offset))
    }
}
