//! The host surface as seen by the engine.

use crate::document::DocumentText;
use crate::span::{Selection, VisibleRange};
use crate::widget::CursorSetter;

/// Read-only view state owned by the host.
pub trait EditorView {
    fn selection(&self) -> &Selection;

    /// Disjoint byte ranges currently drawn, in document order.
    fn visible_ranges(&self) -> &[VisibleRange];

    fn doc(&self) -> &dyn DocumentText;

    /// Document offset under a screen coordinate, if any.
    fn pos_at_coords(&self, x: f64, y: f64) -> Option<usize>;
}

/// What changed since the previous update, delivered once per change batch.
pub struct ViewUpdate<'a> {
    pub view: &'a dyn EditorView,
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

impl<'a> ViewUpdate<'a> {
    /// An update in which nothing relevant changed.
    pub fn new(view: &'a dyn EditorView) -> Self {
        Self {
            view,
            doc_changed: false,
            viewport_changed: false,
            selection_set: false,
        }
    }

    #[must_use]
    pub fn doc_changed(mut self) -> Self {
        self.doc_changed = true;
        self
    }

    #[must_use]
    pub fn viewport_changed(mut self) -> Self {
        self.viewport_changed = true;
        self
    }

    #[must_use]
    pub fn selection_set(mut self) -> Self {
        self.selection_set = true;
        self
    }

    pub fn affects_decorations(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_set
    }
}

/// Host state the engine reads or drives, handed over at construction.
pub struct HostBindings {
    live_preview: Box<dyn Fn() -> Option<bool>>,
    cursor: CursorSetter,
}

impl HostBindings {
    /// `live_preview` reports the display mode; `None` means the mode could
    /// not be read. `set_cursor` moves the host's text cursor.
    pub fn new(
        live_preview: impl Fn() -> Option<bool> + 'static,
        set_cursor: impl Fn(usize) + 'static,
    ) -> Self {
        Self {
            live_preview: Box::new(live_preview),
            cursor: CursorSetter::new(set_cursor),
        }
    }

    pub fn live_preview(&self) -> Option<bool> {
        (self.live_preview)()
    }

    pub fn cursor(&self) -> &CursorSetter {
        &self.cursor
    }
}

impl std::fmt::Debug for HostBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBindings")
            .field("live_preview", &self.live_preview())
            .finish_non_exhaustive()
    }
}
