//! Tree-to-decoration compiler.
//!
//! For each visible range the compiler parses just that substring, moves the
//! nodes back into document coordinates and walks them in pre-order:
//!
//! 1. The root node is skipped.
//! 2. A node touched by any selection range is skipped, leaving its raw
//!    markup on screen for editing.
//! 3. Everything else is handed to the render strategy.
//!
//! Output from all ranges is merged into one [`DecorationSet`]. Work is
//! bounded by the size of the visible ranges, not the document.

use crate::decoration::{Decoration, DecorationSet};
use crate::document::DocumentText;
use crate::node::{AnnotationParser, CriticmarkupParser, NodeKind};
use crate::overlap::overlaps;
use crate::span::{Selection, VisibleRange};
use crate::strategy::{AnnotationRenderStrategy, EmitContext, FenceMarkStrategy};
use crate::widget::{CursorSetter, SEPARATOR_GLYPH};

pub struct Compiler {
    parser: Box<dyn AnnotationParser>,
    strategy: Box<dyn AnnotationRenderStrategy>,
    separator_glyph: String,
    cursor: CursorSetter,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Box::new(FenceMarkStrategy))
    }
}

impl Compiler {
    pub fn new(strategy: Box<dyn AnnotationRenderStrategy>) -> Self {
        Self {
            parser: Box::new(CriticmarkupParser),
            strategy,
            separator_glyph: SEPARATOR_GLYPH.to_string(),
            cursor: CursorSetter::noop(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn AnnotationParser>) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_separator_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.separator_glyph = glyph.into();
        self
    }

    /// Setter handed to every widget for shift-press cursor placement.
    #[must_use]
    pub fn with_cursor_setter(mut self, cursor: CursorSetter) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn compile<D>(
        &self,
        visible_ranges: &[VisibleRange],
        doc: &D,
        selection: &Selection,
    ) -> DecorationSet
    where
        D: DocumentText + ?Sized,
    {
        let mut out = Vec::new();

        for range in visible_ranges {
            let Some(text) = doc.slice(range.from, range.to) else {
                log::debug!(
                    "visible range {}..{} is not readable, skipping",
                    range.from,
                    range.to
                );
                continue;
            };
            self.compile_range(&text, range.from, selection, &mut out);
        }

        let doc_len = doc.len();
        out.retain(|decoration| {
            let span = decoration.span();
            let in_bounds = span.start <= span.end && span.end <= doc_len;
            if !in_bounds {
                log::warn!("dropping decoration at {span} outside document of {doc_len} bytes");
            }
            in_bounds
        });

        log::trace!(
            "compiled {} decorations over {} visible ranges",
            out.len(),
            visible_ranges.len()
        );
        DecorationSet::from_unsorted(out)
    }

    fn compile_range(
        &self,
        text: &str,
        base: usize,
        selection: &Selection,
        out: &mut Vec<Decoration>,
    ) {
        let cx = EmitContext {
            text,
            base,
            fence_width: self.parser.fence_width(),
            glyph: &self.separator_glyph,
            cursor: &self.cursor,
        };

        for node in self.parser.parse(text) {
            let node = node.offset(base);
            if node.kind == NodeKind::Root {
                continue;
            }
            if overlaps(selection, node.span.start, node.span.end) {
                continue;
            }
            self.strategy.emit(&node, &cx, out);
        }
    }
}
