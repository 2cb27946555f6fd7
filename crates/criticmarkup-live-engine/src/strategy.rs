//! Render strategies: how one annotation node becomes decorations.
//!
//! Two strategies exist and differ in what stylesheets see:
//!
//! - [`FenceMarkStrategy`] hides both fences and marks the content with a
//!   single class. Substitutions keep their text and get a glyph in place of
//!   `~>`.
//! - [`SplitSubstitutionStrategy`] does the same for every kind except
//!   substitutions, which are replaced by one widget holding separate spans
//!   for the old and new text.

use criticmarkup_live_syntax::SUBSTITUTION_DIVIDER;

use crate::decoration::Decoration;
use crate::node::{AnnotationNode, NodeKind};
use crate::span::Span;
use crate::style::StyleClass;
use crate::widget::{CursorSetter, Widget, WidgetKind};

/// Everything a strategy may read while emitting for one visible range.
pub struct EmitContext<'a> {
    /// Text of the visible range being compiled.
    pub text: &'a str,
    /// Document offset of `text[0]`.
    pub base: usize,
    pub fence_width: usize,
    pub glyph: &'a str,
    pub cursor: &'a CursorSetter,
}

impl EmitContext<'_> {
    /// Slice a document-coordinate span out of the visible text.
    fn slice(&self, span: Span) -> Option<&str> {
        let start = span.start.checked_sub(self.base)?;
        let end = span.end.checked_sub(self.base)?;
        self.text.get(start..end)
    }
}

pub trait AnnotationRenderStrategy {
    /// Append the decorations for `node`. Root nodes and nodes under the
    /// selection never reach a strategy.
    fn emit(&self, node: &AnnotationNode, cx: &EmitContext<'_>, out: &mut Vec<Decoration>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FenceMarkStrategy;

impl AnnotationRenderStrategy for FenceMarkStrategy {
    fn emit(&self, node: &AnnotationNode, cx: &EmitContext<'_>, out: &mut Vec<Decoration>) {
        match node.kind {
            NodeKind::Root => {}
            NodeKind::DivideSubs => emit_separator(node, cx, out),
            _ => emit_fenced(node, cx, out),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitSubstitutionStrategy;

impl AnnotationRenderStrategy for SplitSubstitutionStrategy {
    fn emit(&self, node: &AnnotationNode, cx: &EmitContext<'_>, out: &mut Vec<Decoration>) {
        match node.kind {
            NodeKind::Root => {}
            // Drawn by the enclosing substitution widget.
            NodeKind::DivideSubs => {}
            NodeKind::Substitution => emit_split_substitution(node, cx, out),
            _ => emit_fenced(node, cx, out),
        }
    }
}

fn emit_separator(node: &AnnotationNode, cx: &EmitContext<'_>, out: &mut Vec<Decoration>) {
    let Some(text) = cx.slice(node.span) else {
        return;
    };
    out.push(Decoration::replace(
        node.span,
        Widget::separator(text, cx.glyph, cx.cursor.clone()),
    ));
}

/// Hide both fences and mark whatever lies between them.
fn emit_fenced(node: &AnnotationNode, cx: &EmitContext<'_>, out: &mut Vec<Decoration>) {
    let Some((open, inner, close)) = fence_spans(node.span, cx.fence_width) else {
        log::debug!(
            "{:?} at {} is narrower than its fences, skipping",
            node.kind,
            node.span
        );
        return;
    };
    let Some(content) = cx.slice(inner) else {
        return;
    };

    out.push(Decoration::replace(
        open,
        Widget::fence(content, cx.cursor.clone()),
    ));
    out.push(Decoration::replace(
        close,
        Widget::fence(content, cx.cursor.clone()),
    ));
    if !inner.is_empty() {
        out.push(Decoration::mark(inner, StyleClass::for_node(node.kind)));
    }
}

fn emit_split_substitution(node: &AnnotationNode, cx: &EmitContext<'_>, out: &mut Vec<Decoration>) {
    let Some((_, inner, _)) = fence_spans(node.span, cx.fence_width) else {
        return;
    };
    let Some(content) = cx.slice(inner) else {
        return;
    };
    let Some((before, after)) = content.split_once(SUBSTITUTION_DIVIDER) else {
        emit_fenced(node, cx, out);
        return;
    };

    let kind = WidgetKind::Substitution {
        before: before.to_string(),
        after: after.to_string(),
        glyph: cx.glyph.to_string(),
    };
    out.push(Decoration::replace(
        node.span,
        Widget::new(kind, content, cx.cursor.clone()),
    ));
}

/// Split a node span into opening fence, content and closing fence.
fn fence_spans(span: Span, width: usize) -> Option<(Span, Span, Span)> {
    if span.len() < 2 * width {
        return None;
    }
    let inner = Span::new(span.start + width, span.end - width);
    Some((
        Span::new(span.start, inner.start),
        inner,
        Span::new(inner.end, span.end),
    ))
}
