//! Annotation nodes and the parser seam.
//!
//! The compiler never looks at a concrete syntax tree. It asks an
//! [`AnnotationParser`] for a flat, pre-ordered list of [`AnnotationNode`]s,
//! which keeps the walk independent of the tree library behind it.

use criticmarkup_live_syntax::{FENCE_WIDTH, SyntaxKind};
use rowan::WalkEvent;

use crate::span::Span;

/// What an annotation node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The synthetic tree root. Never rendered.
    Root,
    Deletion,
    Addition,
    Comment,
    Highlight,
    Substitution,
    /// The `~>` separator inside a substitution.
    DivideSubs,
    /// Anything the parser reports that this engine has no name for.
    Unknown,
}

impl From<SyntaxKind> for NodeKind {
    fn from(kind: SyntaxKind) -> Self {
        match kind {
            SyntaxKind::CRITICMARKUP => NodeKind::Root,
            SyntaxKind::DELETION => NodeKind::Deletion,
            SyntaxKind::ADDITION => NodeKind::Addition,
            SyntaxKind::COMMENT => NodeKind::Comment,
            SyntaxKind::HIGHLIGHT => NodeKind::Highlight,
            SyntaxKind::SUBSTITUTION => NodeKind::Substitution,
            SyntaxKind::DIVIDE_SUBS => NodeKind::DivideSubs,
            _ => NodeKind::Unknown,
        }
    }
}

/// A parsed annotation with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationNode {
    pub kind: NodeKind,
    pub span: Span,
}

impl AnnotationNode {
    pub fn new(kind: NodeKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    /// Move a node parsed from a substring back into document coordinates.
    #[must_use]
    pub fn offset(self, by: usize) -> Self {
        Self {
            kind: self.kind,
            span: self.span.offset(by),
        }
    }
}

/// Source of annotation nodes for a piece of text.
pub trait AnnotationParser {
    /// Parse `text` and return its nodes in depth-first pre-order: a node,
    /// then its children, then its next sibling. Spans are relative to `text`.
    fn parse(&self, text: &str) -> Vec<AnnotationNode>;

    /// Byte width of each opening and closing fence in this grammar.
    fn fence_width(&self) -> usize {
        FENCE_WIDTH
    }
}

/// [`AnnotationParser`] over the Rowan tree from `criticmarkup-live-syntax`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticmarkupParser;

impl AnnotationParser for CriticmarkupParser {
    fn parse(&self, text: &str) -> Vec<AnnotationNode> {
        let tree = criticmarkup_live_syntax::parse(text);
        tree.preorder()
            .filter_map(|event| match event {
                WalkEvent::Enter(node) => Some(node),
                WalkEvent::Leave(_) => None,
            })
            .map(|node| {
                let range = node.text_range();
                AnnotationNode::new(
                    node.kind().into(),
                    usize::from(range.start()),
                    usize::from(range.end()),
                )
            })
            .collect()
    }

    fn fence_width(&self) -> usize {
        FENCE_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parser_yields_root_first() {
        let nodes = CriticmarkupParser.parse("plain");
        assert_eq!(nodes, vec![AnnotationNode::new(NodeKind::Root, 0, 5)]);
    }

    #[test]
    fn parser_yields_preorder() {
        let nodes = CriticmarkupParser.parse("{~~old~>new~~} {++x++}");
        assert_eq!(
            nodes,
            vec![
                AnnotationNode::new(NodeKind::Root, 0, 22),
                AnnotationNode::new(NodeKind::Substitution, 0, 14),
                AnnotationNode::new(NodeKind::DivideSubs, 6, 8),
                AnnotationNode::new(NodeKind::Addition, 15, 22),
            ]
        );
    }

    #[test]
    fn token_kinds_map_to_unknown() {
        assert_eq!(NodeKind::from(SyntaxKind::TEXT), NodeKind::Unknown);
        assert_eq!(NodeKind::from(SyntaxKind::ADDITION_OPEN), NodeKind::Unknown);
    }

    #[test]
    fn offset_moves_node_into_document_coordinates() {
        let node = AnnotationNode::new(NodeKind::Comment, 0, 9).offset(40);
        assert_eq!(node.span, Span::new(40, 49));
        assert_eq!(node.kind, NodeKind::Comment);
    }

    #[test]
    fn default_fence_width_is_three() {
        assert_eq!(CriticmarkupParser.fence_width(), 3);
    }
}
