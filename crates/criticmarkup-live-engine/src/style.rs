//! Style classes emitted for stylesheets.
//!
//! The strings are a stable contract with whatever stylesheet the host ships.

use crate::node::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// Every fence and separator widget.
    Marker,
    Deletion,
    Addition,
    Comment,
    Highlight,
    Substitution,
    /// Extra class on the separator widget that draws the glyph.
    DivideSubs,
}

impl StyleClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            StyleClass::Marker => "criticmarkup-marker",
            StyleClass::Deletion => "criticmarkup-deletion",
            StyleClass::Addition => "criticmarkup-addition",
            StyleClass::Comment => "criticmarkup-comment",
            StyleClass::Highlight => "criticmarkup-highlight",
            StyleClass::Substitution => "criticmarkup-substitution",
            StyleClass::DivideSubs => "dividesubs",
        }
    }

    /// Class for the marked content of a node. Kinds without a class of
    /// their own (root, separator, unknown) get `None`.
    pub const fn for_node(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Deletion => Some(StyleClass::Deletion),
            NodeKind::Addition => Some(StyleClass::Addition),
            NodeKind::Comment => Some(StyleClass::Comment),
            NodeKind::Highlight => Some(StyleClass::Highlight),
            NodeKind::Substitution => Some(StyleClass::Substitution),
            NodeKind::Root | NodeKind::DivideSubs | NodeKind::Unknown => None,
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NodeKind::Deletion, Some("criticmarkup-deletion"))]
    #[case(NodeKind::Addition, Some("criticmarkup-addition"))]
    #[case(NodeKind::Comment, Some("criticmarkup-comment"))]
    #[case(NodeKind::Highlight, Some("criticmarkup-highlight"))]
    #[case(NodeKind::Substitution, Some("criticmarkup-substitution"))]
    #[case(NodeKind::Unknown, None)]
    #[case(NodeKind::Root, None)]
    fn node_kind_to_class(#[case] kind: NodeKind, #[case] expected: Option<&str>) {
        assert_eq!(StyleClass::for_node(kind).map(StyleClass::as_str), expected);
    }

    #[test]
    fn marker_class_is_stable() {
        assert_eq!(StyleClass::Marker.to_string(), "criticmarkup-marker");
    }
}
