//! Decoration instructions and the sorted set handed to the host.

use std::fmt;

use crate::span::Span;
use crate::style::StyleClass;
use crate::widget::{Widget, WidgetKind};

/// Attribute carried by every marked span.
pub const DATA_CONTENTS: (&str, &str) = ("data-contents", "string");

/// One instruction for the host's display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// Hide `span` and draw `widget` in its place.
    Replace {
        span: Span,
        widget: Widget,
        inclusive: bool,
        block: bool,
    },
    /// Style `span` without hiding its text.
    Mark {
        span: Span,
        class: Option<StyleClass>,
        attributes: Vec<(&'static str, &'static str)>,
    },
}

impl Decoration {
    /// An inline, non-inclusive replacement.
    pub fn replace(span: Span, widget: Widget) -> Self {
        Decoration::Replace {
            span,
            widget,
            inclusive: false,
            block: false,
        }
    }

    pub fn mark(span: Span, class: Option<StyleClass>) -> Self {
        Decoration::Mark {
            span,
            class,
            attributes: vec![DATA_CONTENTS],
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decoration::Replace { span, .. } | Decoration::Mark { span, .. } => *span,
        }
    }

    pub fn widget(&self) -> Option<&Widget> {
        match self {
            Decoration::Replace { widget, .. } => Some(widget),
            Decoration::Mark { .. } => None,
        }
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoration::Replace { span, widget, .. } => {
                let kind = match widget.kind() {
                    WidgetKind::Fence => "fence",
                    WidgetKind::Separator { .. } => "separator",
                    WidgetKind::Substitution { .. } => "substitution",
                };
                write!(f, "Replace({span}, {kind} {:?})", widget.text())
            }
            Decoration::Mark { span, class, .. } => match class {
                Some(class) => write!(f, "Mark({span}, {class})"),
                None => write!(f, "Mark({span})"),
            },
        }
    }
}

/// Decorations ordered by start offset, ties kept in emission order.
///
/// A set is never edited in place. Each recompute builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_unsorted(mut decorations: Vec<Decoration>) -> Self {
        // Stable, so fences and marks starting together keep traversal order
        decorations.sort_by_key(|d| d.span().start);
        Self { decorations }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.decorations
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for DecorationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decoration in &self.decorations {
            writeln!(f, "{decoration}")?;
        }
        Ok(())
    }
}
