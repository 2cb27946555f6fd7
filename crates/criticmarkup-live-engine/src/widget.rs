//! Replacement widgets and their visual rendering.
//!
//! Widgets compare equal when their payload text is equal, wherever they sit
//! in the document. The host uses that equality to decide whether to redraw,
//! so an edit elsewhere in the document never re-creates an unchanged marker.

use std::fmt;
use std::rc::Rc;

use crate::style::StyleClass;
use crate::view::EditorView;

/// Default separator glyph drawn in place of `~>`.
pub const SEPARATOR_GLYPH: &str = "🠚";

/// Callback that moves the host's text cursor to a document offset.
#[derive(Clone)]
pub struct CursorSetter(Rc<dyn Fn(usize)>);

impl CursorSetter {
    pub fn new(set: impl Fn(usize) + 'static) -> Self {
        Self(Rc::new(set))
    }

    /// A setter that does nothing, for hosts without a cursor.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn set(&self, pos: usize) {
        (self.0)(pos)
    }
}

impl fmt::Debug for CursorSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CursorSetter")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// An invisible opening or closing fence.
    Fence,
    /// The substitution separator, drawn as `glyph`.
    Separator { glyph: String },
    /// A whole substitution drawn as old text, glyph, new text.
    Substitution {
        before: String,
        after: String,
        glyph: String,
    },
}

/// Input the host forwards to a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    PointerDown { x: f64, y: f64, shift: bool },
    Other,
}

/// The content of a `Replace` decoration.
#[derive(Debug, Clone)]
pub struct Widget {
    kind: WidgetKind,
    text: String,
    cursor: CursorSetter,
}

impl Widget {
    pub fn new(kind: WidgetKind, text: impl Into<String>, cursor: CursorSetter) -> Self {
        Self {
            kind,
            text: text.into(),
            cursor,
        }
    }

    pub fn fence(text: impl Into<String>, cursor: CursorSetter) -> Self {
        Self::new(WidgetKind::Fence, text, cursor)
    }

    pub fn separator(text: impl Into<String>, glyph: &str, cursor: CursorSetter) -> Self {
        Self::new(
            WidgetKind::Separator {
                glyph: glyph.to_string(),
            },
            text,
            cursor,
        )
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    /// The payload used for change detection. For fences this is the inner
    /// text of the annotation, not anything that is drawn.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn render(&self) -> VisualElement {
        match &self.kind {
            WidgetKind::Fence => VisualElement::span(vec![StyleClass::Marker]),
            WidgetKind::Separator { glyph } => {
                VisualElement::span(vec![StyleClass::Marker, StyleClass::DivideSubs])
                    .with_text(glyph)
            }
            WidgetKind::Substitution {
                before,
                after,
                glyph,
            } => VisualElement::span(vec![StyleClass::Substitution]).with_children(vec![
                VisualElement::span(vec![StyleClass::Deletion]).with_text(before),
                VisualElement::span(vec![StyleClass::Marker, StyleClass::DivideSubs])
                    .with_text(glyph),
                VisualElement::span(vec![StyleClass::Addition]).with_text(after),
            ]),
        }
    }

    /// Decide whether the host should ignore `event` on this widget.
    ///
    /// A plain press is swallowed so clicking a collapsed marker does not
    /// expand it. A shift-press moves the cursor to the pressed position and
    /// lets the host handle the event as usual.
    pub fn ignore_event(&self, event: &WidgetEvent, view: &dyn EditorView) -> bool {
        match *event {
            WidgetEvent::PointerDown { x, y, shift: true } => {
                if let Some(pos) = view.pos_at_coords(x, y) {
                    log::trace!("shift-press on widget, moving cursor to {pos}");
                    self.cursor.set(pos);
                }
                false
            }
            _ => true,
        }
    }
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Widget {}

/// A host-independent description of what a widget draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualElement {
    pub tag: &'static str,
    pub classes: Vec<StyleClass>,
    pub text: Option<String>,
    pub children: Vec<VisualElement>,
}

impl VisualElement {
    pub fn span(classes: Vec<StyleClass>) -> Self {
        Self {
            tag: "span",
            classes,
            text: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<VisualElement>) -> Self {
        self.children = children;
        self
    }

    /// All visible text, depth first.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    pub fn to_html(&self) -> String {
        let classes: Vec<&str> = self.classes.iter().map(|c| c.as_str()).collect();
        let mut html = format!(
            "<{} class=\"{}\">",
            self.tag,
            html_escape::encode_double_quoted_attribute(&classes.join(" "))
        );
        if let Some(text) = &self.text {
            html.push_str(&html_escape::encode_text(text));
        }
        for child in &self.children {
            html.push_str(&child.to_html());
        }
        html.push_str(&format!("</{}>", self.tag));
        html
    }
}
